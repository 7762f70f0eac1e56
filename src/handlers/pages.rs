//! Static HTML pages. No business logic.

use crate::state::AppState;
use axum::{extract::State, response::Html};

const HOME_TEMPLATE: &str = include_str!("../../templates/home.html");
const HOME_SCRIPT_TEMPLATE: &str = include_str!("../../templates/home_script.html");
const ERROR_TEMPLATE: &str = include_str!("../../templates/error.html");

const NO_PEOPLE_NOTICE: &str = "<p>No people collection is configured.</p>";

/// Home page; its script reads from the configured people collection.
pub async fn home(State(state): State<AppState>) -> Html<String> {
    Html(render_home(state.api.people_path().as_deref()))
}

pub async fn error_page() -> Html<&'static str> {
    Html(ERROR_TEMPLATE)
}

fn render_home(people_path: Option<&str>) -> String {
    let script = match people_path {
        Some(path) => HOME_SCRIPT_TEMPLATE.replace("{{people_path}}", &js_string(path)),
        None => NO_PEOPLE_NOTICE.to_string(),
    };
    HOME_TEMPLATE.replace("{{people_script}}", &script)
}

/// Quoted JavaScript string literal that is also safe inside a `<script>` element.
fn js_string(value: &str) -> String {
    serde_json::Value::from(value)
        .to_string()
        .replace('<', "\\u003c")
        .replace('>', "\\u003e")
}
