//! Request validation from the API document's per-field rules.

use crate::config::ValidationRule;
use crate::error::AppError;
use regex::Regex;
use std::collections::HashMap;

pub struct RequestValidator;

impl RequestValidator {
    /// Validate every rule. A required field must be present and not blank.
    pub fn validate(
        fields: &[(&str, &str)],
        rules: &HashMap<String, ValidationRule>,
    ) -> Result<(), AppError> {
        for (col, rule) in rules {
            match fields.iter().find(|(name, _)| name == col) {
                Some((_, value)) => validate_field(col, value, rule)?,
                None if rule.required == Some(true) => {
                    return Err(AppError::Validation(format!("{} is required", col)));
                }
                None => {}
            }
        }
        Ok(())
    }

    /// Validate only the fields supplied (for update). Missing fields are not enforced.
    pub fn validate_partial(
        fields: &[(&str, &str)],
        rules: &HashMap<String, ValidationRule>,
    ) -> Result<(), AppError> {
        for (col, value) in fields {
            if let Some(rule) = rules.get(*col) {
                validate_field(col, value, rule)?;
            }
        }
        Ok(())
    }
}

fn validate_field(col: &str, v: &str, rule: &ValidationRule) -> Result<(), AppError> {
    if rule.required == Some(true) && v.trim().is_empty() {
        return Err(AppError::Validation(format!("{} is required", col)));
    }
    let len = v.chars().count();
    if let Some(max) = rule.max_length {
        if len > max as usize {
            return Err(AppError::Validation(format!(
                "{} must be at most {} characters",
                col, max
            )));
        }
    }
    if let Some(min) = rule.min_length {
        if len < min as usize {
            return Err(AppError::Validation(format!(
                "{} must be at least {} characters",
                col, min
            )));
        }
    }
    if let Some(ref pattern) = rule.pattern {
        let re = Regex::new(pattern).map_err(|_| AppError::Validation(format!("invalid pattern for {}", col)))?;
        if !re.is_match(v) {
            return Err(AppError::Validation(format!("{} does not match required pattern", col)));
        }
    }
    if let Some(ref allowed) = rule.allowed {
        if !allowed.iter().any(|a| a == v) {
            return Err(AppError::Validation(format!("{} must be one of: {}", col, allowed.join(", "))));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rules() -> HashMap<String, ValidationRule> {
        let mut m = HashMap::new();
        m.insert(
            "fname".to_string(),
            ValidationRule {
                required: Some(true),
                max_length: Some(5),
                ..Default::default()
            },
        );
        m.insert(
            "lname".to_string(),
            ValidationRule {
                required: Some(true),
                pattern: Some("^[A-Z]".into()),
                ..Default::default()
            },
        );
        m
    }

    #[test]
    fn accepts_valid_fields() {
        assert!(RequestValidator::validate(&[("fname", "Doug"), ("lname", "Farrell")], &rules()).is_ok());
    }

    #[test]
    fn blank_required_field_fails() {
        let err = RequestValidator::validate(&[("fname", "  "), ("lname", "Farrell")], &rules()).unwrap_err();
        assert_eq!(err.to_string(), "validation: fname is required");
    }

    #[test]
    fn missing_required_field_fails_full_but_not_partial() {
        assert!(RequestValidator::validate(&[("fname", "Doug")], &rules()).is_err());
        assert!(RequestValidator::validate_partial(&[("fname", "Doug")], &rules()).is_ok());
    }

    #[test]
    fn length_counts_characters() {
        assert!(RequestValidator::validate_partial(&[("fname", "Zoë")], &rules()).is_ok());
        assert!(RequestValidator::validate_partial(&[("fname", "Douglas")], &rules()).is_err());
    }

    #[test]
    fn pattern_and_allowed_are_enforced() {
        assert!(RequestValidator::validate_partial(&[("lname", "farrell")], &rules()).is_err());

        let mut r = HashMap::new();
        r.insert(
            "lname".to_string(),
            ValidationRule {
                allowed: Some(vec!["Farrell".into(), "Easter".into()]),
                ..Default::default()
            },
        );
        assert!(RequestValidator::validate_partial(&[("lname", "Easter")], &r).is_ok());
        assert!(RequestValidator::validate_partial(&[("lname", "Brockman")], &r).is_err());
    }
}
