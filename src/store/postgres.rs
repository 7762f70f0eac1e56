//! PostgreSQL person store. The `person` table lives in the schema from `PEOPLE_SCHEMA` (default `public`).

use crate::error::AppError;
use crate::model::{NewPerson, Person};
use crate::store::PersonStore;
use async_trait::async_trait;
use chrono::NaiveDateTime;
use sqlx::ConnectOptions;
use sqlx::PgPool;
use std::str::FromStr;

type PersonRow = (i64, String, String, NaiveDateTime);

const PERSON_COLUMNS: &str = r#"person_id, fname, lname, "timestamp""#;

/// Transaction-scoped lock keyed on the name pair. Concurrent creates of the same
/// person queue here, so the lookup below sees any row a competing create committed.
const NAME_LOCK_SQL: &str = "SELECT pg_advisory_xact_lock(hashtext($1 || ' ' || $2))";

fn person_from_row((person_id, fname, lname, timestamp): PersonRow) -> Person {
    Person {
        person_id,
        fname,
        lname,
        timestamp,
    }
}

#[derive(Clone)]
pub struct PgPersonStore {
    pool: PgPool,
    schema: String,
    /// Schema-qualified table name, e.g. `"public"."person"`.
    table: String,
}

impl PgPersonStore {
    pub fn new(pool: PgPool, schema: &str) -> Self {
        PgPersonStore {
            pool,
            schema: schema.to_string(),
            table: format!("{}.{}", quote_ident(schema), quote_ident("person")),
        }
    }

    /// Create the schema and `person` table if missing. Names are not unique at the storage level;
    /// the duplicate check happens on create.
    pub async fn ensure_people_table(&self) -> Result<(), AppError> {
        sqlx::query(&format!("CREATE SCHEMA IF NOT EXISTS {}", quote_ident(&self.schema)))
            .execute(&self.pool)
            .await?;
        let ddl = format!(
            r#"
            CREATE TABLE IF NOT EXISTS {} (
                person_id BIGSERIAL PRIMARY KEY,
                fname VARCHAR(32) NOT NULL,
                lname VARCHAR(32) NOT NULL,
                "timestamp" TIMESTAMP NOT NULL DEFAULT NOW()
            )
            "#,
            self.table
        );
        sqlx::query(&ddl).execute(&self.pool).await?;
        let index = format!(
            "CREATE INDEX IF NOT EXISTS person_lname_idx ON {} (lname)",
            self.table
        );
        if let Err(e) = sqlx::query(&index).execute(&self.pool).await {
            tracing::warn!(error = %e, "could not create lname index");
        }
        Ok(())
    }
}

#[async_trait]
impl PersonStore for PgPersonStore {
    async fn list_by_last_name(&self) -> Result<Vec<Person>, AppError> {
        let sql = format!(
            "SELECT {} FROM {} ORDER BY lname ASC, person_id ASC",
            PERSON_COLUMNS, self.table
        );
        tracing::debug!(sql = %sql, "query");
        let rows: Vec<PersonRow> = sqlx::query_as(&sql).fetch_all(&self.pool).await?;
        Ok(rows.into_iter().map(person_from_row).collect())
    }

    async fn get(&self, person_id: i64) -> Result<Option<Person>, AppError> {
        let sql = format!("SELECT {} FROM {} WHERE person_id = $1", PERSON_COLUMNS, self.table);
        tracing::debug!(sql = %sql, person_id, "query");
        let row: Option<PersonRow> = sqlx::query_as(&sql)
            .bind(person_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(person_from_row))
    }

    /// Lookup and insert run in one transaction holding [`NAME_LOCK_SQL`]'s advisory lock
    /// until commit or rollback. READ COMMITTED alone would let two creates both miss.
    async fn insert_if_absent(
        &self,
        new: &NewPerson,
        timestamp: NaiveDateTime,
    ) -> Result<Option<Person>, AppError> {
        let mut tx = self.pool.begin().await?;
        tracing::debug!(sql = NAME_LOCK_SQL, "query (tx)");
        sqlx::query(NAME_LOCK_SQL)
            .bind(&new.fname)
            .bind(&new.lname)
            .execute(&mut *tx)
            .await?;
        let lookup = format!(
            "SELECT person_id FROM {} WHERE fname = $1 AND lname = $2 LIMIT 1",
            self.table
        );
        tracing::debug!(sql = %lookup, fname = %new.fname, lname = %new.lname, "query (tx)");
        let existing: Option<(i64,)> = sqlx::query_as(&lookup)
            .bind(&new.fname)
            .bind(&new.lname)
            .fetch_optional(&mut *tx)
            .await?;
        if existing.is_some() {
            // tx rolls back on drop
            return Ok(None);
        }

        let insert = format!(
            r#"INSERT INTO {} (fname, lname, "timestamp") VALUES ($1, $2, $3) RETURNING {}"#,
            self.table, PERSON_COLUMNS
        );
        tracing::debug!(sql = %insert, "query (tx)");
        let row: PersonRow = sqlx::query_as(&insert)
            .bind(&new.fname)
            .bind(&new.lname)
            .bind(timestamp)
            .fetch_one(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(Some(person_from_row(row)))
    }

    async fn update_first_name(
        &self,
        person_id: i64,
        fname: &str,
        timestamp: NaiveDateTime,
    ) -> Result<Option<Person>, AppError> {
        let sql = format!(
            r#"UPDATE {} SET fname = $1, "timestamp" = $2 WHERE person_id = $3 RETURNING {}"#,
            self.table, PERSON_COLUMNS
        );
        tracing::debug!(sql = %sql, person_id, "query");
        let row: Option<PersonRow> = sqlx::query_as(&sql)
            .bind(fname)
            .bind(timestamp)
            .bind(person_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(person_from_row))
    }

    async fn delete(&self, person_id: i64) -> Result<Option<Person>, AppError> {
        let sql = format!(
            "DELETE FROM {} WHERE person_id = $1 RETURNING {}",
            self.table, PERSON_COLUMNS
        );
        tracing::debug!(sql = %sql, person_id, "query");
        let row: Option<PersonRow> = sqlx::query_as(&sql)
            .bind(person_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(person_from_row))
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").fetch_optional(&self.pool).await?;
        Ok(())
    }
}

/// Ensure the database in `database_url` exists; create it if not. Connects to the
/// default `postgres` database to run CREATE DATABASE. Call before creating the main pool.
pub async fn ensure_database_exists(database_url: &str) -> Result<(), AppError> {
    let (admin_url, db_name) = parse_db_name_from_url(database_url)?;
    if db_name.is_empty() || db_name == "postgres" {
        return Ok(());
    }
    let opts = sqlx::postgres::PgConnectOptions::from_str(&admin_url)
        .map_err(|e| AppError::BadRequest(format!("invalid DATABASE_URL: {}", e)))?;
    let mut conn: sqlx::PgConnection = opts.connect().await?;
    let exists: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM pg_database WHERE datname = $1)")
        .bind(&db_name)
        .fetch_one(&mut conn)
        .await?;
    if !exists.0 {
        tracing::info!(database = %db_name, "creating database");
        sqlx::query(&format!("CREATE DATABASE {}", quote_ident(&db_name)))
            .execute(&mut conn)
            .await?;
    }
    Ok(())
}

/// Split a connection URL into (admin URL on the `postgres` database, target database name).
fn parse_db_name_from_url(url: &str) -> Result<(String, String), AppError> {
    let scheme_end = url.find("://").map(|i| i + 3).unwrap_or(0);
    let path_start = url[scheme_end..]
        .find('/')
        .map(|i| scheme_end + i + 1)
        .ok_or_else(|| AppError::BadRequest("DATABASE_URL: no path".into()))?;
    let path_and_query = url.get(path_start..).unwrap_or("");
    let (db_part, query) = match path_and_query.split_once('?') {
        Some((db, q)) => (db, Some(q)),
        None => (path_and_query, None),
    };
    let base = url.get(..path_start).unwrap_or(url);
    let admin_url = match query {
        Some(q) => format!("{}postgres?{}", base, q),
        None => format!("{}postgres", base),
    };
    Ok((admin_url, db_part.trim().to_string()))
}

fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}
