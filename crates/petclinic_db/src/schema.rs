//! Schema creation and seeding.
//!
//! The scripts under `sql/` are embedded in the binary. They are written to
//! be re-runnable: tables use `CREATE TABLE IF NOT EXISTS` and seed rows use
//! `INSERT IGNORE`, so initializing an already initialized database leaves
//! it unchanged.

use sqlx::MySqlPool;

use crate::{DbError, DbResult, InitializationMode};

#[cfg(test)]
#[path = "schema_tests.rs"]
mod tests;

const SCHEMA_SQL: &str = include_str!("../sql/schema.sql");
const DATA_SQL: &str = include_str!("../sql/data.sql");

/// Split a script into statements.
///
/// Statements end at `;` outside single-quoted strings. Lines starting with
/// `--` are comments and are dropped; empty statements are skipped.
pub fn split_statements(script: &str) -> Vec<String> {
    let mut statements = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    for line in script.lines() {
        if !in_quotes && line.trim_start().starts_with("--") {
            continue;
        }

        for c in line.chars() {
            match c {
                '\'' => {
                    in_quotes = !in_quotes;
                    current.push(c);
                }
                ';' if !in_quotes => {
                    push_statement(&mut statements, &mut current);
                }
                _ => current.push(c),
            }
        }
        current.push('\n');
    }
    push_statement(&mut statements, &mut current);

    statements
}

fn push_statement(statements: &mut Vec<String>, current: &mut String) {
    let statement = current.trim();
    if !statement.is_empty() {
        statements.push(statement.to_string());
    }
    current.clear();
}

async fn run_script(pool: &MySqlPool, name: &'static str, script: &str) -> DbResult<usize> {
    let statements = split_statements(script);
    for (index, statement) in statements.iter().enumerate() {
        sqlx::raw_sql(statement)
            .execute(pool)
            .await
            .map_err(|source| DbError::Script {
                script: name,
                index,
                source,
            })?;
    }
    Ok(statements.len())
}

/// Create and seed the schema if `mode` asks for it.
///
/// Returns whether the scripts ran.
pub async fn initialize_schema(pool: &MySqlPool, mode: InitializationMode) -> DbResult<bool> {
    if !mode.runs_scripts() {
        tracing::info!(mode = %mode, "Skipping schema initialization");
        return Ok(false);
    }

    let tables = run_script(pool, "schema.sql", SCHEMA_SQL).await?;
    let rows = run_script(pool, "data.sql", DATA_SQL).await?;

    tracing::info!(
        schema_statements = tables,
        data_statements = rows,
        "Schema initialized"
    );

    Ok(true)
}
