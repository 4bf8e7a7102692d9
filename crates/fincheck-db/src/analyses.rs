//! Database operations for the `analyses` table.
//!
//! The table is append-only: there is an insert and a full listing, nothing else.

use chrono::{DateTime, Utc};
use fincheck_core::{AnalysisRecord, NewAnalysis};
use sqlx::SqlitePool;

use crate::DbError;

/// A row from the `analyses` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct AnalysisRow {
    pub id: i64,
    pub company_name: String,
    pub description: String,
    pub verdict: String,
    pub date: String,
    pub created_at: DateTime<Utc>,
}

impl From<AnalysisRow> for AnalysisRecord {
    fn from(row: AnalysisRow) -> Self {
        Self {
            id: row.id,
            company_name: row.company_name,
            description: row.description,
            verdict: row.verdict,
            date: row.date,
            created_at: row.created_at,
        }
    }
}

/// Insert a new analysis and return the stored record.
///
/// The id and `created_at` are assigned here; the four analysis fields are
/// stored exactly as given.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the insert fails.
pub async fn insert_analysis(
    pool: &SqlitePool,
    analysis: &NewAnalysis,
) -> Result<AnalysisRecord, DbError> {
    let row = sqlx::query_as::<_, AnalysisRow>(
        "INSERT INTO analyses (company_name, description, verdict, date, created_at) \
         VALUES (?1, ?2, ?3, ?4, ?5) \
         RETURNING id, company_name, description, verdict, date, created_at",
    )
    .bind(&analysis.company_name)
    .bind(&analysis.description)
    .bind(&analysis.verdict)
    .bind(&analysis.date)
    .bind(Utc::now())
    .fetch_one(pool)
    .await?;

    tracing::debug!(id = row.id, company = %row.company_name, "analysis stored");
    Ok(row.into())
}

/// List every stored analysis, newest first.
///
/// Ordered by `created_at DESC` then `id DESC`. No limit is applied.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn list_analyses(pool: &SqlitePool) -> Result<Vec<AnalysisRecord>, DbError> {
    let rows = sqlx::query_as::<_, AnalysisRow>(
        "SELECT id, company_name, description, verdict, date, created_at \
         FROM analyses \
         ORDER BY created_at DESC, id DESC",
    )
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(AnalysisRecord::from).collect())
}
