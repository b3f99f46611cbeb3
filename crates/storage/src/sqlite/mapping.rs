use interview_core::model::{Candidate, DetailedResult, ResultId};
use sqlx::Row;

use crate::repository::{ResultRecord, StorageError};

pub(crate) fn ser<E: core::fmt::Display>(e: E) -> StorageError {
    StorageError::Serialization(e.to_string())
}

pub(crate) fn result_id_to_i64(id: ResultId) -> Result<i64, StorageError> {
    i64::try_from(id.value()).map_err(|_| StorageError::Serialization("result id overflow".into()))
}

pub(crate) fn result_id_from_i64(v: i64) -> Result<ResultId, StorageError> {
    u64::try_from(v)
        .map(ResultId::new)
        .map_err(|_| StorageError::Serialization(format!("invalid result id: {v}")))
}

fn u32_from_i64(field: &'static str, v: i64) -> Result<u32, StorageError> {
    u32::try_from(v).map_err(|_| StorageError::Serialization(format!("invalid {field}: {v}")))
}

/// Lookup key stored next to the raw email.
pub(crate) fn email_key(email: Option<&str>) -> String {
    email.map(|e| e.trim().to_lowercase()).unwrap_or_default()
}

pub(crate) fn encode_detailed(detailed: &[DetailedResult]) -> Result<String, StorageError> {
    serde_json::to_string(detailed).map_err(ser)
}

pub(crate) fn map_result_row(row: &sqlx::sqlite::SqliteRow) -> Result<ResultRecord, StorageError> {
    let detailed_json: String = row.try_get("detailed").map_err(ser)?;
    let detailed: Vec<DetailedResult> = serde_json::from_str(&detailed_json).map_err(ser)?;

    Ok(ResultRecord {
        id: result_id_from_i64(row.try_get::<i64, _>("id").map_err(ser)?)?,
        candidate: Candidate {
            name: row.try_get("name").map_err(ser)?,
            email: row.try_get("email").map_err(ser)?,
            phone: row.try_get("phone").map_err(ser)?,
        },
        score: u32_from_i64("score", row.try_get::<i64, _>("score").map_err(ser)?)?,
        total: u32_from_i64("total", row.try_get::<i64, _>("total").map_err(ser)?)?,
        attempted: u32_from_i64("attempted", row.try_get::<i64, _>("attempted").map_err(ser)?)?,
        correct: u32_from_i64("correct", row.try_get::<i64, _>("correct").map_err(ser)?)?,
        detailed,
        taken_at: row.try_get("taken_at").map_err(ser)?,
    })
}
