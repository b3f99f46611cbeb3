use interview_core::model::ResultId;

use super::SqliteRepository;
use super::mapping::{
    email_key, encode_detailed, map_result_row, result_id_from_i64, result_id_to_i64,
};
use crate::repository::{NewResult, ResultRecord, ResultRepository, StorageError};

const SELECT_RESULTS: &str = r"
    SELECT
        id, name, email, phone, score, total, attempted, correct, detailed, taken_at
    FROM results
";

#[async_trait::async_trait]
impl ResultRepository for SqliteRepository {
    async fn append_result(&self, result: &NewResult) -> Result<ResultId, StorageError> {
        let detailed = encode_detailed(&result.detailed)?;
        let candidate = &result.candidate;

        let res = sqlx::query(
            r"
                INSERT INTO results (
                    name, email, email_key, phone,
                    score, total, attempted, correct, detailed, taken_at
                )
                VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
            ",
        )
        .bind(candidate.name.as_deref())
        .bind(candidate.email.as_deref())
        .bind(email_key(candidate.email.as_deref()))
        .bind(candidate.phone.as_deref())
        .bind(i64::from(result.score))
        .bind(i64::from(result.total))
        .bind(i64::from(result.attempted))
        .bind(i64::from(result.correct))
        .bind(detailed)
        .bind(result.taken_at)
        .execute(&self.pool)
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;

        result_id_from_i64(res.last_insert_rowid())
    }

    async fn get_result(&self, id: ResultId) -> Result<ResultRecord, StorageError> {
        let sql = format!("{SELECT_RESULTS} WHERE id = ?1");
        let row = sqlx::query(&sql)
            .bind(result_id_to_i64(id)?)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| StorageError::Connection(e.to_string()))?
            .ok_or(StorageError::NotFound)?;

        map_result_row(&row)
    }

    async fn list_results(&self) -> Result<Vec<ResultRecord>, StorageError> {
        let sql = format!("{SELECT_RESULTS} ORDER BY id ASC");
        let rows = sqlx::query(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| StorageError::Connection(e.to_string()))?;

        rows.iter().map(map_result_row).collect()
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<ResultRecord>, StorageError> {
        let key = email_key(Some(email));
        if key.is_empty() {
            return Ok(None);
        }

        let sql = format!("{SELECT_RESULTS} WHERE email_key = ?1 ORDER BY id ASC LIMIT 1");
        let row = sqlx::query(&sql)
            .bind(key)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| StorageError::Connection(e.to_string()))?;

        row.as_ref().map(map_result_row).transpose()
    }

    async fn clear_results(&self) -> Result<u64, StorageError> {
        let res = sqlx::query("DELETE FROM results")
            .execute(&self.pool)
            .await
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(res.rows_affected())
    }
}
