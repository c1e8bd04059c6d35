use super::schema::Database;
use super::types::DatabaseError;

impl Database {
    // ========================================================================
    // Key-Value Operations
    // ========================================================================

    /// Get a stored value by key.
    ///
    /// # Returns
    ///
    /// The value if the key exists, or `None` if it was never set.
    pub async fn get_value(&self, key: &str) -> Result<Option<String>, DatabaseError> {
        let row: Option<(String,)> = sqlx::query_as("SELECT value FROM kv_store WHERE key = ?")
            .bind(key)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(|(value,)| value))
    }

    /// Set a value (UPSERT).
    ///
    /// Inserts the pair if the key doesn't exist, otherwise replaces the value
    /// and refreshes its timestamp.
    pub async fn set_value(&self, key: &str, value: &str) -> Result<(), DatabaseError> {
        sqlx::query(
            r#"
            INSERT INTO kv_store (key, value, updated_at)
            VALUES (?, ?, datetime('now'))
            ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at
        "#,
        )
        .bind(key)
        .bind(value)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Remove a key. Returns true if a value was deleted.
    pub async fn remove_value(&self, key: &str) -> Result<bool, DatabaseError> {
        let result = sqlx::query("DELETE FROM kv_store WHERE key = ?")
            .bind(key)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use crate::storage::Database;

    async fn test_db() -> Database {
        Database::open(":memory:").await.unwrap()
    }

    #[tokio::test]
    async fn test_get_value_missing() {
        let db = test_db().await;
        assert_eq!(db.get_value("nonexistent").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_set_and_get_value() {
        let db = test_db().await;
        db.set_value("favoritos", "[]").await.unwrap();
        assert_eq!(
            db.get_value("favoritos").await.unwrap(),
            Some("[]".to_string())
        );
    }

    #[tokio::test]
    async fn test_set_value_upsert() {
        let db = test_db().await;
        db.set_value("k", "old").await.unwrap();
        db.set_value("k", "new").await.unwrap();
        assert_eq!(db.get_value("k").await.unwrap(), Some("new".to_string()));
    }

    #[tokio::test]
    async fn test_remove_value() {
        let db = test_db().await;
        db.set_value("k", "v").await.unwrap();
        assert!(db.remove_value("k").await.unwrap());
        assert!(!db.remove_value("k").await.unwrap());
        assert_eq!(db.get_value("k").await.unwrap(), None);
    }
}
