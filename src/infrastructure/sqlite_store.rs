// src/infrastructure/sqlite_store.rs
//
// sqlx/SQLite content store. One row per revision/translation of an item,
// mirroring a CMS field-data table.

use async_trait::async_trait;
use sqlx::{sqlite::SqliteRow, Row, SqlitePool};

use crate::application::ports::{ContentStore, WindowQuery};
use crate::domain::{ContentItem, ContentRecord, NotifyAction};
use crate::error::NotifyError;

#[derive(Debug, Clone)]
pub struct SqliteContentStore {
    pool: SqlitePool,
}

impl SqliteContentStore {
    pub async fn new(database_url: &str) -> Result<Self, NotifyError> {
        let pool = SqlitePool::connect(database_url)
            .await
            .map_err(|e| NotifyError::Store(format!("connection: {}", e)))?;

        let store = Self { pool };
        store.migrate().await?;
        Ok(store)
    }

    pub fn from_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn migrate(&self) -> Result<(), NotifyError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS content_field_data (
                id INTEGER NOT NULL,
                revision_id INTEGER NOT NULL,
                langcode TEXT NOT NULL,
                default_langcode INTEGER NOT NULL DEFAULT 1,
                title TEXT NOT NULL,
                bundle TEXT NOT NULL,
                owner_email TEXT,
                status INTEGER NOT NULL DEFAULT 1,
                unpublish_on INTEGER,
                notify_unpublish_on INTEGER,
                notify_invalid_on INTEGER,
                PRIMARY KEY (revision_id, langcode)
            )
            "#,
        )
        .execute(&self.pool)
        .await
        .map_err(|e| NotifyError::Store(format!("migration: {}", e)))?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_notify_unpublish_on ON content_field_data(notify_unpublish_on)",
        )
        .execute(&self.pool)
        .await
        .map_err(|e| NotifyError::Store(format!("migration: {}", e)))?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_notify_invalid_on ON content_field_data(notify_invalid_on)",
        )
        .execute(&self.pool)
        .await
        .map_err(|e| NotifyError::Store(format!("migration: {}", e)))?;

        Ok(())
    }

    fn timestamp_column(action: NotifyAction) -> &'static str {
        match action {
            NotifyAction::Unpublish => "notify_unpublish_on",
            NotifyAction::Invalid => "notify_invalid_on",
        }
    }

    fn row_to_item(row: &SqliteRow) -> Result<ContentItem, NotifyError> {
        let map_err = |e: sqlx::Error| NotifyError::Store(format!("row decode: {}", e));
        Ok(ContentItem {
            id: row.try_get("id").map_err(map_err)?,
            revision_id: row.try_get("revision_id").map_err(map_err)?,
            langcode: row.try_get("langcode").map_err(map_err)?,
            default_language: row.try_get::<i64, _>("default_langcode").map_err(map_err)? != 0,
            title: row.try_get("title").map_err(map_err)?,
            bundle: row.try_get("bundle").map_err(map_err)?,
            owner_email: row.try_get("owner_email").map_err(map_err)?,
            published: row.try_get::<i64, _>("status").map_err(map_err)? != 0,
            unpublish_on: row.try_get("unpublish_on").map_err(map_err)?,
            notify_unpublish_on: row.try_get("notify_unpublish_on").map_err(map_err)?,
            notify_invalid_on: row.try_get("notify_invalid_on").map_err(map_err)?,
        })
    }
}

#[async_trait]
impl ContentStore for SqliteContentStore {
    async fn find_in_window(&self, query: &WindowQuery) -> Result<Vec<ContentRecord>, NotifyError> {
        let column = Self::timestamp_column(query.action);
        let placeholders = vec!["?"; query.bundles.len()].join(", ");
        let mut sql = format!(
            "SELECT id, revision_id, langcode, notify_unpublish_on \
             FROM content_field_data \
             WHERE {column} > ? AND {column} <= ? \
               AND bundle IN ({placeholders}) \
               AND status = 1",
        );
        if query.default_language_only {
            sql.push_str(" AND default_langcode = 1");
        }
        sql.push_str(" ORDER BY id, langcode");

        let mut stmt = sqlx::query(&sql)
            .bind(query.window.lower)
            .bind(query.window.upper);
        for bundle in &query.bundles {
            stmt = stmt.bind(bundle);
        }

        let rows = stmt
            .fetch_all(&self.pool)
            .await
            .map_err(|e| NotifyError::Store(format!("window query: {}", e)))?;

        let map_err = |e: sqlx::Error| NotifyError::Store(format!("row decode: {}", e));
        rows.iter()
            .map(|row| {
                Ok(ContentRecord {
                    id: row.try_get("id").map_err(map_err)?,
                    revision_id: row.try_get("revision_id").map_err(map_err)?,
                    langcode: row.try_get("langcode").map_err(map_err)?,
                    notify_unpublish_on: row.try_get("notify_unpublish_on").map_err(map_err)?,
                })
            })
            .collect()
    }

    async fn load_revision(
        &self,
        revision_id: i64,
        langcode: &str,
    ) -> Result<ContentItem, NotifyError> {
        let row = sqlx::query(
            "SELECT * FROM content_field_data WHERE revision_id = ? AND langcode = ?",
        )
        .bind(revision_id)
        .bind(langcode)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| NotifyError::Store(format!("load revision: {}", e)))?;

        match row {
            Some(row) => Self::row_to_item(&row),
            None => Err(NotifyError::NotFound(format!(
                "revision {} ({})",
                revision_id, langcode
            ))),
        }
    }

    async fn load_item(&self, id: i64) -> Result<ContentItem, NotifyError> {
        let row = sqlx::query(
            "SELECT * FROM content_field_data \
             WHERE id = ? AND default_langcode = 1 \
             ORDER BY revision_id DESC LIMIT 1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| NotifyError::Store(format!("load item: {}", e)))?;

        match row {
            Some(row) => Self::row_to_item(&row),
            None => Err(NotifyError::NotFound(format!("item {}", id))),
        }
    }

    async fn save_item(&self, item: &ContentItem) -> Result<(), NotifyError> {
        sqlx::query(
            r#"
            INSERT OR REPLACE INTO content_field_data (
                id, revision_id, langcode, default_langcode, title, bundle,
                owner_email, status, unpublish_on, notify_unpublish_on,
                notify_invalid_on
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(item.id)
        .bind(item.revision_id)
        .bind(&item.langcode)
        .bind(item.default_language as i64)
        .bind(&item.title)
        .bind(&item.bundle)
        .bind(&item.owner_email)
        .bind(item.published as i64)
        .bind(item.unpublish_on)
        .bind(item.notify_unpublish_on)
        .bind(item.notify_invalid_on)
        .execute(&self.pool)
        .await
        .map_err(|e| NotifyError::Store(format!("save item: {}", e)))?;

        Ok(())
    }
}
