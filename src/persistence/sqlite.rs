//! SQLite implementation of the entry store.

use std::time::Duration;

use sqlx::SqlitePool;
use sqlx::sqlite::SqlitePoolOptions;

use super::Schema;
use crate::config::StoreConfig;
use crate::domain::{Entry, EntryId};
use crate::error::FlaskrError;

type EntryRow = (i64, String, String);

/// SQL text for one naming scheme, built once at construction.
///
/// Only the static table and column names are interpolated; every
/// caller-supplied value is a bound parameter.
#[derive(Debug)]
struct Statements {
    list: String,
    insert: String,
    delete: String,
    search: String,
}

impl Statements {
    fn for_schema(schema: Schema) -> Self {
        let table = schema.table();
        let id = schema.id_column();
        Self {
            list: format!("SELECT {id}, title, text FROM {table} ORDER BY {id} DESC"),
            insert: format!("INSERT INTO {table} (title, text) VALUES (?, ?) RETURNING {id}"),
            delete: format!("DELETE FROM {table} WHERE {id} = ?"),
            search: format!(
                "SELECT {id}, title, text FROM {table} \
                 WHERE instr(title, ?) > 0 OR instr(text, ?) > 0 \
                 ORDER BY {id} DESC"
            ),
        }
    }
}

/// SQLite-backed entry store using `sqlx::SqlitePool`.
///
/// Cheap to clone; clones share the pool.
#[derive(Debug, Clone)]
pub struct EntryStore {
    pool: SqlitePool,
    schema: Schema,
    statements: std::sync::Arc<Statements>,
}

impl EntryStore {
    /// Wraps an existing pool.
    #[must_use]
    pub fn new(pool: SqlitePool, schema: Schema) -> Self {
        Self {
            pool,
            schema,
            statements: std::sync::Arc::new(Statements::for_schema(schema)),
        }
    }

    /// Opens a pool from configuration and ensures the table exists.
    ///
    /// # Errors
    ///
    /// Returns [`FlaskrError::Storage`] if the database cannot be opened
    /// or the table cannot be created.
    pub async fn connect(config: &StoreConfig) -> Result<Self, FlaskrError> {
        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections.max(1))
            .acquire_timeout(Duration::from_secs(config.connect_timeout_secs))
            .connect(&config.database_url)
            .await?;
        let store = Self::new(pool, config.schema);
        store.ensure_schema().await?;
        Ok(store)
    }

    /// Opens a private in-memory store with its table created.
    ///
    /// The pool is pinned to a single connection that is never recycled,
    /// since every SQLite in-memory connection is a separate database.
    ///
    /// # Errors
    ///
    /// Returns [`FlaskrError::Storage`] if SQLite cannot be opened.
    pub async fn in_memory(schema: Schema) -> Result<Self, FlaskrError> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect("sqlite::memory:")
            .await?;
        let store = Self::new(pool, schema);
        store.ensure_schema().await?;
        Ok(store)
    }

    /// Naming scheme in use.
    #[must_use]
    pub const fn schema(&self) -> Schema {
        self.schema
    }

    /// Creates the entries table if it does not exist yet.
    ///
    /// # Errors
    ///
    /// Returns [`FlaskrError::Storage`] on database failure.
    pub async fn ensure_schema(&self) -> Result<(), FlaskrError> {
        sqlx::query(&self.schema.create_table_sql())
            .execute(&self.pool)
            .await?;
        tracing::debug!(table = self.schema.table(), "entry table ready");
        Ok(())
    }

    /// Returns every entry, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`FlaskrError::Storage`] on database failure.
    pub async fn list(&self) -> Result<Vec<Entry>, FlaskrError> {
        let rows = sqlx::query_as::<_, EntryRow>(&self.statements.list)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(into_entry).collect())
    }

    /// Inserts a new entry and returns its store-assigned id.
    ///
    /// Title and text are stored verbatim.
    ///
    /// # Errors
    ///
    /// Returns [`FlaskrError::Storage`] on database failure.
    pub async fn add(&self, title: &str, text: &str) -> Result<EntryId, FlaskrError> {
        let id = sqlx::query_scalar::<_, i64>(&self.statements.insert)
            .bind(title)
            .bind(text)
            .fetch_one(&self.pool)
            .await?;
        Ok(EntryId::new(id))
    }

    /// Deletes the entry with the given id.
    ///
    /// Returns the number of rows removed; deleting an absent id is not an
    /// error and returns `0`.
    ///
    /// # Errors
    ///
    /// Returns [`FlaskrError::Storage`] on database failure.
    pub async fn delete_by_id(&self, id: EntryId) -> Result<u64, FlaskrError> {
        let result = sqlx::query(&self.statements.delete)
            .bind(id.get())
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    /// Returns entries whose title or text contains `query`, newest first.
    ///
    /// The match is literal and case-sensitive. A missing or empty query
    /// returns the same result as [`EntryStore::list`].
    ///
    /// # Errors
    ///
    /// Returns [`FlaskrError::Storage`] on database failure.
    pub async fn find_by_text_contains(
        &self,
        query: Option<&str>,
    ) -> Result<Vec<Entry>, FlaskrError> {
        let Some(needle) = query.filter(|q| !q.is_empty()) else {
            return self.list().await;
        };
        let rows = sqlx::query_as::<_, EntryRow>(&self.statements.search)
            .bind(needle)
            .bind(needle)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(into_entry).collect())
    }
}

fn into_entry((id, title, text): EntryRow) -> Entry {
    Entry {
        id: EntryId::new(id),
        title,
        text,
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    async fn make_store(schema: Schema) -> EntryStore {
        let Ok(store) = EntryStore::in_memory(schema).await else {
            panic!("in-memory store");
        };
        store
    }

    #[tokio::test]
    async fn empty_store_lists_nothing() {
        let store = make_store(Schema::Entries).await;
        let Ok(entries) = store.list().await else {
            panic!("list failed");
        };
        assert!(entries.is_empty());
    }

    #[tokio::test]
    async fn list_is_newest_first() {
        let store = make_store(Schema::Entries).await;
        let mut ids = Vec::new();
        for n in 0..5 {
            let Ok(id) = store.add(&format!("title {n}"), "body").await else {
                panic!("add failed");
            };
            ids.push(id);
        }

        let Ok(entries) = store.list().await else {
            panic!("list failed");
        };
        let listed: Vec<EntryId> = entries.iter().map(|e| e.id).collect();
        ids.reverse();
        assert_eq!(listed, ids);
        assert!(listed.windows(2).all(|w| matches!(w, [a, b] if a > b)));
    }

    #[tokio::test]
    async fn markup_is_stored_verbatim() {
        let store = make_store(Schema::Entries).await;
        let _ = store
            .add("<Hello>", "<strong>HTML</strong> allowed here")
            .await;
        let Ok(entries) = store.list().await else {
            panic!("list failed");
        };
        let [entry] = entries.as_slice() else {
            panic!("expected one entry");
        };
        assert_eq!(entry.title, "<Hello>");
        assert_eq!(entry.text, "<strong>HTML</strong> allowed here");
    }

    #[tokio::test]
    async fn delete_existing_and_absent() {
        let store = make_store(Schema::Entries).await;
        let Ok(id) = store.add("a", "b").await else {
            panic!("add failed");
        };

        assert_eq!(store.delete_by_id(id).await.ok(), Some(1));
        assert_eq!(store.delete_by_id(id).await.ok(), Some(0));
        assert_eq!(store.delete_by_id(EntryId::new(9_999)).await.ok(), Some(0));
    }

    #[tokio::test]
    async fn ids_stay_monotonic_after_deleting_newest() {
        let store = make_store(Schema::Entries).await;
        let Ok(first) = store.add("a", "a").await else {
            panic!("add failed");
        };
        let _ = store.delete_by_id(first).await;
        let Ok(second) = store.add("b", "b").await else {
            panic!("add failed");
        };
        assert!(second > first);
    }

    #[tokio::test]
    async fn search_matches_title_or_text() {
        let store = make_store(Schema::Entries).await;
        let _ = store.add("Rust", "ownership").await;
        let _ = store.add("Python", "duck typing").await;
        let _ = store.add("Go", "goroutines and Rust envy").await;

        let Ok(hits) = store.find_by_text_contains(Some("Rust")).await else {
            panic!("search failed");
        };
        let titles: Vec<&str> = hits.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, vec!["Go", "Rust"]);
        assert!(hits.iter().all(|e| e.contains("Rust")));
    }

    #[tokio::test]
    async fn search_treats_wildcards_literally() {
        let store = make_store(Schema::Entries).await;
        let _ = store.add("100% done", "").await;
        let _ = store.add("plain", "").await;

        let Ok(hits) = store.find_by_text_contains(Some("%")).await else {
            panic!("search failed");
        };
        assert_eq!(hits.len(), 1);
    }

    #[tokio::test]
    async fn search_without_query_equals_list() {
        let store = make_store(Schema::Entries).await;
        let _ = store.add("one", "1").await;
        let _ = store.add("two", "2").await;

        let all = store.list().await.ok();
        assert_eq!(store.find_by_text_contains(None).await.ok(), all);
        assert_eq!(store.find_by_text_contains(Some("")).await.ok(), all);
    }

    #[tokio::test]
    async fn flaskr_scheme_supports_same_operations() {
        let store = make_store(Schema::Flaskr).await;
        assert_eq!(store.schema(), Schema::Flaskr);

        let Ok(id) = store.add("post", "body").await else {
            panic!("add failed");
        };
        assert_eq!(store.list().await.map(|e| e.len()).ok(), Some(1));
        assert_eq!(
            store.find_by_text_contains(Some("bod")).await.map(|e| e.len()).ok(),
            Some(1)
        );
        assert_eq!(store.delete_by_id(id).await.ok(), Some(1));
        assert_eq!(store.list().await.map(|e| e.len()).ok(), Some(0));
    }

    #[tokio::test]
    async fn ensure_schema_is_idempotent() {
        let store = make_store(Schema::Entries).await;
        let _ = store.add("kept", "row").await;
        assert!(store.ensure_schema().await.is_ok());
        assert_eq!(store.list().await.map(|e| e.len()).ok(), Some(1));
    }
}
