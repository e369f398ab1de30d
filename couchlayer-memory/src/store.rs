//! In-memory storage implementation for document stores.
//!
//! This module provides a backend that keeps databases as maps of JSON documents behind
//! an async-safe read-write lock, and answers like a CouchDB server would: the same
//! status codes and the same `{"error", "reason"}` bodies.

use std::{collections::HashMap, sync::Arc};
use async_trait::async_trait;
use mea::rwlock::RwLock;
use serde_json::{Value, json};
use uuid::Uuid;

use couchlayer_core::{
    backend::{StoreBackend, StoreBackendBuilder, UpdateResponse},
    document::{ID_KEY, REV_KEY},
    error::{REASON_DATABASE_DOES_NOT_EXIST, ServerError, StoreResult},
};

type DatabaseMap = HashMap<String, Value>;
type StoreMap = HashMap<String, DatabaseMap>;

fn server_error(status: u16, error: &str, reason: &str) -> ServerError {
    ServerError::new(status, json!({ "error": error, "reason": reason }).to_string())
}

fn no_database() -> ServerError {
    server_error(404, "not_found", REASON_DATABASE_DOES_NOT_EXIST)
}

/// Thread-safe in-memory document storage backend.
///
/// Databases map document ids to stored JSON documents. Database names and document
/// paths are taken exactly as a CouchDB server would receive them, percent-encoding
/// included.
///
/// # Thread Safety
///
/// `InMemoryStore` is cloneable and uses an `Arc`-wrapped internal state. Clones share
/// the same databases.
///
/// # Example
///
/// ```ignore
/// use couchlayer_memory::InMemoryStore;
/// use couchlayer_core::backend::StoreBackend;
/// use serde_json::json;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let store = InMemoryStore::new();
///
///     store.create_database("notes").await?;
///     let reply = store.create_document("notes", &json!({ "_id": "n/1" })).await?;
///     let doc = store.get_document("notes/n%2F1").await?;
///     assert_eq!(doc["_rev"], reply.rev);
///
///     Ok(())
/// }
/// ```
#[derive(Default, Clone, Debug)]
pub struct InMemoryStore {
    /// database name -> (document id -> document)
    store: Arc<RwLock<StoreMap>>,
}

impl InMemoryStore {
    /// Creates a new store with no databases.
    pub fn new() -> Self {
        Self {
            store: Arc::new(RwLock::new(StoreMap::new())),
        }
    }

    /// Creates a builder for constructing an `InMemoryStore`.
    pub fn builder() -> InMemoryStoreBuilder {
        InMemoryStoreBuilder
    }

    /// Returns the names of all databases, sorted.
    pub async fn database_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.store.read().await.keys().cloned().collect();
        names.sort();
        names
    }

    /// Returns the number of documents in a database, or `None` if it does not exist.
    pub async fn document_count(&self, db: &str) -> Option<usize> {
        self.store.read().await.get(db).map(HashMap::len)
    }
}

#[async_trait]
impl StoreBackend for InMemoryStore {
    async fn create_database(&self, db: &str) -> StoreResult<()> {
        let mut store = self.store.write().await;

        if store.contains_key(db) {
            return Err(server_error(
                412,
                "file_exists",
                "The database could not be created, the file already exists.",
            )
            .into());
        }

        store.insert(db.to_string(), DatabaseMap::new());

        Ok(())
    }

    async fn delete_database(&self, db: &str) -> StoreResult<()> {
        match self.store.write().await.remove(db) {
            Some(_) => Ok(()),
            None => Err(no_database().into()),
        }
    }

    async fn get_document(&self, path: &str) -> StoreResult<Value> {
        let Some((db, key)) = path.split_once('/') else {
            return Err(server_error(400, "bad_request", "Expected a document path").into());
        };
        let id = urlencoding::decode(key)
            .map_err(|e| server_error(400, "bad_request", &e.to_string()))?;

        let store = self.store.read().await;
        let database = store.get(db).ok_or_else(no_database)?;

        database
            .get(&*id)
            .cloned()
            .ok_or_else(|| server_error(404, "not_found", "missing").into())
    }

    async fn create_document(&self, db: &str, document: &Value) -> StoreResult<UpdateResponse> {
        let Some(fields) = document.as_object() else {
            return Err(server_error(400, "bad_request", "Document must be a JSON object").into());
        };

        let mut store = self.store.write().await;
        let database = store.get_mut(db).ok_or_else(no_database)?;

        let id = match fields.get(ID_KEY).and_then(Value::as_str) {
            Some(id) => id.to_string(),
            None => Uuid::new_v4().simple().to_string(),
        };

        if database.contains_key(&id) {
            return Err(server_error(409, "conflict", "Document update conflict.").into());
        }

        let rev = format!("1-{}", Uuid::new_v4().simple());

        let mut stored = fields.clone();
        stored.insert(ID_KEY.to_string(), Value::String(id.clone()));
        stored.insert(REV_KEY.to_string(), Value::String(rev.clone()));
        database.insert(id.clone(), Value::Object(stored));

        Ok(UpdateResponse { id, rev, ok: true })
    }
}

/// Builder for constructing [`InMemoryStore`] instances.
///
/// # Example
///
/// ```ignore
/// use couchlayer_memory::InMemoryStore;
/// use couchlayer_core::backend::StoreBackendBuilder;
///
/// #[tokio::main]
/// async fn main() {
///     let store = InMemoryStore::builder().build().await.unwrap();
/// }
/// ```
#[derive(Default)]
pub struct InMemoryStoreBuilder;

#[async_trait]
impl StoreBackendBuilder for InMemoryStoreBuilder {
    type Backend = InMemoryStore;

    /// Builds and returns a new [`InMemoryStore`] instance. Never fails.
    async fn build(self) -> StoreResult<Self::Backend> {
        Ok(InMemoryStore::new())
    }
}
