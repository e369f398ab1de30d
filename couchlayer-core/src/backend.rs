//! Storage backend abstraction for the document store.
//!
//! This module defines the traits that separate the document operations in
//! [`crate::store`] from the way a backend talks to its server.
//!
//! # Overview
//!
//! The [`StoreBackend`] trait covers the four raw calls the store needs: create a
//! database, delete a database, fetch one document by path, and post a new document to a
//! database. Names and paths reach the backend already computed and percent-encoded by
//! [`crate::naming`]. Backends report failures with the shared
//! [`StoreError`](crate::error::StoreError) taxonomy; a server that rejects a call answers
//! with [`StoreError::Server`](crate::error::StoreError::Server) carrying the status and
//! CouchDB error body, so the store can recognize a missing database regardless of the
//! backend.
//!
//! # Traits
//!
//! - [`StoreBackend`]: The core trait for storage backends
//! - [`StoreBackendBuilder`]: Factory trait for creating backend instances

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::{fmt::Debug, sync::Arc};

use crate::error::StoreResult;

/// The reply to a document write: `{"ok": true, "id": "...", "rev": "..."}`.
///
/// All three fields are required.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateResponse {
    /// The id of the written document.
    pub id: String,
    /// The revision assigned by the server.
    pub rev: String,
    /// Whether the server acknowledged the write.
    pub ok: bool,
}

/// Abstract interface for document storage backends.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync`; one backend value serves concurrent calls from
/// many tasks, each with its own request lifecycle.
///
/// # Error Handling
///
/// Every method performs exactly one exchange with the server and never retries.
#[async_trait]
pub trait StoreBackend: Send + Sync + Debug {
    /// Creates the database `db` (`PUT /{db}`).
    ///
    /// Creating a database that already exists is a server error (412 `file_exists`).
    async fn create_database(&self, db: &str) -> StoreResult<()>;

    /// Deletes the database `db` and every document in it (`DELETE /{db}`).
    async fn delete_database(&self, db: &str) -> StoreResult<()>;

    /// Fetches the document at `path` (`GET /{db}/{key}`), as returned by
    /// [`crate::naming::document_path`].
    async fn get_document(&self, path: &str) -> StoreResult<Value>;

    /// Posts a new document to the database `db` (`POST /{db}`).
    ///
    /// The reply is returned as is; an `ok: false` reply is not an error at this level.
    async fn create_document(&self, db: &str, document: &Value) -> StoreResult<UpdateResponse>;
}

#[async_trait]
impl<B> StoreBackend for &B
where
    B: StoreBackend + ?Sized,
{
    async fn create_database(&self, db: &str) -> StoreResult<()> {
        (**self).create_database(db).await
    }

    async fn delete_database(&self, db: &str) -> StoreResult<()> {
        (**self).delete_database(db).await
    }

    async fn get_document(&self, path: &str) -> StoreResult<Value> {
        (**self).get_document(path).await
    }

    async fn create_document(&self, db: &str, document: &Value) -> StoreResult<UpdateResponse> {
        (**self).create_document(db, document).await
    }
}

#[async_trait]
impl<B> StoreBackend for Arc<B>
where
    B: StoreBackend + ?Sized,
{
    async fn create_database(&self, db: &str) -> StoreResult<()> {
        (**self).create_database(db).await
    }

    async fn delete_database(&self, db: &str) -> StoreResult<()> {
        (**self).delete_database(db).await
    }

    async fn get_document(&self, path: &str) -> StoreResult<Value> {
        (**self).get_document(path).await
    }

    async fn create_document(&self, db: &str, document: &Value) -> StoreResult<UpdateResponse> {
        (**self).create_document(db, document).await
    }
}

/// Factory trait for backends whose construction can fail.
#[async_trait]
pub trait StoreBackendBuilder {
    /// The backend this builder produces.
    type Backend: StoreBackend;

    /// Builds the backend.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Initialization`](crate::error::StoreError::Initialization) when
    /// the configuration is unusable.
    async fn build(self) -> StoreResult<Self::Backend>;
}
