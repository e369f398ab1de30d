//! Document operations over a storage backend.
//!
//! [`DocumentStore`] turns documents into calls on a [`StoreBackend`]: it picks the
//! database from the document's doctype, generates ids, and creates a missing database
//! on the first write into it.
//!
//! Every operation takes the database prefix explicitly, so one store can serve several
//! prefixes (one per tenant, or a separate one for tests).
//!
//! # Example
//!
//! ```ignore
//! use couchlayer::{prelude::*, document::JsonDoc, couchdb::CouchDbStore};
//!
//! let store = DocumentStore::new(CouchDbStore::builder("http://localhost:5984/").build().await?);
//!
//! let mut doc = JsonDoc::new("io.cozy.events");
//! store.create_document("cozy-", &mut doc).await?;
//!
//! let fetched: JsonDoc = store.get("cozy-", "io.cozy.events", doc.id()).await?;
//! ```

use serde_json::Value;

use crate::{
    backend::{StoreBackend, UpdateResponse},
    document::{Document, DocumentExt},
    error::{REASON_WRONG_DOCTYPE, StoreError, StoreResult},
    id::{generate_document_id, strip_doctype},
    naming::{database_name, document_path},
};

/// Document operations bound to a storage backend.
///
/// The store keeps no state besides its backend. It is `Clone` whenever the backend is,
/// and clones share the backend's connection pool.
#[derive(Debug, Clone)]
pub struct DocumentStore<B: StoreBackend> {
    backend: B,
}

impl<B: StoreBackend> DocumentStore<B> {
    /// Creates a new document store with the given backend.
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    /// Returns the backend this store talks to.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Consumes the store and returns its backend.
    pub fn into_backend(self) -> B {
        self.backend
    }

    /// Fetches a document by doctype and id.
    ///
    /// `id` may be the full id returned by [`DocumentStore::create_document`]
    /// (`"<doctype>/<hex>"`) or just the part after the doctype.
    ///
    /// # Errors
    ///
    /// When the doctype has no database, the server error is returned with its reason
    /// replaced by [`REASON_WRONG_DOCTYPE`]. Other errors are returned unchanged.
    pub async fn get<D: Document>(&self, prefix: &str, doctype: &str, id: &str) -> StoreResult<D> {
        let path = document_path(prefix, doctype, strip_doctype(doctype, id));

        match self.backend.get_document(&path).await {
            Ok(value) => D::from_json(value),
            Err(StoreError::Server(err)) if err.is_no_database() => {
                Err(err.with_reason(REASON_WRONG_DOCTYPE).into())
            }
            Err(err) => Err(err),
        }
    }

    /// Creates the database for a doctype.
    ///
    /// # Errors
    ///
    /// Creating a database that already exists is a server error and is returned as such.
    pub async fn create_database(&self, prefix: &str, doctype: &str) -> StoreResult<()> {
        self.backend
            .create_database(&database_name(prefix, doctype))
            .await
    }

    /// Deletes the database for a doctype, with every document in it.
    pub async fn delete_database(&self, prefix: &str, doctype: &str) -> StoreResult<()> {
        self.backend
            .delete_database(&database_name(prefix, doctype))
            .await
    }

    /// Deletes and recreates the database for a doctype.
    ///
    /// If the delete fails the create is not attempted. The two steps are not atomic: a
    /// failure in between leaves the database absent until it is created again.
    pub async fn reset_database(&self, prefix: &str, doctype: &str) -> StoreResult<()> {
        self.delete_database(prefix, doctype).await?;
        self.create_database(prefix, doctype).await
    }

    /// Persists a new document, assigning its id and revision.
    ///
    /// The database for the document's doctype is created if it does not exist yet.
    ///
    /// # Errors
    ///
    /// - [`StoreError::InvalidDocument`] if the document already has an id. Nothing is sent.
    /// - [`StoreError::Protocol`] if the server answered 2xx without acknowledging the write.
    /// - Any backend error from the writes or the database creation.
    ///
    /// On error the generated id stays on the document and no revision is set.
    pub async fn create_document<D: Document>(&self, prefix: &str, doc: &mut D) -> StoreResult<()> {
        if !doc.id().is_empty() {
            return Err(StoreError::InvalidDocument(format!(
                "cannot create document with a defined id ({})",
                doc.id()
            )));
        }

        doc.set_id(generate_document_id(doc.doctype()));

        let body = doc.to_json()?;
        let response = self
            .create_document_or_database(prefix, doc.doctype(), &body)
            .await?;

        if !response.ok {
            return Err(StoreError::Protocol(format!(
                "server replied 2xx with ok=false for {}",
                response.id
            )));
        }

        doc.set_rev(response.rev);

        Ok(())
    }

    /// Posts `body` to the doctype's database, creating the database and posting once
    /// more if it is missing.
    ///
    /// A concurrent caller may create the database first; its "already exists" error is
    /// taken as the go-ahead for the second post.
    async fn create_document_or_database(
        &self,
        prefix: &str,
        doctype: &str,
        body: &Value,
    ) -> StoreResult<UpdateResponse> {
        let db = database_name(prefix, doctype);

        match self.backend.create_document(&db, body).await {
            Err(err) if err.is_no_database() => {}
            result => return result,
        }

        tracing::warn!(database = %db, "database missing, creating it before retrying the write");

        match self.backend.create_database(&db).await {
            Err(err) if err.is_database_exists() => {
                tracing::debug!(database = %db, "database created concurrently");
            }
            result => result?,
        }

        self.backend.create_document(&db, body).await
    }
}
