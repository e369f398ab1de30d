//! Main couchlayer crate: typed JSON documents stored in per-doctype CouchDB databases.
//!
//! This crate is the primary entry point of the couchlayer project. It re-exports the core
//! types from `couchlayer-core` and gives access to the storage backends.
//!
//! # Features
//!
//! - **One database per doctype** - The database is derived from a prefix and the
//!   document's doctype, never configured by hand
//! - **Generated ids** - New documents get a `"<doctype>/<32 hex>"` id
//! - **Lazy databases** - The first write into a doctype creates its database
//! - **Typed errors** - Local, transport and server failures stay distinguishable
//!
//! # Quick Start
//!
//! ```ignore
//! use couchlayer::{prelude::*, couchdb::CouchDbStore};
//! use serde::{Serialize, Deserialize};
//!
//! #[derive(Debug, Clone, Default, Serialize, Deserialize)]
//! pub struct Contact {
//!     #[serde(rename = "_id", default, skip_serializing_if = "String::is_empty")]
//!     pub id: String,
//!     #[serde(rename = "_rev", default, skip_serializing_if = "String::is_empty")]
//!     pub rev: String,
//!     pub name: String,
//! }
//!
//! impl Document for Contact {
//!     fn id(&self) -> &str { &self.id }
//!     fn rev(&self) -> &str { &self.rev }
//!     fn doctype(&self) -> &str { "io.cozy.contacts" }
//!     fn set_id(&mut self, id: String) { self.id = id; }
//!     fn set_rev(&mut self, rev: String) { self.rev = rev; }
//! }
//!
//! #[tokio::main]
//! async fn main() -> StoreResult<()> {
//!     let store = DocumentStore::new(CouchDbStore::builder("http://localhost:5984/").build().await?);
//!
//!     let mut alice = Contact { name: "Alice".into(), ..Default::default() };
//!     // Creates the `cozy-io-cozy-contacts` database on first use.
//!     store.create_document("cozy-", &mut alice).await?;
//!
//!     let fetched: Contact = store.get("cozy-", "io.cozy.contacts", &alice.id).await?;
//!     assert_eq!(fetched.rev, alice.rev);
//!
//!     Ok(())
//! }
//! ```
//!
//! # Untyped documents
//!
//! [`document::JsonDoc`] wraps a JSON object and keeps its doctype under the `doctype`
//! key, for callers that do not want a struct per doctype.
//!
//! ```ignore
//! use couchlayer::{prelude::*, memory::InMemoryStore};
//! use serde_json::json;
//!
//! let store = DocumentStore::new(InMemoryStore::new());
//!
//! let mut event = JsonDoc::new("io.cozy.events");
//! event.insert("title".into(), json!("standup"));
//! store.create_document("dev-", &mut event).await?;
//! ```
//!
//! # Backends
//!
//! - [`memory`] - In-process backend answering like CouchDB, for tests and development
//! - [`couchdb`] - HTTP backend (enabled by the default `couchdb` feature)

pub mod prelude;

pub use couchlayer_core::{backend, document, error, id, naming, store};

// Re-export JSON types for convenience
pub use serde_json;

/// In-memory storage backend implementations.
pub mod memory {
    pub use couchlayer_memory::{InMemoryStore, InMemoryStoreBuilder};
}

/// CouchDB storage backend implementations.
///
/// This module is only available when the `couchdb` feature is enabled.
#[cfg(feature = "couchdb")]
pub mod couchdb {
    pub use couchlayer_couchdb::{
        COUCHDB_URL_ENV, CouchDbStore, CouchDbStoreBuilder, DEFAULT_COUCHDB_URL,
    };
}
