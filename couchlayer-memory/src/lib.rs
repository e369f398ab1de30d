//! In-memory storage backend for couchlayer.
//!
//! This crate provides a thread-safe, in-memory implementation of the `StoreBackend` trait
//! that answers like a CouchDB server: a write to a missing database fails with
//! `404 Database does not exist.`, creating an existing database fails with
//! `412 file_exists`, and so on. It is meant for tests and local development, where the
//! document operations should behave exactly as they would against a real server.
//!
//! # Features
//!
//! - **Thread-safe access** - Concurrent reads and writes using async-aware RwLock
//! - **CouchDB-shaped errors** - Same status codes and error bodies as the server
//! - **Revision tokens** - Every created document gets a `1-<hex>` revision
//!
//! # Quick Start
//!
//! ```ignore
//! use couchlayer::{prelude::*, document::JsonDoc, memory::InMemoryStore};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = DocumentStore::new(InMemoryStore::builder().build().await?);
//!
//!     let mut doc = JsonDoc::new("io.cozy.notes");
//!     store.create_document("dev-", &mut doc).await?;
//!
//!     Ok(())
//! }
//! ```

#[allow(unused_extern_crates)]
extern crate self as couchlayer_memory;

pub mod store;

pub use store::{InMemoryStore, InMemoryStoreBuilder};
