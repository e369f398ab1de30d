//! CouchDB backend implementation for couchlayer.
//!
//! This crate provides an HTTP implementation of the `StoreBackend` trait that talks to a
//! CouchDB server through a shared `reqwest` client.
//!
//! To use this backend, keep the default `couchdb` feature of the facade crate enabled:
//!
//! ```toml
//! [dependencies]
//! couchlayer = { version = "x.y.z" }
//! ```
//!
//! # Features
//!
//! - **One exchange per call** - No retries or backoff; every failure reaches the caller
//! - **Classified failures** - Encoding, request construction, connection, body read,
//!   server status and decoding failures map to distinct error variants
//! - **Request tracing** - Every request and response is logged at `debug` level through
//!   `tracing`
//!
//! # Connection
//!
//! The server address is given to the builder, or read from the `COUCHDB_URL`
//! environment variable with [`CouchDbStoreBuilder::from_env`].
//!
//! # Example
//!
//! ```ignore
//! use couchlayer::{backend::StoreBackendBuilder, couchdb::CouchDbStore};
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = CouchDbStore::builder("http://localhost:5984/")
//!         .timeout(Duration::from_secs(10))
//!         .build()
//!         .await?;
//!
//!     Ok(())
//! }
//! ```

#[allow(unused_extern_crates)]
extern crate self as couchlayer_couchdb;

pub mod store;

pub use store::{COUCHDB_URL_ENV, CouchDbStore, CouchDbStoreBuilder, DEFAULT_COUCHDB_URL};
