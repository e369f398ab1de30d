//! Convenient re-exports of commonly used types from couchlayer.
//!
//! ```ignore
//! use couchlayer::prelude::*;
//! ```
//!
//! This provides access to:
//! - Document traits and the JSON document type
//! - Store backends and builders
//! - The document store
//! - Error types

pub use couchlayer_core::{
    store::DocumentStore,
    document::{Document, DocumentExt, JsonDoc},
    backend::{StoreBackend, StoreBackendBuilder, UpdateResponse},
    error::{ServerError, StoreError, StoreResult},
};
