//! A thin client that maps application documents onto per-doctype CouchDB databases.
//!
//! This crate is the core of the couchlayer project and provides:
//!
//! - **Document traits** ([`document`]) - The contract every stored document fulfils, plus [`document::JsonDoc`]
//! - **Naming** ([`naming`]) - Database names and document paths derived from a prefix and a doctype
//! - **Identifiers** ([`id`]) - Doctype-scoped document id generation
//! - **Store backend abstraction** ([`backend`]) - Traits for the four raw database calls
//! - **Document store** ([`store`]) - Document operations with lazy database creation
//! - **Error handling** ([`error`]) - Error taxonomy shared by every backend
//!
//! # Example
//!
//! ```ignore
//! use couchlayer::prelude::*;
//! use serde::{Serialize, Deserialize};
//!
//! #[derive(Debug, Clone, Default, Serialize, Deserialize)]
//! pub struct File {
//!     #[serde(rename = "_id", default, skip_serializing_if = "String::is_empty")]
//!     pub id: String,
//!     #[serde(rename = "_rev", default, skip_serializing_if = "String::is_empty")]
//!     pub rev: String,
//!     pub name: String,
//! }
//!
//! impl Document for File {
//!     fn id(&self) -> &str { &self.id }
//!     fn rev(&self) -> &str { &self.rev }
//!     fn doctype(&self) -> &str { "io.cozy.files" }
//!     fn set_id(&mut self, id: String) { self.id = id; }
//!     fn set_rev(&mut self, rev: String) { self.rev = rev; }
//! }
//! ```

#[allow(unused_extern_crates)]
extern crate self as couchlayer_core;

pub mod backend;
pub mod document;
pub mod error;
pub mod id;
pub mod naming;
pub mod store;
