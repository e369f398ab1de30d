//! Core traits and types for document representation and serialization.
//!
//! This module provides the [`Document`] trait every stored value implements, the
//! [`DocumentExt`] conversion helpers, and [`JsonDoc`], an untyped document backed by a
//! JSON object.

use serde::{Deserialize, Serialize, de::DeserializeOwned};
use serde_json::{Map, Value, from_value, to_value};
use std::ops::{Deref, DerefMut};

use crate::error::{StoreError, StoreResult};

/// JSON key holding the document id.
pub const ID_KEY: &str = "_id";
/// JSON key holding the revision token.
pub const REV_KEY: &str = "_rev";
/// JSON key holding the doctype of a [`JsonDoc`].
pub const DOCTYPE_KEY: &str = "doctype";

/// Core trait that all documents stored in a document store must implement.
///
/// A document reports its id, revision and doctype, and accepts the id and revision a
/// store assigns when it is created. The doctype selects the database the document lives
/// in and must not change during the document's lifetime.
///
/// Ids and revisions are empty until the document has been created. Serialized documents
/// should carry them under the `_id` and `_rev` keys and omit them while empty.
///
/// # Example
///
/// ```
/// use couchlayer_core::document::Document;
/// use serde::{Serialize, Deserialize};
///
/// #[derive(Debug, Clone, Default, Serialize, Deserialize)]
/// pub struct Note {
///     #[serde(rename = "_id", default, skip_serializing_if = "String::is_empty")]
///     pub id: String,
///     #[serde(rename = "_rev", default, skip_serializing_if = "String::is_empty")]
///     pub rev: String,
///     pub title: String,
/// }
///
/// impl Document for Note {
///     fn id(&self) -> &str { &self.id }
///     fn rev(&self) -> &str { &self.rev }
///     fn doctype(&self) -> &str { "io.cozy.notes" }
///     fn set_id(&mut self, id: String) { self.id = id; }
///     fn set_rev(&mut self, rev: String) { self.rev = rev; }
/// }
/// ```
pub trait Document: Serialize + DeserializeOwned + Send + Sync + 'static {
    /// Returns the document id, or an empty string before creation.
    fn id(&self) -> &str;

    /// Returns the revision token, or an empty string before the first write.
    fn rev(&self) -> &str;

    /// Returns the doctype of this document.
    fn doctype(&self) -> &str;

    /// Sets the document id.
    fn set_id(&mut self, id: String);

    /// Sets the revision token.
    fn set_rev(&mut self, rev: String);
}

/// Extension trait providing JSON conversion for documents.
///
/// Automatically implemented for every [`Document`].
pub trait DocumentExt: Document {
    /// Converts this document to a JSON value for sending.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Encoding`] if serialization fails.
    fn to_json(&self) -> StoreResult<Value>;

    /// Creates a document from a JSON value received from a store.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Decoding`] if the value does not fit the document type.
    fn from_json(value: Value) -> StoreResult<Self>;
}

impl<D: Document> DocumentExt for D {
    fn to_json(&self) -> StoreResult<Value> {
        to_value(self).map_err(|e| StoreError::Encoding(e.to_string()))
    }

    fn from_json(value: Value) -> StoreResult<Self> {
        from_value(value).map_err(|e| StoreError::Decoding(e.to_string()))
    }
}

/// An untyped document backed by a JSON object.
///
/// The id, revision and doctype live under the `_id`, `_rev` and `doctype` keys. Missing
/// or non-string values read as empty strings.
///
/// ```
/// use couchlayer_core::document::{Document, JsonDoc};
/// use serde_json::json;
///
/// let mut doc = JsonDoc::new("io.cozy.events");
/// doc.insert("title".into(), json!("standup"));
///
/// assert_eq!(doc.doctype(), "io.cozy.events");
/// assert_eq!(doc.id(), "");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JsonDoc(Map<String, Value>);

impl JsonDoc {
    /// Creates an empty document of the given doctype.
    pub fn new(doctype: impl Into<String>) -> Self {
        let mut map = Map::new();
        map.insert(DOCTYPE_KEY.to_string(), Value::String(doctype.into()));
        Self(map)
    }

    /// Consumes the document and returns the underlying JSON object.
    pub fn into_inner(self) -> Map<String, Value> {
        self.0
    }

    fn str_field(&self, key: &str) -> &str {
        self.0.get(key).and_then(Value::as_str).unwrap_or("")
    }
}

impl From<Map<String, Value>> for JsonDoc {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl Deref for JsonDoc {
    type Target = Map<String, Value>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for JsonDoc {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl Document for JsonDoc {
    fn id(&self) -> &str {
        self.str_field(ID_KEY)
    }

    fn rev(&self) -> &str {
        self.str_field(REV_KEY)
    }

    fn doctype(&self) -> &str {
        self.str_field(DOCTYPE_KEY)
    }

    fn set_id(&mut self, id: String) {
        self.0.insert(ID_KEY.to_string(), Value::String(id));
    }

    fn set_rev(&mut self, rev: String) {
        self.0.insert(REV_KEY.to_string(), Value::String(rev));
    }
}
