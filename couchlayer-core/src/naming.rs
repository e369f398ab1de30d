//! Database names and document paths.
//!
//! Every `(prefix, doctype)` pair maps to exactly one database. The mapping is a pure
//! function recomputed on each call; nothing is registered or cached.
//!
//! Doctypes that differ only by case, or by `.` versus `-`, map to the same database
//! (`"a.b"` and `"A-B"` both become `a-b`). Changing that would rename existing databases,
//! so the scheme is kept as is.

use urlencoding::encode;

/// Returns the database name before percent-encoding.
///
/// The result contains no `.` and no uppercase characters.
pub fn normalized_database_name(prefix: &str, doctype: &str) -> String {
    format!("{prefix}{doctype}").replace('.', "-").to_lowercase()
}

/// Returns the percent-encoded database name for a doctype, usable as a URL path segment.
///
/// # Example
///
/// ```
/// use couchlayer_core::naming::database_name;
///
/// assert_eq!(database_name("cozy-", "io.cozy.files"), "cozy-io-cozy-files");
/// assert_eq!(database_name("dev/", "io.cozy.files"), "dev%2Fio-cozy-files");
/// ```
pub fn database_name(prefix: &str, doctype: &str) -> String {
    encode(&normalized_database_name(prefix, doctype)).into_owned()
}

/// Returns the path of a document relative to the server root.
///
/// The key inside the database is `doctype + "/" + id`, percent-encoded as one segment.
/// `id` is not validated.
///
/// ```
/// use couchlayer_core::naming::document_path;
///
/// assert_eq!(
///     document_path("cozy-", "io.cozy.files", "42"),
///     "cozy-io-cozy-files/io.cozy.files%2F42",
/// );
/// ```
pub fn document_path(prefix: &str, doctype: &str, id: &str) -> String {
    format!(
        "{}/{}",
        database_name(prefix, doctype),
        encode(&format!("{doctype}/{id}"))
    )
}
