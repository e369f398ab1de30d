//! Document identifier generation.

use uuid::Uuid;

/// Generates a new document id scoped by its doctype.
///
/// The id is `doctype + "/"` followed by the 32 lowercase hex digits of a random
/// (version 4) UUID.
///
/// ```
/// use couchlayer_core::id::generate_document_id;
///
/// let id = generate_document_id("io.cozy.files");
/// assert!(id.starts_with("io.cozy.files/"));
/// assert_eq!(id.len(), "io.cozy.files/".len() + 32);
/// ```
pub fn generate_document_id(doctype: &str) -> String {
    format!("{doctype}/{}", Uuid::new_v4().simple())
}

/// Strips the `doctype + "/"` namespace from an id produced by [`generate_document_id`].
///
/// Ids without that namespace are returned unchanged.
pub fn strip_doctype<'a>(doctype: &str, id: &'a str) -> &'a str {
    id.strip_prefix(doctype)
        .and_then(|rest| rest.strip_prefix('/'))
        .unwrap_or(id)
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn id_is_doctype_then_lowercase_hex() {
        let id = generate_document_id("io.cozy.files");
        let suffix = id.strip_prefix("io.cozy.files/").unwrap();

        assert_eq!(suffix.len(), 32);
        assert!(suffix.chars().all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)));
    }

    #[test]
    fn ids_do_not_repeat() {
        let ids: HashSet<String> = (0..10_000)
            .map(|_| generate_document_id("io.cozy.notes"))
            .collect();
        assert_eq!(ids.len(), 10_000);
    }

    #[test]
    fn empty_doctype_still_gets_separator() {
        let id = generate_document_id("");
        assert!(id.starts_with('/'));
        assert_eq!(id.len(), 33);
    }

    #[test]
    fn strip_doctype_removes_namespace_only() {
        assert_eq!(strip_doctype("io.cozy.files", "io.cozy.files/abc"), "abc");
        assert_eq!(strip_doctype("io.cozy.files", "abc"), "abc");
        assert_eq!(strip_doctype("io.cozy.files", "io.cozy.filesabc"), "io.cozy.filesabc");
    }
}
