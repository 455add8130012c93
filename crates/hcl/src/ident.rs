//! Identifier sanitization.

use hcl::Identifier;

/// Replacement for every character that may not appear in an identifier.
const SUBSTITUTE: char = '_';

/// Parse `name` as an identifier, restricted to ASCII.
///
/// HCL itself accepts Unicode letters in identifiers; Terraform object names
/// are kept to `[A-Za-z0-9_-]` so they survive every backend.
pub fn identifier(name: &str) -> Option<Identifier> {
    if name.is_ascii() {
        Identifier::new(name).ok()
    } else {
        None
    }
}

/// Check whether `name` is already a legal Terraform identifier.
///
/// Legal identifiers start with an ASCII letter or underscore and continue
/// with ASCII letters, digits, underscores or dashes.
#[must_use]
pub fn is_valid_identifier(name: &str) -> bool {
    identifier(name).is_some()
}

/// Map an arbitrary name onto a legal identifier.
///
/// Every character outside `[A-Za-z0-9_-]` is replaced by `_`, one for one.
/// Names that would start with a digit or a dash, and the empty name, get a
/// leading `_`. Names that are already legal are returned unchanged.
///
/// Distinct inputs can map to the same identifier (`"a b"` and `"a.b"` both
/// become `"a_b"`); callers detect those collisions on their identity keys.
///
/// # Example
///
/// ```rust
/// assert_eq!(tfgen_hcl::sanitize("My Widget!"), "My_Widget_");
/// assert_eq!(tfgen_hcl::sanitize("nodes.example.com"), "nodes_example_com");
/// assert_eq!(tfgen_hcl::sanitize("10-fast"), "_10-fast");
/// ```
#[must_use]
pub fn sanitize(name: &str) -> String {
    // non-ASCII letters are legal HCL but not legal Terraform names
    let ascii: String = name
        .chars()
        .map(|c| if c.is_ascii() { c } else { SUBSTITUTE })
        .collect();
    Identifier::sanitized(ascii).to_string()
}
