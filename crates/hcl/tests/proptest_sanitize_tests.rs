//! Property-based tests for identifier sanitization.
//!
//! These tests verify the contracts emitters rely on:
//! - Totality: every input maps to a legal identifier
//! - Stability: sanitizing the same input twice gives the same result
//! - Identity: names that are already legal are left unchanged

use proptest::prelude::*;
use tfgen_hcl::{is_valid_identifier, sanitize};

/// Names that are already legal identifiers
fn legal_name_strategy() -> impl Strategy<Value = String> {
    "[A-Za-z_][A-Za-z0-9_-]{0,30}".prop_map(String::from)
}

proptest! {
    /// Contract: sanitize always produces a legal identifier
    #[test]
    fn sanitize_is_total(name in any::<String>()) {
        prop_assert!(is_valid_identifier(&sanitize(&name)));
    }

    /// Contract: sanitize is a pure function of its input
    #[test]
    fn sanitize_is_stable(name in any::<String>()) {
        prop_assert_eq!(sanitize(&name), sanitize(&name));
    }

    /// Contract: legal identifiers pass through unchanged
    #[test]
    fn sanitize_keeps_legal_names(name in legal_name_strategy()) {
        prop_assert_eq!(sanitize(&name), name);
    }

    /// Contract: sanitizing twice is the same as sanitizing once
    #[test]
    fn sanitize_is_idempotent(name in any::<String>()) {
        let once = sanitize(&name);
        prop_assert_eq!(sanitize(&once), once);
    }

    /// Contract: sanitized names are accepted by the HCL parser as identifiers
    #[test]
    fn sanitized_names_parse(name in any::<String>()) {
        let source = format!("{} = 1\n", sanitize(&name));
        prop_assert!(hcl::parse(&source).is_ok());
    }
}
