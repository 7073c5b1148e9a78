//! Property-based tests for path handling.
//!
//! Note: The normalize, relationship, and resolver modules carry their own
//! lighter property tests. This module runs the heavier adversarial suites
//! behind the `property-tests` feature.

use super::normalize::normalize;
use super::relationship::PathRelationship;
use super::resolver::{contains_path, resolve_under};
use super::types::VirtualPath;
use proptest::prelude::*;
use std::path::Path;

// Strategy for generating path-like strings
fn path_component_strategy() -> impl Strategy<Value = String> {
    "[a-z0-9_-]{1,20}"
}

fn virtual_path_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec(path_component_strategy(), 1..8)
        .prop_map(|parts| format!("/{}", parts.join("/")))
}

// Hostile suffixes mixing traversal chains, separators, and junk
fn hostile_suffix_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec(
        prop_oneof![
            Just("..".to_string()),
            Just(".".to_string()),
            Just("...".to_string()),
            Just(String::new()),
            Just("\\".to_string()),
            "[a-zA-Z0-9 _.-]{1,12}",
        ],
        0..=12,
    )
    .prop_map(|parts| parts.join("/"))
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 10000,
        max_shrink_iters: 10000,
        .. ProptestConfig::default()
    })]

    // Normalization is idempotent: normalize(normalize(p)) == normalize(p)
    #[test]
    fn normalization_idempotent(raw in hostile_suffix_strategy()) {
        let once = normalize(&raw);
        prop_assert_eq!(normalize(&once), once);
    }

    // Normalized paths never contain parent refs
    #[test]
    fn normalized_paths_no_parent_refs(raw in hostile_suffix_strategy()) {
        let normalized = normalize(&raw);
        for segment in normalized.trim_start_matches('/').split('/') {
            prop_assert_ne!(segment, "..");
        }
    }

    // Path relationship is reflexive
    #[test]
    fn relationship_reflexive(path in virtual_path_strategy()) {
        prop_assert_eq!(
            PathRelationship::between(&path, &path),
            PathRelationship::Same
        );
    }

    // Containment is transitive
    #[test]
    fn containment_transitive(base in virtual_path_strategy(), parts1 in 1..5usize, parts2 in 1..5usize) {
        let mut path_b = base.clone();
        for i in 0..parts1 {
            path_b.push_str(&format!("/sub{i}"));
        }

        let mut path_c = path_b.clone();
        for i in 0..parts2 {
            path_c.push_str(&format!("/deep{i}"));
        }

        prop_assert!(PathRelationship::contains(&base, &path_b));
        prop_assert!(PathRelationship::contains(&path_b, &path_c));
        prop_assert!(PathRelationship::contains(&base, &path_c));
    }

    // The resolver never yields a path outside its root, whatever the input
    #[test]
    fn resolver_never_escapes(suffix in hostile_suffix_strategy()) {
        let root = Path::new("/srv/storage");
        match resolve_under(root, &suffix) {
            Ok(resolved) => prop_assert!(contains_path(root, resolved.as_path())),
            Err(err) => prop_assert!(err.is_access_denied()),
        }
    }

    // Resolving a canonical virtual path always succeeds and stays contained
    #[test]
    fn canonical_virtual_paths_always_resolve(raw in virtual_path_strategy()) {
        let root = Path::new("/srv/storage");
        let virtual_path = VirtualPath::parse(&raw);
        let resolved = resolve_under(root, virtual_path.as_str());
        prop_assert!(resolved.is_ok());
        prop_assert!(contains_path(root, resolved.unwrap().as_path()));
    }

    // Authorization-style monotonicity: containment survives extension
    #[test]
    fn containment_monotone_under_children(
        root in virtual_path_strategy(),
        child in path_component_strategy()
    ) {
        let path = format!("{root}/{child}");
        prop_assert!(PathRelationship::contains(&root, &path));
    }
}
