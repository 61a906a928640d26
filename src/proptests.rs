//! Property-based tests for alias resolution, cache naming and diff parsing.
//!
//! These tests use proptest to generate random inputs and verify that
//! invariants hold for all possible inputs.

#[cfg(test)]
mod proptest_tests {
    use crate::alias::{resolve_url, AliasTable};
    use crate::diffstat::DiffStatGrammar;
    use crate::sourcedir::{cache_directory, url_directory_name, SourceKind};
    use proptest::prelude::*;
    use std::path::Path;

    // ============================================================================
    // resolve_url property tests
    // ============================================================================

    proptest! {
        /// Property: with no matching alias, a URL resolves to itself
        #[test]
        fn resolve_url_unknown_scheme_is_identity(
            scheme in "[a-z][a-z0-9.+-]{0,10}",
            rest in "[^\n]{0,40}",
        ) {
            let url = format!("{}:{}", scheme, rest);
            let resolved = resolve_url(&url, &AliasTable::new()).unwrap();
            prop_assert_eq!(resolved, url);
        }

        /// Property: a known alias is replaced by its base, the remainder kept
        #[test]
        fn resolve_url_known_alias_prepends_base(
            alias in "[a-z]{1,8}",
            base in "https://[a-z]{1,10}/",
            rest in "[a-z/:]{0,20}",
        ) {
            let mut aliases = AliasTable::new();
            aliases.insert(alias.clone(), base.clone());
            let resolved = resolve_url(&format!("{}:{}", alias, rest), &aliases).unwrap();
            prop_assert_eq!(resolved, format!("{}{}", base, rest));
        }

        /// Property: URLs without a colon never resolve
        #[test]
        fn resolve_url_requires_colon(url in "[^:]{0,40}") {
            prop_assert!(resolve_url(&url, &AliasTable::new()).is_err());
        }
    }

    // ============================================================================
    // url_directory_name property tests
    // ============================================================================

    proptest! {
        /// Property: directory names only contain [A-Za-z0-9%_]
        #[test]
        fn url_directory_name_only_safe_chars(input in ".*") {
            let result = url_directory_name(&input);
            prop_assert!(
                result.chars().all(|c| c.is_ascii_alphanumeric() || c == '%' || c == '_'),
                "url_directory_name produced an unsafe character from input '{}'",
                input
            );
        }

        /// Property: one output character per input character
        #[test]
        fn url_directory_name_preserves_char_count(input in ".*") {
            prop_assert_eq!(
                url_directory_name(&input).chars().count(),
                input.chars().count()
            );
        }

        /// Property: names that are already safe are unchanged
        #[test]
        fn url_directory_name_keeps_safe_input(input in "[A-Za-z0-9%_]*") {
            prop_assert_eq!(url_directory_name(&input), input);
        }

        /// Property: the cache path is deterministic and sits below root/kind
        #[test]
        fn cache_directory_is_deterministic(url in ".{0,60}") {
            let root = Path::new("/cache");
            let first = cache_directory(&url, SourceKind::Git, root);
            let second = cache_directory(&url, SourceKind::Git, root);
            prop_assert!(first.path.starts_with("/cache/git"));
            prop_assert_eq!(first, second);
        }
    }

    // ============================================================================
    // DiffStatGrammar property tests
    // ============================================================================

    proptest! {
        /// Property: a brace rename rebuilds both paths from prefix, segment
        /// and suffix
        #[test]
        fn brace_rename_round_trip(
            prefix in "([a-z]{1,6}/){0,2}",
            old in "[a-z]{1,6}",
            new in "[a-z]{1,6}",
            suffix in "[a-z]{0,6}",
            count in 0u32..100,
        ) {
            let grammar = DiffStatGrammar::for_elements().unwrap();
            let line = format!(" {}{{{} => {}}}{}.bst | {}", prefix, old, new, suffix, count);
            let pair = grammar.parse_line(&line).unwrap();
            prop_assert_eq!(pair.old_path, format!("{}{}{}.bst", prefix, old, suffix));
            prop_assert_eq!(pair.new_path, format!("{}{}{}.bst", prefix, new, suffix));
        }

        /// Property: the last line of a summary never yields a pair
        #[test]
        fn footer_never_yields(name in "[a-z]{1,8}") {
            let grammar = DiffStatGrammar::for_elements().unwrap();
            let summary = format!(" {}.bst | 1 +\n", name);
            prop_assert_eq!(grammar.pairs(&summary).count(), 0);
        }
    }
}
