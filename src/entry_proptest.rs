//! Property-based tests for repository list resolution.
//!
//! These tests use proptest to generate random list lines and verify that
//! resolution invariants hold for all of them.

#[cfg(test)]
mod proptest_tests {
    use crate::entry::{dir_name_from_url, resolve};
    use crate::transport::TransportMode;
    use proptest::prelude::*;

    fn transport() -> impl Strategy<Value = TransportMode> {
        prop_oneof![Just(TransportMode::Ssh), Just(TransportMode::Https)]
    }

    proptest! {
        /// Property: shorthand always expands with the chosen transport's scheme
        #[test]
        fn shorthand_uses_transport_scheme(
            owner in "[A-Za-z0-9_-]{1,20}",
            repo in "[A-Za-z0-9_-]{1,20}",
            mode in transport(),
        ) {
            let line = format!("{owner}/{repo}");
            let entries = resolve(&[line.as_str()], mode).unwrap();
            let url = &entries[0].resolved_url;
            match mode {
                TransportMode::Ssh => prop_assert_eq!(url, &format!("git@github.com:{owner}/{repo}")),
                TransportMode::Https => prop_assert_eq!(url, &format!("https://github.com/{owner}/{repo}")),
            }
            prop_assert_eq!(&entries[0].dir_name, &repo);
        }

        /// Property: fully-qualified URLs are never rewritten
        #[test]
        fn full_urls_are_untouched(
            host in "[a-z]{1,10}\\.(com|org|net)",
            path in "[a-z0-9-]{1,10}/[a-z0-9-]{1,10}",
            suffix in prop_oneof![Just(""), Just(".git")],
            mode in transport(),
        ) {
            for url in [
                format!("https://{host}/{path}{suffix}"),
                format!("git@{host}:{path}{suffix}"),
                format!("ssh://git@{host}/{path}{suffix}"),
            ] {
                let entries = resolve(&[url.as_str()], mode).unwrap();
                prop_assert_eq!(&entries[0].resolved_url, &url);
            }
        }

        /// Property: an explicit directory token always wins
        #[test]
        fn explicit_dir_wins(
            url in "(https://example\\.com/)?[a-z]{1,8}/[a-z]{1,8}(\\.git)?",
            dir in "[A-Za-z0-9_.-]{1,16}",
            mode in transport(),
        ) {
            prop_assume!(dir != "." && dir != "..");
            let line = format!("{url} {dir}");
            let entries = resolve(&[line.as_str()], mode).unwrap();
            prop_assert_eq!(&entries[0].dir_name, &dir);
        }

        /// Property: derived directory names are non-empty and carry no `.git` suffix
        #[test]
        fn derived_dir_strips_git_suffix(
            base in "[A-Za-z0-9_-]{1,16}",
            prefix in prop_oneof![
                Just("https://example.com/org/"),
                Just("git@example.com:org/"),
                Just("/srv/git/"),
            ],
        ) {
            let name = dir_name_from_url(&format!("{prefix}{base}.git"));
            prop_assert_eq!(&name, &base);
            let name = dir_name_from_url(&format!("{prefix}{base}"));
            prop_assert_eq!(&name, &base);
        }

        /// Property: resolution preserves order and drops blank lines
        #[test]
        fn order_is_preserved(
            names in prop::collection::btree_set("[a-z]{1,10}", 1..12),
            blanks in prop::collection::vec(prop_oneof![Just(""), Just("  "), Just("\t")], 0..4),
        ) {
            let mut lines: Vec<String> = names.iter().map(|n| format!("org/{n}")).collect();
            lines.extend(blanks.iter().map(|b| b.to_string()));
            let entries = resolve(&lines, TransportMode::Https).unwrap();
            let dirs: Vec<&String> = entries.iter().map(|e| &e.dir_name).collect();
            let expected: Vec<&String> = names.iter().collect();
            prop_assert_eq!(dirs, expected);
        }
    }
}
