//! Glob translation tests, including property checks against SQLite's own
//! `LIKE` implementation.

use channelfinder_query::glob::{is_pattern, tokenize, translate, GlobToken};
use proptest::prelude::*;
use rusqlite::Connection;

// ── Fixed cases ─────────────────────────────────────────────────

#[test]
fn wildcards_translate() {
    assert_eq!(translate("*"), "%");
    assert_eq!(translate("?"), "_");
    assert_eq!(translate("SR:C0?-*"), "SR:C0_-%");
}

#[test]
fn escaped_wildcards_become_literals() {
    assert_eq!(translate(r"\*"), "*");
    assert_eq!(translate(r"\?"), "?");
    assert_eq!(translate(r"a\*b\?c"), "a*b?c");
}

#[test]
fn like_specials_are_escaped() {
    assert_eq!(translate("50%"), r"50\%");
    assert_eq!(translate("a_b"), r"a\_b");
    assert_eq!(translate("%_"), r"\%\_");
}

#[test]
fn plain_text_is_unchanged() {
    assert_eq!(translate(""), "");
    assert_eq!(translate("prop1"), "prop1");
    assert_eq!(translate("Grüße:μ"), "Grüße:μ");
}

#[test]
fn backslash_runs_are_counted() {
    // escaped backslash, then a wildcard
    assert_eq!(translate(r"\\*"), r"\\%");
    // escaped backslash, then an escaped star
    assert_eq!(translate(r"\\\*"), r"\\*");
    assert_eq!(translate(r"\\\\?"), r"\\\\_");
    assert_eq!(translate(r"\\\\\?"), r"\\\\?");
}

#[test]
fn adjacent_tokens_are_independent() {
    assert_eq!(translate(r"\**"), "*%");
    assert_eq!(translate(r"*\*"), "%*");
    assert_eq!(translate(r"\?\?"), "??");
    assert_eq!(translate("**"), "%%");
}

#[test]
fn tokens_are_tagged_by_kind() {
    assert_eq!(
        tokenize(r"a*\?%"),
        vec![
            GlobToken::Literal('a'),
            GlobToken::AnySequence,
            GlobToken::EscapedWildcard('?'),
            GlobToken::LikeSpecial('%'),
        ]
    );
}

#[test]
fn pattern_detection() {
    assert!(is_pattern("grp-*"));
    assert!(is_pattern("T3?"));
    assert!(!is_pattern("urgent"));
}

// ── Properties ──────────────────────────────────────────────────

fn like(conn: &Connection, text: &str, pattern: &str) -> bool {
    conn.query_row(r"SELECT ?1 LIKE ?2 ESCAPE '\'", [text, pattern], |row| row.get(0))
        .unwrap()
}

/// Escapes every glob-significant character so the glob matches `s` literally.
fn glob_literal(s: &str) -> String {
    let mut out = String::new();
    for c in s.chars() {
        if matches!(c, '*' | '?' | '\\') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

proptest! {
    /// Text without glob or LIKE syntax passes through untouched.
    #[test]
    fn plain_text_identity(s in "[a-zA-Z0-9:. -]{0,40}") {
        prop_assert_eq!(translate(&s), s);
    }

    /// Bare stars and question marks map one to one onto `%` and `_`.
    #[test]
    fn wildcards_map_positionally(s in "[a-z*?]{0,30}") {
        let expected: String = s
            .chars()
            .map(|c| match c {
                '*' => '%',
                '?' => '_',
                other => other,
            })
            .collect();
        prop_assert_eq!(translate(&s), expected);
    }

    /// Escaping every wildcard yields the original text back.
    #[test]
    fn escaped_wildcards_roundtrip(s in "[a-z*?]{0,30}") {
        let escaped: String = s
            .chars()
            .flat_map(|c| match c {
                '*' | '?' => vec!['\\', c],
                other => vec![other],
            })
            .collect();
        prop_assert_eq!(translate(&escaped), s);
    }

    /// A fully escaped glob matches exactly its own text under SQLite LIKE.
    #[test]
    fn literal_glob_matches_itself(s in r"[ab%_*?\\]{0,12}") {
        let conn = Connection::open_in_memory().unwrap();
        let pattern = translate(&glob_literal(&s));
        prop_assert!(like(&conn, &s, &pattern), "{:?} !~ {:?}", s, pattern);
    }

    /// A literal glob rejects text that differs from it in one position.
    #[test]
    fn literal_glob_rejects_other_text(
        s in "[ab%_*?]{1,10}",
        at in any::<prop::sample::Index>(),
        replacement in prop::sample::select(vec!['a', 'b', '%', '_', '*', '?']),
    ) {
        let mut chars: Vec<char> = s.chars().collect();
        let i = at.index(chars.len());
        chars[i] = replacement;
        let t: String = chars.into_iter().collect();
        prop_assume!(t != s);
        let conn = Connection::open_in_memory().unwrap();
        let pattern = translate(&glob_literal(&s));
        prop_assert!(!like(&conn, &t, &pattern), "{:?} ~ {:?}", t, pattern);
    }

    /// Translation is deterministic.
    #[test]
    fn translation_is_stable(s in r"[a-z%_*?\\]{0,30}") {
        prop_assert_eq!(translate(&s), translate(&s));
    }
}
