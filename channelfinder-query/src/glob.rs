//! Glob to SQL `LIKE` pattern translation.
//!
//! Search patterns use file-glob syntax: `*` matches any sequence, `?` any
//! single character, and a backslash makes the following wildcard literal.
//! The store matches with `LIKE`, where `%` and `_` are the wildcards and a
//! backslash is the escape character. Translation is a single left-to-right
//! pass: the input is split into [`GlobToken`]s, and every token kind renders
//! through exactly one rule.

use std::iter::Peekable;
use std::str::Chars;

/// One lexical unit of a glob pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GlobToken {
    /// A run of backslashes that does not escape a wildcard. Copied verbatim.
    Backslashes(usize),
    /// `\*` or `\?`: the wildcard character taken literally.
    EscapedWildcard(char),
    /// Bare `*`.
    AnySequence,
    /// Bare `?`.
    AnyChar,
    /// `%` or `_`: ordinary in a glob, special to `LIKE`.
    LikeSpecial(char),
    /// Any other character.
    Literal(char),
}

impl GlobToken {
    fn render(self, out: &mut String) {
        match self {
            Self::Backslashes(n) => out.extend(std::iter::repeat_n('\\', n)),
            Self::EscapedWildcard(c) | Self::Literal(c) => out.push(c),
            Self::AnySequence => out.push('%'),
            Self::AnyChar => out.push('_'),
            Self::LikeSpecial(c) => {
                out.push('\\');
                out.push(c);
            }
        }
    }
}

/// Splits a glob into tokens.
///
/// A run of `N` backslashes in front of `*` or `?` escapes the wildcard when
/// `N` is odd; the remaining `N - 1` backslashes form their own token. Runs in
/// front of anything else are kept whole.
pub fn tokenize(glob: &str) -> Vec<GlobToken> {
    let mut chars = glob.chars().peekable();
    let mut tokens = Vec::with_capacity(glob.len());
    while let Some(c) = chars.next() {
        match c {
            '\\' => backslash_run(&mut chars, &mut tokens),
            '*' => tokens.push(GlobToken::AnySequence),
            '?' => tokens.push(GlobToken::AnyChar),
            '%' | '_' => tokens.push(GlobToken::LikeSpecial(c)),
            other => tokens.push(GlobToken::Literal(other)),
        }
    }
    tokens
}

fn backslash_run(chars: &mut Peekable<Chars<'_>>, tokens: &mut Vec<GlobToken>) {
    let mut run = 1;
    while chars.next_if_eq(&'\\').is_some() {
        run += 1;
    }
    match chars.peek().copied() {
        Some(w @ ('*' | '?')) if run % 2 == 1 => {
            chars.next();
            if run > 1 {
                tokens.push(GlobToken::Backslashes(run - 1));
            }
            tokens.push(GlobToken::EscapedWildcard(w));
        }
        _ => tokens.push(GlobToken::Backslashes(run)),
    }
}

/// Translates a glob pattern into the equivalent `LIKE` pattern.
///
/// ```
/// use channelfinder_query::glob::translate;
///
/// assert_eq!(translate("SR:C01-*"), "SR:C01-%");
/// assert_eq!(translate("a?c"), "a_c");
/// assert_eq!(translate(r"\*"), "*");
/// assert_eq!(translate("50%"), r"50\%");
/// assert_eq!(translate("a_b"), r"a\_b");
/// ```
pub fn translate(glob: &str) -> String {
    let mut out = String::with_capacity(glob.len() + 4);
    for token in tokenize(glob) {
        token.render(&mut out);
    }
    out
}

/// Whether a value contains glob wildcards (escaped or not).
pub fn is_pattern(value: &str) -> bool {
    value.contains(['*', '?'])
}
