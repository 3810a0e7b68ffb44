//! Commit message filter with `git log --grep` semantics.
//!
//! `git log --grep` reads its argument as a POSIX basic regular expression:
//! `+ ? | ( ) { }` are literal unless backslash-escaped, `*` is literal at the
//! start of an expression, and `^`/`$` anchor only at the edges. In-process
//! backends translate that syntax to the `regex` crate before matching.

use std::sync::OnceLock;

use regex::{Regex, RegexBuilder};

use crate::error::{PatchSeriesError, Result};

/// Commit message filter.
///
/// Keeps the raw text for backends that hand it to `git log --grep`. The
/// translated regex is compiled on first use, so a backend that never matches
/// in-process accepts any text git accepts.
#[derive(Debug, Clone)]
pub struct MessageFilter {
    pattern: String,
    regex: OnceLock<std::result::Result<Regex, regex::Error>>,
}

impl MessageFilter {
    pub fn new(pattern: impl Into<String>) -> Self {
        MessageFilter {
            pattern: pattern.into(),
            regex: OnceLock::new(),
        }
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Compiled, case-sensitive, line-anchored form of the filter
    pub fn regex(&self) -> Result<&Regex> {
        self.regex
            .get_or_init(|| {
                RegexBuilder::new(&bre_to_regex(&self.pattern))
                    .multi_line(true)
                    .build()
            })
            .as_ref()
            .map_err(|e| PatchSeriesError::Filter(e.clone()))
    }

    pub fn matches(&self, message: &str) -> Result<bool> {
        Ok(self.regex()?.is_match(message))
    }
}

/// Translates a POSIX basic regular expression (with the GNU `\+ \? \|`
/// extensions git accepts) into `regex` crate syntax.
pub fn bre_to_regex(pattern: &str) -> String {
    let chars: Vec<char> = pattern.chars().collect();
    let mut out = String::with_capacity(pattern.len() * 2);
    // true where a following `*` would be literal, and `^` an anchor
    let mut at_expr_start = true;
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        let mut next_at_start = false;

        match c {
            '\\' => match chars.get(i + 1) {
                Some(&esc) => {
                    i += 1;
                    match esc {
                        '(' => {
                            out.push('(');
                            next_at_start = true;
                        }
                        '|' => {
                            out.push('|');
                            next_at_start = true;
                        }
                        ')' | '{' | '}' | '+' | '?' => out.push(esc),
                        '<' | '>' => out.push_str(r"\b"),
                        'w' | 'W' | 's' | 'S' | 'b' | 'B' => {
                            out.push('\\');
                            out.push(esc);
                        }
                        '1'..='9' => {
                            // back-references; left for the regex parser to reject
                            out.push('\\');
                            out.push(esc);
                        }
                        other => push_literal(&mut out, other),
                    }
                }
                None => out.push_str(r"\\"),
            },
            '+' | '?' | '|' | '(' | ')' | '{' | '}' => push_literal(&mut out, c),
            '*' if at_expr_start => push_literal(&mut out, c),
            '*' | '.' => out.push(c),
            '^' if at_expr_start => {
                out.push('^');
                next_at_start = true;
            }
            '^' => push_literal(&mut out, c),
            '$' if is_expr_end(&chars, i + 1) => out.push('$'),
            '$' => push_literal(&mut out, c),
            '[' => {
                i = copy_bracket(&chars, i, &mut out);
            }
            _ => push_literal(&mut out, c),
        }

        at_expr_start = next_at_start;
        i += 1;
    }

    out
}

fn push_literal(out: &mut String, c: char) {
    out.push_str(&regex::escape(c.encode_utf8(&mut [0; 4])));
}

/// `$` anchors at the end of the pattern or right before `\)` / `\|`
fn is_expr_end(chars: &[char], at: usize) -> bool {
    match chars.get(at) {
        None => true,
        Some('\\') => matches!(chars.get(at + 1), Some(')') | Some('|')),
        _ => false,
    }
}

/// Copies a bracket expression starting at `chars[start] == '['` and returns
/// the index of its closing `]`. An unterminated bracket is kept literal.
fn copy_bracket(chars: &[char], start: usize, out: &mut String) -> usize {
    let mut j = start + 1;
    let mut body = String::from("[");

    if chars.get(j) == Some(&'^') {
        body.push('^');
        j += 1;
    }
    if chars.get(j) == Some(&']') {
        body.push_str(r"\]");
        j += 1;
    }

    while j < chars.len() {
        match chars[j] {
            ']' => {
                body.push(']');
                out.push_str(&body);
                return j;
            }
            '[' if matches!(chars.get(j + 1), Some(':') | Some('.') | Some('=')) => {
                let kind = chars[j + 1];
                let close = (j + 2..chars.len().saturating_sub(1))
                    .find(|&k| chars[k] == kind && chars[k + 1] == ']');
                match close {
                    Some(k) if kind == ':' => {
                        body.extend(&chars[j..=k + 1]);
                        j = k + 1;
                    }
                    Some(k) => {
                        // collating element or equivalence class: keep its text literally
                        for &c in &chars[j + 2..k] {
                            push_literal(&mut body, c);
                        }
                        j = k + 1;
                    }
                    None => body.push_str(r"\["),
                }
            }
            // backslash is literal inside POSIX brackets
            c @ ('\\' | '[' | '&' | '~') => {
                body.push('\\');
                body.push(c);
            }
            c => body.push(c),
        }
        j += 1;
    }

    push_literal(out, '[');
    start
}
