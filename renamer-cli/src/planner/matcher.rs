use fancy_regex::{Captures, Regex as PatternRegex};
use regex::{NoExpand, Regex, RegexBuilder};
use tracing::debug;

use crate::core::RenamerError;

/// Matches entry names against a pattern and computes their replacement
#[derive(Debug, Clone)]
pub enum NameMatcher {
    /// Case-sensitive substring, every occurrence replaced verbatim
    Literal { pattern: String, replacement: String },

    /// Case-insensitive substring; the escaped pattern is compiled so case
    /// folding follows Unicode rules instead of byte comparison
    FoldedLiteral { pattern: Regex, replacement: String },

    /// Regular expression searched anywhere in the name; back-references
    /// and look-around are allowed in the pattern
    Regex { pattern: PatternRegex, template: Template },
}

impl NameMatcher {
    pub fn literal(pattern: &str, replacement: &str, ignore_case: bool) -> Result<Self, RenamerError> {
        if !ignore_case {
            return Ok(NameMatcher::Literal {
                pattern: pattern.to_string(),
                replacement: replacement.to_string(),
            });
        }

        let folded = RegexBuilder::new(&regex::escape(pattern))
            .case_insensitive(true)
            .build()
            .map_err(|e| RenamerError::InvalidRegex(e.to_string()))?;

        Ok(NameMatcher::FoldedLiteral {
            pattern: folded,
            replacement: replacement.to_string(),
        })
    }

    pub fn regex(pattern: &str, replacement: &str, ignore_case: bool) -> Result<Self, RenamerError> {
        let source = if ignore_case {
            format!("(?i){}", pattern)
        } else {
            pattern.to_string()
        };
        let regex =
            PatternRegex::new(&source).map_err(|e| RenamerError::InvalidRegex(error_summary(&e.to_string())))?;

        let template = Template::parse(replacement, regex.captures_len());
        Ok(NameMatcher::Regex {
            pattern: regex,
            template,
        })
    }

    /// New name for `name`, or `None` when the pattern does not occur in it
    pub fn apply(&self, name: &str) -> Option<String> {
        match self {
            NameMatcher::Literal { pattern, replacement } => {
                if pattern.is_empty() || !name.contains(pattern.as_str()) {
                    return None;
                }
                Some(name.replace(pattern.as_str(), replacement))
            }
            NameMatcher::FoldedLiteral { pattern, replacement } => {
                if !pattern.is_match(name) {
                    return None;
                }
                Some(pattern.replace_all(name, NoExpand(replacement)).into_owned())
            }
            NameMatcher::Regex { pattern, template } => replace_matches(pattern, template, name),
        }
    }
}

/// Every non-overlapping match of `pattern` in `name` replaced by `template`
fn replace_matches(pattern: &PatternRegex, template: &Template, name: &str) -> Option<String> {
    let mut replaced = String::with_capacity(name.len());
    let mut last = 0;
    let mut matched = false;

    for caps in pattern.captures_iter(name) {
        let caps = match caps {
            Ok(caps) => caps,
            Err(e) => {
                debug!("Match abandoned for {}: {}", name, e);
                return None;
            }
        };
        let Some(whole) = caps.get(0) else {
            continue;
        };
        replaced.push_str(&name[last..whole.start()]);
        replaced.push_str(&template.expand(name, &caps));
        last = whole.end();
        matched = true;
    }

    if !matched {
        return None;
    }
    replaced.push_str(&name[last..]);
    Some(replaced)
}

/// Replacement template using ECMAScript back-reference syntax
///
/// Supported: `$$`, `$&`, `` $` ``, `$'`, `$n`, `$nn`, and named groups as
/// `$<name>` or `${name}` (`${n}` is group `n`). Anything else is copied
/// literally.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    pieces: Vec<Piece>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Piece {
    Text(String),
    Group(usize),
    Named(String),
    Before,
    After,
}

impl Template {
    /// Parse `source` for a regex with `captures_len` groups (including group 0)
    pub fn parse(source: &str, captures_len: usize) -> Self {
        let mut pieces = Vec::new();
        let mut text = String::new();
        let chars: Vec<char> = source.chars().collect();
        let mut i = 0;

        while i < chars.len() {
            if chars[i] != '$' || i + 1 >= chars.len() {
                text.push(chars[i]);
                i += 1;
                continue;
            }

            let next = chars[i + 1];
            let piece = match next {
                '$' => {
                    text.push('$');
                    i += 2;
                    continue;
                }
                '&' => Some((Piece::Group(0), 2)),
                '<' => named_reference(&chars[i + 2..], '>'),
                '{' => named_reference(&chars[i + 2..], '}'),
                '`' => Some((Piece::Before, 2)),
                '\'' => Some((Piece::After, 2)),
                d if d.is_ascii_digit() => {
                    let first = d.to_digit(10).unwrap_or(0) as usize;
                    let two_digit = chars
                        .get(i + 2)
                        .and_then(|c| c.to_digit(10))
                        .map(|second| first * 10 + second as usize)
                        .filter(|n| *n > 0 && *n < captures_len);
                    match two_digit {
                        Some(n) => Some((Piece::Group(n), 3)),
                        None => Some((Piece::Group(first), 2)),
                    }
                }
                _ => None,
            };

            match piece {
                Some((piece, width)) => {
                    if !text.is_empty() {
                        pieces.push(Piece::Text(std::mem::take(&mut text)));
                    }
                    pieces.push(piece);
                    i += width;
                }
                None => {
                    text.push('$');
                    i += 1;
                }
            }
        }

        if !text.is_empty() {
            pieces.push(Piece::Text(text));
        }
        Self { pieces }
    }

    fn expand(&self, haystack: &str, caps: &Captures) -> String {
        let whole = caps.get(0);
        let mut out = String::new();
        for piece in &self.pieces {
            match piece {
                Piece::Text(text) => out.push_str(text),
                Piece::Group(n) => {
                    if let Some(m) = caps.get(*n) {
                        out.push_str(m.as_str());
                    }
                }
                Piece::Named(group) => {
                    if let Some(m) = caps.name(group) {
                        out.push_str(m.as_str());
                    }
                }
                Piece::Before => {
                    if let Some(m) = whole {
                        out.push_str(&haystack[..m.start()]);
                    }
                }
                Piece::After => {
                    if let Some(m) = whole {
                        out.push_str(&haystack[m.end()..]);
                    }
                }
            }
        }
        out
    }
}

/// `name` followed by `close` at the start of `rest`, as a piece and its
/// width counted from the `$`
fn named_reference(rest: &[char], close: char) -> Option<(Piece, usize)> {
    let end = rest.iter().position(|c| *c == close)?;
    let name: String = rest[..end].iter().collect();
    if name.is_empty() || !name.chars().all(|c| c == '_' || c.is_alphanumeric()) {
        return None;
    }

    let piece = match name.parse::<usize>() {
        Ok(n) => Piece::Group(n),
        Err(_) => Piece::Named(name),
    };
    Some((piece, end + 3))
}

fn error_summary(message: &str) -> String {
    message
        .lines()
        .rev()
        .find(|line| line.starts_with("error:"))
        .map(|line| line.trim_start_matches("error:").trim().to_string())
        .unwrap_or_else(|| message.lines().next().unwrap_or_default().to_string())
}
