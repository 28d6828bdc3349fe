use crate::core::paths::split_extension;
use crate::core::RenamerError;

use super::matcher::NameMatcher;

/// How new names are derived, decided once per plan
#[derive(Debug, Clone)]
pub enum RenameMode {
    /// Only entries matching the pattern are renamed
    Pattern(NameMatcher),

    /// `<text`: every entry gets `text` in front of its name
    Prefix(String),

    /// `>text`: every entry gets `text` after its name, before a file's extension
    Suffix(String),

    /// No pattern and no tagged replacement: list entries unchanged
    Passthrough,
}

impl RenameMode {
    pub fn select(
        pattern: &str,
        replacement: &str,
        use_regex: bool,
        ignore_case: bool,
    ) -> Result<Self, RenamerError> {
        if !pattern.is_empty() {
            let matcher = if use_regex {
                NameMatcher::regex(pattern, replacement, ignore_case)?
            } else {
                NameMatcher::literal(pattern, replacement, ignore_case)?
            };
            return Ok(RenameMode::Pattern(matcher));
        }

        if let Some(text) = replacement.strip_prefix('<') {
            Ok(RenameMode::Prefix(text.to_string()))
        } else if let Some(text) = replacement.strip_prefix('>') {
            Ok(RenameMode::Suffix(text.to_string()))
        } else {
            Ok(RenameMode::Passthrough)
        }
    }

    /// New name for an entry, or `None` if the entry is not part of this plan
    pub fn rename(&self, name: &str, is_directory: bool) -> Option<String> {
        match self {
            RenameMode::Pattern(matcher) => matcher.apply(name),
            RenameMode::Prefix(text) => Some(format!("{}{}", text, name)),
            RenameMode::Suffix(text) if is_directory => Some(format!("{}{}", name, text)),
            RenameMode::Suffix(text) => {
                let (stem, ext) = split_extension(name);
                Some(format!("{}{}{}", stem, text, ext))
            }
            RenameMode::Passthrough => Some(name.to_string()),
        }
    }

    pub fn summary(&self, total_count: usize) -> String {
        match self {
            RenameMode::Pattern(_) => format!("Matches found: {}", total_count),
            RenameMode::Prefix(_) | RenameMode::Suffix(_) => {
                format!("Empty pattern: bulk mode, entries: {}", total_count)
            }
            RenameMode::Passthrough => {
                format!("Empty pattern: showing all entries ({})", total_count)
            }
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            RenameMode::Pattern(NameMatcher::Regex { .. }) => "regex",
            RenameMode::Pattern(_) => "literal",
            RenameMode::Prefix(_) => "prefix",
            RenameMode::Suffix(_) => "suffix",
            RenameMode::Passthrough => "passthrough",
        }
    }
}
