//! Placeholder grammar for server definition templates.
//!
//! Recognizes four tokens embedded in `args` entries and `env` values:
//!
//! - `${path:<label>}` and `${dir:<label>}` need a filesystem path.
//! - `${text:<label>}` needs free text.
//! - `${default:<value>}` carries a default and needs no input (env only).
//!
//! A label is any run of characters other than `}`. Detection is
//! substring-based. When a string holds several tokens of the same kind only
//! the first one is reported; callers replacing whole arguments never see the
//! others, and splicing callers replace every occurrence.

use regex::Regex;
use std::sync::LazyLock;

//--------------------------------------------------------------------------------------------------
// Constants
//--------------------------------------------------------------------------------------------------

/// Regex pattern for path and dir placeholders.
pub const PATH_VAR_PATTERN: &str = r"\$\{(?:path|dir):([^}]*)\}";

/// Regex pattern for text placeholders.
pub const TEXT_VAR_PATTERN: &str = r"\$\{text:([^}]*)\}";

/// Regex pattern for default placeholders.
pub const DEFAULT_VAR_PATTERN: &str = r"\$\{default:([^}]*)\}";

static PATH_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(PATH_VAR_PATTERN).expect("Invalid regex pattern"));

static TEXT_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(TEXT_VAR_PATTERN).expect("Invalid regex pattern"));

static DEFAULT_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(DEFAULT_VAR_PATTERN).expect("Invalid regex pattern"));

/// Any of the four placeholder kinds.
static ANY_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$\{(?:path|dir|text|default):[^}]*\}").expect("Invalid regex pattern")
});

//--------------------------------------------------------------------------------------------------
// Types
//--------------------------------------------------------------------------------------------------

/// Placeholder categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaceholderKind {
    /// `${path:..}` or `${dir:..}`.
    Path,
    /// `${text:..}`.
    Text,
    /// `${default:..}`.
    Default,
}

/// What a path placeholder accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathTarget {
    /// `${dir:..}`: an existing directory.
    Directory,
    /// `${path:..}`: any path, including files that do not exist yet.
    Any,
}

//--------------------------------------------------------------------------------------------------
// Methods
//--------------------------------------------------------------------------------------------------

impl PlaceholderKind {
    fn regex(&self) -> &'static Regex {
        match self {
            Self::Path => &*PATH_REGEX,
            Self::Text => &*TEXT_REGEX,
            Self::Default => &*DEFAULT_REGEX,
        }
    }

    /// Check whether `s` contains a placeholder of this kind.
    pub fn is_in(&self, s: &str) -> bool {
        self.regex().is_match(s)
    }

    /// Extract the label of the first placeholder of this kind in `s`.
    pub fn label_in<'a>(&self, s: &'a str) -> Option<&'a str> {
        self.regex()
            .captures(s)
            .and_then(|cap| cap.get(1))
            .map(|m| m.as_str())
    }

    /// Replace every placeholder of this kind in `s` with `value`, keeping the
    /// surrounding text.
    pub fn splice(&self, s: &str, value: &str) -> String {
        self.regex()
            .replace_all(s, regex::NoExpand(value))
            .into_owned()
    }
}

//--------------------------------------------------------------------------------------------------
// Functions
//--------------------------------------------------------------------------------------------------

/// Check if a string contains a `${path:..}` or `${dir:..}` placeholder.
pub fn has_path_placeholder(s: &str) -> bool {
    PlaceholderKind::Path.is_in(s)
}

/// Check if a string contains a `${text:..}` placeholder.
pub fn has_text_placeholder(s: &str) -> bool {
    PlaceholderKind::Text.is_in(s)
}

/// Check if a string contains a `${default:..}` placeholder.
pub fn has_default_placeholder(s: &str) -> bool {
    PlaceholderKind::Default.is_in(s)
}

/// Label of the first path/dir placeholder.
pub fn path_label(s: &str) -> Option<&str> {
    PlaceholderKind::Path.label_in(s)
}

/// Label of the first text placeholder.
pub fn text_label(s: &str) -> Option<&str> {
    PlaceholderKind::Text.label_in(s)
}

/// Label of the first default placeholder.
pub fn default_label(s: &str) -> Option<&str> {
    PlaceholderKind::Default.label_in(s)
}

/// Target of the first path/dir placeholder.
pub fn path_target(s: &str) -> Option<PathTarget> {
    PATH_REGEX.find(s).map(|m| {
        if m.as_str().starts_with("${dir:") {
            PathTarget::Directory
        } else {
            PathTarget::Any
        }
    })
}

/// Check if a string contains a placeholder of any kind.
pub fn has_any_placeholder(s: &str) -> bool {
    ANY_REGEX.is_match(s)
}

//--------------------------------------------------------------------------------------------------
// Tests
//--------------------------------------------------------------------------------------------------
