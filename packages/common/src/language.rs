use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Programming language of a submission.
///
/// The set is closed: anything outside it is rejected at validation time
/// rather than silently mapped to a default. The executor id table below is
/// the single source of truth for translating a logical language into the
/// identifier the remote sandbox understands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    C,
    Cpp,
    Java,
    Python,
    JavaScript,
    Go,
    Rust,
}

impl Language {
    /// All supported languages.
    pub const ALL: &'static [Language] = &[
        Self::C,
        Self::Cpp,
        Self::Java,
        Self::Python,
        Self::JavaScript,
        Self::Go,
        Self::Rust,
    ];

    /// Numeric language id used by the execution service. Total over the
    /// enum; there is no fallback entry.
    pub fn executor_id(&self) -> u32 {
        match self {
            Self::C => 50,
            Self::Cpp => 54,
            Self::Java => 62,
            Self::Python => 71,
            Self::JavaScript => 63,
            Self::Go => 60,
            Self::Rust => 73,
        }
    }

    /// Returns the canonical lowercase identifier (e.g. "cpp", "python").
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::C => "c",
            Self::Cpp => "cpp",
            Self::Java => "java",
            Self::Python => "python",
            Self::JavaScript => "javascript",
            Self::Go => "go",
            Self::Rust => "rust",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error when parsing an unsupported language identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseLanguageError {
    invalid: String,
}

impl ParseLanguageError {
    /// The identifier that failed to parse.
    pub fn invalid(&self) -> &str {
        &self.invalid
    }
}

impl fmt::Display for ParseLanguageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Unsupported language '{}'. Supported: {}",
            self.invalid,
            Language::ALL
                .iter()
                .map(|l| l.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        )
    }
}

impl std::error::Error for ParseLanguageError {}

impl FromStr for Language {
    type Err = ParseLanguageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Accept a few common aliases; everything else is a hard error.
        match s.trim().to_ascii_lowercase().as_str() {
            "c" => Ok(Self::C),
            "cpp" | "c++" => Ok(Self::Cpp),
            "java" => Ok(Self::Java),
            "python" | "python3" | "py" => Ok(Self::Python),
            "javascript" | "js" | "node" => Ok(Self::JavaScript),
            "go" | "golang" => Ok(Self::Go),
            "rust" => Ok(Self::Rust),
            _ => Err(ParseLanguageError {
                invalid: s.to_string(),
            }),
        }
    }
}
