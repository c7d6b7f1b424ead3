//! String content formats
//!
//! Precompiled patterns for the named string formats (`email`, `url`, `uuid`).

use std::sync::LazyLock;

static EMAIL_REGEX: LazyLock<regex::Regex> = LazyLock::new(|| {
    regex::Regex::new(
        r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)+$"
    ).unwrap()
});

static URL_REGEX: LazyLock<regex::Regex> = LazyLock::new(|| {
    regex::Regex::new(r"^[a-zA-Z][a-zA-Z0-9+.-]*://[^\s/?#]+[^\s]*$").unwrap()
});

static UUID_REGEX: LazyLock<regex::Regex> = LazyLock::new(|| {
    regex::Regex::new(
        r"^[0-9a-fA-F]{8}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{12}$",
    )
    .unwrap()
});

/// A named string format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Format {
    /// `local@domain.tld`
    Email,
    /// `scheme://host...`
    Url,
    /// 8-4-4-4-12 hexadecimal groups.
    Uuid,
}

impl Format {
    /// Name reported in the `validation` issue param.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Email => "email",
            Self::Url => "url",
            Self::Uuid => "uuid",
        }
    }

    /// Default message for a value that does not match.
    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            Self::Email => "Invalid email",
            Self::Url => "Invalid url",
            Self::Uuid => "Invalid uuid",
        }
    }

    /// Returns `true` when `input` matches the format.
    #[must_use]
    pub fn matches(self, input: &str) -> bool {
        match self {
            Self::Email => EMAIL_REGEX.is_match(input),
            Self::Url => URL_REGEX.is_match(input),
            Self::Uuid => UUID_REGEX.is_match(input),
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
