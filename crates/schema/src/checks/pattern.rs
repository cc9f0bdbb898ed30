//! String pattern and format checks

use std::net::{Ipv4Addr, Ipv6Addr};
use std::sync::LazyLock;

use regex::Regex;

use crate::checks::{CheckDef, CheckKind, StringFormat};
use crate::foundation::{BuildError, RawIssue};

// Constant patterns; `None` would only mean a typo here, and the formats
// then reject everything rather than panic.
static EMAIL_REGEX: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(
        r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)+$",
    )
    .ok()
});

static UUID_REGEX: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(r"^[0-9a-fA-F]{8}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{12}$").ok()
});

fn matches(regex: &LazyLock<Option<Regex>>, input: &str) -> bool {
    regex.as_ref().is_some_and(|re| re.is_match(input))
}

fn format_issue(format: StringFormat) -> RawIssue {
    RawIssue::invalid_format(format.as_str())
}

// ============================================================================
// REGEX
// ============================================================================

crate::check! {
    /// Matches a regular expression.
    pub Pattern { regex: Regex } for String;
    rule(self, input) { self.regex.is_match(input) }
    issue(self, input) {
        format_issue(StringFormat::Regex).with_param("expected", self.regex.as_str())
    }
    new(regex: Regex) {
        Self {
            def: CheckDef::new(CheckKind::Format(StringFormat::Regex))
                .with_param("pattern", regex.as_str()),
            regex,
        }
    }
    fn pattern(regex: Regex);
}

impl Pattern {
    /// Compiles `pattern`.
    pub fn compile(pattern: &str) -> Result<Self, BuildError> {
        Regex::new(pattern)
            .map(self::pattern)
            .map_err(|err| BuildError::InvalidPattern {
                pattern: pattern.to_owned(),
                reason: err.to_string(),
            })
    }
}

// ============================================================================
// WELL-KNOWN FORMATS
// ============================================================================

crate::check! {
    /// A well-known string format (email, url, uuid, ip, datetime).
    pub Format { format: StringFormat } for String;
    rule(self, input) { matches_format(self.format, input) }
    issue(self, input) { format_issue(self.format) }
    new(format: StringFormat) {
        Self { def: CheckDef::new(CheckKind::Format(format)), format }
    }
    fn format(format: StringFormat);
}

fn matches_format(format: StringFormat, input: &str) -> bool {
    match format {
        StringFormat::Email => matches(&EMAIL_REGEX, input),
        StringFormat::Url => url::Url::parse(input).is_ok_and(|url| url.has_host()),
        StringFormat::Uuid => matches(&UUID_REGEX, input),
        StringFormat::Ipv4 => input.parse::<Ipv4Addr>().is_ok(),
        StringFormat::Ipv6 => input.parse::<Ipv6Addr>().is_ok(),
        StringFormat::Datetime => chrono::DateTime::parse_from_rfc3339(input).is_ok(),
        StringFormat::Lowercase => !input.chars().any(char::is_uppercase),
        StringFormat::Uppercase => !input.chars().any(char::is_lowercase),
        // Parameterized formats have dedicated checks.
        StringFormat::Regex
        | StringFormat::StartsWith
        | StringFormat::EndsWith
        | StringFormat::Includes => true,
    }
}

// ============================================================================
// AFFIXES & CASE
// ============================================================================

crate::check! {
    pub StartsWith { prefix: String } for String;
    rule(self, input) { input.starts_with(&self.prefix) }
    issue(self, input) {
        format_issue(StringFormat::StartsWith).with_param("expected", self.prefix.clone())
    }
    new(prefix: impl Into<String>) {
        let prefix = prefix.into();
        Self {
            def: CheckDef::new(CheckKind::Format(StringFormat::StartsWith))
                .with_param("prefix", prefix.clone()),
            prefix,
        }
    }
    fn starts_with(prefix: impl Into<String>);
}

crate::check! {
    pub EndsWith { suffix: String } for String;
    rule(self, input) { input.ends_with(&self.suffix) }
    issue(self, input) {
        format_issue(StringFormat::EndsWith).with_param("expected", self.suffix.clone())
    }
    new(suffix: impl Into<String>) {
        let suffix = suffix.into();
        Self {
            def: CheckDef::new(CheckKind::Format(StringFormat::EndsWith))
                .with_param("suffix", suffix.clone()),
            suffix,
        }
    }
    fn ends_with(suffix: impl Into<String>);
}

crate::check! {
    pub Includes { needle: String } for String;
    rule(self, input) { input.contains(&self.needle) }
    issue(self, input) {
        format_issue(StringFormat::Includes).with_param("expected", self.needle.clone())
    }
    new(needle: impl Into<String>) {
        let needle = needle.into();
        Self {
            def: CheckDef::new(CheckKind::Format(StringFormat::Includes))
                .with_param("includes", needle.clone()),
            needle,
        }
    }
    fn includes(needle: impl Into<String>);
}

crate::check! {
    /// No uppercase characters.
    pub Lowercase for String;
    kind(CheckKind::Format(StringFormat::Lowercase));
    rule(input) { matches_format(StringFormat::Lowercase, input) }
    issue(input) { format_issue(StringFormat::Lowercase) }
    fn lowercase();
}

crate::check! {
    /// No lowercase characters.
    pub Uppercase for String;
    kind(CheckKind::Format(StringFormat::Uppercase));
    rule(input) { matches_format(StringFormat::Uppercase, input) }
    issue(input) { format_issue(StringFormat::Uppercase) }
    fn uppercase();
}
