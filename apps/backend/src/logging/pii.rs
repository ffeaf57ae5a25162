use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

/// Regex patterns used for PII redaction. All are vetted literals.
pub struct PiiRegexRegistry;

impl PiiRegexRegistry {
    pub fn email() -> &'static Regex {
        static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
            #[allow(clippy::unwrap_used)]
            Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{1,}\b").unwrap()
        });
        &EMAIL_REGEX
    }

    /// Vietnamese phone numbers: `+84` or leading `0`, separators allowed.
    pub fn phone() -> &'static Regex {
        static PHONE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
            #[allow(clippy::unwrap_used)]
            Regex::new(r"(?:\+84|\b0)[ .-]?\d[\d .-]{7,12}\d\b").unwrap()
        });
        &PHONE_REGEX
    }

    /// Base64-like runs of at least 16 chars
    pub fn base64_token() -> &'static Regex {
        static BASE64_TOKEN_REGEX: LazyLock<Regex> = LazyLock::new(|| {
            #[allow(clippy::unwrap_used)]
            Regex::new(r"\b[A-Za-z0-9+/]{16,}={0,2}\b").unwrap()
        });
        &BASE64_TOKEN_REGEX
    }
}

/// Masks e-mail addresses, phone numbers and opaque tokens.
///
/// - e-mail: first character of the local part kept, domain kept
/// - phone: only the last three digits kept
/// - tokens (base64-like, 16+ chars): replaced by `[REDACTED_TOKEN]`
pub fn redact(input: &str) -> String {
    let emails = PiiRegexRegistry::email().replace_all(input, |caps: &regex::Captures| {
        let full = &caps[0];
        match full.split_once('@') {
            Some((local, domain)) => match local.chars().next() {
                Some(first) => format!("{first}***@{domain}"),
                None => format!("@{domain}"),
            },
            None => full.to_string(),
        }
    });

    let phones = PiiRegexRegistry::phone().replace_all(&emails, |caps: &regex::Captures| {
        let digits: Vec<char> = caps[0].chars().filter(char::is_ascii_digit).collect();
        let tail: String = digits[digits.len().saturating_sub(3)..].iter().collect();
        format!("***{tail}")
    });

    PiiRegexRegistry::base64_token()
        .replace_all(&phones, "[REDACTED_TOKEN]")
        .to_string()
}

/// Display wrapper that redacts on formatting, for use in log fields.
pub struct Redacted<'a>(pub &'a str);

impl fmt::Display for Redacted<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&redact(self.0))
    }
}

impl fmt::Debug for Redacted<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&redact(self.0))
    }
}
