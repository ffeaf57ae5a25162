pub mod envelope;

use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

/// RFC 3339 rendering used in every response body.
pub fn timestamp(ts: OffsetDateTime) -> String {
    ts.format(&Rfc3339).unwrap_or_else(|_| ts.to_string())
}
