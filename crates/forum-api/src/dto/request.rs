//! Request DTOs.

use serde::Deserialize;

/// Query for `GET /api/messages`.
///
/// Both fields stay raw strings so the handler decides how to treat bad
/// input: a missing `with` is an error, an unparsable `offset` means 0.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HistoryQuery {
    /// The other participant
    pub with: Option<String>,
    /// Messages to skip, counted back from the newest
    pub offset: Option<String>,
}

impl HistoryQuery {
    /// Offset as a non-negative count; anything unparsable or negative is 0.
    pub fn offset(&self) -> u32 {
        self.offset
            .as_deref()
            .and_then(|o| o.trim().parse::<i64>().ok())
            .map(|o| o.clamp(0, i64::from(u32::MAX)) as u32)
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(offset: Option<&str>) -> HistoryQuery {
        HistoryQuery {
            with: None,
            offset: offset.map(str::to_string),
        }
    }

    #[test]
    fn test_offset_parsing() {
        assert_eq!(query(None).offset(), 0);
        assert_eq!(query(Some("20")).offset(), 20);
        assert_eq!(query(Some("-5")).offset(), 0);
        assert_eq!(query(Some("ten")).offset(), 0);
    }
}
