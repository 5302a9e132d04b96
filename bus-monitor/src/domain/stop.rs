//! Bus stop types.

use std::fmt;

/// Error returned when parsing an invalid stop identifier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid stop id: {reason}")]
pub struct InvalidStopId {
    reason: &'static str,
}

/// Opaque BIS stop identifier (`BUSSTOP_ID`).
///
/// This is the only piece of a [`Stop`] that is sent back to the API. It is
/// never empty and carries no surrounding whitespace. Anything else is passed
/// through untouched.
///
/// # Examples
///
/// ```
/// use bus_monitor::domain::StopId;
///
/// let id = StopId::parse(" 2054 ").unwrap();
/// assert_eq!(id.as_str(), "2054");
///
/// assert!(StopId::parse("").is_err());
/// assert_eq!(StopId::parse("20 54").unwrap().as_str(), "20 54");
/// ```
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct StopId(String);

impl StopId {
    /// Parse a stop id, trimming surrounding whitespace.
    pub fn parse(s: &str) -> Result<Self, InvalidStopId> {
        let trimmed = s.trim();

        if trimmed.is_empty() {
            return Err(InvalidStopId {
                reason: "must not be empty",
            });
        }

        Ok(StopId(trimmed.to_string()))
    }

    /// Returns the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for StopId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StopId({})", self.0)
    }
}

impl fmt::Display for StopId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A bus stop as returned by the stop lookup.
///
/// Everything except `id` is display-only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stop {
    pub name: String,
    pub id: StopId,
    /// Public-facing stop code printed on the stop sign.
    pub ars_id: String,
    /// Name of the following stop, used to tell apart stops on either side of a road.
    pub next_stop: String,
}

impl Stop {
    /// Case-insensitive substring match against the stop name.
    pub fn name_matches(&self, query: &str) -> bool {
        self.name.to_lowercase().contains(&query.to_lowercase())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stop(name: &str) -> Stop {
        Stop {
            name: name.to_string(),
            id: StopId::parse("1").unwrap(),
            ars_id: String::new(),
            next_stop: String::new(),
        }
    }

    #[test]
    fn parse_valid_ids() {
        assert!(StopId::parse("2054").is_ok());
        assert!(StopId::parse("BS-0001").is_ok());
        assert_eq!(StopId::parse("\t77\n").unwrap().as_str(), "77");
    }

    #[test]
    fn reject_empty() {
        assert!(StopId::parse("").is_err());
        assert!(StopId::parse("   ").is_err());
    }

    #[test]
    fn inner_whitespace_is_kept() {
        assert_eq!(StopId::parse(" 12 34 ").unwrap().as_str(), "12 34");
    }

    #[test]
    fn empty_error_message() {
        let err = StopId::parse(" ").unwrap_err();
        assert_eq!(err.to_string(), "invalid stop id: must not be empty");
    }

    #[test]
    fn debug_and_display() {
        let id = StopId::parse("2054").unwrap();
        assert_eq!(format!("{:?}", id), "StopId(2054)");
        assert_eq!(format!("{}", id), "2054");
    }

    #[test]
    fn name_match_ignores_case() {
        assert!(stop("City Hall East").name_matches("city hall"));
        assert!(stop("West City Hall").name_matches("CITY HALL"));
        assert!(!stop("Central Station").name_matches("city hall"));
    }

    #[test]
    fn name_match_handles_hangul() {
        assert!(stop("광주시청").name_matches("시청"));
        assert!(!stop("광주역").name_matches("시청"));
    }

    #[test]
    fn empty_query_matches_everything() {
        assert!(stop("Anything").name_matches(""));
    }
}
