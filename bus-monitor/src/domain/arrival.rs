//! Arrival records and remaining-time values.

use std::cmp::Ordering;

/// Upstream value at or above which the remaining time means "no estimate".
pub const UNKNOWN_REMAIN_MIN: u32 = 999;

/// Minutes until a bus reaches the monitored stop.
///
/// Missing, unparseable and sentinel values all collapse into `Unknown`,
/// which orders after every known value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RemainMin {
    Minutes(u32),
    Unknown,
}

impl RemainMin {
    /// Interpret the raw `REMAIN_MIN` field.
    ///
    /// ```
    /// use bus_monitor::domain::RemainMin;
    ///
    /// assert_eq!(RemainMin::parse(Some(" 4 ")), RemainMin::Minutes(4));
    /// assert_eq!(RemainMin::parse(Some("999")), RemainMin::Unknown);
    /// assert_eq!(RemainMin::parse(Some("soon")), RemainMin::Unknown);
    /// assert_eq!(RemainMin::parse(None), RemainMin::Unknown);
    /// ```
    pub fn parse(raw: Option<&str>) -> Self {
        match raw.and_then(|s| s.trim().parse::<u32>().ok()) {
            Some(mins) if mins < UNKNOWN_REMAIN_MIN => RemainMin::Minutes(mins),
            _ => RemainMin::Unknown,
        }
    }

    /// Known minutes, if any.
    pub fn minutes(self) -> Option<u32> {
        match self {
            RemainMin::Minutes(m) => Some(m),
            RemainMin::Unknown => None,
        }
    }

    /// Whether the bus is at most `threshold` minutes away.
    pub fn is_within(self, threshold: u32) -> bool {
        matches!(self, RemainMin::Minutes(m) if m <= threshold)
    }
}

impl Ord for RemainMin {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (RemainMin::Minutes(a), RemainMin::Minutes(b)) => a.cmp(b),
            (RemainMin::Minutes(_), RemainMin::Unknown) => Ordering::Less,
            (RemainMin::Unknown, RemainMin::Minutes(_)) => Ordering::Greater,
            (RemainMin::Unknown, RemainMin::Unknown) => Ordering::Equal,
        }
    }
}

impl PartialOrd for RemainMin {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// One bus approaching the monitored stop, as of a single poll.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Arrival {
    pub line_name: String,
    pub remain_min: RemainMin,
    /// Stops left before the monitored stop.
    pub remain_stop: Option<u32>,
    /// Stop the bus is currently at (not the monitored stop).
    pub current_location: String,
}

/// Sort arrivals soonest first. The sort is stable, so records with equal
/// remaining time keep their upstream order.
pub fn sort_by_remaining(arrivals: &mut [Arrival]) {
    arrivals.sort_by_key(|a| a.remain_min);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn arrival(line: &str, remain: RemainMin) -> Arrival {
        Arrival {
            line_name: line.to_string(),
            remain_min: remain,
            remain_stop: None,
            current_location: String::new(),
        }
    }

    #[test]
    fn parse_boundaries() {
        assert_eq!(RemainMin::parse(Some("0")), RemainMin::Minutes(0));
        assert_eq!(RemainMin::parse(Some("998")), RemainMin::Minutes(998));
        assert_eq!(RemainMin::parse(Some("1000")), RemainMin::Unknown);
        assert_eq!(RemainMin::parse(Some("-3")), RemainMin::Unknown);
        assert_eq!(RemainMin::parse(Some("")), RemainMin::Unknown);
    }

    #[test]
    fn unknown_sorts_last() {
        assert!(RemainMin::Minutes(998) < RemainMin::Unknown);
        assert!(RemainMin::Minutes(0) < RemainMin::Minutes(1));
        assert_eq!(RemainMin::Unknown.cmp(&RemainMin::Unknown), Ordering::Equal);
    }

    #[test]
    fn within_threshold() {
        assert!(RemainMin::Minutes(5).is_within(5));
        assert!(RemainMin::Minutes(0).is_within(5));
        assert!(!RemainMin::Minutes(6).is_within(5));
        assert!(!RemainMin::Unknown.is_within(5));
    }

    #[test]
    fn sort_is_stable_and_ascending() {
        let mut arrivals = vec![
            arrival("Line 5", RemainMin::Minutes(3)),
            arrival("Line 12", RemainMin::Minutes(7)),
            arrival("Night 1", RemainMin::Unknown),
            arrival("Line 5", RemainMin::Minutes(1)),
            arrival("Line 9", RemainMin::Minutes(3)),
        ];

        sort_by_remaining(&mut arrivals);

        let order: Vec<_> = arrivals
            .iter()
            .map(|a| (a.line_name.as_str(), a.remain_min.minutes()))
            .collect();
        assert_eq!(
            order,
            vec![
                ("Line 5", Some(1)),
                ("Line 5", Some(3)),
                ("Line 9", Some(3)),
                ("Line 12", Some(7)),
                ("Night 1", None),
            ]
        );
    }
}
