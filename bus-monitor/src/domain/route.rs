//! Route sets observed at a stop.

use std::collections::BTreeSet;

use super::Arrival;

/// Distinct route (line) names seen in one arrivals response.
///
/// Iteration is in lexicographic order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteSet(BTreeSet<String>);

impl RouteSet {
    /// Collect the non-empty line names from a set of arrivals.
    pub fn from_arrivals<'a>(arrivals: impl IntoIterator<Item = &'a Arrival>) -> Self {
        RouteSet(
            arrivals
                .into_iter()
                .filter(|a| !a.line_name.is_empty())
                .map(|a| a.line_name.clone())
                .collect(),
        )
    }

    pub fn contains(&self, line_name: &str) -> bool {
        self.0.contains(line_name)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<S> for RouteSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        RouteSet(iter.into_iter().map(Into::into).collect())
    }
}
