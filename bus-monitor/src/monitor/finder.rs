//! Stop lookup by name.

use std::io;

use tracing::{debug, warn};

use crate::bis::BusInfoApi;
use crate::console::Console;
use crate::domain::Stop;

/// Find stops whose name contains `query`, ignoring case.
///
/// The API has no search parameter, so this fetches the full stop list
/// and filters it here. A failed lookup is reported on the console and
/// yields no candidates. Only console write failures are returned as errors.
pub async fn find_stops<A, C>(api: &A, console: &mut C, query: &str) -> io::Result<Vec<Stop>>
where
    A: BusInfoApi,
    C: Console,
{
    match api.stations().await {
        Ok(stops) => {
            let found = filter_stops(stops, query);
            debug!(query, count = found.len(), "stop search");
            Ok(found)
        }
        Err(e) => {
            warn!(query, error = %e, "stop lookup failed");
            console.print(&format!("Error: {e}"))?;
            Ok(Vec::new())
        }
    }
}

/// Keep the stops whose name contains `query` (case-insensitive), in order.
pub fn filter_stops(stops: Vec<Stop>, query: &str) -> Vec<Stop> {
    stops.into_iter().filter(|s| s.name_matches(query)).collect()
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::domain::StopId;
    use proptest::prelude::*;

    fn stops() -> impl Strategy<Value = Vec<Stop>> {
        prop::collection::vec("[a-zA-Z ]{0,12}", 0..20).prop_map(|names| {
            names
                .into_iter()
                .enumerate()
                .map(|(i, name)| Stop {
                    name,
                    id: StopId::parse(&i.to_string()).unwrap(),
                    ars_id: String::new(),
                    next_stop: String::new(),
                })
                .collect()
        })
    }

    proptest! {
        /// Every returned stop contains the query, ignoring case
        #[test]
        fn returned_stops_match(stops in stops(), query in "[a-zA-Z]{0,3}") {
            for stop in filter_stops(stops, &query) {
                prop_assert!(stop.name.to_lowercase().contains(&query.to_lowercase()));
            }
        }

        /// No matching stop is dropped, and upstream order is kept
        #[test]
        fn matching_stops_are_kept_in_order(stops in stops(), query in "[a-zA-Z]{0,3}") {
            let expected: Vec<_> = stops
                .iter()
                .filter(|s| s.name.to_lowercase().contains(&query.to_lowercase()))
                .map(|s| s.id.clone())
                .collect();

            let actual: Vec<_> = filter_stops(stops, &query)
                .into_iter()
                .map(|s| s.id)
                .collect();

            prop_assert_eq!(actual, expected);
        }
    }
}
