//! Routes currently serving a stop.

use std::io;

use tracing::warn;

use crate::bis::BusInfoApi;
use crate::console::Console;
use crate::domain::{RouteSet, StopId};

/// List the routes with a bus currently approaching `stop_id`.
///
/// The routes are printed in lexicographic order. A failed request is
/// reported on the console and yields an empty set.
pub async fn list_lines<A, C>(api: &A, console: &mut C, stop_id: &StopId) -> io::Result<RouteSet>
where
    A: BusInfoApi,
    C: Console,
{
    let arrivals = match api.arrivals(stop_id).await {
        Ok(arrivals) => arrivals,
        Err(e) => {
            warn!(stop = %stop_id, error = %e, "route listing failed");
            console.print(&format!("Error: {e}"))?;
            return Ok(RouteSet::default());
        }
    };

    let routes = RouteSet::from_arrivals(&arrivals);

    if routes.is_empty() {
        console.print("\nNo buses currently running.")?;
    } else {
        console.print("\nRoutes currently running:")?;
        for route in routes.iter() {
            console.print(&format!("- {route}"))?;
        }
    }

    Ok(routes)
}
