//! Live arrivals snapshot.
//!
//! Each poll builds an [`ArrivalBoard`] from scratch: arrivals are sorted
//! soonest first, optionally narrowed to one route, and split into
//! "due soon" and standard blocks. Nothing carries over between polls.

use std::io;

use chrono::{Local, NaiveTime};
use tracing::warn;

use crate::alert::Beeper;
use crate::bis::BusInfoApi;
use crate::console::Console;
use crate::domain::{Arrival, StopId, sort_by_remaining};

use super::config::MonitorConfig;

/// Width of the rule under the board header.
const HEADER_RULE_WIDTH: usize = 60;

/// Width of the block border.
const BLOCK_RULE_WIDTH: usize = 50;

/// How an arrival block is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockStyle {
    /// Within the due-soon threshold: highlighted, with an alert tone.
    DueSoon,
    Standard,
}

/// One arrival as it appears on the board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    pub arrival: Arrival,
    pub style: BlockStyle,
}

/// What the board shows below its header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardBody {
    /// The stop has no arrivals at all.
    NoBuses,
    /// Arrivals exist, but none for the requested route.
    NoService { route: String },
    /// Arrivals to show, soonest first.
    Blocks(Vec<Block>),
}

/// A single rendered snapshot of a stop's arrivals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArrivalBoard {
    pub taken_at: NaiveTime,
    pub stop_name: String,
    pub route_filter: Option<String>,
    pub body: BoardBody,
}

impl ArrivalBoard {
    /// Build a board from one arrivals response.
    ///
    /// All arrivals are sorted before the route filter is applied, so the
    /// shown blocks are always in non-decreasing order of remaining time.
    pub fn build(
        mut arrivals: Vec<Arrival>,
        stop_name: &str,
        route_filter: Option<&str>,
        due_soon_mins: u32,
        taken_at: NaiveTime,
    ) -> Self {
        let body = if arrivals.is_empty() {
            BoardBody::NoBuses
        } else {
            sort_by_remaining(&mut arrivals);

            let blocks: Vec<Block> = arrivals
                .into_iter()
                .filter(|a| route_filter.is_none_or(|route| a.line_name == route))
                .map(|arrival| {
                    let style = if arrival.remain_min.is_within(due_soon_mins) {
                        BlockStyle::DueSoon
                    } else {
                        BlockStyle::Standard
                    };
                    Block { arrival, style }
                })
                .collect();

            match route_filter {
                Some(route) if blocks.is_empty() => BoardBody::NoService {
                    route: route.to_string(),
                },
                _ => BoardBody::Blocks(blocks),
            }
        };

        Self {
            taken_at,
            stop_name: stop_name.to_string(),
            route_filter: route_filter.map(str::to_string),
            body,
        }
    }

    /// Blocks shown on the board, in display order.
    pub fn blocks(&self) -> &[Block] {
        match &self.body {
            BoardBody::Blocks(blocks) => blocks,
            _ => &[],
        }
    }

    /// Number of alert tones this board calls for: one per due-soon block.
    pub fn tone_count(&self) -> usize {
        self.blocks()
            .iter()
            .filter(|b| b.style == BlockStyle::DueSoon)
            .count()
    }

    /// Render the board as terminal text.
    pub fn render(&self) -> String {
        let mut out = String::new();

        out.push_str(&format!(
            "\n[{}] {} bus arrivals\n",
            self.taken_at.format("%H:%M:%S"),
            self.stop_name
        ));
        if let Some(route) = &self.route_filter {
            out.push_str(&format!("Route filter: {route}\n"));
        }
        out.push_str(&"=".repeat(HEADER_RULE_WIDTH));
        out.push('\n');

        match &self.body {
            BoardBody::NoBuses => out.push_str("\nNo buses currently running.\n"),
            BoardBody::NoService { route } => {
                out.push_str(&format!("\nNo service info for route {route}.\n"));
            }
            BoardBody::Blocks(blocks) => {
                for block in blocks {
                    render_block(&mut out, block);
                }
            }
        }

        out
    }
}

fn render_block(out: &mut String, block: &Block) {
    let arrival = &block.arrival;
    let rule = "─".repeat(BLOCK_RULE_WIDTH);

    let eta = match arrival.remain_min.minutes() {
        Some(m) => format!("in {m} min"),
        None => "time unknown".to_string(),
    };
    let stops = match arrival.remain_stop {
        Some(1) => "1 stop left".to_string(),
        Some(n) => format!("{n} stops left"),
        None => "stops left unknown".to_string(),
    };

    out.push('\n');
    if block.style == BlockStyle::DueSoon {
        out.push_str("🚍 Arriving soon!\n");
    }
    out.push_str(&format!("┌{rule}\n"));
    out.push_str(&format!("│ [Route] {}\n", arrival.line_name));
    out.push_str(&format!("│ [Now at] {}\n", arrival.current_location));
    match block.style {
        BlockStyle::DueSoon => out.push_str(&format!("│ [Arrives] ⚠️ {eta} ({stops})\n")),
        BlockStyle::Standard => out.push_str(&format!("│ [Arrives] {eta} ({stops})\n")),
    }
    out.push_str(&format!("└{rule}\n"));
}

/// Poll arrivals for a stop once and redraw the board.
///
/// On success the screen is cleared, the new board drawn, and one tone is
/// played per due-soon bus. A failed request is reported below whatever is
/// already on screen; the next poll simply tries again.
pub async fn report<A, C, B>(
    api: &A,
    console: &mut C,
    beeper: &mut B,
    config: &MonitorConfig,
    stop_id: &StopId,
    stop_name: &str,
    route_filter: Option<&str>,
) -> io::Result<()>
where
    A: BusInfoApi,
    C: Console,
    B: Beeper,
{
    let arrivals = match api.arrivals(stop_id).await {
        Ok(arrivals) => arrivals,
        Err(e) => {
            warn!(stop = %stop_id, error = %e, "arrivals poll failed");
            return console.print(&format!("Error: {e}"));
        }
    };

    let board = ArrivalBoard::build(
        arrivals,
        stop_name,
        route_filter,
        config.due_soon_mins,
        Local::now().time(),
    );

    console.clear()?;
    console.print(&board.render())?;

    for _ in 0..board.tone_count() {
        beeper.beep(config.tone).await?;
    }

    Ok(())
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::domain::RemainMin;
    use proptest::prelude::*;

    fn arrivals() -> impl Strategy<Value = Vec<Arrival>> {
        prop::collection::vec(
            (
                prop_oneof![Just("A"), Just("B"), Just("C")],
                prop_oneof![(0u32..30).prop_map(RemainMin::Minutes), Just(RemainMin::Unknown)],
            ),
            0..25,
        )
        .prop_map(|items| {
            items
                .into_iter()
                .map(|(line, remain_min)| Arrival {
                    line_name: line.to_string(),
                    remain_min,
                    remain_stop: None,
                    current_location: String::new(),
                })
                .collect()
        })
    }

    fn noon() -> NaiveTime {
        NaiveTime::from_hms_opt(12, 0, 0).unwrap()
    }

    proptest! {
        /// Shown blocks never go backwards in remaining time
        #[test]
        fn blocks_are_non_decreasing(
            arrivals in arrivals(),
            filter in prop::option::of(prop_oneof![Just("A"), Just("B"), Just("Z")]),
        ) {
            let board = ArrivalBoard::build(arrivals, "S", filter, 5, noon());
            for pair in board.blocks().windows(2) {
                prop_assert!(pair[0].arrival.remain_min <= pair[1].arrival.remain_min);
            }
        }

        /// One tone per due-soon block, and due-soon means within the threshold
        #[test]
        fn tones_match_due_soon_blocks(arrivals in arrivals(), threshold in 0u32..10) {
            let board = ArrivalBoard::build(arrivals, "S", None, threshold, noon());
            let mut due = 0;
            for block in board.blocks() {
                let within = block.arrival.remain_min.is_within(threshold);
                prop_assert_eq!(block.style == BlockStyle::DueSoon, within);
                if within {
                    due += 1;
                }
            }
            prop_assert_eq!(board.tone_count(), due);
        }

        /// A filter shows only its own route, or the no-service message
        #[test]
        fn filter_shows_only_its_route(arrivals in arrivals()) {
            let has_a = arrivals.iter().any(|a| a.line_name == "A");
            let board = ArrivalBoard::build(arrivals.clone(), "S", Some("A"), 5, noon());

            if arrivals.is_empty() {
                prop_assert_eq!(&board.body, &BoardBody::NoBuses);
            } else if has_a {
                prop_assert!(board.blocks().iter().all(|b| b.arrival.line_name == "A"));
            } else {
                prop_assert_eq!(&board.body, &BoardBody::NoService { route: "A".into() });
            }
        }
    }
}
