//! Interactive session driver.
//!
//! The session is an explicit state machine. Each [`State`] carries the data
//! it needs, and [`Driver::step`] performs one transition. Invalid input
//! leaves the state unchanged, which re-prompts on the next step.
//!
//! ```text
//! AwaitingQuery -> ShowingCandidates -> AwaitingSelection -> ShowingLines
//!   ^                  |                                          |
//!   |                  +-- no results                             v
//!   +----- "y" ---- AwaitingRestart <- Monitoring <- AwaitingRouteFilter
//! ```

use std::io;

use tracing::{info, warn};

use crate::alert::Beeper;
use crate::bis::BusInfoApi;
use crate::console::Console;
use crate::domain::{RouteSet, Stop};
use crate::monitor::{MonitorConfig, find_stops, list_lines, report};

const TITLE: &str = "Gwangju Bus Arrival Monitor";
const RULE_WIDTH: usize = 50;

/// Errors that end a session early. Remote failures and bad input never do.
#[derive(Debug, thiserror::Error)]
pub enum DriverError {
    #[error("console I/O failed: {0}")]
    Io(#[from] io::Error),
}

/// Where the session is, and what it knows so far.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum State {
    AwaitingQuery,
    ShowingCandidates { query: String },
    AwaitingSelection { candidates: Vec<Stop> },
    ShowingLines { stop: Stop },
    AwaitingRouteFilter { stop: Stop, routes: RouteSet },
    Monitoring { stop: Stop, route_filter: Option<String> },
    AwaitingRestart,
    Finished,
}

/// Signal that stops the monitoring loop.
#[allow(async_fn_in_trait)]
pub trait Interrupt {
    /// Resolve when the user asks to stop monitoring.
    async fn wait(&mut self);
}

/// Interrupt on Ctrl+C.
#[derive(Debug, Default, Clone, Copy)]
pub struct CtrlC;

impl Interrupt for CtrlC {
    async fn wait(&mut self) {
        if let Err(e) = tokio::signal::ctrl_c().await {
            // Without a handler the default action still terminates the process.
            warn!(error = %e, "failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    }
}

/// Runs one interactive session against an API, a console, a beeper and an
/// interrupt source.
#[derive(Debug)]
pub struct Driver<A, C, B, I> {
    api: A,
    console: C,
    beeper: B,
    interrupt: I,
    config: MonitorConfig,
}

impl<A, C, B, I> Driver<A, C, B, I>
where
    A: BusInfoApi,
    C: Console,
    B: Beeper,
    I: Interrupt,
{
    pub fn new(api: A, console: C, beeper: B, interrupt: I, config: MonitorConfig) -> Self {
        Self {
            api,
            console,
            beeper,
            interrupt,
            config,
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn console(&self) -> &C {
        &self.console
    }

    pub fn beeper(&self) -> &B {
        &self.beeper
    }

    /// Run until the user declines to restart or input ends.
    pub async fn run(&mut self) -> Result<(), DriverError> {
        self.console.clear()?;
        self.console.print(TITLE)?;
        self.console.print(&"=".repeat(RULE_WIDTH))?;

        let mut state = State::AwaitingQuery;
        while state != State::Finished {
            state = self.step(state).await?;
        }

        Ok(())
    }

    /// Perform one transition.
    pub async fn step(&mut self, state: State) -> Result<State, DriverError> {
        let next = match state {
            State::AwaitingQuery => self.await_query().await?,
            State::ShowingCandidates { query } => self.show_candidates(query).await?,
            State::AwaitingSelection { candidates } => self.await_selection(candidates).await?,
            State::ShowingLines { stop } => {
                let routes = list_lines(&self.api, &mut self.console, &stop.id).await?;
                State::AwaitingRouteFilter { stop, routes }
            }
            State::AwaitingRouteFilter { stop, routes } => {
                self.await_route_filter(stop, routes).await?
            }
            State::Monitoring { stop, route_filter } => {
                self.monitor(&stop, route_filter.as_deref()).await?;
                State::AwaitingRestart
            }
            State::AwaitingRestart => self.await_restart().await?,
            State::Finished => State::Finished,
        };

        Ok(next)
    }

    async fn await_query(&mut self) -> Result<State, DriverError> {
        let Some(line) = self.console.read_line("\nEnter a stop name: ").await? else {
            return Ok(State::Finished);
        };

        let query = line.trim();
        if query.is_empty() {
            self.console.print("Please enter a stop name.")?;
            return Ok(State::AwaitingQuery);
        }

        Ok(State::ShowingCandidates {
            query: query.to_string(),
        })
    }

    async fn show_candidates(&mut self, query: String) -> Result<State, DriverError> {
        self.console.print("\nSearching...")?;
        let candidates = find_stops(&self.api, &mut self.console, &query).await?;

        if candidates.is_empty() {
            self.console.print(&format!("\nNo results for '{query}'."))?;
            return Ok(State::AwaitingQuery);
        }

        let rule = "-".repeat(RULE_WIDTH);
        self.console.print(&format!("\nResults for '{query}':"))?;
        self.console.print(&rule)?;
        for (idx, stop) in candidates.iter().enumerate() {
            self.console.print(&format!("{}. Stop: {}", idx + 1, stop.name))?;
            self.console.print(&format!("   Stop ID: {}", stop.id))?;
            if !stop.ars_id.is_empty() {
                self.console.print(&format!("   ARS ID: {}", stop.ars_id))?;
            }
            self.console.print(&format!("   Next stop: {}", stop.next_stop))?;
            self.console.print(&rule)?;
        }

        Ok(State::AwaitingSelection { candidates })
    }

    async fn await_selection(&mut self, candidates: Vec<Stop>) -> Result<State, DriverError> {
        let Some(line) = self.console.read_line("\nSelect a stop number: ").await? else {
            return Ok(State::Finished);
        };

        let choice = match line.trim().parse::<usize>() {
            Ok(n) => n,
            Err(_) => {
                self.console.print("Please enter a number.")?;
                return Ok(State::AwaitingSelection { candidates });
            }
        };

        if choice == 0 || choice > candidates.len() {
            self.console.print("Please enter a number from the list.")?;
            return Ok(State::AwaitingSelection { candidates });
        }

        let mut candidates = candidates;
        let stop = candidates.swap_remove(choice - 1);
        info!(stop = %stop.id, name = %stop.name, "stop selected");
        Ok(State::ShowingLines { stop })
    }

    async fn await_route_filter(
        &mut self,
        stop: Stop,
        routes: RouteSet,
    ) -> Result<State, DriverError> {
        let Some(line) = self
            .console
            .read_line("\nRoute to monitor (Enter for all routes): ")
            .await?
        else {
            return Ok(State::Finished);
        };

        let route = line.trim();
        if route.is_empty() {
            return Ok(State::Monitoring {
                stop,
                route_filter: None,
            });
        }

        if !routes.contains(route) {
            self.console
                .print("That route is not currently running at this stop.")?;
            return Ok(State::AwaitingRouteFilter { stop, routes });
        }

        Ok(State::Monitoring {
            route_filter: Some(route.to_string()),
            stop,
        })
    }

    /// Poll arrivals once per tick until the interrupt fires.
    ///
    /// The interrupt future lives across ticks, so a signal that arrives
    /// mid-poll still ends the loop.
    async fn monitor(&mut self, stop: &Stop, route_filter: Option<&str>) -> Result<(), DriverError> {
        let Self {
            api,
            console,
            beeper,
            interrupt,
            config,
        } = self;

        console.print(&format!(
            "\nMonitoring arrivals at {}. Press Ctrl+C to stop.",
            stop.name
        ))?;
        info!(stop = %stop.id, route = ?route_filter, "monitoring started");

        let interrupted = interrupt.wait();
        tokio::pin!(interrupted);

        loop {
            let tick = async {
                report(
                    &*api,
                    &mut *console,
                    &mut *beeper,
                    config,
                    &stop.id,
                    &stop.name,
                    route_filter,
                )
                .await?;
                tokio::time::sleep(config.tick_interval()).await;
                Ok::<_, io::Error>(())
            };

            tokio::select! {
                biased;
                _ = &mut interrupted => break,
                result = tick => result?,
            }
        }

        info!(stop = %stop.id, "monitoring stopped");
        Ok(())
    }

    async fn await_restart(&mut self) -> Result<State, DriverError> {
        let answer = self
            .console
            .read_line("\n\nSearch for another stop? (Y/N): ")
            .await?;

        let restart = answer.is_some_and(|a| {
            let a = a.trim().to_lowercase();
            a == "y" || a == "yes"
        });

        if restart {
            return Ok(State::AwaitingQuery);
        }

        self.console.print("\nExiting.")?;
        Ok(State::Finished)
    }
}
