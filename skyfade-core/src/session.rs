//! View state for the current selection.
//!
//! Each selection bumps a generation counter and hands out a [`Ticket`]. A
//! result is only applied when its ticket still names the pending selection,
//! so a slow response for an abandoned coordinate cannot overwrite a newer one.

use crate::{
    error::FetchError,
    heuristic::{current_month0, estimate_azimuth},
    model::{Coordinate, SunData, SunReport},
};

#[derive(Debug, Clone, Default, PartialEq)]
pub enum ViewState {
    #[default]
    Idle,
    Loading {
        coordinate: Coordinate,
        azimuth: f64,
    },
    Loaded(SunReport),
    Failed {
        coordinate: Coordinate,
        message: String,
    },
}

/// Identifies one in-flight lookup.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ticket {
    generation: u64,
    coordinate: Coordinate,
    azimuth: f64,
}

impl Ticket {
    pub fn coordinate(&self) -> Coordinate {
        self.coordinate
    }

    pub fn azimuth(&self) -> f64 {
        self.azimuth
    }
}

#[derive(Debug, Default)]
pub struct Session {
    generation: u64,
    state: ViewState,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    /// Start a new selection using the current month.
    pub fn select(&mut self, coordinate: Coordinate) -> Ticket {
        self.select_at(coordinate, current_month0())
    }

    /// Start a new selection. Any pending lookup becomes stale.
    pub fn select_at(&mut self, coordinate: Coordinate, month0: u32) -> Ticket {
        self.generation += 1;
        let azimuth = estimate_azimuth(coordinate.latitude, month0);

        tracing::debug!(generation = self.generation, %coordinate, azimuth, "selection");
        self.state = ViewState::Loading {
            coordinate,
            azimuth,
        };

        Ticket {
            generation: self.generation,
            coordinate,
            azimuth,
        }
    }

    /// Whether `ticket` is the lookup the view is waiting on.
    pub fn is_current(&self, ticket: &Ticket) -> bool {
        if ticket.generation != self.generation {
            return false;
        }

        match self.state {
            ViewState::Loading { coordinate, .. } => coordinate == ticket.coordinate,
            _ => false,
        }
    }

    /// Apply a finished lookup. Returns `false` when the result was stale and dropped.
    pub fn complete(&mut self, ticket: Ticket, result: Result<SunData, FetchError>) -> bool {
        if !self.is_current(&ticket) {
            tracing::debug!(
                generation = ticket.generation,
                current = self.generation,
                coordinate = %ticket.coordinate,
                "dropping stale result"
            );
            return false;
        }

        self.state = match result {
            Ok(data) => {
                let report = SunReport::new(ticket.coordinate, ticket.azimuth, data);
                ViewState::Loaded(report)
            }
            Err(err) => {
                tracing::warn!(coordinate = %ticket.coordinate, error = %err, "lookup failed");
                ViewState::Failed {
                    coordinate: ticket.coordinate,
                    message: err.user_message().to_string(),
                }
            }
        };

        true
    }
}
