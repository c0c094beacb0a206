use chrono::NaiveDate;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::{engine::trip_length, Result};

/// Days before departure that count as "imminent".
pub const IMMINENT_WINDOW_DAYS: i64 = 7;

/// Source of the current calendar date.
pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;
}

/// Local wall-clock date.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        chrono::Local::now().date_naive()
    }
}

/// A clock pinned to one date.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum TripPhase {
    Upcoming,
    Imminent,
    DepartureDay,
    InProgress,
    Completed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Countdown {
    /// Days from today until departure; negative once the trip has started
    pub days_until: i64,
    /// 1-based day of the trip while it is underway
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trip_day: Option<u32>,
    pub phase: TripPhase,
}

pub fn countdown(departure: NaiveDate, return_date: NaiveDate, clock: &dyn Clock) -> Result<Countdown> {
    countdown_on(departure, return_date, clock.today())
}

pub fn countdown_on(departure: NaiveDate, return_date: NaiveDate, today: NaiveDate) -> Result<Countdown> {
    trip_length(departure, return_date)?;

    let days_until = (departure - today).num_days();
    let (phase, trip_day) = match days_until {
        d if d > IMMINENT_WINDOW_DAYS => (TripPhase::Upcoming, None),
        d if d > 0 => (TripPhase::Imminent, None),
        0 => (TripPhase::DepartureDay, Some(1)),
        _ if today <= return_date => {
            let day = (today - departure).num_days() + 1;
            (TripPhase::InProgress, u32::try_from(day).ok())
        }
        _ => (TripPhase::Completed, None),
    };

    Ok(Countdown {
        days_until,
        trip_day,
        phase,
    })
}
