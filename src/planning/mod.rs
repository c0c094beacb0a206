//! Trip countdown and packing-weight formulas

pub mod countdown;
pub mod packing;

pub use countdown::{countdown, countdown_on, Clock, Countdown, FixedClock, SystemClock, TripPhase};
pub use packing::{summarize, PackingItem, PackingList, PackingSummary, DEFAULT_ALLOWANCE_GRAMS};
