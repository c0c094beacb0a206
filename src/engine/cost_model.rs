use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Baseline prices for a destination, in whole currency units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct CostProfile {
    /// Round-trip flight per paying traveler
    pub flight_per_traveler: u64,
    /// One hotel room for one night
    pub hotel_per_night: u64,
    /// Activities for one traveler for one day
    pub activities_per_day: u64,
}

impl CostProfile {
    pub const fn new(flight_per_traveler: u64, hotel_per_night: u64, activities_per_day: u64) -> Self {
        Self {
            flight_per_traveler,
            hotel_per_night,
            activities_per_day,
        }
    }
}

/// Profile used for any destination not in the table.
pub static DEFAULT_PROFILE: CostProfile = CostProfile::new(7000, 600, 350);

static PROFILES: &[(&str, CostProfile)] = &[
    ("tokyo", CostProfile::new(6500, 900, 500)),
    ("kyoto", CostProfile::new(6800, 800, 400)),
    ("osaka", CostProfile::new(6200, 750, 420)),
    ("seoul", CostProfile::new(4800, 650, 380)),
    ("bangkok", CostProfile::new(4200, 450, 280)),
    ("bali", CostProfile::new(5800, 550, 300)),
    ("singapore", CostProfile::new(5200, 1100, 450)),
    ("dubai", CostProfile::new(8200, 1000, 500)),
    ("paris", CostProfile::new(11000, 1300, 600)),
    ("london", CostProfile::new(11500, 1500, 650)),
    ("new york", CostProfile::new(12500, 1800, 700)),
    ("sydney", CostProfile::new(10500, 1200, 550)),
];

/// Table key for a destination: the part before the first comma, trimmed and lowercased.
fn destination_key(destination: &str) -> String {
    destination
        .split(',')
        .next()
        .unwrap_or_default()
        .trim()
        .to_lowercase()
}

fn find_profile(destination: &str) -> Option<&'static CostProfile> {
    let key = destination_key(destination);
    PROFILES
        .iter()
        .find(|(name, _)| *name == key)
        .map(|(_, profile)| profile)
}

/// Look up the cost profile for a destination, falling back to [`DEFAULT_PROFILE`].
pub fn cost_profile(destination: &str) -> &'static CostProfile {
    find_profile(destination).unwrap_or_else(|| {
        warn!(destination, "no cost profile for destination, using default");
        &DEFAULT_PROFILE
    })
}

/// Destination keys with a dedicated profile, in table order.
pub fn known_destinations() -> impl Iterator<Item = &'static str> {
    PROFILES.iter().map(|(name, _)| *name)
}
