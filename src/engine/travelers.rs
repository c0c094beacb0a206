use crate::types::{Traveler, TravelerCounts, TravelerKind};

/// Children younger than this fly free.
pub const FREE_FLIGHT_AGE: u8 = 2;

/// Whether a traveler's flight is billed.
///
/// A child with no recorded age is billed: an unknown age is treated as
/// "at least two" so the estimate never under-counts fares.
pub fn pays_for_flight(traveler: &Traveler) -> bool {
    match traveler.kind {
        TravelerKind::Adult => true,
        TravelerKind::Child => traveler.age.map_or(true, |age| age >= FREE_FLIGHT_AGE),
    }
}

pub fn aggregate(travelers: &[Traveler]) -> TravelerCounts {
    let paying_flyers = travelers.iter().filter(|t| pays_for_flight(t)).count();
    TravelerCounts {
        paying_flyers: paying_flyers as u32,
        total_travelers: travelers.len() as u32,
    }
}

/// Hotel rooms for a party, two travelers per room.
pub fn rooms_needed(total_travelers: u32) -> u32 {
    total_travelers.div_ceil(2)
}
