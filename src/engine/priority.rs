use crate::types::Priority;

/// Multiplier for the priority category, in percent.
pub const BOOST_PERCENT: u64 = 120;
/// Multiplier for the two other categories, in percent.
pub const TRIM_PERCENT: u64 = 95;

/// Per-category multipliers, held as whole percentages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Multipliers {
    pub flight: u64,
    pub accommodation: u64,
    pub experiences: u64,
}

pub fn multipliers(priority: Priority) -> Multipliers {
    let pick = |category: Priority| {
        if category == priority {
            BOOST_PERCENT
        } else {
            TRIM_PERCENT
        }
    };

    Multipliers {
        flight: pick(Priority::Flight),
        accommodation: pick(Priority::Accommodation),
        experiences: pick(Priority::Experiences),
    }
}

/// `amount × percent / 100`, rounded half up to a whole unit.
pub fn apply_percent(amount: u64, percent: u64) -> u64 {
    (amount * percent + 50) / 100
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_priority_boosts_one_category() {
        let m = multipliers(Priority::Accommodation);
        assert_eq!(m.accommodation, 120);
        assert_eq!(m.flight, 95);
        assert_eq!(m.experiences, 95);
    }

    #[test]
    fn test_each_priority_has_exactly_one_boost() {
        for priority in Priority::ALL {
            let m = multipliers(priority);
            let boosted = [m.flight, m.accommodation, m.experiences]
                .iter()
                .filter(|p| **p == BOOST_PERCENT)
                .count();
            assert_eq!(boosted, 1, "priority {}", priority);
        }
    }

    #[test]
    fn test_apply_percent_rounds_half_up() {
        assert_eq!(apply_percent(14000, 95), 13300);
        assert_eq!(apply_percent(19505, 10), 1951);
        assert_eq!(apply_percent(350, 95), 333);
        assert_eq!(apply_percent(8733, 10), 873);
        assert_eq!(apply_percent(0, 120), 0);
    }
}
