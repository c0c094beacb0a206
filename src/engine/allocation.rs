//! Budget allocation against the trust zone.

use chrono::NaiveDate;
use tracing::debug;

use super::{
    cost_model::{cost_profile, CostProfile},
    priority::{apply_percent, multipliers},
    travelers::{aggregate, rooms_needed},
};
use crate::{
    types::{
        AllocationResult, BudgetStatus, CategoryBreakdown, CategoryDistribution,
        CategoryEstimate, Insight, Priority, Severity, TravelerCounts, TripLength, TripRequest,
        TrustZone,
    },
    Result, TravelError,
};

/// Contingency added on top of the category subtotal, in percent.
pub const BUFFER_PERCENT: u64 = 10;
/// Lower edge of the trust zone as a fraction of the stated budget.
pub const TRUST_ZONE_LOWER: f64 = 0.80;
/// Upper edge of the trust zone as a fraction of the stated budget.
pub const TRUST_ZONE_UPPER: f64 = 1.00;

/// Category costs before priority multipliers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BaseCosts {
    pub flight: u64,
    pub accommodation: u64,
    pub experiences: u64,
}

impl BaseCosts {
    pub fn compute(profile: &CostProfile, trip: TripLength, travelers: TravelerCounts) -> Self {
        let rooms = u64::from(rooms_needed(travelers.total_travelers));
        Self {
            flight: profile.flight_per_traveler * u64::from(travelers.paying_flyers),
            accommodation: profile.hotel_per_night * u64::from(trip.nights) * rooms,
            experiences: profile.activities_per_day
                * u64::from(trip.days)
                * u64::from(travelers.total_travelers),
        }
    }
}

/// Rule-based estimator that prices a trip and grades it against the stated budget.
///
/// Stateless; every call is an independent pure computation.
#[derive(Debug, Clone, Copy, Default)]
pub struct BudgetEngine;

impl BudgetEngine {
    pub fn new() -> Self {
        Self
    }

    /// Price a trip and classify it against the trust zone.
    ///
    /// Fails on the first invalid precondition, checked in this order:
    /// budget, date range, travelers, distribution.
    pub fn allocate(&self, request: &TripRequest) -> Result<AllocationResult> {
        validate_budget(request.budget.total)?;
        let trip = trip_length(request.departure_date, request.return_date)?;
        if request.travelers.is_empty() {
            return Err(TravelError::NoTravelers);
        }
        if let Some(distribution) = &request.distribution {
            distribution.validate()?;
        }

        let profile = cost_profile(&request.destination);
        let travelers = aggregate(&request.travelers);
        let base = BaseCosts::compute(profile, trip, travelers);

        let m = multipliers(request.priority);
        let flight = apply_percent(base.flight, m.flight);
        let accommodation = apply_percent(base.accommodation, m.accommodation);
        let experiences = apply_percent(base.experiences, m.experiences);

        let subtotal = flight + accommodation + experiences;
        let buffer = apply_percent(subtotal, BUFFER_PERCENT);
        let allocated = subtotal + buffer;

        let total = request.budget.total;
        let usage = usage_ratio(allocated, total)?;
        let status = classify_usage(usage);

        let target = |category: Priority| {
            request
                .distribution
                .as_ref()
                .map(|d| distribution_target(d, category, total))
        };
        let estimate = |amount: u64, target: Option<u64>| CategoryEstimate {
            amount,
            percent: share_percent(amount, allocated),
            target,
        };

        let breakdown = CategoryBreakdown {
            flight: estimate(flight, target(Priority::Flight)),
            accommodation: estimate(accommodation, target(Priority::Accommodation)),
            experiences: estimate(experiences, target(Priority::Experiences)),
            buffer: estimate(buffer, None),
        };

        debug!(
            destination = %request.destination,
            days = trip.days,
            paying_flyers = travelers.paying_flyers,
            total_travelers = travelers.total_travelers,
            subtotal,
            buffer,
            allocated,
            usage,
            status = %status,
            "allocated trip budget"
        );

        Ok(AllocationResult {
            status,
            allocated_budget: allocated,
            usage_percent: usage,
            trust_zone: trust_zone(total),
            breakdown,
            insight: build_insight(status, usage),
            trip,
            travelers,
            currency: request.budget.currency.clone(),
        })
    }
}

fn validate_budget(total: f64) -> Result<()> {
    if !total.is_finite() || total <= 0.0 {
        return Err(TravelError::InvalidBudget(format!(
            "total must be a positive amount, got {}",
            total
        )));
    }
    Ok(())
}

/// Whole days covered by the trip, counting both the departure and the return day.
pub fn trip_length(departure: NaiveDate, return_date: NaiveDate) -> Result<TripLength> {
    let days = (return_date - departure).num_days() + 1;
    if days < 1 {
        return Err(TravelError::InvalidDateRange(format!(
            "return date {} is before departure date {}",
            return_date, departure
        )));
    }

    let days = u32::try_from(days).map_err(|_| {
        TravelError::InvalidDateRange(format!("trip of {} days is too long", days))
    })?;
    Ok(TripLength {
        days,
        nights: days - 1,
    })
}

/// Allocated total as a fraction of the stated budget.
pub fn usage_ratio(allocated: u64, budget_total: f64) -> Result<f64> {
    validate_budget(budget_total)?;
    Ok(allocated as f64 / budget_total)
}

/// Grade a usage ratio against the inclusive trust zone band.
pub fn classify_usage(usage: f64) -> BudgetStatus {
    if usage < TRUST_ZONE_LOWER {
        BudgetStatus::UnderBudget
    } else if usage > TRUST_ZONE_UPPER {
        BudgetStatus::OverBudget
    } else {
        BudgetStatus::WithinTrustZone
    }
}

pub fn trust_zone(budget_total: f64) -> TrustZone {
    TrustZone {
        lower: budget_total * TRUST_ZONE_LOWER,
        upper: budget_total * TRUST_ZONE_UPPER,
    }
}

fn build_insight(status: BudgetStatus, usage: f64) -> Option<Insight> {
    match status {
        BudgetStatus::WithinTrustZone => None,
        BudgetStatus::UnderBudget => Some(Insight {
            title: "Room to upgrade".to_string(),
            message: format!(
                "Your plan uses only {}% of your budget.",
                (usage * 100.0).round()
            ),
            suggestion: "Consider upgrading a category or adding a premium experience."
                .to_string(),
            severity: Severity::Info,
        }),
        BudgetStatus::OverBudget => Some(Insight {
            title: "Over budget".to_string(),
            message: format!(
                "Your plan exceeds your budget by {}%.",
                ((usage - 1.0) * 100.0).round()
            ),
            suggestion: "Consider cutting one night or downgrading your accommodation."
                .to_string(),
            severity: Severity::Warning,
        }),
    }
}

/// Share of `allocated`, rounded half up to a whole percent.
fn share_percent(amount: u64, allocated: u64) -> u32 {
    if allocated == 0 {
        return 0;
    }
    ((amount * 200 + allocated) / (allocated * 2)) as u32
}

fn distribution_target(
    distribution: &CategoryDistribution,
    category: Priority,
    budget_total: f64,
) -> u64 {
    (budget_total * f64::from(distribution.share(category)) / 100.0).round() as u64
}
