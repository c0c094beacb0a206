use chrono::NaiveDate;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

use crate::{Result, TravelError};

/// Spend category a traveler wants weighted higher in the allocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Flight,
    Accommodation,
    Experiences,
}

impl Priority {
    pub const ALL: [Priority; 3] = [
        Priority::Flight,
        Priority::Accommodation,
        Priority::Experiences,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Flight => "flight",
            Priority::Accommodation => "accommodation",
            Priority::Experiences => "experiences",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = TravelError;

    fn from_str(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "flight" => Ok(Priority::Flight),
            "accommodation" => Ok(Priority::Accommodation),
            "experiences" => Ok(Priority::Experiences),
            _ => Err(TravelError::InvalidPriority(format!(
                "`{}` is not one of flight, accommodation, experiences",
                value
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum TravelerKind {
    Adult,
    Child,
}

/// A single member of the travel party.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Traveler {
    /// Adult or child
    pub kind: TravelerKind,
    /// Age in whole years; expected for children, ignored for adults
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<u8>,
}

impl Traveler {
    pub fn adult() -> Self {
        Self {
            kind: TravelerKind::Adult,
            age: None,
        }
    }

    pub fn child(age: u8) -> Self {
        Self {
            kind: TravelerKind::Child,
            age: Some(age),
        }
    }

    /// A child whose age was not supplied. Billed as a paying flyer.
    pub fn child_of_unknown_age() -> Self {
        Self {
            kind: TravelerKind::Child,
            age: None,
        }
    }
}

/// The amount the traveler is willing to spend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Budget {
    /// Total budget for the whole trip
    pub total: f64,
    /// ISO-4217 currency code the total is expressed in (e.g., "USD")
    pub currency: String,
}

impl Budget {
    pub fn new(total: f64, currency: impl Into<String>) -> Self {
        Self {
            total,
            currency: currency.into(),
        }
    }
}

/// Preferred split of the budget across the three spend categories, in whole percent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct CategoryDistribution {
    pub flight: u8,
    pub accommodation: u8,
    pub experiences: u8,
}

impl CategoryDistribution {
    pub fn new(flight: u8, accommodation: u8, experiences: u8) -> Self {
        Self {
            flight,
            accommodation,
            experiences,
        }
    }

    /// Percentages must each be at most 100 and add up to exactly 100.
    pub fn validate(&self) -> Result<()> {
        let shares = [self.flight, self.accommodation, self.experiences];
        if let Some(share) = shares.iter().find(|share| **share > 100) {
            return Err(TravelError::InvalidDistribution(format!(
                "share {}% exceeds 100%",
                share
            )));
        }

        let sum: u32 = shares.iter().map(|share| u32::from(*share)).sum();
        if sum != 100 {
            return Err(TravelError::InvalidDistribution(format!(
                "shares add up to {}%, expected 100%",
                sum
            )));
        }
        Ok(())
    }

    pub fn share(&self, category: Priority) -> u8 {
        match category {
            Priority::Flight => self.flight,
            Priority::Accommodation => self.accommodation,
            Priority::Experiences => self.experiences,
        }
    }
}

/// Trip parameters fed to the budget engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct TripRequest {
    /// Destination name (e.g., "Tokyo" or "Tokyo, Japan")
    pub destination: String,
    /// First day of the trip (YYYY-MM-DD)
    pub departure_date: NaiveDate,
    /// Last day of the trip (YYYY-MM-DD), on or after the departure date
    pub return_date: NaiveDate,
    /// Everyone in the travel party
    pub travelers: Vec<Traveler>,
    /// Stated budget for the trip
    pub budget: Budget,
    /// Category to weight higher in the allocation
    pub priority: Priority,
    /// Optional preferred split used to report per-category targets
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distribution: Option<CategoryDistribution>,
}

impl TripRequest {
    pub fn new(
        destination: impl Into<String>,
        departure_date: NaiveDate,
        return_date: NaiveDate,
        budget: Budget,
        priority: Priority,
    ) -> Self {
        Self {
            destination: destination.into(),
            departure_date,
            return_date,
            travelers: Vec::new(),
            budget,
            priority,
            distribution: None,
        }
    }

    pub fn with_traveler(mut self, traveler: Traveler) -> Self {
        self.travelers.push(traveler);
        self
    }

    pub fn with_travelers(mut self, travelers: impl IntoIterator<Item = Traveler>) -> Self {
        self.travelers.extend(travelers);
        self
    }

    pub fn with_distribution(mut self, distribution: CategoryDistribution) -> Self {
        self.distribution = Some(distribution);
        self
    }
}
