// models.rs - Meal orders, reference rows and submission outcomes

use std::time::Duration;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::core_types::{FlightKey, MealCode, OrderKey};

/// A recorded special meal order
///
/// Immutable once stored. Serializes to the exact JSON body the
/// spreadsheet webhook receives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Order {
    #[schema(example = "1-9")]
    pub passenger_id: String,
    #[schema(example = "LA800")]
    pub flight_number: String,
    /// Departure as submitted (e.g. "2026-10-21T10:30")
    #[schema(example = "2026-10-21T10:30")]
    pub departure_datetime: String,
    #[schema(example = "SCL")]
    pub origin: String,
    #[schema(example = "IPC")]
    pub destination: String,
    pub meal_code: MealCode,
}

impl Order {
    pub fn key(&self) -> OrderKey {
        OrderKey::new(&self.passenger_id, &self.flight_number)
    }
}

/// One row of the flight-delay reference table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlightDelayRecord {
    pub flight_number: String,
    pub origin: String,
    pub destination: String,
    pub delay_duration: Duration,
}

impl FlightDelayRecord {
    pub fn key(&self) -> FlightKey {
        FlightKey::new(&self.flight_number, &self.origin, &self.destination)
    }
}

/// Why a submission was turned down
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    InvalidMealCode,
    InvalidDeparture,
    TooCloseToDeparture,
    FlightNotFound,
    RouteNotEligible,
    InvalidPassengerId(String),
}

impl Rejection {
    /// Message shown to the passenger
    pub fn message(&self) -> String {
        match self {
            Rejection::InvalidMealCode => {
                "Invalid meal code. Please try again.".to_string()
            }
            Rejection::InvalidDeparture => {
                "Invalid departure date. Use the format YYYY-MM-DDTHH:MM.".to_string()
            }
            Rejection::TooCloseToDeparture => {
                "The flight departs in less than 24 hours. The SPML request cannot be processed."
                    .to_string()
            }
            Rejection::FlightNotFound => {
                "Could not find the flight delay for this flight and route.".to_string()
            }
            Rejection::RouteNotEligible => {
                "The route does not meet the duration requirement or is domestic. The SPML request cannot be processed."
                    .to_string()
            }
            Rejection::InvalidPassengerId(reason) => {
                format!("Invalid passenger id: {}", reason)
            }
        }
    }
}

/// Final result of a submission that reached a business decision
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionOutcome {
    /// New order recorded (and forwarded)
    Accepted(Order),
    /// An order already exists for this passenger/flight; carries its meal code
    Duplicate { existing_meal_code: MealCode },
    Rejected(Rejection),
}

impl SubmissionOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, SubmissionOutcome::Accepted(_))
    }
}
