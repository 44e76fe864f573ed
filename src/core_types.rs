//! Core type definitions
//!
//! Small value types shared by every layer: meal codes, airport codes and
//! the keys used by the reference table and the order store.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Special meal code (IATA SSR SPML codes accepted by the desk)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum MealCode {
    Chml, // child
    Blml, // bland
    Dbml, // diabetic
    Gfml, // gluten free
    Ksml, // kosher
    Lcml, // low calorie
    Lfml, // low fat
    Lsml, // low salt
    Nlml, // no lactose
    Vgml, // vegan
    Vlml, // lacto-ovo vegetarian
}

impl MealCode {
    pub const ALL: [MealCode; 11] = [
        MealCode::Chml,
        MealCode::Blml,
        MealCode::Dbml,
        MealCode::Gfml,
        MealCode::Ksml,
        MealCode::Lcml,
        MealCode::Lfml,
        MealCode::Lsml,
        MealCode::Nlml,
        MealCode::Vgml,
        MealCode::Vlml,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            MealCode::Chml => "CHML",
            MealCode::Blml => "BLML",
            MealCode::Dbml => "DBML",
            MealCode::Gfml => "GFML",
            MealCode::Ksml => "KSML",
            MealCode::Lcml => "LCML",
            MealCode::Lfml => "LFML",
            MealCode::Lsml => "LSML",
            MealCode::Nlml => "NLML",
            MealCode::Vgml => "VGML",
            MealCode::Vlml => "VLML",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            MealCode::Chml => "Child meal",
            MealCode::Blml => "Bland meal",
            MealCode::Dbml => "Diabetic meal",
            MealCode::Gfml => "Gluten-free meal",
            MealCode::Ksml => "Kosher meal",
            MealCode::Lcml => "Low-calorie meal",
            MealCode::Lfml => "Low-fat meal",
            MealCode::Lsml => "Low-salt meal",
            MealCode::Nlml => "No-lactose meal",
            MealCode::Vgml => "Vegan meal",
            MealCode::Vlml => "Vegetarian lacto-ovo meal",
        }
    }
}

impl fmt::Display for MealCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parsing is case-insensitive and ignores surrounding whitespace.
impl FromStr for MealCode {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_ascii_uppercase();
        MealCode::ALL
            .into_iter()
            .find(|code| code.as_str() == upper)
            .ok_or(())
    }
}

/// Upper-cased, trimmed airport code (e.g. "SCL")
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AirportCode(String);

impl AirportCode {
    pub fn new(raw: &str) -> Self {
        Self(raw.trim().to_ascii_uppercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AirportCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Normalize a flight designator: trimmed and upper-cased ("la800" -> "LA800")
pub fn normalize_flight_number(raw: &str) -> String {
    raw.trim().to_ascii_uppercase()
}

/// Reference table key: flight designator + route
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FlightKey {
    pub flight_number: String,
    pub origin: AirportCode,
    pub destination: AirportCode,
}

impl FlightKey {
    pub fn new(flight_number: &str, origin: &str, destination: &str) -> Self {
        Self {
            flight_number: normalize_flight_number(flight_number),
            origin: AirportCode::new(origin),
            destination: AirportCode::new(destination),
        }
    }
}

/// Duplicate-detection key: one order per passenger per flight
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OrderKey {
    pub passenger_id: String,
    pub flight_number: String,
}

impl OrderKey {
    pub fn new(passenger_id: &str, flight_number: &str) -> Self {
        Self {
            passenger_id: passenger_id.trim().to_string(),
            flight_number: normalize_flight_number(flight_number),
        }
    }
}
