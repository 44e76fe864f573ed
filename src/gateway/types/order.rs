//! Meal order request types
//!
//! - `OrderRequest`: form / JSON deserialization, shared by both endpoints
//! - passenger id length and control-character check via `validator`

use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

use crate::core_types::normalize_flight_number;

/// Submitted meal order (HTTP form or JSON body)
///
/// Fields are kept as raw strings so that every business rule can produce its
/// own user-facing message instead of a generic extractor rejection.
#[derive(Debug, Clone, Deserialize, Serialize, Validate, ToSchema)]
pub struct OrderRequest {
    /// RUT / DNI / passport number
    #[schema(example = "1-9")]
    #[validate(
        length(min = 1, max = 32, message = "must be 1 to 32 characters"),
        custom(function = "validate_passenger_id")
    )]
    pub passenger_id: String,
    #[schema(example = "LA800")]
    pub flight_number: String,
    /// `YYYY-MM-DDTHH:MM` local time, or RFC 3339 with offset
    #[schema(example = "2026-10-21T10:30")]
    pub departure_datetime: String,
    #[schema(example = "SCL")]
    pub origin: String,
    #[schema(example = "IPC")]
    pub destination: String,
    #[schema(example = "VGML")]
    pub meal_code: String,
}

/// Record lines are read back one per line, so no line breaks or other
/// control characters. Anything printable is quoted on write.
fn validate_passenger_id(value: &str) -> Result<(), ValidationError> {
    if value.chars().any(char::is_control) {
        Err(ValidationError::new("control_char").with_message(Cow::Borrowed(
            "must not contain control characters",
        )))
    } else {
        Ok(())
    }
}

impl OrderRequest {
    /// Trim everything; upper-case codes and the flight designator
    pub fn normalized(self) -> Self {
        Self {
            passenger_id: self.passenger_id.trim().to_string(),
            flight_number: normalize_flight_number(&self.flight_number),
            departure_datetime: self.departure_datetime.trim().to_string(),
            origin: self.origin.trim().to_ascii_uppercase(),
            destination: self.destination.trim().to_ascii_uppercase(),
            meal_code: self.meal_code.trim().to_ascii_uppercase(),
        }
    }

    /// First passenger-id problem as a short sentence, if any
    pub fn passenger_id_problem(&self) -> Option<String> {
        let errors = self.validate().err()?;
        let field_errors = errors.field_errors();
        let first = field_errors.get("passenger_id")?.first()?;
        Some(
            first
                .message
                .as_ref()
                .map(|m| m.to_string())
                .unwrap_or_else(|| first.code.to_string()),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(passenger_id: &str) -> OrderRequest {
        OrderRequest {
            passenger_id: passenger_id.to_string(),
            flight_number: " la800 ".to_string(),
            departure_datetime: " 2026-10-21T10:30 ".to_string(),
            origin: "scl".to_string(),
            destination: " ipc".to_string(),
            meal_code: "vgml ".to_string(),
        }
    }

    #[test]
    fn test_normalized() {
        let req = request(" 12.345.678-5 ").normalized();
        assert_eq!(req.passenger_id, "12.345.678-5");
        assert_eq!(req.flight_number, "LA800");
        assert_eq!(req.departure_datetime, "2026-10-21T10:30");
        assert_eq!(req.origin, "SCL");
        assert_eq!(req.destination, "IPC");
        assert_eq!(req.meal_code, "VGML");
    }

    #[test]
    fn test_passenger_id_rules() {
        assert_eq!(request("1-9").passenger_id_problem(), None);
        assert_eq!(request("AB1234567").passenger_id_problem(), None);
        assert_eq!(request("AB 123,456").passenger_id_problem(), None);
        assert_eq!(request("Núñez1").passenger_id_problem(), None);
        assert_eq!(request("ID#42").passenger_id_problem(), None);
        // 32 characters, more than 32 bytes
        assert_eq!(request(&"ñ".repeat(32)).passenger_id_problem(), None);
        assert_eq!(
            request("").passenger_id_problem().as_deref(),
            Some("must be 1 to 32 characters")
        );
        assert_eq!(
            request(&"9".repeat(33)).passenger_id_problem().as_deref(),
            Some("must be 1 to 32 characters")
        );
        assert_eq!(
            request("1-9\n2-7").passenger_id_problem().as_deref(),
            Some("must not contain control characters")
        );
        assert!(request("a\tb").passenger_id_problem().is_some());
    }

    #[test]
    fn test_deserialize_json_body() {
        let req: OrderRequest = serde_json::from_value(serde_json::json!({
            "passenger_id": "1-9",
            "flight_number": "LA800",
            "departure_datetime": "2026-10-21T10:30",
            "origin": "SCL",
            "destination": "IPC",
            "meal_code": "VGML",
        }))
        .unwrap();
        assert_eq!(req.meal_code, "VGML");
    }
}
