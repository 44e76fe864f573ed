//! HTML views (tera)
//!
//! Templates are compiled into the binary. A configured template directory
//! replaces them wholesale, which is how deployments restyle the pages.

use serde::Serialize;
use tera::{Context, Tera};

use crate::core_types::MealCode;
use crate::models::SubmissionOutcome;

use super::types::OrderRequest;

pub const FORM_TEMPLATE: &str = "order_form.html";
pub const CONFIRMATION_TEMPLATE: &str = "confirmation.html";

pub struct Views {
    tera: Tera,
}

#[derive(Serialize)]
struct MealOption {
    code: &'static str,
    description: &'static str,
}

/// Everything the confirmation page shows
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ConfirmationView {
    pub passenger_id: String,
    pub flight_number: String,
    pub meal_code: String,
    /// "accepted" | "duplicate" | "rejected" | "error"
    pub status: &'static str,
    pub message: Option<String>,
}

impl ConfirmationView {
    /// `req` must already be normalized
    pub fn from_outcome(req: &OrderRequest, outcome: &SubmissionOutcome) -> Self {
        let (status, meal_code, message) = match outcome {
            SubmissionOutcome::Accepted(order) => ("accepted", order.meal_code.to_string(), None),
            SubmissionOutcome::Duplicate { existing_meal_code } => {
                ("duplicate", existing_meal_code.to_string(), None)
            }
            SubmissionOutcome::Rejected(rejection) => {
                ("rejected", req.meal_code.clone(), Some(rejection.message()))
            }
        };
        Self {
            passenger_id: req.passenger_id.clone(),
            flight_number: req.flight_number.clone(),
            meal_code,
            status,
            message,
        }
    }

    /// Internal failure while recording
    pub fn internal_error(req: &OrderRequest) -> Self {
        Self {
            passenger_id: req.passenger_id.clone(),
            flight_number: req.flight_number.clone(),
            meal_code: req.meal_code.clone(),
            status: "error",
            message: Some(
                "The request could not be recorded. Please try again later.".to_string(),
            ),
        }
    }
}

impl Views {
    /// Built-in templates
    pub fn embedded() -> Result<Self, tera::Error> {
        let mut tera = Tera::default();
        tera.add_raw_templates(vec![
            (
                FORM_TEMPLATE,
                include_str!("../../templates/order_form.html"),
            ),
            (
                CONFIRMATION_TEMPLATE,
                include_str!("../../templates/confirmation.html"),
            ),
        ])?;
        Ok(Self { tera })
    }

    /// Load every template under `dir`
    pub fn from_dir(dir: &str) -> Result<Self, tera::Error> {
        let tera = Tera::new(&format!("{}/**/*", dir.trim_end_matches('/')))?;
        Ok(Self { tera })
    }

    pub fn render_form(&self) -> Result<String, tera::Error> {
        let meal_codes: Vec<MealOption> = MealCode::ALL
            .into_iter()
            .map(|code| MealOption {
                code: code.as_str(),
                description: code.description(),
            })
            .collect();
        let mut ctx = Context::new();
        ctx.insert("meal_codes", &meal_codes);
        self.tera.render(FORM_TEMPLATE, &ctx)
    }

    pub fn render_confirmation(&self, view: &ConfirmationView) -> Result<String, tera::Error> {
        let ctx = Context::from_serialize(view)?;
        self.tera.render(CONFIRMATION_TEMPLATE, &ctx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Rejection;

    fn req() -> OrderRequest {
        OrderRequest {
            passenger_id: "1-9".to_string(),
            flight_number: "LA800".to_string(),
            departure_datetime: "2026-10-21T10:30".to_string(),
            origin: "SCL".to_string(),
            destination: "IPC".to_string(),
            meal_code: "<b>XX</b>".to_string(),
        }
    }

    #[test]
    fn test_form_lists_every_meal_code() {
        let html = Views::embedded().unwrap().render_form().unwrap();
        assert!(html.contains("action=\"/submit-order\""));
        for code in MealCode::ALL {
            assert!(html.contains(&format!("value=\"{}\"", code)));
        }
    }

    #[test]
    fn test_rejection_page_escapes_input() {
        let views = Views::embedded().unwrap();
        let view = ConfirmationView::from_outcome(
            &req(),
            &SubmissionOutcome::Rejected(Rejection::InvalidMealCode),
        );
        assert_eq!(view.status, "rejected");

        let html = views.render_confirmation(&view).unwrap();
        assert!(html.contains(&Rejection::InvalidMealCode.message()));
        assert!(html.contains("&lt;b&gt;XX&lt;&#x2F;b&gt;"));
        assert!(!html.contains("<b>XX</b>"));
    }

    #[test]
    fn test_duplicate_view_shows_existing_code() {
        let view = ConfirmationView::from_outcome(
            &req(),
            &SubmissionOutcome::Duplicate {
                existing_meal_code: MealCode::Vgml,
            },
        );
        assert_eq!(view.status, "duplicate");
        assert_eq!(view.meal_code, "VGML");
        assert!(view.message.is_none());

        let html = Views::embedded().unwrap().render_confirmation(&view).unwrap();
        assert!(html.contains("status-duplicate"));
        assert!(html.contains("VGML"));
    }

    #[test]
    fn test_templates_dir_loads() {
        let views = Views::from_dir(concat!(env!("CARGO_MANIFEST_DIR"), "/templates")).unwrap();
        assert!(views.render_form().is_ok());
    }
}
