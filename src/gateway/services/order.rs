//! Order Service - Business logic for meal order submission
//!
//! This separates business logic from HTTP handlers so the HTML form and the
//! JSON API run the exact same validation chain.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Local, NaiveDateTime, TimeDelta};

use crate::config::RulesConfig;
use crate::core_types::{AirportCode, FlightKey, MealCode};
use crate::error::StoreError;
use crate::models::{Order, Rejection, SubmissionOutcome};
use crate::order_store::{InsertOutcome, OrderStore};
use crate::reference::SharedFlightTable;
use crate::webhook::OrderForwarder;

use crate::gateway::types::OrderRequest;

const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M", "%Y-%m-%dT%H:%M:%S"];

/// Parse a departure time into server-local wall time.
///
/// Accepts the HTML `datetime-local` format (with or without seconds) and
/// RFC 3339 with an explicit offset.
pub fn parse_departure(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .or_else(|| {
            DateTime::parse_from_rfc3339(raw)
                .ok()
                .map(|dt| dt.with_timezone(&Local).naive_local())
        })
}

/// Lead-time and route rules
#[derive(Debug, Clone)]
pub struct RouteRules {
    pub min_lead: TimeDelta,
    pub min_delay: Duration,
    pub exception_routes: Vec<(AirportCode, AirportCode)>,
}

impl RouteRules {
    pub fn from_config(config: &RulesConfig) -> Self {
        Self {
            min_lead: TimeDelta::hours(config.min_lead_hours),
            min_delay: Duration::from_secs(config.min_delay_minutes * 60),
            exception_routes: config
                .exception_routes
                .iter()
                .map(|(a, b)| (AirportCode::new(a), AirportCode::new(b)))
                .collect(),
        }
    }

    pub fn departure_far_enough(&self, departure: NaiveDateTime, now: NaiveDateTime) -> bool {
        departure - now >= self.min_lead
    }

    /// Exception pairs match in either direction
    pub fn is_exception_route(&self, origin: &AirportCode, destination: &AirportCode) -> bool {
        self.exception_routes
            .iter()
            .any(|(a, b)| (a == origin && b == destination) || (a == destination && b == origin))
    }

    pub fn route_eligible(
        &self,
        origin: &AirportCode,
        destination: &AirportCode,
        delay: Duration,
    ) -> bool {
        self.is_exception_route(origin, destination) || delay > self.min_delay
    }
}

impl Default for RouteRules {
    fn default() -> Self {
        Self::from_config(&RulesConfig::default())
    }
}

/// Order Service - runs the validation chain and records accepted orders
pub struct OrderService {
    flights: SharedFlightTable,
    store: Arc<OrderStore>,
    forwarder: Arc<dyn OrderForwarder>,
    rules: RouteRules,
}

impl OrderService {
    pub fn new(
        flights: SharedFlightTable,
        store: Arc<OrderStore>,
        forwarder: Arc<dyn OrderForwarder>,
        rules: RouteRules,
    ) -> Self {
        Self {
            flights,
            store,
            forwarder,
            rules,
        }
    }

    pub fn store(&self) -> &OrderStore {
        &self.store
    }

    pub fn flights(&self) -> &SharedFlightTable {
        &self.flights
    }

    /// Submit against the current local time
    pub async fn submit(&self, req: OrderRequest) -> Result<SubmissionOutcome, StoreError> {
        self.submit_at(req, Local::now().naive_local()).await
    }

    /// Validate in order, short-circuiting on the first failure:
    /// meal code, lead time, reference match, route rule, passenger id shape,
    /// then duplicate check and append as one step.
    pub async fn submit_at(
        &self,
        req: OrderRequest,
        now: NaiveDateTime,
    ) -> Result<SubmissionOutcome, StoreError> {
        let req = req.normalized();
        tracing::info!(
            "[SPML] Submission: passenger={} flight={} {}->{} meal={} departure={}",
            req.passenger_id,
            req.flight_number,
            req.origin,
            req.destination,
            req.meal_code,
            req.departure_datetime
        );

        // 1. Meal code
        let Ok(meal_code) = req.meal_code.parse::<MealCode>() else {
            return Ok(self.reject(&req, Rejection::InvalidMealCode));
        };

        // 2. Lead time
        let Some(departure) = parse_departure(&req.departure_datetime) else {
            return Ok(self.reject(&req, Rejection::InvalidDeparture));
        };
        if !self.rules.departure_far_enough(departure, now) {
            return Ok(self.reject(&req, Rejection::TooCloseToDeparture));
        }

        // 3. Reference lookup
        let key = FlightKey::new(&req.flight_number, &req.origin, &req.destination);
        let delay = self.flights.read().await.delay_for(&key);
        let Some(delay) = delay else {
            return Ok(self.reject(&req, Rejection::FlightNotFound));
        };

        // 4. Route rule
        if !self
            .rules
            .route_eligible(&key.origin, &key.destination, delay)
        {
            return Ok(self.reject(&req, Rejection::RouteNotEligible));
        }

        // Guard the record file before anything is written
        if let Some(problem) = req.passenger_id_problem() {
            return Ok(self.reject(&req, Rejection::InvalidPassengerId(problem)));
        }

        // 5 + 6. Duplicate check and append, atomically
        let order = Order {
            passenger_id: req.passenger_id,
            flight_number: req.flight_number,
            departure_datetime: req.departure_datetime,
            origin: req.origin,
            destination: req.destination,
            meal_code,
        };

        // Write and fsync off the async workers
        let store = Arc::clone(&self.store);
        let pending = order.clone();
        let inserted =
            tokio::task::spawn_blocking(move || store.insert_if_absent(&pending)).await??;

        match inserted {
            InsertOutcome::Existing(existing_meal_code) => {
                tracing::info!(
                    "[SPML] Duplicate: passenger={} flight={} already has {}",
                    order.passenger_id,
                    order.flight_number,
                    existing_meal_code
                );
                Ok(SubmissionOutcome::Duplicate { existing_meal_code })
            }
            InsertOutcome::Inserted => {
                tracing::info!(
                    "[SPML] Accepted: passenger={} flight={} meal={}",
                    order.passenger_id,
                    order.flight_number,
                    order.meal_code
                );
                if let Err(e) = self.forwarder.forward(&order).await {
                    tracing::warn!(
                        "[SPML] Webhook failed for passenger={} flight={}: {}",
                        order.passenger_id,
                        order.flight_number,
                        e
                    );
                }
                Ok(SubmissionOutcome::Accepted(order))
            }
        }
    }

    fn reject(&self, req: &OrderRequest, rejection: Rejection) -> SubmissionOutcome {
        tracing::info!(
            "[SPML] Rejected: passenger={} flight={}: {:?}",
            req.passenger_id,
            req.flight_number,
            rejection
        );
        SubmissionOutcome::Rejected(rejection)
    }
}
