//! SPML Desk - special meal request intake
//!
//! Passengers pick a special meal (SPML) for a flight. An order is accepted
//! only if it is far enough ahead of departure, the flight is in the
//! reference export, and the route qualifies. Accepted orders are appended
//! to a CSV record and optionally forwarded to a webhook.
//!
//! # Modules
//!
//! - [`core_types`] - Meal codes and normalized flight/order keys
//! - [`models`] - Order, reference record and submission outcome
//! - [`csv_io`] - Reference export and order record CSV handling
//! - [`reference`] - Flight delay table with hot reload
//! - [`order_store`] - Append-only order record with duplicate index
//! - [`webhook`] - Forwarding accepted orders downstream
//! - [`gateway`] - HTTP form, JSON API and validation chain
//! - [`config`] - YAML configuration
//! - [`logging`] - tracing setup

pub mod config;
pub mod core_types;
pub mod csv_io;
pub mod error;
pub mod gateway;
pub mod logging;
pub mod models;
pub mod order_store;
pub mod reference;
pub mod webhook;

// Convenient re-exports at crate root
pub use core_types::{AirportCode, FlightKey, MealCode, OrderKey};
pub use error::{ForwardError, ReferenceError, StoreError};
pub use gateway::services::{OrderService, RouteRules};
pub use models::{FlightDelayRecord, Order, Rejection, SubmissionOutcome};
pub use order_store::{InsertOutcome, OrderStore};
pub use reference::{FlightTable, ReferenceWatcher, SharedFlightTable};
pub use webhook::{HttpForwarder, NoopForwarder, OrderForwarder};
