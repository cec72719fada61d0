//! trip-planner-rs: a typed async client for the trip-planner travel backend
//!
//! Every backend capability is one HTTP exchange with uniform error
//! semantics: 2xx bodies come back as JSON (or raw text when they are not
//! JSON), anything else fails with the backend's error object.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use trip_planner_rs::{BackendClient, GenerateRequest};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = BackendClient::from_env();
//!
//!     let request = GenerateRequest::new("BOM", "DEL", 3).with_theme("Solo Adventure");
//!     let response = client.generate_itinerary(&request).await?;
//!     match response.record().and_then(|record| record.itinerary.as_deref()) {
//!         Some(itinerary) => println!("{}", itinerary),
//!         None => println!("{}", serde_json::to_string_pretty(response.body())?),
//!     }
//!     Ok(())
//! }
//! ```

extern crate self as trip_planner_rs;

pub mod config;
pub mod core;
pub mod error;
pub mod schemas;
pub(crate) mod services;
pub mod types;

pub use config::{ClientConfig, BACKEND_URL_ENV, DEFAULT_BACKEND_URL};
pub use crate::core::{
    ChatMessage, ChatRole, ModificationChat, PlannerOutcome, TravelBackend, TripPlanner,
};
pub use error::{ClientError, Result};
pub use schemas::{decode_payload, validate_payload, PayloadMeta, PayloadSchema, SchemaHandle};
pub use services::backend_client::{
    CONTACT_PATH, FINALIZE_PACKAGES_PATH, GENERATE_ITINERARY_PATH, LOG_SEARCH_PATH,
    MODIFY_ITINERARY_PATH, SCAN_PASSPORT_PATH, SIGNIN_PATH, SIGNUP_PATH,
};
pub use services::{BackendClient, BackendResponse, TypedResponse};
pub use trip_planner_macros::payload_schema;
pub use types::{
    Amount, AuthRequest, ContactRequest, FinalizeRequest, FinalizeResponse, FlightOption,
    GenerateRequest, GenerateResponse, ModifyRequest, ModifyResponse, Package, PassportUpload,
    TrainOption, TravelTheme, TripLogRequest,
};

pub use crate::core as planner;
pub use crate::schemas as schema;

#[cfg(feature = "cli")]
pub mod cli;
