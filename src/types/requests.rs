use crate::payload_schema;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Trip details recorded for analytics before an itinerary is generated.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[payload_schema(endpoint = "/api/log_search")]
pub struct TripLogRequest {
    /// Caller-chosen user identifier (the web client sends "guest")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    /// IATA code or city name the trip starts from
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub departure_city: Option<String>,
    /// IATA code or city name of the destination
    pub destination: String,
    /// Travel theme, e.g. "Solo Adventure"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,
    /// Free-text activities the traveler enjoys
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub activities: Option<String>,
    /// Trip length in days
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub days: Option<u32>,
    /// Departure date as YYYY-MM-DD
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub departure_date: Option<String>,
    /// Return date as YYYY-MM-DD
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub return_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub budget_preference: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub travel_class: Option<String>,
}

/// Input for itinerary synthesis.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[payload_schema(endpoint = "/api/generate_itinerary", alias = "generate")]
pub struct GenerateRequest {
    /// IATA code or city name the trip starts from
    pub departure_city: String,
    /// IATA code or city name of the destination
    pub destination: String,
    /// Trip length in days
    pub days: u32,
    /// Travel theme, e.g. "Family Trip"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,
    /// Free-text activities the traveler enjoys
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub activities: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub budget_preference: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub travel_class: Option<String>,
    /// Departure date as YYYY-MM-DD
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub departure_date: Option<String>,
    /// Return date as YYYY-MM-DD
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub return_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
}

impl GenerateRequest {
    pub fn new(departure_city: impl Into<String>, destination: impl Into<String>, days: u32) -> Self {
        Self {
            departure_city: departure_city.into(),
            destination: destination.into(),
            days,
            ..Self::default()
        }
    }

    pub fn with_theme(mut self, theme: impl Into<String>) -> Self {
        self.theme = Some(theme.into());
        self
    }

    pub fn with_activities(mut self, activities: impl Into<String>) -> Self {
        self.activities = Some(activities.into());
        self
    }

    pub fn with_dates(mut self, departure: impl Into<String>, return_date: impl Into<String>) -> Self {
        self.departure_date = Some(departure.into());
        self.return_date = Some(return_date.into());
        self
    }

    pub fn with_user_id(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }

    /// The analytics record describing the same trip.
    pub fn to_log_request(&self) -> TripLogRequest {
        TripLogRequest {
            user_id: self.user_id.clone(),
            departure_city: Some(self.departure_city.clone()),
            destination: self.destination.clone(),
            theme: self.theme.clone(),
            activities: self.activities.clone(),
            days: Some(self.days),
            departure_date: self.departure_date.clone(),
            return_date: self.return_date.clone(),
            budget_preference: self.budget_preference.clone(),
            travel_class: self.travel_class.clone(),
        }
    }
}

/// Natural-language edit applied to an existing itinerary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[payload_schema(endpoint = "/api/modify_itinerary", alias = "modify")]
pub struct ModifyRequest {
    /// Itinerary HTML as last returned by the backend
    pub current_itinerary: String,
    /// Edit instruction, e.g. "swap day 2 and day 3"
    pub modification_prompt: String,
    /// Trip context forwarded verbatim to the backend
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
}

/// Request to price an itinerary into bookable bundles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[payload_schema(endpoint = "/api/finalize_packages", alias = "finalize")]
pub struct FinalizeRequest {
    /// Itinerary HTML to price
    pub itinerary: String,
    /// Trip context forwarded verbatim to the backend
    pub context: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
}

/// Message submitted through the contact form.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[payload_schema(endpoint = "/api/contact")]
pub struct ContactRequest {
    pub first_name: String,
    pub last_name: String,
    /// Reply address
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Where the message was sent from, e.g. a page name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

/// Credentials for sign-in and sign-up.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[payload_schema(alias = "signin", alias = "signup")]
pub struct AuthRequest {
    pub email: String,
    pub password: String,
}

impl AuthRequest {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for AuthRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthRequest")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}
