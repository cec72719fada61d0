use chrono::NaiveDate;
use serde_json::json;
use tracing::{info, warn};

use crate::{
    core::{
        backend::TravelBackend,
        conversation::{ChatMessage, ModificationChat},
    },
    error::{ClientError, Result},
    types::{
        FinalizeRequest, FlightOption, GenerateRequest, ModifyRequest, Package, TrainOption,
        TravelTheme,
    },
};

pub const MIN_TRIP_DAYS: u32 = 1;
pub const MAX_TRIP_DAYS: u32 = 30;

const DEFAULT_USER_ID: &str = "guest";
const DATE_FORMAT: &str = "%Y-%m-%d";
const UPDATED_ITINERARY_REPLY: &str = "I've updated your itinerary. See above.";

/// How a backend call that returned 2xx affected the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlannerOutcome {
    /// Session state now reflects the response.
    Updated,
    /// The backend answered `success: false`, omitted the payload or sent a body
    /// of another shape; state is unchanged.
    Rejected,
}

/// State of one trip-planning session, driven through an injected backend.
#[derive(Debug)]
pub struct TripPlanner<B> {
    backend: B,
    user_id: String,
    departure_city: String,
    destination: String,
    departure_date: Option<NaiveDate>,
    return_date: Option<NaiveDate>,
    days: u32,
    theme: Option<TravelTheme>,
    activities: String,
    loading: bool,
    itinerary: Option<String>,
    cheapest_flights: Vec<FlightOption>,
    cheapest_trains: Vec<TrainOption>,
    hotel_content: Option<String>,
    chat: ModificationChat,
    packages: Option<Vec<Package>>,
    selected_package: Option<usize>,
}

impl<B: TravelBackend> TripPlanner<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            user_id: DEFAULT_USER_ID.to_string(),
            departure_city: "BOM".to_string(),
            destination: "DEL".to_string(),
            departure_date: None,
            return_date: None,
            days: 3,
            theme: None,
            activities: String::new(),
            loading: false,
            itinerary: None,
            cheapest_flights: Vec::new(),
            cheapest_trains: Vec::new(),
            hotel_content: None,
            chat: ModificationChat::new(),
            packages: None,
            selected_package: None,
        }
    }

    pub fn with_user_id(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = user_id.into();
        self
    }

    pub fn with_route(mut self, departure_city: impl Into<String>, destination: impl Into<String>) -> Self {
        self.departure_city = departure_city.into();
        self.destination = destination.into();
        self
    }

    pub fn with_dates(mut self, departure: NaiveDate, return_date: NaiveDate) -> Self {
        self.departure_date = Some(departure);
        self.return_date = Some(return_date);
        self
    }

    /// Trip length, clamped to 1..=30 days.
    pub fn with_days(mut self, days: u32) -> Self {
        self.days = days.clamp(MIN_TRIP_DAYS, MAX_TRIP_DAYS);
        self
    }

    pub fn with_theme(mut self, theme: TravelTheme) -> Self {
        self.theme = Some(theme);
        self
    }

    pub fn with_activities(mut self, activities: impl Into<String>) -> Self {
        self.activities = activities.into();
        self
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn days(&self) -> u32 {
        self.days
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Backend-supplied HTML, unmodified.
    pub fn itinerary(&self) -> Option<&str> {
        self.itinerary.as_deref()
    }

    pub fn cheapest_flights(&self) -> &[FlightOption] {
        &self.cheapest_flights
    }

    pub fn cheapest_trains(&self) -> &[TrainOption] {
        &self.cheapest_trains
    }

    pub fn hotel_content(&self) -> Option<&str> {
        self.hotel_content.as_deref()
    }

    pub fn chat(&self) -> &ModificationChat {
        &self.chat
    }

    pub fn packages(&self) -> Option<&[Package]> {
        self.packages.as_deref()
    }

    pub fn selected_package(&self) -> Option<&Package> {
        let index = self.selected_package?;
        self.packages.as_ref()?.get(index)
    }

    /// The generation request for the current form, or a validation error
    /// when a required field is missing.
    pub fn generate_request(&self) -> Result<GenerateRequest> {
        let departure_city = self.departure_city.trim();
        let destination = self.destination.trim();

        let (Some(departure), Some(return_date), Some(theme)) =
            (self.departure_date, self.return_date, self.theme)
        else {
            return Err(missing_fields());
        };
        if departure_city.is_empty() || destination.is_empty() {
            return Err(missing_fields());
        }

        let mut request = GenerateRequest::new(departure_city, destination, self.days)
            .with_theme(theme.as_str())
            .with_dates(
                departure.format(DATE_FORMAT).to_string(),
                return_date.format(DATE_FORMAT).to_string(),
            )
            .with_user_id(self.user_id.clone());
        if !self.activities.trim().is_empty() {
            request = request.with_activities(self.activities.trim());
        }
        Ok(request)
    }

    /// Log the search, then generate an itinerary for the current form.
    pub async fn submit(&mut self) -> Result<PlannerOutcome> {
        let request = self.generate_request()?;

        self.loading = true;
        let outcome = self.run_generate(&request).await;
        self.loading = false;
        outcome
    }

    async fn run_generate(&mut self, request: &GenerateRequest) -> Result<PlannerOutcome> {
        info!(destination = %request.destination, days = request.days, "Saving trip details");
        self.backend.log_search(&request.to_log_request()).await?;

        info!(destination = %request.destination, "Generating itinerary");
        let response = self.backend.generate_itinerary(request).await?;
        let Some(response) = response.into_record().filter(|record| record.success) else {
            warn!("itinerary generation was not successful");
            return Ok(PlannerOutcome::Rejected);
        };

        if let Some(itinerary) = non_empty(response.itinerary) {
            self.itinerary = Some(itinerary);
        }
        if let Some(flights) = response.cheapest_flights {
            self.cheapest_flights = flights;
        }
        if let Some(trains) = response.cheapest_trains {
            self.cheapest_trains = trains;
        }
        if let Some(content) = non_empty(response.hotel_restaurant_content) {
            self.hotel_content = Some(content);
        }
        Ok(PlannerOutcome::Updated)
    }

    /// Ask the backend to rewrite the current itinerary according to `prompt`.
    pub async fn modify(&mut self, prompt: impl Into<String>) -> Result<PlannerOutcome> {
        let Some(current) = self.itinerary.clone() else {
            return Err(ClientError::Validation(
                "No itinerary available to modify.".to_string(),
            ));
        };
        let prompt = prompt.into();

        self.loading = true;
        self.chat.push(ChatMessage::user(prompt.clone()));
        let request = ModifyRequest {
            current_itinerary: current,
            modification_prompt: prompt,
            context: Some(json!({
                "destination": self.destination,
                "days": self.days,
                "theme": self.theme,
            })),
            user_id: Some(self.user_id.clone()),
        };
        let result = self.backend.modify_itinerary(&request).await;
        self.loading = false;

        let Some(response) = result?.into_record() else {
            warn!("modification response did not match the expected record");
            return Ok(PlannerOutcome::Rejected);
        };
        match non_empty(response.updated_itinerary) {
            Some(updated) if response.success => {
                self.itinerary = Some(updated);
                self.chat.push(ChatMessage::assistant(UPDATED_ITINERARY_REPLY));
                Ok(PlannerOutcome::Updated)
            }
            _ => {
                warn!(success = response.success, "itinerary was not updated");
                Ok(PlannerOutcome::Rejected)
            }
        }
    }

    /// Turn the current itinerary into priced packages.
    pub async fn finalize(&mut self) -> Result<PlannerOutcome> {
        let Some(itinerary) = self.itinerary.clone() else {
            return Err(ClientError::Validation(
                "No itinerary to finalize.".to_string(),
            ));
        };

        self.loading = true;
        let request = FinalizeRequest {
            itinerary,
            context: json!({
                "destination": self.destination,
                "num_days": self.days,
                "theme": self.theme,
                "cheapest_flights": self.cheapest_flights,
            }),
            user_id: Some(self.user_id.clone()),
        };
        let result = self.backend.finalize_packages(&request).await;
        self.loading = false;

        let Some(response) = result?.into_record() else {
            warn!("finalize response did not match the expected record");
            return Ok(PlannerOutcome::Rejected);
        };
        match response.packages {
            Some(packages) if response.success => {
                info!(count = packages.len(), "Packages generated");
                self.packages = Some(packages);
                self.selected_package = None;
                Ok(PlannerOutcome::Updated)
            }
            _ => {
                warn!(success = response.success, "no packages were generated");
                Ok(PlannerOutcome::Rejected)
            }
        }
    }

    /// Pick one of the generated packages for booking.
    pub fn select_package(&mut self, index: usize) -> Result<&Package> {
        let count = self.packages.as_ref().map_or(0, Vec::len);
        if index >= count {
            return Err(ClientError::Validation(format!(
                "package {index} does not exist ({count} available)"
            )));
        }
        self.selected_package = Some(index);
        self.selected_package()
            .ok_or_else(|| ClientError::Validation(format!("package {index} does not exist")))
    }
}

fn non_empty(text: Option<String>) -> Option<String> {
    text.filter(|text| !text.is_empty())
}

fn missing_fields() -> ClientError {
    ClientError::Validation("Please fill all required fields before submitting.".to_string())
}
