use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Number, Value};
use std::fmt;

/// Result of itinerary synthesis.
///
/// `itinerary` and `hotel_restaurant_content` are HTML produced by the
/// backend and are passed through untouched; rendering them is a trust
/// decision left to the caller.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GenerateResponse {
    #[serde(default, deserialize_with = "truthy")]
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub itinerary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cheapest_flights: Option<Vec<FlightOption>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cheapest_trains: Option<Vec<TrainOption>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hotel_restaurant_content: Option<String>,
    /// Fields this client does not model, kept verbatim.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModifyResponse {
    #[serde(default, deserialize_with = "truthy")]
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_itinerary: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FinalizeResponse {
    #[serde(default, deserialize_with = "truthy")]
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub packages: Option<Vec<Package>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One priced bundle. Costs are in the backend's currency (INR for the
/// current deployment).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Package {
    #[serde(default)]
    pub package_name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub total_cost: Amount,
    #[serde(default)]
    pub flight_cost: Amount,
    #[serde(default)]
    pub estimated_hotel_cost: Amount,
    #[serde(default)]
    pub activity_cost: Amount,
    #[serde(default)]
    pub estimated_food_cost: Amount,
    #[serde(default)]
    pub estimated_transport_cost: Amount,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Package {
    /// Sum of the itemized costs, for comparison against `total_cost`.
    /// Costs that are not numeric count as zero.
    pub fn itemized_total(&self) -> f64 {
        [
            &self.flight_cost,
            &self.estimated_hotel_cost,
            &self.activity_cost,
            &self.estimated_food_cost,
            &self.estimated_transport_cost,
        ]
        .into_iter()
        .filter_map(Amount::as_f64)
        .sum()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FlightOption {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,
    /// Airline logo URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider_logo: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub departure_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arrival_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_minutes: Option<Amount>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<Amount>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub booking_link: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrainOption {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub departure_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arrival_time: Option<String>,
    /// Minutes, or a display string such as "5h 20m"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_minutes: Option<Amount>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub booking_link: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A price or duration exactly as the backend wrote it: a JSON number
/// (integer or float) or a display string like `"18,000"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Amount {
    Number(Number),
    Text(String),
}

impl Amount {
    /// Numeric value. Display strings are read after dropping digit
    /// grouping (`"18,000"` -> 18000.0); anything else is `None`.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Amount::Number(number) => number.as_f64(),
            Amount::Text(text) => text
                .chars()
                .filter(|c| !matches!(c, ',' | '_' | ' '))
                .collect::<String>()
                .parse()
                .ok(),
        }
    }
}

impl Default for Amount {
    fn default() -> Self {
        Amount::Number(Number::from(0))
    }
}

impl From<f64> for Amount {
    fn from(value: f64) -> Self {
        Number::from_f64(value).map_or_else(|| Amount::Text(value.to_string()), Amount::Number)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Amount::Number(number) => write!(f, "{number}"),
            Amount::Text(text) => f.write_str(text),
        }
    }
}

/// JavaScript-style truthiness: `null`, `false`, `0` and `""` are false.
fn truthy<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => false,
        Value::Bool(flag) => flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0),
        Value::String(text) => !text.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_generate_response_keeps_unknown_fields() {
        let raw = json!({
            "success": true,
            "itinerary": "<p>Day 1</p>",
            "cheapest_flights": [{"provider": "IndiGo", "price": 4520.0, "cabin": "economy"}],
            "request_id": "abc"
        });
        let parsed: GenerateResponse = serde_json::from_value(raw.clone()).unwrap();
        let flights = parsed.cheapest_flights.as_ref().unwrap();
        assert_eq!(flights[0].provider.as_deref(), Some("IndiGo"));
        assert_eq!(flights[0].extra["cabin"], "economy");
        assert_eq!(serde_json::to_value(&parsed).unwrap(), raw);
    }

    #[test]
    fn test_durations_accept_floats_and_strings() {
        let parsed: GenerateResponse = serde_json::from_value(json!({
            "success": true,
            "cheapest_flights": [{"duration_minutes": 125.0}],
            "cheapest_trains": [
                {"provider": "Rajdhani", "duration_minutes": 960},
                {"provider": "Shatabdi", "duration_minutes": "8h 10m"}
            ]
        }))
        .unwrap();
        let flight = &parsed.cheapest_flights.as_ref().unwrap()[0];
        assert_eq!(flight.duration_minutes.as_ref().and_then(Amount::as_f64), Some(125.0));

        let trains = parsed.cheapest_trains.unwrap();
        assert_eq!(trains[0].duration_minutes.as_ref().and_then(Amount::as_f64), Some(960.0));
        assert_eq!(
            trains[1].duration_minutes,
            Some(Amount::Text("8h 10m".to_string()))
        );
        assert_eq!(trains[1].duration_minutes.as_ref().and_then(Amount::as_f64), None);
    }

    #[test]
    fn test_missing_success_reads_as_false() {
        let parsed: GenerateResponse =
            serde_json::from_value(json!({"error": "no flights found"})).unwrap();
        assert!(!parsed.success);
        assert_eq!(parsed.extra["error"], "no flights found");
    }

    #[test]
    fn test_success_uses_truthiness() {
        let parsed: ModifyResponse = serde_json::from_value(json!({"success": 1})).unwrap();
        assert!(parsed.success);
        let parsed: ModifyResponse = serde_json::from_value(json!({"success": null})).unwrap();
        assert!(!parsed.success);
    }

    #[test]
    fn test_package_costs_accept_display_strings() {
        let parsed: FinalizeResponse = serde_json::from_value(json!({
            "success": true,
            "packages": [{"package_name": "Budget", "total_cost": "18,000"}]
        }))
        .unwrap();
        let package = &parsed.packages.unwrap()[0];
        assert_eq!(package.total_cost.to_string(), "18,000");
        assert_eq!(package.total_cost.as_f64(), Some(18000.0));
    }

    #[test]
    fn test_package_missing_flight_cost_defaults_to_zero() {
        let package: Package = serde_json::from_value(json!({
            "package_name": "Budget",
            "total_cost": 18000,
            "estimated_hotel_cost": 9000,
            "activity_cost": 3000,
            "estimated_food_cost": 4000,
            "estimated_transport_cost": 2000
        }))
        .unwrap();
        assert_eq!(package.flight_cost.as_f64(), Some(0.0));
        assert_eq!(package.itemized_total(), 18000.0);
    }
}
