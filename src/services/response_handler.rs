use crate::error::{ClientError, Result};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;

/// A 2xx response body: JSON when it parses, otherwise the raw text.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum BackendResponse {
    Json(Value),
    Text(String),
}

impl BackendResponse {
    /// Single parse attempt with a plain-text fallback.
    pub fn parse(text: String) -> Self {
        match serde_json::from_str::<Value>(&text) {
            Ok(value) => BackendResponse::Json(value),
            Err(_) => BackendResponse::Text(text),
        }
    }

    pub fn as_json(&self) -> Option<&Value> {
        match self {
            BackendResponse::Json(value) => Some(value),
            BackendResponse::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            BackendResponse::Json(_) => None,
            BackendResponse::Text(text) => Some(text),
        }
    }

    pub fn into_json(self) -> Result<Value> {
        match self {
            BackendResponse::Json(value) => Ok(value),
            BackendResponse::Text(text) => Err(ClientError::Decode(format!(
                "expected a JSON body, got text: {}",
                preview(&text)
            ))),
        }
    }

    /// Decode into a typed response record, naming the failing field on error.
    pub fn decode<T: DeserializeOwned>(self) -> Result<T> {
        decode_value(self.into_json()?)
    }

    /// Pair the body with its decoded record without failing when the two disagree.
    pub fn typed<T: DeserializeOwned>(self) -> TypedResponse<T> {
        let decoded = match &self {
            BackendResponse::Json(value) => decode_message(value.clone()),
            BackendResponse::Text(text) => Err(format!(
                "expected a JSON body, got text: {}",
                preview(text)
            )),
        };
        TypedResponse {
            body: self,
            decoded,
        }
    }
}

/// A 2xx answer from an endpoint with a known response shape.
///
/// The body is kept exactly as received. When it does not fit `T` (a text
/// body, or JSON of another shape) the call still succeeded: `record` is
/// empty and `mismatch` says why.
#[derive(Debug, Clone, PartialEq)]
pub struct TypedResponse<T> {
    body: BackendResponse,
    decoded: std::result::Result<T, String>,
}

impl<T> TypedResponse<T> {
    pub fn body(&self) -> &BackendResponse {
        &self.body
    }

    pub fn into_body(self) -> BackendResponse {
        self.body
    }

    pub fn record(&self) -> Option<&T> {
        self.decoded.as_ref().ok()
    }

    pub fn into_record(self) -> Option<T> {
        self.decoded.ok()
    }

    pub fn mismatch(&self) -> Option<&str> {
        self.decoded.as_ref().err().map(String::as_str)
    }

    /// The record, or [`ClientError::Decode`] when the body did not fit.
    pub fn decode(self) -> Result<T> {
        self.decoded.map_err(ClientError::Decode)
    }
}

impl<T> Serialize for TypedResponse<T> {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.body.serialize(serializer)
    }
}

fn decode_value<T: DeserializeOwned>(value: Value) -> Result<T> {
    decode_message(value).map_err(ClientError::Decode)
}

fn decode_message<T: DeserializeOwned>(value: Value) -> std::result::Result<T, String> {
    serde_path_to_error::deserialize(value).map_err(|err| {
        let path = err.path().to_string();
        format!(
            "`{}` at {}: {}",
            short_type_name::<T>(),
            if path == "." { "<root>" } else { &path },
            err.inner()
        )
    })
}

fn short_type_name<T>() -> &'static str {
    let full = std::any::type_name::<T>();
    full.rsplit("::").next().unwrap_or(full)
}

const PREVIEW_CHARS: usize = 120;

fn preview(text: &str) -> String {
    if text.chars().count() <= PREVIEW_CHARS {
        return text.to_string();
    }
    let head: String = text.chars().take(PREVIEW_CHARS).collect();
    format!("{head}...")
}
