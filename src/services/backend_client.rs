use reqwest::multipart::{Form, Part};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use crate::{
    config::ClientConfig,
    error::{ClientError, Result},
    services::response_handler::{BackendResponse, TypedResponse},
    types::{
        AuthRequest, ContactRequest, FinalizeRequest, FinalizeResponse, GenerateRequest,
        GenerateResponse, ModifyRequest, ModifyResponse, PassportUpload, TripLogRequest,
    },
};

pub const LOG_SEARCH_PATH: &str = TripLogRequest::ENDPOINT;
pub const GENERATE_ITINERARY_PATH: &str = GenerateRequest::ENDPOINT;
pub const MODIFY_ITINERARY_PATH: &str = ModifyRequest::ENDPOINT;
pub const FINALIZE_PACKAGES_PATH: &str = FinalizeRequest::ENDPOINT;
pub const CONTACT_PATH: &str = ContactRequest::ENDPOINT;
pub const SCAN_PASSPORT_PATH: &str = "/api/scan_passport";
pub const SIGNIN_PATH: &str = "/api/signin";
pub const SIGNUP_PATH: &str = "/api/signup";

/// Multipart field the passport scanner reads the image from.
const UPLOAD_FIELD: &str = "file";

/// Stateless client for the travel backend. One HTTP exchange per call,
/// no retries and no timeout.
#[derive(Clone, Debug)]
pub struct BackendClient {
    config: ClientConfig,
    http: reqwest::Client,
}

impl BackendClient {
    pub fn new(config: ClientConfig) -> Self {
        Self::with_http_client(config, reqwest::Client::new())
    }

    /// Use a preconfigured transport (proxy, TLS roots, ...).
    pub fn with_http_client(config: ClientConfig, http: reqwest::Client) -> Self {
        Self { config, http }
    }

    /// Resolve the base URL from `BACKEND_URL`.
    pub fn from_env() -> Self {
        Self::new(ClientConfig::from_env())
    }

    pub fn base_url(&self) -> &str {
        self.config.base_url()
    }

    /// POST `body` as JSON to `path` and normalize the outcome.
    ///
    /// A 2xx body is returned as JSON when it parses and as text otherwise.
    /// Any other status fails with [`ClientError::Api`] carrying the JSON error
    /// body, or `{"error": <text>}` / `{"error": "HTTP <status>"}` when the body
    /// is not JSON.
    pub async fn post_json<B>(&self, path: &str, body: &B) -> Result<BackendResponse>
    where
        B: Serialize + ?Sized,
    {
        let url = self.config.endpoint(path);
        debug!(target: "trip_planner::http", %url, "POST json");

        let response = self
            .http
            .post(&url)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .body(serde_json::to_vec(body)?)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;
        debug!(
            target: "trip_planner::http",
            %url,
            status = status.as_u16(),
            bytes = text.len(),
            "response received"
        );

        if !status.is_success() {
            warn!(target: "trip_planner::http", %url, status = status.as_u16(), "backend rejected request");
            return Err(ClientError::from_error_body(status.as_u16(), &text));
        }

        Ok(BackendResponse::parse(text))
    }

    /// Send a passport image to the scanner as multipart form data.
    ///
    /// The success body must be JSON. Any other status fails with
    /// [`ClientError::Upload`] whose message is the response text, or
    /// `HTTP <status>` when the body is empty.
    pub async fn upload_passport(&self, upload: PassportUpload) -> Result<Value> {
        let url = self.config.endpoint(SCAN_PASSPORT_PATH);
        let PassportUpload {
            file_name,
            content_type,
            bytes,
        } = upload;
        debug!(
            target: "trip_planner::http",
            %url,
            %file_name,
            size = bytes.len(),
            "POST multipart"
        );

        let part = Part::bytes(bytes)
            .file_name(file_name)
            .mime_str(&content_type)
            .map_err(|err| {
                ClientError::Validation(format!("invalid content type `{content_type}`: {err}"))
            })?;
        let form = Form::new().part(UPLOAD_FIELD, part);

        let response = self.http.post(&url).multipart(form).send().await?;
        let status = response.status();
        let text = response.text().await?;
        debug!(target: "trip_planner::http", %url, status = status.as_u16(), "response received");

        if !status.is_success() {
            warn!(target: "trip_planner::http", %url, status = status.as_u16(), "passport upload rejected");
            return Err(ClientError::from_upload_body(status.as_u16(), &text));
        }

        serde_json::from_str(&text)
            .map_err(|err| ClientError::Decode(format!("passport scan result is not JSON: {err}")))
    }

    /// Record the searched trip for analytics.
    pub async fn log_search(&self, request: &TripLogRequest) -> Result<BackendResponse> {
        self.post_json(LOG_SEARCH_PATH, request).await
    }

    /// POST `body` as JSON and pair the 2xx body with its decoded `T`.
    ///
    /// A body that does not fit `T` still resolves; see [`TypedResponse`].
    pub async fn post_typed<T, B>(&self, path: &str, body: &B) -> Result<TypedResponse<T>>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let response = self.post_json(path, body).await?.typed::<T>();
        if let Some(reason) = response.mismatch() {
            warn!(target: "trip_planner::http", path, %reason, "response does not match the expected record");
        }
        Ok(response)
    }

    pub async fn generate_itinerary(
        &self,
        request: &GenerateRequest,
    ) -> Result<TypedResponse<GenerateResponse>> {
        self.post_typed(GENERATE_ITINERARY_PATH, request).await
    }

    pub async fn modify_itinerary(
        &self,
        request: &ModifyRequest,
    ) -> Result<TypedResponse<ModifyResponse>> {
        self.post_typed(MODIFY_ITINERARY_PATH, request).await
    }

    /// Price an itinerary into bookable packages.
    pub async fn finalize_packages(
        &self,
        request: &FinalizeRequest,
    ) -> Result<TypedResponse<FinalizeResponse>> {
        self.post_typed(FINALIZE_PACKAGES_PATH, request).await
    }

    pub async fn send_contact(&self, request: &ContactRequest) -> Result<BackendResponse> {
        self.post_json(CONTACT_PATH, request).await
    }

    pub async fn sign_in(&self, request: &AuthRequest) -> Result<BackendResponse> {
        self.post_json(SIGNIN_PATH, request).await
    }

    pub async fn sign_up(&self, request: &AuthRequest) -> Result<BackendResponse> {
        self.post_json(SIGNUP_PATH, request).await
    }
}

impl Default for BackendClient {
    fn default() -> Self {
        Self::new(ClientConfig::default())
    }
}
