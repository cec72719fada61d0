use async_trait::async_trait;
use serde_json::Value;

use crate::{
    error::Result,
    services::{BackendClient, BackendResponse, TypedResponse},
    types::{
        AuthRequest, ContactRequest, FinalizeRequest, FinalizeResponse, GenerateRequest,
        GenerateResponse, ModifyRequest, ModifyResponse, PassportUpload, TripLogRequest,
    },
};

/// The backend capabilities a controller depends on.
///
/// [`BackendClient`] is the HTTP implementation; tests substitute an in-memory one.
#[async_trait]
pub trait TravelBackend: Send + Sync {
    async fn log_search(&self, request: &TripLogRequest) -> Result<BackendResponse>;

    async fn generate_itinerary(
        &self,
        request: &GenerateRequest,
    ) -> Result<TypedResponse<GenerateResponse>>;

    async fn modify_itinerary(
        &self,
        request: &ModifyRequest,
    ) -> Result<TypedResponse<ModifyResponse>>;

    async fn finalize_packages(
        &self,
        request: &FinalizeRequest,
    ) -> Result<TypedResponse<FinalizeResponse>>;

    async fn send_contact(&self, request: &ContactRequest) -> Result<BackendResponse>;

    async fn upload_passport(&self, upload: PassportUpload) -> Result<Value>;

    async fn sign_in(&self, request: &AuthRequest) -> Result<BackendResponse>;

    async fn sign_up(&self, request: &AuthRequest) -> Result<BackendResponse>;
}

#[async_trait]
impl TravelBackend for BackendClient {
    async fn log_search(&self, request: &TripLogRequest) -> Result<BackendResponse> {
        BackendClient::log_search(self, request).await
    }

    async fn generate_itinerary(
        &self,
        request: &GenerateRequest,
    ) -> Result<TypedResponse<GenerateResponse>> {
        BackendClient::generate_itinerary(self, request).await
    }

    async fn modify_itinerary(
        &self,
        request: &ModifyRequest,
    ) -> Result<TypedResponse<ModifyResponse>> {
        BackendClient::modify_itinerary(self, request).await
    }

    async fn finalize_packages(
        &self,
        request: &FinalizeRequest,
    ) -> Result<TypedResponse<FinalizeResponse>> {
        BackendClient::finalize_packages(self, request).await
    }

    async fn send_contact(&self, request: &ContactRequest) -> Result<BackendResponse> {
        BackendClient::send_contact(self, request).await
    }

    async fn upload_passport(&self, upload: PassportUpload) -> Result<Value> {
        BackendClient::upload_passport(self, upload).await
    }

    async fn sign_in(&self, request: &AuthRequest) -> Result<BackendResponse> {
        BackendClient::sign_in(self, request).await
    }

    async fn sign_up(&self, request: &AuthRequest) -> Result<BackendResponse> {
        BackendClient::sign_up(self, request).await
    }
}

#[async_trait]
impl<T: TravelBackend + ?Sized> TravelBackend for std::sync::Arc<T> {
    async fn log_search(&self, request: &TripLogRequest) -> Result<BackendResponse> {
        (**self).log_search(request).await
    }

    async fn generate_itinerary(
        &self,
        request: &GenerateRequest,
    ) -> Result<TypedResponse<GenerateResponse>> {
        (**self).generate_itinerary(request).await
    }

    async fn modify_itinerary(
        &self,
        request: &ModifyRequest,
    ) -> Result<TypedResponse<ModifyResponse>> {
        (**self).modify_itinerary(request).await
    }

    async fn finalize_packages(
        &self,
        request: &FinalizeRequest,
    ) -> Result<TypedResponse<FinalizeResponse>> {
        (**self).finalize_packages(request).await
    }

    async fn send_contact(&self, request: &ContactRequest) -> Result<BackendResponse> {
        (**self).send_contact(request).await
    }

    async fn upload_passport(&self, upload: PassportUpload) -> Result<Value> {
        (**self).upload_passport(upload).await
    }

    async fn sign_in(&self, request: &AuthRequest) -> Result<BackendResponse> {
        (**self).sign_in(request).await
    }

    async fn sign_up(&self, request: &AuthRequest) -> Result<BackendResponse> {
        (**self).sign_up(request).await
    }
}
