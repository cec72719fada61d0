pub mod backend_client;
pub mod response_handler;

pub use backend_client::BackendClient;
pub use response_handler::{BackendResponse, TypedResponse};
