pub mod registry;
pub mod schema;
pub mod validation;

pub use registry::{request_schemas, schema_for_name};
pub use schema::{PayloadMeta, PayloadSchema, SchemaHandle};
pub use validation::{decode_payload, validate_payload};
