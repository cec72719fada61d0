use crate::{
    schemas::{PayloadSchema, SchemaHandle},
    types::{
        AuthRequest, ContactRequest, FinalizeRequest, GenerateRequest, ModifyRequest,
        TripLogRequest,
    },
};

const REQUEST_SCHEMAS: [fn() -> &'static SchemaHandle; 6] = [
    TripLogRequest::schema,
    GenerateRequest::schema,
    ModifyRequest::schema,
    FinalizeRequest::schema,
    ContactRequest::schema,
    AuthRequest::schema,
];

/// Schemas of every request the backend accepts as JSON.
pub fn request_schemas() -> impl Iterator<Item = &'static SchemaHandle> {
    REQUEST_SCHEMAS.into_iter().map(|schema| schema())
}

/// Look up a request schema by payload name (`GenerateRequest`), endpoint
/// name (`generate_itinerary`, `generate-itinerary`) or alias (`generate`).
pub fn schema_for_name(name: &str) -> Option<&'static SchemaHandle> {
    request_schemas().find(|handle| handle.meta().answers_to(name))
}
