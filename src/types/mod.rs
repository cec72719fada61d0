pub mod passport;
pub mod requests;
pub mod responses;
pub mod theme;

pub use passport::{destinations_in_region, visa_free_destinations, PassportUpload, VisaFreeDestination};
pub use requests::{
    AuthRequest, ContactRequest, FinalizeRequest, GenerateRequest, ModifyRequest, TripLogRequest,
};
pub use responses::{
    Amount, FinalizeResponse, FlightOption, GenerateResponse, ModifyResponse, Package,
    TrainOption,
};
pub use theme::TravelTheme;
