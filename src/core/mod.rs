pub mod backend;
pub mod conversation;
pub mod planner;

pub use backend::TravelBackend;
pub use conversation::{ChatMessage, ChatRole, ModificationChat};
pub use planner::{PlannerOutcome, TripPlanner, MAX_TRIP_DAYS, MIN_TRIP_DAYS};
