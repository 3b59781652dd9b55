// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    Candidate, Coordinates, FavoriteEntry, FilterCriteria, HistoryEntry, HistoryRow, PriceTier,
    Restaurant,
};
pub use requests::SpinRequest;
pub use responses::{ErrorResponse, HealthResponse};
