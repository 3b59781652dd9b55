//! Nom Nom Wheel - spin-the-wheel restaurant picker
//!
//! This library holds the restaurant catalog, the filter-and-pick pipeline,
//! the wheel animation plan, and per-profile favorites/history storage.
//! The binary serves them over HTTP and drives them from the terminal.

pub mod cli;
pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{haversine_distance, Catalog, Picker, SelectionSession};
pub use crate::models::{Candidate, Coordinates, FilterCriteria, PriceTier, Restaurant};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_exports() {
        // Verify that the library exports work correctly
        let catalog = Catalog::seeded();
        assert_eq!(catalog.len(), 12);
        assert_eq!(haversine_distance(43.466, -80.519, 43.466, -80.519), 0.0);
    }
}
