// Core algorithm exports
pub mod catalog;
pub mod distance;
pub mod filters;
pub mod picker;
pub mod rng;
pub mod session;
pub mod wheel;

pub use catalog::{seed_restaurants, Catalog};
pub use distance::{distance_from, haversine_distance};
pub use filters::{annotate, exclude_previous, filter_with_fallback, matches_criteria, order_for_wheel, FilterOutcome};
pub use picker::{CandidateSet, Pick, Picker};
pub use rng::{RandomSource, ScriptedRandom, SeededRandom, ThreadRandom};
pub use session::{SelectionSession, SessionLimits, SpinError};
pub use wheel::{SpinPlan, WheelTuning};
