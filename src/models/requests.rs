use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::domain::{Coordinates, FilterCriteria};

/// One spin request from a front-end
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct SpinRequest {
    #[serde(default)]
    #[validate(nested)]
    pub criteria: FilterCriteria,
    #[serde(default)]
    #[validate(nested)]
    pub origin: Option<Coordinates>,
    #[serde(default = "default_count")]
    #[validate(range(min = 1, max = 50))]
    pub count: u8,
    #[serde(default)]
    pub save: bool,
}

fn default_count() -> u8 {
    1
}
