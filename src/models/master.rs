use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::utils::constants::UNKNOWN_COUNTRY_CODE;

/// One row of the master table: a cleaned, geo-resolved meteorite annotated
/// with its country and continent. Year bounds are configurable and are
/// checked by the integrity checker, not here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct MasterRecord {
    pub city: String,

    pub recclass: String,

    pub mass: Option<f64>,

    pub year: i32,

    #[validate(range(min = -90.0, max = 90.0))]
    pub reclat: Option<f64>,

    #[validate(range(min = -180.0, max = 180.0))]
    pub reclong: Option<f64>,

    #[validate(length(min = 1))]
    pub geolocation: String,

    #[validate(length(equal = 2))]
    pub code_2: String,

    #[validate(length(min = 1))]
    pub country: String,

    #[validate(length(min = 1))]
    pub continent: String,
}

impl MasterRecord {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        city: String,
        recclass: String,
        mass: Option<f64>,
        year: i32,
        reclat: Option<f64>,
        reclong: Option<f64>,
        geolocation: String,
        code_2: String,
        country: String,
        continent: String,
    ) -> Self {
        Self {
            city,
            recclass,
            mass,
            year,
            reclat,
            reclong,
            geolocation,
            code_2,
            country,
            continent,
        }
    }

    /// `XX` or two ASCII uppercase letters.
    pub fn has_valid_country_code(&self) -> bool {
        self.code_2 == UNKNOWN_COUNTRY_CODE
            || (self.code_2.len() == 2 && self.code_2.chars().all(|c| c.is_ascii_uppercase()))
    }

    pub fn has_resolved_country(&self) -> bool {
        self.code_2 != UNKNOWN_COUNTRY_CODE
    }

    pub fn is_below_mass(&self, cap: f64) -> bool {
        self.mass.is_some_and(|m| m < cap)
    }
}
