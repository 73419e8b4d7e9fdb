use serde::{Deserialize, Serialize};

use crate::utils::fields::{lenient_f64, lenient_year, trimmed_string};
use crate::utils::coordinates::format_geolocation;

/// One row of `meteorite-landings.csv` as delivered.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawMeteorite {
    pub name: String,

    #[serde(default, deserialize_with = "lenient_f64")]
    pub id: Option<f64>,

    #[serde(default)]
    pub nametype: String,

    #[serde(default)]
    pub recclass: String,

    #[serde(default, alias = "mass (g)", deserialize_with = "lenient_f64")]
    pub mass: Option<f64>,

    #[serde(default)]
    pub fall: String,

    #[serde(default, deserialize_with = "lenient_year")]
    pub year: Option<i32>,

    #[serde(default, deserialize_with = "lenient_f64")]
    pub reclat: Option<f64>,

    #[serde(default, deserialize_with = "lenient_f64")]
    pub reclong: Option<f64>,

    #[serde(default, rename = "GeoLocation", deserialize_with = "trimmed_string")]
    pub geolocation: Option<String>,
}

/// A meteorite row after cleaning: identifier, name type and fall status are gone
/// and the year is known to be in range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Meteorite {
    pub name: String,
    pub recclass: String,
    pub mass: Option<f64>,
    pub year: i32,
    pub reclat: Option<f64>,
    pub reclong: Option<f64>,
    pub geolocation: Option<String>,
}

impl Meteorite {
    pub fn new(name: &str, recclass: &str, mass: Option<f64>, year: i32) -> Self {
        Self {
            name: name.to_string(),
            recclass: recclass.to_string(),
            mass,
            year,
            reclat: None,
            reclong: None,
            geolocation: None,
        }
    }

    pub fn with_location(mut self, reclat: f64, reclong: f64) -> Self {
        self.reclat = Some(reclat);
        self.reclong = Some(reclong);
        self.geolocation = Some(format_geolocation(reclat, reclong));
        self
    }

    pub fn has_geolocation(&self) -> bool {
        self.geolocation
            .as_deref()
            .is_some_and(|g| !g.trim().is_empty())
    }
}

impl RawMeteorite {
    pub fn is_found(&self) -> bool {
        self.fall == crate::utils::constants::FALL_FOUND
    }
}
