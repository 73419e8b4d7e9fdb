use serde::{Deserialize, Serialize};

use crate::utils::fields::lenient_f64;

/// One row of `worldcitiespop.csv` as delivered.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawCity {
    #[serde(rename = "Country")]
    pub country: String,

    #[serde(rename = "City", default)]
    pub city: String,

    #[serde(rename = "AccentCity")]
    pub accent_city: String,

    #[serde(rename = "Region", default)]
    pub region: String,

    #[serde(rename = "Population", default, deserialize_with = "lenient_f64")]
    pub population: Option<f64>,

    #[serde(rename = "Latitude", default, deserialize_with = "lenient_f64")]
    pub latitude: Option<f64>,

    #[serde(rename = "Longitude", default, deserialize_with = "lenient_f64")]
    pub longitude: Option<f64>,
}

/// City key row: accented name and the (lowercase, as delivered) country code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct City {
    pub accent_city: String,
    pub country: String,
}

impl City {
    pub fn new(accent_city: &str, country: &str) -> Self {
        Self {
            accent_city: accent_city.to_string(),
            country: country.to_string(),
        }
    }
}
