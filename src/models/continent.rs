use serde::{Deserialize, Serialize};

/// One row of `countryContinent.csv` as delivered.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawContinent {
    #[serde(default)]
    pub country: String,

    #[serde(default)]
    pub code_2: String,

    #[serde(default)]
    pub code_3: String,

    #[serde(default)]
    pub country_code: String,

    #[serde(default)]
    pub iso_3166_2: String,

    #[serde(default)]
    pub continent: String,

    #[serde(default)]
    pub sub_region: String,

    #[serde(default)]
    pub region_code: String,

    #[serde(default)]
    pub sub_region_code: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Continent {
    pub code_2: String,
    pub country: String,
    pub continent: String,
}

impl Continent {
    pub fn new(code_2: &str, country: &str, continent: &str) -> Self {
        Self {
            code_2: code_2.to_string(),
            country: country.to_string(),
            continent: continent.to_string(),
        }
    }
}
