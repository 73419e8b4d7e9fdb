use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ProcessingError;

/// Material class of a meteorite, derived from its `recclass` label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MaterialClass {
    Stony,
    Iron,
    StonyIron,
}

impl MaterialClass {
    pub const ALL: [MaterialClass; 3] = [
        MaterialClass::Stony,
        MaterialClass::Iron,
        MaterialClass::StonyIron,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MaterialClass::Stony => "stony",
            MaterialClass::Iron => "iron",
            MaterialClass::StonyIron => "stony-iron",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            MaterialClass::Stony => "Stony",
            MaterialClass::Iron => "Iron",
            MaterialClass::StonyIron => "Stony-iron",
        }
    }
}

/// The dashboard opens on the stony-iron map.
impl Default for MaterialClass {
    fn default() -> Self {
        MaterialClass::StonyIron
    }
}

impl fmt::Display for MaterialClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MaterialClass {
    type Err = ProcessingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "stony" => Ok(MaterialClass::Stony),
            "iron" => Ok(MaterialClass::Iron),
            "stony-iron" | "stony_iron" => Ok(MaterialClass::StonyIron),
            other => Err(ProcessingError::UnknownMaterialClass(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_identifiers() {
        assert_eq!("stony".parse::<MaterialClass>().unwrap(), MaterialClass::Stony);
        assert_eq!("Iron".parse::<MaterialClass>().unwrap(), MaterialClass::Iron);
        assert_eq!(
            "stony-iron".parse::<MaterialClass>().unwrap(),
            MaterialClass::StonyIron
        );
        assert!("chondrite".parse::<MaterialClass>().is_err());
    }

    #[test]
    fn test_default_selection() {
        assert_eq!(MaterialClass::default(), MaterialClass::StonyIron);
        assert_eq!(MaterialClass::default().to_string(), "stony-iron");
    }
}
