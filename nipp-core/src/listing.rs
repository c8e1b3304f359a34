use crate::property_type::PropertyType;
use serde::{Deserialize, Deserializer, Serialize};

/// A cleaned asking-price listing scraped from property websites.
///
/// Only the columns used by the dashboard are kept; any other column of the
/// cleaned listings file is ignored on load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyListing {
    pub region: String,
    pub price: f64,
    #[serde(default, deserialize_with = "deserialize_flag")]
    pub is_detached: bool,
    #[serde(default, deserialize_with = "deserialize_flag")]
    pub is_semidetached: bool,
    #[serde(default, deserialize_with = "deserialize_flag")]
    pub is_terrace: bool,
    #[serde(default, deserialize_with = "deserialize_flag")]
    pub is_apartment_or_flat: bool,
}

impl PropertyListing {
    /// Whether this listing counts towards `property_type`.
    pub fn is_property_type(&self, property_type: PropertyType) -> bool {
        match property_type {
            PropertyType::AllResidential => true,
            PropertyType::Detached => self.is_detached,
            PropertyType::SemiDetached => self.is_semidetached,
            PropertyType::Terrace => self.is_terrace,
            PropertyType::Apartment => self.is_apartment_or_flat,
        }
    }
}

/// Boolean columns are written by a dataframe library as `True`/`False`;
/// hand-edited files sometimes use `true`/`1`.
fn deserialize_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" => Ok(true),
        "false" | "0" | "" => Ok(false),
        other => Err(serde::de::Error::custom(format!(
            "invalid boolean flag {other:?}"
        ))),
    }
}
