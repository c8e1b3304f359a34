use crate::error::Error;
use crate::property_type::PropertyType;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The eleven Northern Ireland local government districts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum GovernmentDistrict {
    AntrimAndNewtownabbey,
    ArdsAndNorthDown,
    ArmaghBanbridgeCraigavon,
    Belfast,
    CausewayCoastAndGlens,
    DerryAndStrabane,
    FermanaghAndOmagh,
    LisburnAndCastlereagh,
    MidAndEastAntrim,
    MidUlster,
    NewryMourneAndDown,
}

impl GovernmentDistrict {
    pub const ALL: [GovernmentDistrict; 11] = [
        GovernmentDistrict::AntrimAndNewtownabbey,
        GovernmentDistrict::ArdsAndNorthDown,
        GovernmentDistrict::ArmaghBanbridgeCraigavon,
        GovernmentDistrict::Belfast,
        GovernmentDistrict::CausewayCoastAndGlens,
        GovernmentDistrict::DerryAndStrabane,
        GovernmentDistrict::FermanaghAndOmagh,
        GovernmentDistrict::LisburnAndCastlereagh,
        GovernmentDistrict::MidAndEastAntrim,
        GovernmentDistrict::MidUlster,
        GovernmentDistrict::NewryMourneAndDown,
    ];

    pub fn display_name(&self) -> &'static str {
        match self {
            GovernmentDistrict::AntrimAndNewtownabbey => "Antrim and Newtownabbey",
            GovernmentDistrict::ArdsAndNorthDown => "Ards and North Down",
            GovernmentDistrict::ArmaghBanbridgeCraigavon => "Armagh City, Banbridge and Craigavon",
            GovernmentDistrict::Belfast => "Belfast",
            GovernmentDistrict::CausewayCoastAndGlens => "Causeway Coast and Glens",
            GovernmentDistrict::DerryAndStrabane => "Derry and Strabane",
            GovernmentDistrict::FermanaghAndOmagh => "Fermanagh and Omagh",
            GovernmentDistrict::LisburnAndCastlereagh => "Lisburn and Castlereagh",
            GovernmentDistrict::MidAndEastAntrim => "Mid and East Antrim",
            GovernmentDistrict::MidUlster => "Mid Ulster",
            GovernmentDistrict::NewryMourneAndDown => "Newry, Mourne and Down",
        }
    }

    /// Prefix of this district's sheets in the annual statistics workbooks.
    pub fn sheet_prefix(&self) -> &'static str {
        match self {
            GovernmentDistrict::AntrimAndNewtownabbey => "AntrimNewtownabbey",
            GovernmentDistrict::ArdsAndNorthDown => "Ards_N_Down",
            GovernmentDistrict::ArmaghBanbridgeCraigavon => "Armagh_Ban_Craig",
            GovernmentDistrict::Belfast => "Belfast",
            GovernmentDistrict::CausewayCoastAndGlens => "Causeway",
            GovernmentDistrict::DerryAndStrabane => "DerryC_Strabane",
            GovernmentDistrict::FermanaghAndOmagh => "Fermanagh_Omagh",
            GovernmentDistrict::LisburnAndCastlereagh => "Lisburn_Castlereagh",
            GovernmentDistrict::MidAndEastAntrim => "Mid_E_Antrim",
            GovernmentDistrict::MidUlster => "Mid_Ulster",
            GovernmentDistrict::NewryMourneAndDown => "Newry_M_Down",
        }
    }
}

impl fmt::Display for GovernmentDistrict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for GovernmentDistrict {
    type Err = Error;

    /// Accepts either the display name or the sheet prefix, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        GovernmentDistrict::ALL
            .into_iter()
            .find(|district| {
                district.display_name().eq_ignore_ascii_case(wanted)
                    || district.sheet_prefix().eq_ignore_ascii_case(wanted)
            })
            .ok_or_else(|| Error::UnknownDistrict(s.to_string()))
    }
}

/// A validated workbook sheet identifier: `"<district prefix>_<property code>"`.
///
/// Only constructible from the closed (district, property type) table, so a
/// sheet name can never be misspelled at a call site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SheetId {
    pub district: GovernmentDistrict,
    pub property_type: PropertyType,
}

impl SheetId {
    pub fn new(district: GovernmentDistrict, property_type: PropertyType) -> SheetId {
        SheetId {
            district,
            property_type,
        }
    }

    pub fn sheet_name(&self) -> String {
        format!(
            "{}_{}",
            self.district.sheet_prefix(),
            self.property_type.sheet_code()
        )
    }

    /// Every sheet a complete workbook is expected to contain.
    pub fn all() -> impl Iterator<Item = SheetId> {
        GovernmentDistrict::ALL.into_iter().flat_map(|district| {
            PropertyType::ALL
                .into_iter()
                .map(move |property_type| SheetId::new(district, property_type))
        })
    }
}

impl fmt::Display for SheetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.sheet_name())
    }
}

impl FromStr for SheetId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SheetId::all()
            .find(|sheet| sheet.sheet_name() == s)
            .ok_or_else(|| Error::UnknownSheet(s.to_string()))
    }
}
