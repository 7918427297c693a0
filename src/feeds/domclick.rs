// src/feeds/domclick.rs

//! Domclick feed (`<complexes>`).
//!
//! Unlike the other providers the listings (flats) are nested two levels
//! deep: complex → building → flat.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::feeds::value::{CommaDecimal, Num};

/// Root of a Domclick document.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DomclickFeed {
    /// Filled by the fetch layer
    #[serde(skip)]
    pub last_modified: Option<DateTime<Utc>>,

    #[serde(rename = "complex")]
    pub complexes: Vec<Complex>,
}

impl DomclickFeed {
    /// Total number of flats across all complexes and buildings.
    pub fn flat_count(&self) -> usize {
        self.complexes
            .iter()
            .flat_map(|complex| complex.buildings.building.iter())
            .map(|building| building.flats.flat.len())
            .sum()
    }
}

/// A residential complex.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Complex {
    pub id: String,
    pub name: String,
    pub latitude: String,
    pub longitude: String,
    pub address: String,
    pub images: Images,
    pub description_main: Description,
    pub infrastructure: Infrastructure,
    pub profits_main: ProfitsMain,
    pub profits_secondary: ProfitsSecondary,
    pub buildings: Buildings,
    pub sales_info: SalesInfo,
    pub developer: Vec<Developer>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Images {
    pub image: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Description {
    pub title: String,
    pub text: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Infrastructure {
    pub parking: String,
    pub security: String,
    pub fenced_area: String,
    pub sports_ground: String,
    pub playground: String,
    pub school: String,
    pub kindergarten: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ProfitsMain {
    pub profit_main: Vec<Profit>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ProfitsSecondary {
    pub profit_secondary: Vec<Profit>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Profit {
    pub title: String,
    pub text: String,
    pub image: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Buildings {
    pub building: Vec<Building>,
}

/// A building (house) of a complex.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Building {
    pub id: String,
    pub fz_214: String,
    pub name: String,
    pub floors: Num<i64>,
    pub building_state: String,
    pub built_year: Num<i64>,
    pub ready_quarter: Num<i64>,
    pub building_type: String,
    pub image: Vec<String>,
    pub flats: Flats,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Flats {
    pub flat: Vec<Flat>,
}

/// `room` value of a studio.
pub const STUDIO_ROOMS: &str = "0";

/// One Domclick listing.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Flat {
    pub flat_id: String,
    pub apartment: String,
    pub floor: Num<i64>,
    pub room: String,
    pub plan: String,
    pub balcony: String,
    pub renovation: String,
    pub price: Num<i64>,
    pub area: CommaDecimal,
    pub living_area: CommaDecimal,
    pub kitchen_area: CommaDecimal,
    pub rooms_area: RoomsArea,
    pub bathroom: String,
    pub housing_type: String,
    pub decoration: Num<i64>,
    pub ready_housing: String,
}

impl Flat {
    pub fn is_studio(&self) -> bool {
        self.room.trim() == STUDIO_ROOMS
    }
}

/// Per-room area breakdown.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RoomsArea {
    pub area: Vec<CommaDecimal>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SalesInfo {
    pub sales_phone: String,
    pub responsible_officer_phone: String,
    pub sales_address: String,
    pub sales_latitude: String,
    pub sales_longitude: String,
    pub timezone: String,
    pub work_days: WorkDays,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct WorkDays {
    pub work_day: Vec<WorkDay>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct WorkDay {
    pub day: String,
    pub open_at: String,
    pub close_at: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Developer {
    pub id: String,
    pub name: String,
    pub phone: String,
    pub site: String,
    pub logo: String,
}
