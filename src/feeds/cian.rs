// src/feeds/cian.rs

//! Cian feed (`<feed>`).

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::feeds::value::{Flag, Num};

/// Root of a Cian document.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CianFeed {
    /// Filled by the fetch layer
    #[serde(skip)]
    pub last_modified: Option<DateTime<Utc>>,

    pub feed_version: String,

    #[serde(rename = "object")]
    pub objects: Vec<Object>,
}

/// One Cian listing.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct Object {
    pub external_id: String,
    pub description: String,
    pub address: String,
    pub coordinates: Coordinates,
    pub cadastral_number: String,
    pub phones: Phones,
    pub layout_photo: Vec<Photo>,
    pub photos: Photos,
    pub category: String,
    pub room_type: String,
    pub flat_rooms_count: Num<i64>,
    pub total_area: Num<f32>,
    pub living_area: Num<f32>,
    pub kitchen_area: Num<f32>,
    pub project_declaration_url: String,
    pub floor_number: Num<i64>,
    pub combined_wcs_count: Num<i64>,
    pub building: Building,
    pub bargain_terms: BargainTerms,
    #[serde(rename = "JKSchema")]
    pub jk_schema: JkSchema,
    pub decoration: String,
    pub windows_view_type: String,
    pub ceiling_height: Num<f32>,
    pub undergrounds: Undergrounds,
    #[serde(rename = "isApartments")]
    pub is_apartments: Flag,
}

/// `FlatRoomsCount` value for free-layout flats.
pub const FREE_LAYOUT_ROOMS: i64 = 7;
/// `FlatRoomsCount` value for studios.
pub const STUDIO_ROOMS: i64 = 9;

impl Object {
    /// Studios and free-layout flats have no separate living area.
    pub fn is_studio_or_free_layout(&self) -> bool {
        matches!(
            self.flat_rooms_count.value(),
            Some(FREE_LAYOUT_ROOMS) | Some(STUDIO_ROOMS)
        )
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct Coordinates {
    pub lat: Num<f32>,
    pub lng: Num<f32>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct Phones {
    pub phone_schema: Vec<PhoneSchema>,
}

impl Phones {
    /// First schema with a non-empty number.
    pub fn primary(&self) -> Option<&PhoneSchema> {
        self.phone_schema
            .iter()
            .find(|schema| !schema.number.trim().is_empty())
    }

    /// Number of the primary schema, or `""`.
    pub fn number(&self) -> &str {
        self.primary().map_or("", |schema| schema.number.as_str())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct PhoneSchema {
    pub country_code: String,
    pub number: String,
}

impl PhoneSchema {
    /// Country code and number joined, e.g. `+79123456789`.
    pub fn full_number(&self) -> String {
        format!("{}{}", self.country_code.trim(), self.number.trim())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct Photo {
    pub full_url: String,
    pub is_default: Flag,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct Photos {
    pub photo_schema: Vec<Photo>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct Building {
    pub floors_count: Num<i64>,
    pub material_type: String,
    pub passenger_lifts_count: Num<i64>,
    pub cargo_lifts_count: Num<i64>,
    pub parking: Parking,
    pub deadline: Deadline,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct Parking {
    #[serde(rename = "Type")]
    pub kind: String,
}

/// Planned completion of the building.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct Deadline {
    pub quarter: String,
    pub year: Num<i64>,
    pub is_complete: Flag,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct BargainTerms {
    pub price: Num<f64>,
    pub currency: String,
    pub mortgage_allowed: Flag,
    pub sale_type: String,
}

/// Residential complex reference.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct JkSchema {
    pub id: Num<i64>,
    pub name: String,
    pub house: House,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct House {
    pub id: Num<i64>,
    pub name: String,
    pub flat: Flat,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct Flat {
    pub flat_number: Num<i64>,
    pub section_number: String,
    pub flat_type: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct Undergrounds {
    pub underground_info_schema: Vec<UndergroundInfo>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct UndergroundInfo {
    pub transport_type: String,
    pub time: Num<i64>,
    pub id: Num<i64>,
}
