// src/feeds/avito.rs

//! Avito autoload feed (`<Ads>`) and the new developments catalog.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::feeds::value::Num;

/// Root of an Avito document.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AvitoFeed {
    /// Filled by the fetch layer
    #[serde(skip)]
    pub last_modified: Option<DateTime<Utc>>,

    #[serde(rename = "@formatVersion")]
    pub format_version: Num<i64>,

    #[serde(rename = "@target")]
    pub target: String,

    #[serde(rename = "Ad")]
    pub ads: Vec<Ad>,
}

/// One Avito listing.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct Ad {
    pub id: String,
    pub ad_status: String,
    pub allow_email: String,
    pub contact_phone: String,
    pub latitude: String,
    pub longitude: String,
    pub description: String,
    pub category: String,
    pub operation_type: String,
    pub price: Num<i64>,
    pub rooms: String,
    pub square: Num<f32>,
    pub balcony_or_loggia: String,
    pub kitchen_space: Num<f32>,
    pub view_from_windows: String,
    pub ceiling_height: String,
    pub living_space: Num<f32>,
    pub decoration: String,
    pub deal_type: String,
    pub room_type: RoomType,
    pub status: String,
    pub floor: Num<i64>,
    pub floors: Num<i64>,
    pub house_type: String,
    pub market_type: String,
    pub property_rights: String,
    pub new_development_id: String,
    pub images: Images,
}

/// `Rooms` value of a studio.
pub const STUDIO: &str = "Студия";
/// `Rooms` value of a free-layout flat.
pub const FREE_LAYOUT: &str = "Своб. планировка";

impl Ad {
    /// Studios and free-layout flats have no separate living area.
    pub fn is_studio_or_free_layout(&self) -> bool {
        matches!(self.rooms.trim(), STUDIO | FREE_LAYOUT)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RoomType {
    #[serde(rename = "Option")]
    pub options: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Images {
    #[serde(rename = "Image")]
    pub images: Vec<Image>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Image {
    #[serde(rename = "@url")]
    pub url: String,
}

/// Avito catalog of new developments: region → city → object → housing.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Developments {
    #[serde(rename = "Region")]
    pub regions: Vec<Region>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Region {
    #[serde(rename = "@name")]
    pub name: String,
    #[serde(rename = "City")]
    pub cities: Vec<City>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct City {
    #[serde(rename = "@name")]
    pub name: String,
    #[serde(rename = "Object")]
    pub objects: Vec<Development>,
}

/// A development object (residential complex).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Development {
    #[serde(rename = "@id")]
    pub id: String,
    #[serde(rename = "@name")]
    pub name: String,
    #[serde(rename = "@address")]
    pub address: String,
    #[serde(rename = "@developer")]
    pub developer: String,
    #[serde(rename = "Housing")]
    pub housing: Vec<Housing>,
}

/// A single building inside a development.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Housing {
    #[serde(rename = "@id")]
    pub id: String,
    #[serde(rename = "@name")]
    pub name: String,
    #[serde(rename = "@address")]
    pub address: String,
}

impl Developments {
    /// Iterate development objects in document order.
    pub fn objects(&self) -> impl Iterator<Item = &Development> {
        self.regions
            .iter()
            .flat_map(|region| region.cities.iter())
            .flat_map(|city| city.objects.iter())
    }
}
