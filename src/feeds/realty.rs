// src/feeds/realty.rs

//! Yandex Realty feed (`<realty-feed>`).

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::feeds::value::{Flag, Num};

/// Root of a Realty document.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RealtyFeed {
    /// Filled by the fetch layer
    #[serde(skip)]
    pub last_modified: Option<DateTime<Utc>>,

    #[serde(rename = "@xmlns")]
    pub xmlns: String,

    #[serde(rename = "generation-date")]
    pub generation_date: String,

    #[serde(rename = "offer")]
    pub offers: Vec<Offer>,
}

/// One Realty listing.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Offer {
    #[serde(rename = "@internal-id")]
    pub internal_id: String,

    #[serde(rename = "image")]
    pub images: Vec<Image>,

    #[serde(rename = "type")]
    pub kind: String,
    #[serde(rename = "property-type")]
    pub property_type: String,
    pub category: String,
    pub url: String,
    #[serde(rename = "window-view")]
    pub window_view: String,
    #[serde(rename = "ceiling-height")]
    pub ceiling_height: Vec<String>,
    pub description: String,
    #[serde(rename = "creation-date")]
    pub creation_date: String,
    pub vas: Vec<Vas>,
    #[serde(rename = "last-update-date")]
    pub last_update_date: String,
    #[serde(rename = "expire-date")]
    pub expire_date: String,

    pub location: Location,
    #[serde(rename = "sales-agent")]
    pub sales_agent: SalesAgent,
    pub price: Price,

    #[serde(rename = "new-flat")]
    pub new_flat: String,
    #[serde(rename = "deal-status")]
    pub deal_status: String,
    #[serde(rename = "built-year")]
    pub built_year: Num<i64>,
    #[serde(rename = "ready-quarter")]
    pub ready_quarter: Num<i64>,

    pub area: Value,
    #[serde(rename = "room-space")]
    pub room_space: Vec<Value>,
    #[serde(rename = "living-space")]
    pub living_space: Value,
    #[serde(rename = "kitchen-space")]
    pub kitchen_space: Value,

    pub renovation: String,
    pub rooms: Num<i64>,
    pub studio: Flag,
    #[serde(rename = "open-plan")]
    pub open_plan: Flag,
    #[serde(rename = "rubbish-chute")]
    pub rubbish_chute: String,
    #[serde(rename = "floors-total")]
    pub floors_total: Num<i64>,
    pub floor: Num<i64>,

    #[serde(rename = "building-name")]
    pub building_name: String,
    #[serde(rename = "building-type")]
    pub building_type: String,
    pub mortgage: String,
    #[serde(rename = "building-state")]
    pub building_state: String,
    pub lift: String,
    #[serde(rename = "bathroom-unit")]
    pub bathroom_unit: String,
    #[serde(rename = "yandex-building-id")]
    pub yandex_building_id: Num<i64>,
    #[serde(rename = "yandex-house-id")]
    pub yandex_house_id: Num<i64>,
    #[serde(rename = "village-name")]
    pub village_name: String,
    #[serde(rename = "yandex-village-id")]
    pub yandex_village_id: Num<i64>,
    #[serde(rename = "building-section")]
    pub building_section: String,
    pub balcony: String,
}

/// Whether an offer belongs to an apartment building or a cottage village.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OfferKind {
    Building,
    Village,
}

impl Offer {
    /// Village offers carry a village name or id instead of building ids.
    pub fn offer_kind(&self) -> OfferKind {
        let village_id = self.yandex_village_id.value().unwrap_or_default();
        if !self.village_name.trim().is_empty() || village_id != 0 {
            OfferKind::Village
        } else {
            OfferKind::Building
        }
    }

    /// Studios and open-plan flats have no separate living area.
    pub fn is_studio_or_open_plan(&self) -> bool {
        self.studio.is_true() || self.open_plan.is_true()
    }

    pub fn has_image_tag(&self, tag: &str) -> bool {
        self.images.iter().any(|image| image.tag == tag)
    }
}

/// Image URL with an optional tag (`plan`, `floor-plan`, ...).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Image {
    #[serde(rename = "@tag")]
    pub tag: String,
    #[serde(rename = "$text")]
    pub url: String,
}

/// Paid placement option.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Vas {
    #[serde(rename = "@start-time")]
    pub start_time: String,
    #[serde(rename = "@schedule")]
    pub schedule: String,
    #[serde(rename = "$text")]
    pub kind: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Location {
    pub country: String,
    pub region: String,
    pub address: String,
    #[serde(rename = "locality-name")]
    pub locality_name: String,
    pub latitude: String,
    pub longitude: String,
    pub direction: String,
    pub distance: String,
    pub metro: Vec<Metro>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Metro {
    pub name: String,
    #[serde(rename = "time-on-transport")]
    pub time_on_transport: String,
    #[serde(rename = "time-on-foot")]
    pub time_on_foot: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SalesAgent {
    pub category: String,
    pub organization: String,
    pub phone: Vec<String>,
}

impl SalesAgent {
    /// First non-empty `<phone>`, or `""` when there is none.
    pub fn phone(&self) -> &str {
        self.phone
            .iter()
            .map(|phone| phone.trim())
            .find(|phone| !phone.is_empty())
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Price {
    pub value: Num<f32>,
    pub currency: String,
}

/// Area-like value with a unit.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Value {
    pub value: Num<f32>,
    pub unit: String,
}
