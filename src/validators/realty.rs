// src/validators/realty.rs

//! Realty (Yandex) listing rules.

use crate::checks::rules::{FieldValue, Listing, Rule, RuleEnv, check_listings};
use crate::checks::{self, Context, count_within, finding, not_greater, past_deadline};
use crate::feeds::realty::{Offer, OfferKind, RealtyFeed};

use super::FeedCheck;

/// Image tags every building offer must carry at least once.
const PLAN_TAGS: [&str; 2] = ["plan", "floor-plan"];

const UNFINISHED: &str = "unfinished";

impl FeedCheck for RealtyFeed {
    fn check(&self, env: &RuleEnv) -> Vec<String> {
        check_listings(&self.offers, env)
    }
}

fn is_building(offer: &Offer) -> bool {
    offer.offer_kind() == OfferKind::Building
}

fn is_village(offer: &Offer) -> bool {
    offer.offer_kind() == OfferKind::Village
}

fn has_rooms(offer: &Offer) -> bool {
    !offer.is_studio_or_open_plan()
}

impl Listing for Offer {
    const ID: (&'static str, &'static str) = ("", "InternalID");

    fn id(&self) -> &str {
        &self.internal_id
    }

    fn rules() -> &'static [Rule<Self>] {
        RULES
    }
}

const RULES: &[Rule<Offer>] = &[
    Rule::required("", "Type", |o| FieldValue::Text(&o.kind)),
    Rule::required("", "PropertyType", |o| FieldValue::Text(&o.property_type)),
    Rule::required("", "CreationDate", |o| FieldValue::Text(&o.creation_date)),
    Rule::required("Location", "Country", |o| FieldValue::Text(&o.location.country)),
    Rule::required("SalesAgent", "Phone", |o| FieldValue::Text(o.sales_agent.phone())),
    Rule::required("SalesAgent", "Category", |o| {
        FieldValue::Text(&o.sales_agent.category)
    }),
    Rule::required("", "DealStatus", |o| FieldValue::Text(&o.deal_status)),
    Rule::required("Price", "Value", |o| FieldValue::Float(o.price.value)),
    Rule::required("Price", "Currency", |o| FieldValue::Text(&o.price.currency)),
    Rule::required("Area", "Value", |o| FieldValue::Float(o.area.value)),
    Rule::required("Area", "Unit", |o| FieldValue::Text(&o.area.unit)),
    Rule::Check(living_space),
    Rule::required_when("", "Rooms", |o| FieldValue::Int(o.rooms), has_rooms),
    Rule::required_when("", "NewFlat", |o| FieldValue::Text(&o.new_flat), is_building),
    Rule::required_when("", "Floor", |o| FieldValue::Int(o.floor), is_building),
    Rule::required_when("", "FloorsTotal", |o| FieldValue::Int(o.floors_total), is_building),
    Rule::Check(floor_within_building),
    Rule::required_when("", "BuildingName", |o| FieldValue::Text(&o.building_name), is_building),
    Rule::required_when(
        "",
        "YandexBuildingID",
        |o| FieldValue::Int(o.yandex_building_id),
        is_building,
    ),
    Rule::required_when(
        "",
        "YandexHouseID",
        |o| FieldValue::Int(o.yandex_house_id),
        is_building,
    ),
    Rule::required_when(
        "",
        "BuildingState",
        |o| FieldValue::Text(&o.building_state),
        is_building,
    ),
    Rule::required_when("", "BuiltYear", |o| FieldValue::Int(o.built_year), is_building),
    Rule::required_when("", "ReadyQuarter", |o| FieldValue::Int(o.ready_quarter), is_building),
    Rule::Check(built_year_vs_state),
    Rule::required_when("", "VillageName", |o| FieldValue::Text(&o.village_name), is_village),
    Rule::required_when(
        "",
        "YandexVillageID",
        |o| FieldValue::Int(o.yandex_village_id),
        is_village,
    ),
    Rule::Check(images),
];

/// Living area, or a per-room breakdown matching the room count.
fn living_space(offer: &Offer, ctx: &Context<'_>, _env: &RuleEnv) -> Vec<String> {
    if offer.is_studio_or_open_plan() {
        return Vec::new();
    }
    let Some(missing) = checks::require_number(offer.living_space.value, "LivingSpace", "Value", ctx)
    else {
        return Vec::new();
    };
    if offer.room_space.is_empty() {
        return vec![missing];
    }

    let mut findings = Vec::new();
    let count = offer.room_space.len();
    match offer.rooms.value() {
        Some(rooms) if rooms != 0 && usize::try_from(rooms).ok() != Some(count) => {
            findings.push(finding(
                format_args!("RoomSpace contains {count} items, but Rooms is {rooms}"),
                ctx,
            ));
        }
        _ => {}
    }
    for room in &offer.room_space {
        findings.extend(checks::require_number(room.value, "RoomSpace", "Value", ctx));
    }
    findings
}

fn floor_within_building(offer: &Offer, ctx: &Context<'_>, _env: &RuleEnv) -> Vec<String> {
    if !is_building(offer) {
        return Vec::new();
    }
    not_greater(("Floor", offer.floor), ("FloorsTotal", offer.floors_total), ctx)
        .into_iter()
        .collect()
}

fn built_year_vs_state(offer: &Offer, ctx: &Context<'_>, env: &RuleEnv) -> Vec<String> {
    if !is_building(offer) {
        return Vec::new();
    }
    past_deadline(
        "BuiltYear",
        offer.built_year,
        "BuildingState is unfinished",
        offer.building_state.trim() == UNFINISHED,
        env.current_year,
        ctx,
    )
    .into_iter()
    .collect()
}

fn images(offer: &Offer, ctx: &Context<'_>, env: &RuleEnv) -> Vec<String> {
    let mut findings = Vec::new();
    if let Some(bounds) = env.policy.image_bounds() {
        findings.extend(count_within("Image", offer.images.len(), bounds, ctx));
    }
    for image in &offer.images {
        findings.extend(checks::require_text(&image.url, "Image", "Url", ctx));
    }
    if is_building(offer) {
        for tag in PLAN_TAGS {
            if !offer.has_image_tag(tag) {
                findings.push(finding(format_args!("Image with tag {tag} is missing"), ctx));
            }
        }
    }
    findings
}
