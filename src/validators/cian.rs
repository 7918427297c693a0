// src/validators/cian.rs

//! Cian listing rules.

use crate::checks::rules::{FieldValue, Listing, Rule, RuleEnv, check_listings};
use crate::checks::{self, Context, count_within, not_greater, past_deadline};
use crate::feeds::cian::{CianFeed, Object};

use super::FeedCheck;

impl FeedCheck for CianFeed {
    fn check(&self, env: &RuleEnv) -> Vec<String> {
        check_listings(&self.objects, env)
    }
}

impl Listing for Object {
    const ID: (&'static str, &'static str) = ("", "ExternalId");

    fn id(&self) -> &str {
        &self.external_id
    }

    fn rules() -> &'static [Rule<Self>] {
        RULES
    }
}

const RULES: &[Rule<Object>] = &[
    Rule::required("", "Category", |o| FieldValue::Text(&o.category)),
    Rule::required("", "FlatRoomsCount", |o| FieldValue::Int(o.flat_rooms_count)),
    Rule::required("", "TotalArea", |o| FieldValue::Float(o.total_area)),
    Rule::required_when(
        "",
        "LivingArea",
        |o| FieldValue::Float(o.living_area),
        |o| !o.is_studio_or_free_layout(),
    ),
    Rule::required("", "FloorNumber", |o| FieldValue::Int(o.floor_number)),
    Rule::required("Building", "FloorsCount", |o| {
        FieldValue::Int(o.building.floors_count)
    }),
    Rule::Check(floor_within_building),
    Rule::Check(deadline_vs_completion),
    Rule::required("JKSchema", "ID", |o| FieldValue::Int(o.jk_schema.id)),
    Rule::required("JKSchema", "Name", |o| FieldValue::Text(&o.jk_schema.name)),
    Rule::required("JKSchema.House", "ID", |o| FieldValue::Int(o.jk_schema.house.id)),
    Rule::required("JKSchema.House", "Name", |o| {
        FieldValue::Text(&o.jk_schema.house.name)
    }),
    Rule::required("BargainTerms", "Price", |o| {
        FieldValue::Double(o.bargain_terms.price)
    }),
    Rule::required("Phones.PhoneSchema", "Number", |o| {
        FieldValue::Text(o.phones.number())
    }),
    Rule::Check(photos),
];

fn floor_within_building(object: &Object, ctx: &Context<'_>, _env: &RuleEnv) -> Vec<String> {
    not_greater(
        ("FloorNumber", object.floor_number),
        ("Building.FloorsCount", object.building.floors_count),
        ctx,
    )
    .into_iter()
    .collect()
}

fn deadline_vs_completion(object: &Object, ctx: &Context<'_>, env: &RuleEnv) -> Vec<String> {
    let deadline = &object.building.deadline;
    past_deadline(
        "Building.Deadline.Year",
        deadline.year,
        "Building.Deadline.IsComplete is false",
        deadline.is_complete.is_false(),
        env.current_year,
        ctx,
    )
    .into_iter()
    .collect()
}

fn photos(object: &Object, ctx: &Context<'_>, env: &RuleEnv) -> Vec<String> {
    let photos = &object.photos.photo_schema;
    let mut findings = Vec::new();
    if let Some(bounds) = env.policy.image_bounds() {
        findings.extend(count_within("Photos.PhotoSchema", photos.len(), bounds, ctx));
    }
    for photo in photos {
        findings.extend(checks::require_text(
            &photo.full_url,
            "Photos.PhotoSchema",
            "FullUrl",
            ctx,
        ));
    }
    findings
}
