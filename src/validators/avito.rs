// src/validators/avito.rs

//! Avito listing rules.

use crate::checks::rules::{FieldValue, Listing, Rule, RuleEnv, check_listings};
use crate::checks::{self, Context, count_within, not_greater};
use crate::feeds::avito::{Ad, AvitoFeed};

use super::FeedCheck;

impl FeedCheck for AvitoFeed {
    fn check(&self, env: &RuleEnv) -> Vec<String> {
        check_listings(&self.ads, env)
    }
}

impl Listing for Ad {
    const ID: (&'static str, &'static str) = ("", "ID");

    fn id(&self) -> &str {
        &self.id
    }

    fn rules() -> &'static [Rule<Self>] {
        RULES
    }
}

const RULES: &[Rule<Ad>] = &[
    Rule::required("", "Description", |a| FieldValue::Text(&a.description)),
    Rule::required("", "Category", |a| FieldValue::Text(&a.category)),
    Rule::required("", "Price", |a| FieldValue::Int(a.price)),
    Rule::required("", "OperationType", |a| FieldValue::Text(&a.operation_type)),
    Rule::required("", "MarketType", |a| FieldValue::Text(&a.market_type)),
    Rule::required("", "HouseType", |a| FieldValue::Text(&a.house_type)),
    Rule::required("", "Floor", |a| FieldValue::Int(a.floor)),
    Rule::required("", "Floors", |a| FieldValue::Int(a.floors)),
    Rule::Check(floor_within_building),
    Rule::required("", "Rooms", |a| FieldValue::Text(&a.rooms)),
    Rule::required("", "Square", |a| FieldValue::Float(a.square)),
    Rule::required_when(
        "",
        "LivingSpace",
        |a| FieldValue::Float(a.living_space),
        |a| !a.is_studio_or_free_layout(),
    ),
    Rule::required("", "Status", |a| FieldValue::Text(&a.status)),
    Rule::required("", "NewDevelopmentId", |a| {
        FieldValue::Text(&a.new_development_id)
    }),
    Rule::required("", "PropertyRights", |a| FieldValue::Text(&a.property_rights)),
    Rule::required("", "Decoration", |a| FieldValue::Text(&a.decoration)),
    Rule::required("", "ContactPhone", |a| FieldValue::Text(&a.contact_phone)),
    Rule::Check(images),
];

fn floor_within_building(ad: &Ad, ctx: &Context<'_>, _env: &RuleEnv) -> Vec<String> {
    not_greater(("Floor", ad.floor), ("Floors", ad.floors), ctx)
        .into_iter()
        .collect()
}

fn images(ad: &Ad, ctx: &Context<'_>, env: &RuleEnv) -> Vec<String> {
    let images = &ad.images.images;
    let mut findings = Vec::new();
    if let Some(bounds) = env.policy.image_bounds() {
        findings.extend(count_within("Images.Image", images.len(), bounds, ctx));
    }
    for image in images {
        findings.extend(checks::require_text(&image.url, "Images.Image", "Url", ctx));
    }
    findings
}
