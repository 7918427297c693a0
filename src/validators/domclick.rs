// src/validators/domclick.rs

//! Domclick rules.
//!
//! Findings are collected complex by complex, building by building. Flat
//! findings carry both the building and the flat id.

use crate::checks::rules::{FieldValue, Listing, Rule, RuleEnv, check_listing, gate};
use crate::checks::{self, Context, count_within, finding, not_greater, past_deadline};
use crate::feeds::domclick::{Building, Complex, DomclickFeed, Flat};

use super::FeedCheck;

const UNFINISHED: &str = "unfinished";

impl FeedCheck for DomclickFeed {
    fn check(&self, env: &RuleEnv) -> Vec<String> {
        if let Some(finding) = gate(self.flat_count(), &env.policy) {
            return vec![finding];
        }
        self.complexes
            .iter()
            .enumerate()
            .flat_map(|(position, complex)| check_complex(complex, position, env))
            .collect()
    }
}

fn check_complex(complex: &Complex, position: usize, env: &RuleEnv) -> Vec<String> {
    let mut findings = Vec::new();
    findings.extend(checks::require_text(
        &complex.id,
        "Complex",
        "ID",
        &Context::position(position),
    ));

    let ctx = Context::internal_id(&complex.id);
    findings.extend(checks::require_text(&complex.name, "Complex", "Name", &ctx));
    findings.extend(checks::require_text(&complex.address, "Complex", "Address", &ctx));
    findings.extend(checks::require_text(
        &complex.description_main.title,
        "Complex.DescriptionMain",
        "Title",
        &ctx,
    ));
    findings.extend(checks::require_text(
        &complex.description_main.text,
        "Complex.DescriptionMain",
        "Text",
        &ctx,
    ));
    findings.extend(checks::require_text(
        &complex.sales_info.sales_phone,
        "Complex.SalesInfo",
        "SalesPhone",
        &ctx,
    ));

    let images = &complex.images.image;
    if let Some(bounds) = env.policy.image_bounds() {
        findings.extend(count_within("Complex.Images.Image", images.len(), bounds, &ctx));
    }
    for url in images {
        findings.extend(checks::require_text(url, "Complex.Images", "Image", &ctx));
    }

    for (position, building) in complex.buildings.building.iter().enumerate() {
        findings.extend(check_building(building, position, env));
    }
    findings
}

fn check_building(building: &Building, position: usize, env: &RuleEnv) -> Vec<String> {
    let mut findings = Vec::new();
    findings.extend(checks::require_text(
        &building.id,
        "Buildings.Building",
        "ID",
        &Context::position(position),
    ));

    let ctx = Context::building(&building.id);
    findings.extend(checks::require_number(
        building.floors,
        "Buildings.Building",
        "Floors",
        &ctx,
    ));
    findings.extend(checks::require_text(
        &building.building_state,
        "Buildings.Building",
        "BuildingState",
        &ctx,
    ));
    findings.extend(checks::require_number(
        building.built_year,
        "Buildings.Building",
        "BuiltYear",
        &ctx,
    ));
    findings.extend(past_deadline(
        "Buildings.Building.BuiltYear",
        building.built_year,
        "Buildings.Building.BuildingState is unfinished",
        building.building_state.trim() == UNFINISHED,
        env.current_year,
        &ctx,
    ));

    let outer = Context::NONE.in_building(&building.id);
    for (position, flat) in building.flats.flat.iter().enumerate() {
        findings.extend(check_listing(flat, position, outer, env));
        findings.extend(not_greater(
            ("Flats.Flat.Floor", flat.floor),
            ("Buildings.Building.Floors", building.floors),
            &Context::internal_id(&flat.flat_id).in_building(&building.id),
        ));
    }
    findings
}

impl Listing for Flat {
    const ID: (&'static str, &'static str) = ("Flats.Flat", "FlatID");

    fn id(&self) -> &str {
        &self.flat_id
    }

    fn rules() -> &'static [Rule<Self>] {
        RULES
    }
}

const RULES: &[Rule<Flat>] = &[
    Rule::required("Flats.Flat", "Room", |f| FieldValue::Text(&f.room)),
    Rule::required("Flats.Flat", "Floor", |f| FieldValue::Int(f.floor)),
    Rule::required("Flats.Flat", "Price", |f| FieldValue::Int(f.price)),
    Rule::required("Flats.Flat", "Area", |f| FieldValue::Decimal(f.area)),
    Rule::Check(living_area),
];

/// Living area, or a per-room breakdown matching the room count.
fn living_area(flat: &Flat, ctx: &Context<'_>, _env: &RuleEnv) -> Vec<String> {
    if flat.is_studio() {
        return Vec::new();
    }
    let Some(missing) = checks::require_number(flat.living_area, "Flats.Flat", "LivingArea", ctx)
    else {
        return Vec::new();
    };
    let rooms_area = &flat.rooms_area.area;
    if rooms_area.is_empty() {
        return vec![missing];
    }

    let mut findings = Vec::new();
    let count = rooms_area.len();
    match flat.room.trim().parse::<usize>() {
        Ok(rooms) if rooms != 0 && rooms != count => findings.push(finding(
            format_args!("Flats.Flat.RoomsArea contains {count} items, but Flats.Flat.Room is {rooms}"),
            ctx,
        )),
        _ => {}
    }
    for area in rooms_area {
        findings.extend(checks::require_number(*area, "Flats.Flat.RoomsArea", "Area", ctx));
    }
    findings
}
