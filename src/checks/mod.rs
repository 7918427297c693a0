// src/checks/mod.rs

//! Field-check primitives.
//!
//! Every primitive returns `Option<String>`: `None` when the value passes,
//! `Some(finding)` otherwise. Callers collect findings in order and use the
//! `None`/`Some` outcome to decide on follow-up checks.
//!
//! Messages have the shape `field <path>.<field> is empty. <context>`.

pub mod rules;

use std::fmt;

use crate::feeds::{CommaDecimal, Num};

pub use rules::{FieldValue, Rule, gate};

/// How a finding points back into the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Locator<'a> {
    /// Zero-based position of the listing in its collection
    Position(usize),
    /// Listing identifier (may be empty)
    InternalId(&'a str),
}

/// Positional or identifier context appended to a finding.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Context<'a> {
    pub building: Option<&'a str>,
    pub locator: Option<Locator<'a>>,
}

impl<'a> Context<'a> {
    /// No context: feed-level findings.
    pub const NONE: Self = Context {
        building: None,
        locator: None,
    };

    pub fn position(index: usize) -> Self {
        Self {
            building: None,
            locator: Some(Locator::Position(index)),
        }
    }

    pub fn internal_id(id: &'a str) -> Self {
        Self {
            building: None,
            locator: Some(Locator::InternalId(id)),
        }
    }

    /// Context of a Domclick building.
    pub fn building(id: &'a str) -> Self {
        Self {
            building: Some(id),
            locator: None,
        }
    }

    /// Prefix the context with the owning building (Domclick flats).
    pub fn in_building(self, building_id: &'a str) -> Self {
        Self {
            building: Some(building_id),
            ..self
        }
    }

    fn is_empty(&self) -> bool {
        self.building.is_none() && self.locator.is_none()
    }
}

impl fmt::Display for Context<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(building) = self.building {
            if building.trim().is_empty() {
                f.write_str("BuildingId not found")?;
            } else {
                write!(f, "BuildingId: {building}")?;
            }
            if self.locator.is_some() {
                f.write_str(". ")?;
            }
        }
        match self.locator {
            Some(Locator::Position(index)) => write!(f, "Position: {index}"),
            Some(Locator::InternalId(id)) if id.trim().is_empty() => {
                f.write_str("InternalID not found")
            }
            Some(Locator::InternalId(id)) => write!(f, "InternalID: {id}"),
            None => Ok(()),
        }
    }
}

/// Numbers whose zero value counts as "not filled in".
///
/// Zero and absence are indistinguishable in the feeds, so a legitimate zero
/// is reported as empty too.
pub trait Numeric: Copy {
    fn is_zero(&self) -> bool;
}

macro_rules! impl_numeric_int {
    ($($t:ty),*) => {
        $(impl Numeric for $t {
            fn is_zero(&self) -> bool {
                *self == 0
            }
        })*
    };
}

impl_numeric_int!(i32, i64, u32, u64, usize);

impl Numeric for f32 {
    fn is_zero(&self) -> bool {
        *self == 0.0
    }
}

impl Numeric for f64 {
    fn is_zero(&self) -> bool {
        *self == 0.0
    }
}

/// `undefined` is "not applicable", never empty.
impl<T: Numeric> Numeric for Num<T> {
    fn is_zero(&self) -> bool {
        match self {
            Num::Value(v) => v.is_zero(),
            Num::Undefined => false,
        }
    }
}

impl Numeric for CommaDecimal {
    fn is_zero(&self) -> bool {
        self.0.is_zero()
    }
}

/// `<path>.<field>`, or just `<field>` for top-level fields.
pub fn field_name(path: &str, field: &str) -> String {
    if path.is_empty() {
        field.to_string()
    } else {
        format!("{path}.{field}")
    }
}

/// Append the context to a message.
pub fn finding(message: impl fmt::Display, ctx: &Context<'_>) -> String {
    if ctx.is_empty() {
        format!("field {message}")
    } else {
        format!("field {message}. {ctx}")
    }
}

/// The "is empty" finding for a field.
pub fn empty(path: &str, field: &str, ctx: &Context<'_>) -> String {
    finding(format_args!("{} is empty", field_name(path, field)), ctx)
}

/// Report a blank string field.
pub fn require_text(value: &str, path: &str, field: &str, ctx: &Context<'_>) -> Option<String> {
    if value.trim().is_empty() {
        Some(empty(path, field, ctx))
    } else {
        None
    }
}

/// Report a zero numeric field.
pub fn require_number<N: Numeric>(
    value: N,
    path: &str,
    field: &str,
    ctx: &Context<'_>,
) -> Option<String> {
    if value.is_zero() {
        Some(empty(path, field, ctx))
    } else {
        None
    }
}

/// Report `lower` exceeding `upper` (floor vs. floors total).
///
/// Skipped unless both values are present and non-zero.
pub fn not_greater<T>(
    lower: (&str, Num<T>),
    upper: (&str, Num<T>),
    ctx: &Context<'_>,
) -> Option<String>
where
    T: Numeric + PartialOrd + fmt::Display,
{
    let (lower_name, lower) = lower;
    let (upper_name, upper) = upper;
    match (lower.value(), upper.value()) {
        (Some(l), Some(u)) if !l.is_zero() && !u.is_zero() && l > u => Some(finding(
            format_args!("{lower_name} ({l}) exceeds {upper_name} ({u})"),
            ctx,
        )),
        _ => None,
    }
}

/// Report a collection whose size is outside `min..=max`.
pub fn count_within(
    field: &str,
    count: usize,
    (min, max): (usize, usize),
    ctx: &Context<'_>,
) -> Option<String> {
    if count < min {
        Some(finding(
            format_args!("{field} contains {count} items, expected at least {min}"),
            ctx,
        ))
    } else if count > max {
        Some(finding(
            format_args!("{field} contains {count} items, expected at most {max}"),
            ctx,
        ))
    } else {
        None
    }
}

/// Report a completion year already in the past for an unfinished building.
///
/// `state` names the field that marks the building unfinished, together with
/// its value (`BuildingState is unfinished`).
pub fn past_deadline(
    year_field: &str,
    year: Num<i64>,
    state: &str,
    unfinished: bool,
    current_year: i32,
    ctx: &Context<'_>,
) -> Option<String> {
    match year.value() {
        Some(y) if unfinished && y != 0 && y < i64::from(current_year) => Some(finding(
            format_args!("{year_field} ({y}) is in the past but {state}"),
            ctx,
        )),
        _ => None,
    }
}
