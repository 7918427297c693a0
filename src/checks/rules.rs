// src/checks/rules.rs

//! Rule tables and the generic listing walk.
//!
//! Each provider describes its listing as a table of [`Rule`]s in document
//! order. Plain presence checks are table rows; cross-field checks are
//! [`Rule::Check`] rows so they keep their place in the finding order.

use crate::checks::{Context, require_number, require_text};
use crate::feeds::{CommaDecimal, Num};
use crate::models::FeedPolicy;

/// Settings shared by every check of one validation run.
#[derive(Debug, Clone, Copy)]
pub struct RuleEnv {
    /// Year used for "deadline in the past" checks
    pub current_year: i32,
    pub policy: FeedPolicy,
}

/// A field value as seen by the presence check.
#[derive(Debug, Clone, Copy)]
pub enum FieldValue<'a> {
    Text(&'a str),
    Int(Num<i64>),
    Float(Num<f32>),
    Double(Num<f64>),
    Decimal(CommaDecimal),
}

impl FieldValue<'_> {
    fn require(&self, path: &str, field: &str, ctx: &Context<'_>) -> Option<String> {
        match *self {
            FieldValue::Text(value) => require_text(value, path, field, ctx),
            FieldValue::Int(value) => require_number(value, path, field, ctx),
            FieldValue::Float(value) => require_number(value, path, field, ctx),
            FieldValue::Double(value) => require_number(value, path, field, ctx),
            FieldValue::Decimal(value) => require_number(value, path, field, ctx),
        }
    }
}

/// Extracts a field from a listing.
pub type Getter<L> = for<'a> fn(&'a L) -> FieldValue<'a>;

/// Custom check producing any number of findings.
pub type CheckFn<L> = fn(&L, &Context<'_>, &RuleEnv) -> Vec<String>;

/// One row of a provider rule table.
pub enum Rule<L> {
    /// Field must be filled in whenever `when` holds.
    Require {
        path: &'static str,
        field: &'static str,
        value: Getter<L>,
        when: fn(&L) -> bool,
    },
    /// Provider-specific check (cross-field, collections, ...).
    Check(CheckFn<L>),
}

fn always<L>(_: &L) -> bool {
    true
}

impl<L> Rule<L> {
    /// Unconditionally required field.
    pub const fn required(path: &'static str, field: &'static str, value: Getter<L>) -> Self {
        Rule::Require {
            path,
            field,
            value,
            when: always::<L>,
        }
    }

    /// Field required only when `when` holds for the listing.
    pub const fn required_when(
        path: &'static str,
        field: &'static str,
        value: Getter<L>,
        when: fn(&L) -> bool,
    ) -> Self {
        Rule::Require {
            path,
            field,
            value,
            when,
        }
    }

    pub fn apply(&self, listing: &L, ctx: &Context<'_>, env: &RuleEnv) -> Vec<String> {
        match self {
            Rule::Require {
                path,
                field,
                value,
                when,
            } => {
                if !when(listing) {
                    return Vec::new();
                }
                value(listing)
                    .require(path, field, ctx)
                    .into_iter()
                    .collect()
            }
            Rule::Check(check) => check(listing, ctx, env),
        }
    }
}

/// A listing type with a provider rule table.
pub trait Listing: Sized + 'static {
    /// Path and name of the identifier field in findings.
    const ID: (&'static str, &'static str);

    fn id(&self) -> &str;

    fn rules() -> &'static [Rule<Self>];
}

/// Run the identifier check and the rule table for one listing.
///
/// The identifier finding carries the position; everything else carries the
/// identifier.
pub fn check_listing<L: Listing>(
    listing: &L,
    position: usize,
    outer: Context<'_>,
    env: &RuleEnv,
) -> Vec<String> {
    let (id_path, id_field) = L::ID;
    let mut findings = Vec::new();

    let at_position = Context {
        locator: Context::position(position).locator,
        ..outer
    };
    findings.extend(require_text(listing.id(), id_path, id_field, &at_position));

    let ctx = Context {
        locator: Context::internal_id(listing.id()).locator,
        ..outer
    };
    for rule in L::rules() {
        findings.extend(rule.apply(listing, &ctx, env));
    }
    findings
}

/// Feed-level gate on the listing count.
///
/// Returns the single finding that replaces all listing checks, if any.
pub fn gate(count: usize, policy: &FeedPolicy) -> Option<String> {
    if count < policy.min_listings {
        Some("feed is empty".to_string())
    } else if count > 0 && policy.thin_threshold > 0 && count <= policy.thin_threshold {
        Some(format!("feed contains only {count} items"))
    } else {
        None
    }
}

/// Gate the feed, then check every listing in order.
pub fn check_listings<L: Listing>(listings: &[L], env: &RuleEnv) -> Vec<String> {
    if let Some(finding) = gate(listings.len(), &env.policy) {
        return vec![finding];
    }
    listings
        .iter()
        .enumerate()
        .flat_map(|(position, listing)| check_listing(listing, position, Context::NONE, env))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Item {
        id: String,
        name: String,
        size: Num<i64>,
        kind: &'static str,
    }

    fn item(id: &str) -> Item {
        Item {
            id: id.to_string(),
            name: "n".to_string(),
            size: Num::Value(1),
            kind: "a",
        }
    }

    fn size_is_odd(item: &Item, ctx: &Context<'_>, _env: &RuleEnv) -> Vec<String> {
        match item.size.value() {
            Some(size) if size % 2 == 1 => vec![format!("field Size is odd. {ctx}")],
            _ => Vec::new(),
        }
    }

    impl Listing for Item {
        const ID: (&'static str, &'static str) = ("", "ID");

        fn id(&self) -> &str {
            &self.id
        }

        fn rules() -> &'static [Rule<Self>] {
            const RULES: &[Rule<Item>] = &[
                Rule::required("", "Name", |i| FieldValue::Text(&i.name)),
                Rule::required_when("Item", "Size", |i| FieldValue::Int(i.size), |i| i.kind == "b"),
                Rule::Check(size_is_odd),
            ];
            RULES
        }
    }

    fn env(min_listings: usize, thin_threshold: usize) -> RuleEnv {
        RuleEnv {
            current_year: 2024,
            policy: FeedPolicy {
                min_listings,
                thin_threshold,
                min_images: 0,
                max_images: 0,
            },
        }
    }

    #[test]
    fn test_gate() {
        let policy = env(1, 10).policy;
        assert_eq!(gate(0, &policy).unwrap(), "feed is empty");
        assert_eq!(gate(5, &policy).unwrap(), "feed contains only 5 items");
        assert_eq!(gate(10, &policy).unwrap(), "feed contains only 10 items");
        assert_eq!(gate(11, &policy), None);

        let strict = env(2, 0).policy;
        assert_eq!(gate(1, &strict).unwrap(), "feed is empty");
        assert_eq!(gate(2, &strict), None);

        let lenient = env(0, 10).policy;
        assert_eq!(gate(0, &lenient), None);
    }

    #[test]
    fn test_gate_suppresses_listing_checks() {
        let listings: Vec<Item> = (0..5).map(|_| item("")).collect();
        assert_eq!(
            check_listings(&listings, &env(1, 10)),
            vec!["feed contains only 5 items".to_string()]
        );
    }

    #[test]
    fn test_listing_findings_in_table_order() {
        let mut broken = item("");
        broken.name.clear();
        broken.kind = "b";
        broken.size = Num::Value(0);

        let findings = check_listing(&broken, 3, Context::NONE, &env(0, 0));
        assert_eq!(
            findings,
            vec![
                "field ID is empty. Position: 3".to_string(),
                "field Name is empty. InternalID not found".to_string(),
                "field Item.Size is empty. InternalID not found".to_string(),
            ]
        );
    }

    #[test]
    fn test_conditional_rule_skipped() {
        let mut listing = item("x-1");
        listing.size = Num::Value(0);
        assert!(check_listing(&listing, 0, Context::NONE, &env(0, 0)).is_empty());
    }

    #[test]
    fn test_custom_check_runs() {
        let mut listing = item("x-1");
        listing.size = Num::Value(3);
        assert_eq!(
            check_listing(&listing, 0, Context::NONE, &env(0, 0)),
            vec!["field Size is odd. InternalID: x-1".to_string()]
        );
    }
}
