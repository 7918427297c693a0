// src/feeds/value.rs

//! Scalar wrappers for values read from feed text.
//!
//! Feed numbers arrive as element text. Empty text reads as zero, the literal
//! `undefined` marks a value as not applicable, anything else must parse.

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use serde::de::{self, Deserialize, Deserializer};

/// Marker some publishers write instead of a value.
pub const UNDEFINED: &str = "undefined";

/// A number that may be explicitly marked as `undefined`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Num<T> {
    Value(T),
    Undefined,
}

impl<T: Default> Default for Num<T> {
    fn default() -> Self {
        Num::Value(T::default())
    }
}

impl<T: Copy> Num<T> {
    /// The value, or `None` for `undefined`.
    pub fn value(&self) -> Option<T> {
        match self {
            Num::Value(v) => Some(*v),
            Num::Undefined => None,
        }
    }
}

impl<T: fmt::Display> fmt::Display for Num<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Num::Value(v) => v.fmt(f),
            Num::Undefined => f.write_str(UNDEFINED),
        }
    }
}

impl<T> From<T> for Num<T> {
    fn from(value: T) -> Self {
        Num::Value(value)
    }
}

/// Parse feed text into a [`Num`], optionally accepting `,` as decimal separator.
pub fn parse_number<T>(raw: &str, decimal_comma: bool) -> Result<Num<T>, String>
where
    T: FromStr + Default,
    T::Err: fmt::Display,
{
    let text = raw.trim();
    if text == UNDEFINED {
        return Ok(Num::Undefined);
    }
    if text.is_empty() {
        return Ok(Num::Value(T::default()));
    }

    let normalized = if decimal_comma {
        Cow::Owned(text.replace(',', "."))
    } else {
        Cow::Borrowed(text)
    };

    normalized
        .parse::<T>()
        .map(Num::Value)
        .map_err(|e| format!("invalid number {text:?}: {e}"))
}

impl<'de, T> Deserialize<'de> for Num<T>
where
    T: FromStr + Default,
    T::Err: fmt::Display,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse_number(&raw, false).map_err(de::Error::custom)
    }
}

/// Decimal written with either `.` or `,` as separator (Domclick).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CommaDecimal(pub Num<f32>);

impl<'de> Deserialize<'de> for CommaDecimal {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse_number(&raw, true)
            .map(CommaDecimal)
            .map_err(de::Error::custom)
    }
}

/// Yes/no flag as written by the publishers (`true`, `1`, `да`, `+`, ...).
///
/// `None` when the element is absent or empty. Parsing from a feed is
/// lenient: an unknown token is logged and read as `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Flag(pub Option<bool>);

impl Flag {
    pub fn is_true(&self) -> bool {
        self.0 == Some(true)
    }

    pub fn is_false(&self) -> bool {
        self.0 == Some(false)
    }
}

impl FromStr for Flag {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "" => Ok(Flag(None)),
            "true" | "1" | "yes" | "да" | "+" => Ok(Flag(Some(true))),
            "false" | "0" | "no" | "нет" | "-" => Ok(Flag(Some(false))),
            other => Err(format!("invalid flag {other:?}")),
        }
    }
}

impl<'de> Deserialize<'de> for Flag {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(raw.parse().unwrap_or_else(|e| {
            log::warn!("{e}, reading it as unset");
            Flag(None)
        }))
    }
}
