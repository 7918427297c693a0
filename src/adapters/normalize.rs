// src/adapters/normalize.rs

//! Object name and phone number normalization.

use std::sync::OnceLock;

use regex::Regex;

use crate::error::{AppError, Result};

const STRIPPED_CHARS: [char; 3] = ['"', '«', '»'];
const PREFIXES: [&str; 2] = ["жк ", "ск "];
const PHRASES: [&str; 2] = ["апарт-комплекс", "сити-комплекс"];

/// Normalize a development or building name for comparison.
///
/// Lower-cases, drops quotes and guillemets, removes the `жк `/`ск `
/// prefixes and the `апарт-комплекс`/`сити-комплекс` phrases, then trims.
/// Applying it twice gives the same result as applying it once.
pub fn normalize_object(name: &str) -> String {
    let mut result: String = name
        .to_lowercase()
        .chars()
        .filter(|c| !STRIPPED_CHARS.contains(c))
        .collect();

    for phrase in PHRASES {
        while result.contains(phrase) {
            result = result.replace(phrase, "");
        }
    }

    loop {
        let trimmed = result.trim();
        match PREFIXES.iter().find_map(|prefix| trimmed.strip_prefix(prefix)) {
            Some(rest) => result = rest.to_string(),
            None => return trimmed.to_string(),
        }
    }
}

fn phone_pattern() -> Option<&'static Regex> {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    PATTERN
        .get_or_init(|| Regex::new(r"[0-9]{11}").ok())
        .as_ref()
}

/// Reduce a phone number to its first 11 digits.
pub fn phone_number_to_int(raw: &str) -> Result<u64> {
    let digits: String = raw.chars().filter(char::is_ascii_digit).collect();
    phone_pattern()
        .and_then(|pattern| pattern.find(&digits))
        .and_then(|found| found.as_str().parse().ok())
        .ok_or_else(|| AppError::PhoneConversion(raw.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_object() {
        assert_eq!(normalize_object("ЖК \"Рассвет\""), "рассвет");
        assert_eq!(normalize_object("СК «Северный»"), "северный");
        assert_eq!(normalize_object("Апарт-комплекс Нева"), "нева");
        assert_eq!(normalize_object("  Сити-комплекс «Остров»  "), "остров");
        assert_eq!(normalize_object("Парк Легенд"), "парк легенд");
    }

    #[test]
    fn test_normalize_object_is_idempotent() {
        for name in [
            "ЖК \"Рассвет\"",
            "жк жк двойной",
            "  ЖК «Ск Лес»",
            "Апарт-комплекс ЖК Нева",
            "",
        ] {
            let once = normalize_object(name);
            assert_eq!(normalize_object(&once), once, "input {name:?}");
        }
    }

    #[test]
    fn test_phone_number_to_int() {
        assert_eq!(phone_number_to_int("+7 (912) 345-67-89").unwrap(), 79123456789);
        assert_eq!(phone_number_to_int("8-800-555-35-35").unwrap(), 88005553535);
        assert_eq!(phone_number_to_int("+7912345678901").unwrap(), 79123456789);
    }

    #[test]
    fn test_phone_number_to_int_fails() {
        assert!(matches!(
            phone_number_to_int("no digits here"),
            Err(AppError::PhoneConversion(_))
        ));
        assert!(phone_number_to_int("345-67-89").is_err());
    }
}
