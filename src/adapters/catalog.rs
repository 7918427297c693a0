// src/adapters/catalog.rs

//! Lookup from Avito development ids to development names.

use std::collections::HashMap;

use crate::error::{AppError, Result};
use crate::feeds::Developments;

/// Development name by object or housing id.
///
/// Built once per extraction call; the first occurrence of an id wins.
#[derive(Debug, Clone, Default)]
pub struct DevelopmentIndex {
    names: HashMap<String, String>,
}

impl DevelopmentIndex {
    pub fn new(catalog: &Developments) -> Self {
        let mut names = HashMap::new();
        for object in catalog.objects() {
            let ids = std::iter::once(&object.id).chain(object.housing.iter().map(|h| &h.id));
            for id in ids {
                let id = id.trim();
                if !id.is_empty() {
                    names
                        .entry(id.to_string())
                        .or_insert_with(|| object.name.clone());
                }
            }
        }
        log::debug!("Indexed {} development ids", names.len());
        Self { names }
    }

    /// Name of the development owning `id`.
    pub fn name(&self, id: &str) -> Result<&str> {
        self.names
            .get(id.trim())
            .map(String::as_str)
            .ok_or_else(|| AppError::MappingNotFound(id.to_string()))
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feeds::parse_developments;

    const CATALOG: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<Developments>
  <Region name="Москва">
    <City name="Москва">
      <Object id="1001" name="ЖК Рассвет" address="ул. Садовая, 1" developer="ПИК">
        <Housing id="2001" name="Корпус 1" address="ул. Садовая, 1к1"/>
        <Housing id="2002" name="Корпус 2" address="ул. Садовая, 1к2"/>
      </Object>
    </City>
  </Region>
  <Region name="Санкт-Петербург">
    <City name="Санкт-Петербург">
      <Object id="1002" name="ЖК Нева" address="наб. Невы, 5" developer="ЛСР"/>
      <Object id="1001" name="Дубликат" address="" developer=""/>
    </City>
  </Region>
</Developments>"#;

    fn index() -> DevelopmentIndex {
        DevelopmentIndex::new(&parse_developments(CATALOG.as_bytes()).unwrap())
    }

    #[test]
    fn test_resolves_objects_and_housing() {
        let index = index();
        assert_eq!(index.name("1002").unwrap(), "ЖК Нева");
        assert_eq!(index.name("2002").unwrap(), "ЖК Рассвет");
        assert_eq!(index.len(), 4);
    }

    #[test]
    fn test_first_occurrence_wins() {
        assert_eq!(index().name("1001").unwrap(), "ЖК Рассвет");
    }

    #[test]
    fn test_missing_id() {
        assert!(matches!(
            index().name("9999"),
            Err(AppError::MappingNotFound(id)) if id == "9999"
        ));
        assert!(DevelopmentIndex::default().is_empty());
    }
}
