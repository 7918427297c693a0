// src/adapters/mod.rs

//! Projection of parsed feeds into [`Lot`]s for phone verification.
//!
//! Any listing whose phone cannot be reduced to 11 digits, or whose
//! development id is unknown, fails the whole extraction.

mod catalog;
mod normalize;

use crate::error::Result;
use crate::feeds::cian::PhoneSchema;
use crate::feeds::{AvitoFeed, CianFeed, DomclickFeed, Feed, RealtyFeed};
use crate::models::Lot;

pub use catalog::DevelopmentIndex;
pub use normalize::{normalize_object, phone_number_to_int};

fn lot(id: &str, object: &str, phone: &str) -> Result<Lot> {
    Ok(Lot {
        id: id.to_string(),
        object: normalize_object(object),
        phone: phone_number_to_int(phone)?,
    })
}

/// Extract lots from a feed of any provider.
///
/// `developments` is only consulted for Avito; without it every Avito ad
/// referencing a development fails with a missing mapping.
pub fn extract(feed: &Feed, developments: Option<&DevelopmentIndex>) -> Result<Vec<Lot>> {
    let lots = match feed {
        Feed::Realty(feed) => realty_lots(feed)?,
        Feed::Cian(feed) => cian_lots(feed)?,
        Feed::Avito(feed) => {
            let empty = DevelopmentIndex::default();
            avito_lots(feed, developments.unwrap_or(&empty))?
        }
        Feed::Domclick(feed) => domclick_lots(feed)?,
    };
    log::info!("Extracted {} lots from {} feed", lots.len(), feed.provider());
    Ok(lots)
}

/// Building offers use the building name, village offers the village name.
pub fn realty_lots(feed: &RealtyFeed) -> Result<Vec<Lot>> {
    feed.offers
        .iter()
        .map(|offer| {
            let object = if offer.building_name.trim().is_empty() {
                &offer.village_name
            } else {
                &offer.building_name
            };
            lot(&offer.internal_id, object, offer.sales_agent.phone())
        })
        .collect()
}

pub fn cian_lots(feed: &CianFeed) -> Result<Vec<Lot>> {
    feed.objects
        .iter()
        .map(|object| {
            lot(
                &object.external_id,
                &object.jk_schema.name,
                &object
                    .phones
                    .primary()
                    .map(PhoneSchema::full_number)
                    .unwrap_or_default(),
            )
        })
        .collect()
}

/// New-build ads take their name from the development catalog; the rest
/// fall back to the ad description.
pub fn avito_lots(feed: &AvitoFeed, developments: &DevelopmentIndex) -> Result<Vec<Lot>> {
    feed.ads
        .iter()
        .map(|ad| {
            let object = if ad.new_development_id.trim().is_empty() {
                ad.description.as_str()
            } else {
                developments.name(&ad.new_development_id)?
            };
            lot(&ad.id, object, &ad.contact_phone)
        })
        .collect()
}

/// One lot per flat, named after its complex.
pub fn domclick_lots(feed: &DomclickFeed) -> Result<Vec<Lot>> {
    let mut lots = Vec::with_capacity(feed.flat_count());
    for complex in &feed.complexes {
        for building in &complex.buildings.building {
            for flat in &building.flats.flat {
                lots.push(lot(&flat.flat_id, &complex.name, &complex.sales_info.sales_phone)?);
            }
        }
    }
    Ok(lots)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use crate::feeds::avito::Ad;
    use crate::feeds::cian::{JkSchema, Object, Phones};
    use crate::feeds::domclick::{Building, Buildings, Complex, Flat, Flats, SalesInfo};
    use crate::feeds::realty::{Offer, SalesAgent};
    use crate::feeds::parse_developments;

    fn catalog() -> DevelopmentIndex {
        let xml = r#"<Developments><Region name="Москва"><City name="Москва">
            <Object id="77" name="ЖК «Рассвет»" address="" developer="">
              <Housing id="7701" name="Корпус 1" address=""/>
            </Object>
          </City></Region></Developments>"#;
        DevelopmentIndex::new(&parse_developments(xml.as_bytes()).unwrap())
    }

    fn ad(id: &str, development: &str) -> Ad {
        Ad {
            id: id.to_string(),
            description: "СК Лесной".to_string(),
            contact_phone: "+7 (912) 345-67-89".to_string(),
            new_development_id: development.to_string(),
            ..Ad::default()
        }
    }

    #[test]
    fn test_avito_lots_resolve_catalog() {
        let feed = AvitoFeed {
            ads: vec![ad("1", "77"), ad("2", "7701"), ad("3", "")],
            ..AvitoFeed::default()
        };
        let lots = avito_lots(&feed, &catalog()).unwrap();
        assert_eq!(
            lots,
            vec![
                Lot { id: "1".into(), object: "рассвет".into(), phone: 79123456789 },
                Lot { id: "2".into(), object: "рассвет".into(), phone: 79123456789 },
                Lot { id: "3".into(), object: "лесной".into(), phone: 79123456789 },
            ]
        );
    }

    #[test]
    fn test_avito_unknown_development_fails_whole_call() {
        let feed = AvitoFeed {
            ads: vec![ad("1", "77"), ad("2", "404")],
            ..AvitoFeed::default()
        };
        assert!(matches!(
            avito_lots(&feed, &catalog()),
            Err(AppError::MappingNotFound(id)) if id == "404"
        ));
        assert!(extract(&Feed::Avito(feed), None).is_err());
    }

    #[test]
    fn test_bad_phone_fails_whole_call() {
        let mut bad = ad("2", "");
        bad.contact_phone = "звонить менеджеру".to_string();
        let feed = AvitoFeed {
            ads: vec![ad("1", ""), bad],
            ..AvitoFeed::default()
        };
        assert!(matches!(
            avito_lots(&feed, &DevelopmentIndex::default()),
            Err(AppError::PhoneConversion(_))
        ));
    }

    #[test]
    fn test_realty_lots() {
        let offer = |id: &str, building: &str, village: &str| Offer {
            internal_id: id.to_string(),
            building_name: building.to_string(),
            village_name: village.to_string(),
            sales_agent: SalesAgent {
                phone: vec![" ".to_string(), "8 800 555 35 35".to_string(), "+7 999 000-00-00".to_string()],
                ..SalesAgent::default()
            },
            ..Offer::default()
        };
        let feed = RealtyFeed {
            offers: vec![offer("r1", "ЖК \"Рассвет\"", ""), offer("r2", "", "Лесные дали")],
            ..RealtyFeed::default()
        };
        let lots = extract(&Feed::Realty(feed), None).unwrap();
        assert_eq!(lots[0].object, "рассвет");
        assert_eq!(lots[1].object, "лесные дали");
        assert_eq!(lots[1].phone, 88005553535);
    }

    #[test]
    fn test_cian_lots_take_first_filled_phone() {
        let schema = |code: &str, number: &str| PhoneSchema {
            country_code: code.to_string(),
            number: number.to_string(),
        };
        let object = Object {
            external_id: "c-1".to_string(),
            jk_schema: JkSchema {
                name: "ЖК Северный".to_string(),
                ..JkSchema::default()
            },
            phones: Phones {
                phone_schema: vec![
                    schema("+7", ""),
                    schema("+7", "9123456789"),
                    schema("+7", "4950000000"),
                ],
            },
            ..Object::default()
        };
        let feed = CianFeed {
            objects: vec![object],
            ..CianFeed::default()
        };
        let lots = cian_lots(&feed).unwrap();
        assert_eq!(lots[0].phone, 79123456789);
        assert_eq!(lots[0].object, "северный");

        let mut feed = feed;
        feed.objects[0].phones.phone_schema.clear();
        assert!(matches!(cian_lots(&feed), Err(AppError::PhoneConversion(_))));
    }

    #[test]
    fn test_domclick_lots_per_flat() {
        let flat = |id: &str| Flat {
            flat_id: id.to_string(),
            ..Flat::default()
        };
        let feed = DomclickFeed {
            complexes: vec![Complex {
                name: "Апарт-комплекс «Нева»".to_string(),
                sales_info: SalesInfo {
                    sales_phone: "+7 812 000-11-22".to_string(),
                    ..SalesInfo::default()
                },
                buildings: Buildings {
                    building: vec![Building {
                        flats: Flats {
                            flat: vec![flat("f1"), flat("f2")],
                        },
                        ..Building::default()
                    }],
                },
                ..Complex::default()
            }],
            ..DomclickFeed::default()
        };
        let lots = domclick_lots(&feed).unwrap();
        assert_eq!(lots.len(), 2);
        assert_eq!(lots[1].id, "f2");
        assert_eq!(lots[1].object, "нева");
        assert_eq!(lots[1].phone, 78120001122);
    }
}
