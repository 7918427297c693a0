// src/services/feed_service.rs

//! Feed service.
//!
//! Implements the `CheckPhones*` and `ValidateFeed*` operations on top of a
//! [`FeedFetcher`]. Every call fetches and parses its documents from scratch;
//! nothing is cached between calls.

use futures::future::{join_all, try_join_all};

use crate::adapters::{self, DevelopmentIndex};
use crate::error::{AppError, Result};
use crate::feeds::{self, Feed};
use crate::fetch::FeedFetcher;
use crate::models::{
    CheckRequest, CheckResponse, Config, FeedReport, Lot, Provider, ValidateFeedAllRequest,
    ValidateFeedAllResponse, ValidateFeedRequest, ValidateFeedResponse,
};
use crate::validators::Validator;

/// Service answering phone-check and validation requests.
pub struct FeedService<F> {
    fetcher: F,
    validator: Validator,
    developments_url: String,
}

impl<F: FeedFetcher> FeedService<F> {
    /// Create a service using the given fetcher and configuration.
    pub fn new(fetcher: F, config: &Config) -> Self {
        Self {
            fetcher,
            validator: Validator::new(config.rules.clone()),
            developments_url: config.fetch.developments_url.clone(),
        }
    }

    /// Replace the validator (e.g. to pin the current year).
    pub fn with_validator(mut self, validator: Validator) -> Self {
        self.validator = validator;
        self
    }

    /// Fetch and parse one feed.
    pub async fn load(&self, provider: Provider, url: &str) -> Result<Feed> {
        let document = self.fetcher.fetch(url).await?;
        Feed::parse(provider, &document.body)?.with_last_modified(document.last_modified)
    }

    /// Fetch the development catalog and index it.
    async fn developments(&self) -> Result<DevelopmentIndex> {
        let document = self.fetcher.fetch(&self.developments_url).await?;
        let catalog = feeds::parse_developments(&document.body)?;
        Ok(DevelopmentIndex::new(&catalog))
    }

    async fn lots(&self, provider: Provider, url: &str) -> Result<Vec<Lot>> {
        let feed = self.load(provider, url).await?;
        match provider {
            Provider::Avito => {
                let index = self.developments().await?;
                adapters::extract(&feed, Some(&index))
            }
            _ => adapters::extract(&feed, None),
        }
    }

    async fn check_phones(&self, provider: Provider, request: &CheckRequest) -> Result<CheckResponse> {
        let url = request.urls.require(provider)?;
        let lots = self.lots(provider, url).await?;
        Ok(CheckResponse { lots })
    }

    pub async fn check_phones_realty(&self, request: &CheckRequest) -> Result<CheckResponse> {
        self.check_phones(Provider::Realty, request).await
    }

    pub async fn check_phones_cian(&self, request: &CheckRequest) -> Result<CheckResponse> {
        self.check_phones(Provider::Cian, request).await
    }

    pub async fn check_phones_avito(&self, request: &CheckRequest) -> Result<CheckResponse> {
        self.check_phones(Provider::Avito, request).await
    }

    pub async fn check_phones_domclick(&self, request: &CheckRequest) -> Result<CheckResponse> {
        self.check_phones(Provider::Domclick, request).await
    }

    /// Extract lots from every given feed concurrently.
    ///
    /// Lots are returned in provider order. The first failure aborts the call.
    pub async fn check_phones_all(&self, request: &CheckRequest) -> Result<CheckResponse> {
        let sources = request.urls.present();
        if sources.is_empty() {
            return Err(AppError::request("no feed urls given"));
        }

        let results = try_join_all(
            sources
                .into_iter()
                .map(|(provider, url)| self.lots(provider, url)),
        )
        .await?;
        Ok(CheckResponse {
            lots: results.into_iter().flatten().collect(),
        })
    }

    /// Validate one feed.
    pub async fn validate_feed(&self, request: &ValidateFeedRequest) -> Result<ValidateFeedResponse> {
        if request.url.trim().is_empty() {
            return Err(AppError::request(format!("{} feed url is missing", request.provider)));
        }
        let feed = self.load(request.provider, &request.url).await?;
        Ok(ValidateFeedResponse {
            provider: request.provider,
            url: request.url.clone(),
            last_modified: feed.last_modified(),
            errors: self.validator.validate(&feed),
        })
    }

    /// Validate every given feed concurrently.
    ///
    /// A feed that cannot be fetched or parsed gets a report with `failure`
    /// set; the other feeds are still validated.
    pub async fn validate_feed_all(
        &self,
        request: &ValidateFeedAllRequest,
    ) -> Result<ValidateFeedAllResponse> {
        let sources = request.urls.present();
        if sources.is_empty() {
            return Err(AppError::request("no feed urls given"));
        }

        let reports = join_all(sources.into_iter().map(|(provider, url)| async move {
            let request = ValidateFeedRequest {
                provider,
                url: url.to_string(),
            };
            match self.validate_feed(&request).await {
                Ok(response) => FeedReport::from(response),
                Err(error) => {
                    log::warn!("Failed to validate {provider} feed {url}: {error}");
                    FeedReport {
                        provider,
                        url: request.url,
                        last_modified: None,
                        errors: Vec::new(),
                        failure: Some(error.to_string()),
                    }
                }
            }
        }))
        .await;

        Ok(ValidateFeedAllResponse { reports })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    use async_trait::async_trait;
    use chrono::{TimeZone, Utc};

    use crate::fetch::{FetchedDocument, LocalFetcher};
    use crate::models::FeedUrls;

    const DEVELOPMENTS_URL: &str = "https://catalog.test/developments.xml";

    /// Serves fixed documents by URL.
    struct FixtureFetcher {
        documents: HashMap<String, (String, Option<chrono::DateTime<Utc>>)>,
    }

    impl FixtureFetcher {
        fn new() -> Self {
            Self {
                documents: HashMap::new(),
            }
        }

        fn with(mut self, url: &str, body: impl Into<String>) -> Self {
            self.documents.insert(url.to_string(), (body.into(), None));
            self
        }

        fn with_modified(mut self, url: &str, body: impl Into<String>) -> Self {
            let time = Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap();
            self.documents.insert(url.to_string(), (body.into(), Some(time)));
            self
        }
    }

    #[async_trait]
    impl FeedFetcher for FixtureFetcher {
        async fn fetch(&self, url: &str) -> Result<FetchedDocument> {
            let (body, last_modified) = self.documents.get(url).ok_or(AppError::Status {
                url: url.to_string(),
                status: 404,
            })?;
            Ok(FetchedDocument {
                url: url.to_string(),
                body: body.clone().into_bytes(),
                last_modified: *last_modified,
            })
        }
    }

    fn config() -> Config {
        let mut config = Config::default();
        config.fetch.developments_url = DEVELOPMENTS_URL.to_string();
        config
    }

    fn service(fetcher: FixtureFetcher) -> FeedService<FixtureFetcher> {
        FeedService::new(fetcher, &config()).with_validator(
            Validator::new(config().rules).with_current_year(2024),
        )
    }

    fn avito_feed(ads: &[(&str, &str)]) -> String {
        let ads: String = ads
            .iter()
            .map(|(id, development)| {
                format!(
                    "<Ad><Id>{id}</Id><ContactPhone>+7 (912) 345-67-89</ContactPhone>\
                     <Description>Квартира</Description><NewDevelopmentId>{development}</NewDevelopmentId></Ad>"
                )
            })
            .collect();
        format!(r#"<Ads formatVersion="3" target="Avito.ru">{ads}</Ads>"#)
    }

    const DEVELOPMENTS: &str = r#"<Developments><Region name="Москва"><City name="Москва">
        <Object id="55" name="ЖК «Рассвет»" address="" developer="">
          <Housing id="5501" name="Корпус 1" address=""/>
        </Object></City></Region></Developments>"#;

    const CIAN: &str = r#"<feed><feed_version>2</feed_version>
        <object><ExternalId>c-1</ExternalId><JKSchema><Name>ЖК Северный</Name></JKSchema>
          <Phones><PhoneSchema><CountryCode>+7</CountryCode><Number>9001112233</Number></PhoneSchema></Phones>
        </object></feed>"#;

    const REALTY: &str = r#"<realty-feed xmlns="http://webmaster.yandex.ru/schemas/feed/realty/2010-06">
        <generation-date>2024-02-01T10:00:00+03:00</generation-date>
        <offer internal-id="r-1"><building-name>ЖК "Рассвет"</building-name>
          <sales-agent><phone>8 800 555 35 35</phone></sales-agent></offer>
        </realty-feed>"#;

    #[tokio::test]
    async fn test_check_phones_avito_uses_catalog() {
        let service = service(
            FixtureFetcher::new()
                .with("https://a/ads.xml", avito_feed(&[("1", "55"), ("2", "5501")]))
                .with(DEVELOPMENTS_URL, DEVELOPMENTS),
        );
        let request = CheckRequest {
            urls: FeedUrls {
                avito: Some("https://a/ads.xml".to_string()),
                ..FeedUrls::default()
            },
        };

        let response = service.check_phones_avito(&request).await.unwrap();
        assert_eq!(response.lots.len(), 2);
        assert!(response.lots.iter().all(|lot| lot.object == "рассвет"));
        assert_eq!(response.lots[0].phone, 79123456789);
    }

    #[tokio::test]
    async fn test_check_phones_avito_missing_mapping() {
        let service = service(
            FixtureFetcher::new()
                .with("https://a/ads.xml", avito_feed(&[("1", "55"), ("2", "999")]))
                .with(DEVELOPMENTS_URL, DEVELOPMENTS),
        );
        let request = CheckRequest {
            urls: FeedUrls {
                avito: Some("https://a/ads.xml".to_string()),
                ..FeedUrls::default()
            },
        };

        let result = service.check_phones_avito(&request).await;
        assert!(matches!(result, Err(AppError::MappingNotFound(id)) if id == "999"));
    }

    #[tokio::test]
    async fn test_check_phones_requires_url() {
        let service = service(FixtureFetcher::new());
        let result = service.check_phones_cian(&CheckRequest::default()).await;
        assert!(matches!(result, Err(AppError::Request(_))));
        assert!(service.check_phones_all(&CheckRequest::default()).await.is_err());
    }

    #[tokio::test]
    async fn test_check_phones_all_in_provider_order() {
        let service = service(
            FixtureFetcher::new()
                .with("https://a/cian.xml", CIAN)
                .with("https://a/realty.xml", REALTY),
        );
        let request = CheckRequest {
            urls: FeedUrls {
                cian: Some("https://a/cian.xml".to_string()),
                realty: Some("https://a/realty.xml".to_string()),
                ..FeedUrls::default()
            },
        };

        let lots = service.check_phones_all(&request).await.unwrap().lots;
        assert_eq!(
            lots,
            vec![
                Lot { id: "r-1".into(), object: "рассвет".into(), phone: 88005553535 },
                Lot { id: "c-1".into(), object: "северный".into(), phone: 79001112233 },
            ]
        );
    }

    #[tokio::test]
    async fn test_check_phones_all_aborts_on_failure() {
        let service = service(FixtureFetcher::new().with("https://a/cian.xml", CIAN));
        let request = CheckRequest {
            urls: FeedUrls {
                cian: Some("https://a/cian.xml".to_string()),
                domclick: Some("https://a/missing.xml".to_string()),
                ..FeedUrls::default()
            },
        };

        let result = service.check_phones_all(&request).await;
        assert!(matches!(result, Err(AppError::Status { status: 404, .. })));
    }

    #[tokio::test]
    async fn test_validate_feed_reports_findings_and_last_modified() {
        let service = service(FixtureFetcher::new().with_modified("https://a/cian.xml", CIAN));
        let response = service
            .validate_feed(&ValidateFeedRequest {
                provider: Provider::Cian,
                url: "https://a/cian.xml".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(response.errors, vec!["feed contains only 1 items".to_string()]);
        assert_eq!(
            response.last_modified,
            Some(Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap())
        );
    }

    #[tokio::test]
    async fn test_validate_feed_realty_generation_date_fallback() {
        let service = service(FixtureFetcher::new().with("https://a/realty.xml", REALTY));
        let response = service
            .validate_feed(&ValidateFeedRequest {
                provider: Provider::Realty,
                url: "https://a/realty.xml".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(
            response.last_modified,
            Some(Utc.with_ymd_and_hms(2024, 2, 1, 7, 0, 0).unwrap())
        );
    }

    #[tokio::test]
    async fn test_validate_feed_malformed_xml_is_hard_failure() {
        let service = service(FixtureFetcher::new().with("https://a/bad.xml", "<Ads><Ad>"));
        let result = service
            .validate_feed(&ValidateFeedRequest {
                provider: Provider::Avito,
                url: "https://a/bad.xml".to_string(),
            })
            .await;
        assert!(matches!(result, Err(AppError::Xml { .. })));
    }

    #[tokio::test]
    async fn test_validate_feed_all_isolates_failures() {
        let service = service(
            FixtureFetcher::new()
                .with("https://a/cian.xml", CIAN)
                .with("https://a/ads.xml", "<Ads></Ads>"),
        );
        let request = ValidateFeedAllRequest {
            urls: FeedUrls {
                cian: Some("https://a/cian.xml".to_string()),
                avito: Some("https://a/ads.xml".to_string()),
                domclick: Some("https://a/missing.xml".to_string()),
                ..FeedUrls::default()
            },
        };

        let reports = service.validate_feed_all(&request).await.unwrap().reports;
        assert_eq!(reports.len(), 3);

        assert_eq!(reports[0].provider, Provider::Cian);
        assert_eq!(reports[0].errors, vec!["feed contains only 1 items".to_string()]);
        assert_eq!(reports[1].provider, Provider::Avito);
        assert_eq!(reports[1].errors, vec!["feed is empty".to_string()]);
        assert_eq!(reports[2].provider, Provider::Domclick);
        assert!(reports[2].failure.as_deref().unwrap().contains("404"));
        assert!(reports[2].errors.is_empty());
    }

    #[tokio::test]
    async fn test_service_over_local_files() {
        let dir = tempfile::tempdir().unwrap();
        tokio::fs::write(dir.path().join("realty.xml"), REALTY).await.unwrap();

        let service = FeedService::new(LocalFetcher::with_root(dir.path()), &config());
        let response = service
            .check_phones_realty(&CheckRequest {
                urls: FeedUrls {
                    realty: Some("realty.xml".to_string()),
                    ..FeedUrls::default()
                },
            })
            .await
            .unwrap();
        assert_eq!(response.lots[0].id, "r-1");
    }
}
