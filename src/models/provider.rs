//! Listing aggregators whose feeds are supported.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// A feed publisher. Each one has its own XML schema and rule set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    /// Yandex Realty schema (`<realty-feed>`)
    Realty,
    Cian,
    Avito,
    Domclick,
}

impl Provider {
    pub const ALL: [Provider; 4] = [
        Provider::Realty,
        Provider::Cian,
        Provider::Avito,
        Provider::Domclick,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Provider::Realty => "realty",
            Provider::Cian => "cian",
            Provider::Avito => "avito",
            Provider::Domclick => "domclick",
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Provider {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "realty" | "yandex" => Ok(Provider::Realty),
            "cian" => Ok(Provider::Cian),
            "avito" => Ok(Provider::Avito),
            "domclick" => Ok(Provider::Domclick),
            other => Err(AppError::request(format!("unknown provider '{other}'"))),
        }
    }
}
