use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// The two Indian exchanges served by this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Exchange {
    /// National Stock Exchange of India (the default first source)
    #[serde(rename = "NSE")]
    Nse,
    /// BSE (formerly Bombay Stock Exchange)
    #[serde(rename = "BSE")]
    Bse,
}

impl Exchange {
    pub fn as_str(&self) -> &'static str {
        match self {
            Exchange::Nse => "NSE",
            Exchange::Bse => "BSE",
        }
    }

    /// The exchange to try when this one is unavailable.
    pub fn other(&self) -> Exchange {
        match self {
            Exchange::Nse => Exchange::Bse,
            Exchange::Bse => Exchange::Nse,
        }
    }
}

impl FromStr for Exchange {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "NSE" => Ok(Exchange::Nse),
            "BSE" => Ok(Exchange::Bse),
            _ => Err(format!("Unknown exchange: {}", s)),
        }
    }
}

impl std::fmt::Display for Exchange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
