//! Static reference data for well-known Indian large caps.
//!
//! Used to give synthesized records believable names and prices, and as the
//! offline search index when the search endpoint is unavailable.

use crate::models::{Exchange, SearchResult};

#[derive(Debug, Clone, Copy)]
pub struct CatalogEntry {
    pub symbol: &'static str,
    pub name: &'static str,
    pub sector: &'static str,
    pub industry: &'static str,
    /// BSE scrip code
    pub bse_code: &'static str,
    /// Rough price level in INR used to anchor synthesized quotes
    pub reference_price: f64,
}

impl CatalogEntry {
    pub fn search_result(&self, exchange: Exchange) -> SearchResult {
        SearchResult::new(self.symbol, self.name, exchange, "EQUITY").with_industry(self.industry)
    }
}

pub const CATALOG: &[CatalogEntry] = &[
    CatalogEntry {
        symbol: "RELIANCE",
        name: "Reliance Industries Limited",
        sector: "Energy",
        industry: "Refineries & Marketing",
        bse_code: "500325",
        reference_price: 2850.0,
    },
    CatalogEntry {
        symbol: "TCS",
        name: "Tata Consultancy Services Limited",
        sector: "Information Technology",
        industry: "IT Services & Consulting",
        bse_code: "532540",
        reference_price: 3900.0,
    },
    CatalogEntry {
        symbol: "HDFCBANK",
        name: "HDFC Bank Limited",
        sector: "Financial Services",
        industry: "Private Sector Bank",
        bse_code: "500180",
        reference_price: 1550.0,
    },
    CatalogEntry {
        symbol: "INFY",
        name: "Infosys Limited",
        sector: "Information Technology",
        industry: "IT Services & Consulting",
        bse_code: "500209",
        reference_price: 1500.0,
    },
    CatalogEntry {
        symbol: "ICICIBANK",
        name: "ICICI Bank Limited",
        sector: "Financial Services",
        industry: "Private Sector Bank",
        bse_code: "532174",
        reference_price: 1100.0,
    },
    CatalogEntry {
        symbol: "HINDUNILVR",
        name: "Hindustan Unilever Limited",
        sector: "Fast Moving Consumer Goods",
        industry: "Personal Care",
        bse_code: "500696",
        reference_price: 2400.0,
    },
    CatalogEntry {
        symbol: "ITC",
        name: "ITC Limited",
        sector: "Fast Moving Consumer Goods",
        industry: "Diversified FMCG",
        bse_code: "500875",
        reference_price: 430.0,
    },
    CatalogEntry {
        symbol: "SBIN",
        name: "State Bank of India",
        sector: "Financial Services",
        industry: "Public Sector Bank",
        bse_code: "500112",
        reference_price: 780.0,
    },
    CatalogEntry {
        symbol: "BHARTIARTL",
        name: "Bharti Airtel Limited",
        sector: "Telecommunication",
        industry: "Telecom - Cellular & Fixed Line Services",
        bse_code: "532454",
        reference_price: 1350.0,
    },
    CatalogEntry {
        symbol: "KOTAKBANK",
        name: "Kotak Mahindra Bank Limited",
        sector: "Financial Services",
        industry: "Private Sector Bank",
        bse_code: "500247",
        reference_price: 1750.0,
    },
    CatalogEntry {
        symbol: "LT",
        name: "Larsen & Toubro Limited",
        sector: "Construction",
        industry: "Civil Construction",
        bse_code: "500510",
        reference_price: 3500.0,
    },
    CatalogEntry {
        symbol: "AXISBANK",
        name: "Axis Bank Limited",
        sector: "Financial Services",
        industry: "Private Sector Bank",
        bse_code: "532215",
        reference_price: 1150.0,
    },
    CatalogEntry {
        symbol: "ASIANPAINT",
        name: "Asian Paints Limited",
        sector: "Consumer Durables",
        industry: "Paints",
        bse_code: "500820",
        reference_price: 2900.0,
    },
    CatalogEntry {
        symbol: "MARUTI",
        name: "Maruti Suzuki India Limited",
        sector: "Automobile and Auto Components",
        industry: "Passenger Cars & Utility Vehicles",
        bse_code: "532500",
        reference_price: 12000.0,
    },
    CatalogEntry {
        symbol: "WIPRO",
        name: "Wipro Limited",
        sector: "Information Technology",
        industry: "IT Services & Consulting",
        bse_code: "507685",
        reference_price: 480.0,
    },
    CatalogEntry {
        symbol: "TATAMOTORS",
        name: "Tata Motors Limited",
        sector: "Automobile and Auto Components",
        industry: "Passenger Cars & Utility Vehicles",
        bse_code: "500570",
        reference_price: 950.0,
    },
    CatalogEntry {
        symbol: "SUNPHARMA",
        name: "Sun Pharmaceutical Industries Limited",
        sector: "Healthcare",
        industry: "Pharmaceuticals",
        bse_code: "524715",
        reference_price: 1500.0,
    },
];

/// Illustrative movers shown when no live data is cached.
const STATIC_GAINERS: &[&str] = &["TATAMOTORS", "SBIN", "BHARTIARTL", "LT", "SUNPHARMA"];
const STATIC_LOSERS: &[&str] = &["ASIANPAINT", "WIPRO", "HINDUNILVR", "KOTAKBANK", "ITC"];
const STATIC_MOST_ACTIVE: &[&str] = &["RELIANCE", "HDFCBANK", "SBIN", "TATAMOTORS", "ICICIBANK"];

/// Find an entry by trading symbol or BSE scrip code.
pub fn lookup(symbol_or_code: &str) -> Option<&'static CatalogEntry> {
    let needle = symbol_or_code.trim().to_uppercase();
    CATALOG
        .iter()
        .find(|e| e.symbol == needle || e.bse_code == needle)
}

/// Case-insensitive substring match on symbol or name, exact match on BSE code.
pub fn search(query: &str) -> Vec<SearchResult> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return Vec::new();
    }

    CATALOG
        .iter()
        .filter(|e| {
            e.symbol.to_lowercase().contains(&needle)
                || e.name.to_lowercase().contains(&needle)
                || e.bse_code == needle
        })
        .map(|e| e.search_result(Exchange::Nse))
        .collect()
}

fn static_list(symbols: &[&str]) -> Vec<SearchResult> {
    symbols
        .iter()
        .filter_map(|s| lookup(s))
        .map(|e| e.search_result(Exchange::Nse))
        .collect()
}

pub fn static_gainers() -> Vec<SearchResult> {
    static_list(STATIC_GAINERS)
}

pub fn static_losers() -> Vec<SearchResult> {
    static_list(STATIC_LOSERS)
}

pub fn static_most_active() -> Vec<SearchResult> {
    static_list(STATIC_MOST_ACTIVE)
}
