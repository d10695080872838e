//! Selector fallback chains, loaded as data.
//!
//! Every fallback chain the engine uses (container families, per-field
//! selector lists, table discovery, the fixed-selector match defaults)
//! lives in `selector_profiles.json`, embedded at compile time via
//! `include_str!` so there is no runtime file I/O. New site profiles are
//! added by extending the table, not by adding code paths.

use serde::Deserialize;
use std::sync::OnceLock;

const PROFILES_JSON: &str = include_str!("selector_profiles.json");

static PROFILE: OnceLock<SelectorProfile> = OnceLock::new();

/// The complete set of built-in selector chains.
#[derive(Debug, Deserialize)]
pub struct SelectorProfile {
    pub containers: ContainerFamilies,
    pub fields: FieldChains,
    pub statistics: StatisticsSelectors,
    #[serde(rename = "fixedMatch")]
    pub fixed_match: FixedMatchSelectors,
}

/// Container selector families, tried in a fixed priority order.
#[derive(Debug, Deserialize)]
pub struct ContainerFamilies {
    pub sports: Vec<String>,
    pub products: Vec<String>,
    pub articles: Vec<String>,
    pub generic: Vec<String>,
}

/// Per-field fallback chains for the generic and rich-sports builders.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldChains {
    pub title: Vec<String>,
    pub description: Vec<String>,
    pub price: Vec<String>,
    pub category: Vec<String>,
    pub date: Vec<String>,
    pub author: Vec<String>,
    pub league: Vec<String>,
    pub home_team: Vec<String>,
    pub away_team: Vec<String>,
    pub score: Vec<String>,
    pub halftime: Vec<String>,
    pub match_date: Vec<String>,
}

/// Table discovery and fallback scan selectors for statistics mode.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatisticsSelectors {
    /// Tried in order; the first selector yielding a table with more than
    /// one row wins.
    pub tables: Vec<String>,
    /// Stat-fragment class selectors for the no-table fallback scan.
    pub fallback: Vec<String>,
    /// Element scope for the percent-sign text scan.
    pub percent_scan: String,
}

/// Default selectors for the fixed-selector match variant.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FixedMatchSelectors {
    pub home_team: String,
    pub away_team: String,
    pub score: String,
    /// Structural container candidates, tried in order.
    pub containers: Vec<String>,
}

/// The built-in profile, parsed once on first use.
pub fn default_profile() -> &'static SelectorProfile {
    PROFILE.get_or_init(|| {
        serde_json::from_str(PROFILES_JSON).expect("embedded selector profile is valid JSON")
    })
}
