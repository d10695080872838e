//! Heuristic record extraction from parsed HTML.
//!
//! The engine turns one already-fetched document into a flat list of
//! [`Record`]s using layered selector fallbacks: caller hints override
//! built-in chains, chains are tried first-match-wins, and per-field
//! misses degrade to empty strings rather than errors.
//!
//! All entry points are **synchronous** because the `scraper` crate's
//! types are `!Send`; async callers should wrap extraction in
//! `tokio::task::spawn_blocking`. A pass is pure and re-entrant: passes
//! over independent documents may run in parallel with no coordination.

pub mod containers;
pub mod fields;
pub mod generic;
pub mod profiles;
pub mod sports;
pub mod stats;
pub mod text;
pub mod urls;

use scraper::Html;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One extracted record. Every recognized field is always present on the
/// wire; empty string means "not found". Extra fields from external
/// sources round-trip through `extra` but are never populated here.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Record {
    pub id: String,
    pub title: String,
    pub description: String,
    pub url: String,
    pub image: String,
    pub price: String,
    pub category: String,
    pub date: String,
    pub author: String,
    pub league: String,
    pub home_team: String,
    pub away_team: String,
    pub score: String,
    pub halftime: String,
    pub match_date: String,
    pub statistic: String,
    pub home_value: String,
    pub away_value: String,
    #[serde(flatten)]
    pub extra: BTreeMap<String, String>,
}

impl Record {
    /// Create an empty record carrying only its positional id.
    pub fn with_id(id: String) -> Self {
        Self {
            id,
            ..Self::default()
        }
    }

    /// All recognized fields except `id`, in wire order. Used by the
    /// report exporter to print one line per non-empty field.
    pub fn fields(&self) -> [(&'static str, &str); 17] {
        [
            ("title", &self.title),
            ("description", &self.description),
            ("url", &self.url),
            ("image", &self.image),
            ("price", &self.price),
            ("category", &self.category),
            ("date", &self.date),
            ("author", &self.author),
            ("league", &self.league),
            ("homeTeam", &self.home_team),
            ("awayTeam", &self.away_team),
            ("score", &self.score),
            ("halftime", &self.halftime),
            ("matchDate", &self.match_date),
            ("statistic", &self.statistic),
            ("homeValue", &self.home_value),
            ("awayValue", &self.away_value),
        ]
    }
}

/// Caller-supplied selector overrides, one per logical field.
///
/// A present hint fully replaces the built-in fallback chain for that
/// field; blank or whitespace-only strings count as absent. Hint strings
/// are not validated; a malformed selector simply matches nothing.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SelectorHints {
    pub container: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub link: Option<String>,
    pub image: Option<String>,
    pub price: Option<String>,
    pub category: Option<String>,
    pub date: Option<String>,
    pub author: Option<String>,
    pub home_team: Option<String>,
    pub away_team: Option<String>,
    pub score: Option<String>,
    pub halftime: Option<String>,
}

/// Treat empty and whitespace-only hint strings as absent.
fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

impl SelectorHints {
    pub fn container(&self) -> Option<&str> {
        non_blank(&self.container)
    }
    pub fn title(&self) -> Option<&str> {
        non_blank(&self.title)
    }
    pub fn description(&self) -> Option<&str> {
        non_blank(&self.description)
    }
    pub fn link(&self) -> Option<&str> {
        non_blank(&self.link)
    }
    pub fn image(&self) -> Option<&str> {
        non_blank(&self.image)
    }
    pub fn price(&self) -> Option<&str> {
        non_blank(&self.price)
    }
    pub fn category(&self) -> Option<&str> {
        non_blank(&self.category)
    }
    pub fn date(&self) -> Option<&str> {
        non_blank(&self.date)
    }
    pub fn author(&self) -> Option<&str> {
        non_blank(&self.author)
    }
    pub fn home_team(&self) -> Option<&str> {
        non_blank(&self.home_team)
    }
    pub fn away_team(&self) -> Option<&str> {
        non_blank(&self.away_team)
    }
    pub fn score(&self) -> Option<&str> {
        non_blank(&self.score)
    }
    pub fn halftime(&self) -> Option<&str> {
        non_blank(&self.halftime)
    }

    /// Any sports-specific hint present?
    pub fn has_sports_hints(&self) -> bool {
        self.home_team().is_some() || self.away_team().is_some() || self.score().is_some()
    }

    /// Set a hint by its wire-level field name. Used by the CLI's
    /// `--selector field=css` flags.
    pub fn set(&mut self, field: &str, selector: &str) -> Result<(), String> {
        let slot = match field {
            "container" => &mut self.container,
            "title" => &mut self.title,
            "description" => &mut self.description,
            "link" => &mut self.link,
            "image" => &mut self.image,
            "price" => &mut self.price,
            "category" => &mut self.category,
            "date" => &mut self.date,
            "author" => &mut self.author,
            "homeTeam" => &mut self.home_team,
            "awayTeam" => &mut self.away_team,
            "score" => &mut self.score,
            "halftime" => &mut self.halftime,
            other => {
                return Err(format!(
                    "unknown selector field '{other}' (expected one of: container, title, \
                     description, link, image, price, category, date, author, homeTeam, \
                     awayTeam, score, halftime)"
                ))
            }
        };
        *slot = Some(selector.to_string());
        Ok(())
    }
}

/// Which sports record builder is in effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SportsVariant {
    /// Full fallback chains per field; triggered by sports hints on the
    /// generic surface.
    Rich,
    /// Known stable class names for one site, three fields only, with a
    /// positional-zipping container fallback. Triggered by
    /// `dataType: "match"`.
    Fixed,
}

/// The record-shape strategy for one extraction pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrapeMode {
    Generic,
    Sports(SportsVariant),
    Statistics,
}

impl ScrapeMode {
    /// Derive the mode from the explicit `dataType` discriminator and the
    /// supplied hints. Unknown discriminator values fall through to hint
    /// detection, consistent with the fails-soft selector policy.
    pub fn detect(data_type: Option<&str>, hints: &SelectorHints) -> Self {
        match data_type {
            Some("match") => ScrapeMode::Sports(SportsVariant::Fixed),
            Some("statistics") => ScrapeMode::Statistics,
            _ if hints.has_sports_hints() => ScrapeMode::Sports(SportsVariant::Rich),
            _ => ScrapeMode::Generic,
        }
    }
}

/// Run one extraction pass over raw HTML.
///
/// Parses the document once and dispatches to the mode's record builder.
/// The result is a flat list in document order; every record satisfies
/// its mode's inclusion predicate, so an all-empty record is never
/// emitted. Never panics on malformed HTML or selectors.
pub fn scrape_html(html: &str, page_url: &str, hints: &SelectorHints, mode: ScrapeMode) -> Vec<Record> {
    let doc = Html::parse_document(html);
    let profile = profiles::default_profile();

    let records = match mode {
        ScrapeMode::Generic => generic::build_records(&doc, page_url, hints, false, profile),
        ScrapeMode::Sports(SportsVariant::Rich) => {
            generic::build_records(&doc, page_url, hints, true, profile)
        }
        ScrapeMode::Sports(SportsVariant::Fixed) => sports::build_records(&doc, hints, profile),
        ScrapeMode::Statistics => stats::build_records(&doc, profile),
    };

    tracing::debug!(mode = ?mode, count = records.len(), "extraction pass complete");
    records
}
