//! Generic record builder, covering product/article/content pages and the
//! rich sports-match variant (full fallback chains per sports field).
//!
//! The rich variant layers league/team/score extraction on top of the
//! generic field set inside the same pass, since a sports card usually still
//! has a link, an image, and a date worth keeping.

use scraper::{ElementRef, Html};

use super::containers::select_containers;
use super::fields::{extract_date, extract_field, extract_image, extract_link, select_first};
use super::profiles::SelectorProfile;
use super::text::{element_text, normalize, truncate_chars};
use super::{Record, SelectorHints};

/// Own-text title fallback cap.
const TITLE_FALLBACK_MAX: usize = 100;
/// Description cap.
const DESCRIPTION_MAX: usize = 200;
/// Generic inclusion predicate: titles this short are noise.
const MIN_TITLE_CHARS: usize = 3;

/// Build records for the generic and rich-sports modes.
///
/// Ids are positional (`item-<n>`, 1-based) and assigned before the
/// inclusion filter, so filtered-out candidates leave gaps rather than
/// renumbering the survivors.
pub fn build_records(
    doc: &Html,
    page_url: &str,
    hints: &SelectorHints,
    sports: bool,
    profile: &SelectorProfile,
) -> Vec<Record> {
    let elements = select_containers(doc, hints, sports, profile);
    // Resolved once per pass; only consulted when a league chain misses.
    let known_competition = if sports {
        detect_known_competition(doc)
    } else {
        None
    };

    let mut records = Vec::new();
    for (index, el) in elements.iter().enumerate() {
        let mut rec = Record::with_id(format!("item-{}", index + 1));

        if sports {
            extract_sports_fields(*el, hints, profile, known_competition.as_deref(), &mut rec);
        }

        if rec.title.is_empty() {
            rec.title = extract_field(*el, hints.title(), &profile.fields.title);
        }
        if rec.title.is_empty() {
            // No heading anywhere in the container: fall back to its own
            // text, capped.
            rec.title = truncate_chars(&normalize(&element_text(el)), TITLE_FALLBACK_MAX);
        }

        if rec.description.is_empty() {
            let desc = extract_field(*el, hints.description(), &profile.fields.description);
            rec.description = truncate_chars(&desc, DESCRIPTION_MAX);
        }

        rec.url = extract_link(*el, hints.link(), page_url);
        rec.image = extract_image(*el, hints.image(), page_url);
        rec.price = extract_field(*el, hints.price(), &profile.fields.price);
        rec.category = extract_field(*el, hints.category(), &profile.fields.category);
        if rec.date.is_empty() {
            rec.date = extract_date(*el, &profile.fields.date);
        }
        rec.author = extract_field(*el, None, &profile.fields.author);

        if include_record(&rec, sports) {
            records.push(rec);
        }
    }
    records
}

/// Rich-variant sports fields. The league chain honors the `title` hint
/// and mirrors into `title`; the match-date chain honors the `date` hint
/// and mirrors into `date`.
fn extract_sports_fields(
    el: ElementRef<'_>,
    hints: &SelectorHints,
    profile: &SelectorProfile,
    known_competition: Option<&str>,
    rec: &mut Record,
) {
    rec.league = extract_field(el, hints.title(), &profile.fields.league);
    if !rec.league.is_empty() {
        rec.title = rec.league.clone();
    }

    rec.home_team = extract_field(el, hints.home_team(), &profile.fields.home_team);
    rec.away_team = extract_field(el, hints.away_team(), &profile.fields.away_team);
    rec.score = extract_field(el, hints.score(), &profile.fields.score);
    rec.halftime = extract_field(el, hints.halftime(), &profile.fields.halftime);

    let match_date = extract_field(el, hints.date(), &profile.fields.match_date);
    if !match_date.is_empty() {
        rec.match_date = match_date.clone();
        rec.date = match_date;
    }

    if !rec.home_team.is_empty() && !rec.away_team.is_empty() {
        rec.description = format!("{} vs {}", rec.home_team, rec.away_team);
    }

    if rec.league.is_empty() {
        if let Some(name) = known_competition {
            rec.league = name.to_string();
            rec.title = name.to_string();
        }
    }
}

/// Page-level competition name detector.
///
/// One-site workaround kept deliberately narrow: when no league selector
/// matched, a competition name appearing literally in the page `<title>`
/// or the first `h1` is used instead. The list currently holds exactly
/// one entry; extend it here, never in the generic logic.
pub fn detect_known_competition(doc: &Html) -> Option<String> {
    const KNOWN_COMPETITIONS: [&str; 1] = ["Bundesliga"];

    let root = doc.root_element();
    let page_title = select_first(root, "title")
        .map(|el| element_text(&el))
        .unwrap_or_default();
    let first_h1 = select_first(root, "h1")
        .map(|el| element_text(&el))
        .unwrap_or_default();

    KNOWN_COMPETITIONS
        .iter()
        .find(|name| page_title.contains(*name) || first_h1.contains(*name))
        .map(|name| name.to_string())
}

/// Keep a record iff it carries a usable title, or (sports) any of the
/// three match fields.
fn include_record(rec: &Record, sports: bool) -> bool {
    if rec.title.chars().count() > MIN_TITLE_CHARS {
        return true;
    }
    sports && !(rec.home_team.is_empty() && rec.away_team.is_empty() && rec.score.is_empty())
}
