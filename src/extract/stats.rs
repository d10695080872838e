//! Statistics-table extraction.
//!
//! Match-statistics pages usually render a home/label/away table; the
//! builder commits to the first table selector that finds a real table
//! (more than one row) and maps cells by index. Pages without any such
//! table fall back to a scan for stat-fragment class names and
//! percent-sign text.

use scraper::{ElementRef, Html, Selector};

use super::fields::select_all;
use super::profiles::SelectorProfile;
use super::text::{element_text, normalize};
use super::Record;

/// Build records for statistics mode.
///
/// Table rows get `stat-<tableIndex>-<rowIndex>` ids (both 0-based, row
/// index counted before filtering); fallback records get `stat-<n>`,
/// 1-based.
pub fn build_records(doc: &Html, profile: &SelectorProfile) -> Vec<Record> {
    let row_sel = Selector::parse("tr").expect("tr selector is valid");
    let cell_sel = Selector::parse("td, th").expect("cell selector is valid");
    let root = doc.root_element();

    for selector in &profile.statistics.tables {
        let tables: Vec<ElementRef<'_>> = select_all(root, selector)
            .into_iter()
            .filter(|t| t.select(&row_sel).count() > 1)
            .collect();
        if tables.is_empty() {
            continue;
        }
        tracing::debug!(selector = selector.as_str(), count = tables.len(), "statistics tables");

        let mut records = Vec::new();
        for (t_idx, table) in tables.iter().enumerate() {
            for (r_idx, row) in table.select(&row_sel).enumerate() {
                let cells: Vec<String> = row
                    .select(&cell_sel)
                    .map(|c| normalize(&element_text(&c)))
                    .collect();
                if cells.len() < 2 {
                    continue;
                }
                let rec = row_record(t_idx, r_idx, &cells);
                if include_row(&rec) {
                    records.push(rec);
                }
            }
        }
        // A qualifying table existed; its (possibly empty) row set is the
        // answer. The fallback scan only runs when no table qualifies.
        return records;
    }

    fallback_scan(doc, profile)
}

/// Map a cell row by index: 0 -> homeValue, 1 -> statistic, 2 ->
/// awayValue; anything past index 2 is ignored.
fn row_record(t_idx: usize, r_idx: usize, cells: &[String]) -> Record {
    let mut rec = Record::with_id(format!("stat-{t_idx}-{r_idx}"));
    rec.home_value = cells[0].clone();
    rec.statistic = cells[1].clone();
    rec.away_value = cells.get(2).cloned().unwrap_or_default();
    rec.title = rec.statistic.clone();
    rec.description = format!("{} - {} - {}", rec.home_value, rec.statistic, rec.away_value);
    rec
}

fn include_row(rec: &Record) -> bool {
    !rec.statistic.is_empty() && !(rec.home_value.is_empty() && rec.away_value.is_empty())
}

/// Tableless pages: emit one record per stat-fragment element, then per
/// percent-sign element; stop at the first family that produced anything.
fn fallback_scan(doc: &Html, profile: &SelectorProfile) -> Vec<Record> {
    let root = doc.root_element();

    for selector in &profile.statistics.fallback {
        let records = scan_elements(select_all(root, selector));
        if !records.is_empty() {
            return records;
        }
    }

    let percent_candidates: Vec<ElementRef<'_>> =
        select_all(root, &profile.statistics.percent_scan)
            .into_iter()
            .filter(|el| element_text(el).contains('%'))
            .collect();
    scan_elements(percent_candidates)
}

fn scan_elements(elements: Vec<ElementRef<'_>>) -> Vec<Record> {
    let mut records = Vec::new();
    for (index, el) in elements.iter().enumerate() {
        let text = normalize(&element_text(el));
        if text.is_empty() {
            continue;
        }
        let mut rec = Record::with_id(format!("stat-{}", index + 1));
        rec.statistic = text.clone();
        rec.title = text.clone();
        rec.description = text;
        rec.category = "general".to_string();
        records.push(rec);
    }
    records
}
