//! Fixed-selector sports-match variant.
//!
//! Used when a site's stable class names are known (`dataType: "match"`):
//! only the three match fields are extracted, through fixed but
//! overridable selectors. Container discovery is structural first; when
//! no structural container holds any of the three fields, the variant
//! degrades to positional zipping over independently-queried lists.

use scraper::{ElementRef, Html};

use super::fields::{first_non_empty, select_all};
use super::profiles::SelectorProfile;
use super::text::{element_text, normalize};
use super::{Record, SelectorHints};

/// Build records for the fixed-selector variant. Ids are `match-<n>`,
/// 1-based, assigned before the inclusion filter.
pub fn build_records(doc: &Html, hints: &SelectorHints, profile: &SelectorProfile) -> Vec<Record> {
    let fixed = &profile.fixed_match;
    let home_sel = hints.home_team().unwrap_or(&fixed.home_team);
    let away_sel = hints.away_team().unwrap_or(&fixed.away_team);
    let score_sel = hints.score().unwrap_or(&fixed.score);

    let containers = select_match_containers(doc, home_sel, away_sel, score_sel, profile);
    if !containers.is_empty() {
        let mut records = Vec::new();
        for (index, el) in containers.iter().enumerate() {
            let rec = build_one(
                format!("match-{}", index + 1),
                first_non_empty(*el, [home_sel]).unwrap_or_default(),
                first_non_empty(*el, [away_sel]).unwrap_or_default(),
                first_non_empty(*el, [score_sel]).unwrap_or_default(),
            );
            if include_record(&rec) {
                records.push(rec);
            }
        }
        return records;
    }

    zip_records(doc, home_sel, away_sel, score_sel)
}

/// First structural selector yielding at least one element that has a
/// descendant matching any of the three field selectors.
fn select_match_containers<'a>(
    doc: &'a Html,
    home_sel: &str,
    away_sel: &str,
    score_sel: &str,
    profile: &SelectorProfile,
) -> Vec<ElementRef<'a>> {
    let root = doc.root_element();
    for selector in &profile.fixed_match.containers {
        let qualifying: Vec<ElementRef<'a>> = select_all(root, selector)
            .into_iter()
            .filter(|el| {
                !select_all(*el, home_sel).is_empty()
                    || !select_all(*el, away_sel).is_empty()
                    || !select_all(*el, score_sel).is_empty()
            })
            .collect();
        if !qualifying.is_empty() {
            tracing::debug!(
                selector = selector.as_str(),
                count = qualifying.len(),
                "structural match containers"
            );
            return qualifying;
        }
    }
    Vec::new()
}

/// Positional zipping fallback: query the three field selectors over the
/// whole page independently and pair elements by index.
///
/// Known accuracy risk, preserved deliberately: nothing guarantees the
/// lists are structurally aligned, so index `i` of one list may belong to
/// a different fixture than index `i` of another.
fn zip_records(doc: &Html, home_sel: &str, away_sel: &str, score_sel: &str) -> Vec<Record> {
    let root = doc.root_element();
    let texts = |selector: &str| -> Vec<String> {
        select_all(root, selector)
            .iter()
            .map(|el| normalize(&element_text(el)))
            .collect()
    };
    let homes = texts(home_sel);
    let aways = texts(away_sel);
    let scores = texts(score_sel);

    let count = homes.len().max(aways.len()).max(scores.len());
    tracing::debug!(
        homes = homes.len(),
        aways = aways.len(),
        scores = scores.len(),
        "positional zip fallback"
    );

    let mut records = Vec::new();
    for i in 0..count {
        let rec = build_one(
            format!("match-{}", i + 1),
            homes.get(i).cloned().unwrap_or_default(),
            aways.get(i).cloned().unwrap_or_default(),
            scores.get(i).cloned().unwrap_or_default(),
        );
        if include_record(&rec) {
            records.push(rec);
        }
    }
    records
}

/// Assemble one match record, synthesizing title and description from the
/// team names. A single present team becomes the title alone.
fn build_one(id: String, home: String, away: String, score: String) -> Record {
    let mut rec = Record::with_id(id);
    rec.title = match (home.is_empty(), away.is_empty()) {
        (false, false) => format!("{home} - {away}"),
        (false, true) => home.clone(),
        (true, false) => away.clone(),
        (true, true) => String::new(),
    };
    if !home.is_empty() && !away.is_empty() {
        rec.description = format!("{home} vs {away}");
    }
    rec.home_team = home;
    rec.away_team = away;
    rec.score = score;
    rec
}

/// Keep the record iff any of the three match fields is non-empty.
fn include_record(rec: &Record) -> bool {
    !(rec.home_team.is_empty() && rec.away_team.is_empty() && rec.score.is_empty())
}

#[cfg(test)]
mod tests {
    use super::super::profiles::default_profile;
    use super::*;

    fn run(html: &str, hints: &SelectorHints) -> Vec<Record> {
        let doc = Html::parse_document(html);
        build_records(&doc, hints, default_profile())
    }

    #[test]
    fn test_structural_containers() {
        let html = r#"
        <html><body>
          <article>
            <span class="home-team">Bayern</span>
            <span class="away-team">Dortmund</span>
            <span class="score">1:1</span>
          </article>
          <article>
            <span class="home-team">Leipzig</span>
            <span class="away-team">Mainz</span>
            <span class="score">4:0</span>
          </article>
        </body></html>
        "#;
        let recs = run(html, &SelectorHints::default());
        assert_eq!(recs.len(), 2);
        assert_eq!(recs[0].id, "match-1");
        assert_eq!(recs[0].title, "Bayern - Dortmund");
        assert_eq!(recs[0].description, "Bayern vs Dortmund");
        assert_eq!(recs[0].score, "1:1");
        assert_eq!(recs[1].home_team, "Leipzig");
    }

    #[test]
    fn test_positional_zip_pads_shorter_lists() {
        // No structural container wraps the spans, so the fallback pairs
        // the lists by index: 2 homes, 3 aways, 0 scores -> 3 records.
        let html = r#"
        <html><body>
          <span class="home-team">A</span>
          <span class="home-team">B</span>
          <span class="away-team">X</span>
          <span class="away-team">Y</span>
          <span class="away-team">Z</span>
        </body></html>
        "#;
        let recs = run(html, &SelectorHints::default());
        assert_eq!(recs.len(), 3);
        assert_eq!(recs[0].home_team, "A");
        assert_eq!(recs[0].away_team, "X");
        assert_eq!(recs[2].home_team, "");
        assert_eq!(recs[2].away_team, "Z");
        assert_eq!(recs[2].title, "Z");
        assert_eq!(recs[2].id, "match-3");
        assert!(recs.iter().all(|r| r.score.is_empty()));
    }

    #[test]
    fn test_hints_override_fixed_selectors() {
        let html = r#"
        <html><body>
          <div class="row">
            <b class="h">Union</b><b class="a">Freiburg</b><b class="s">2:2</b>
          </div>
        </body></html>
        "#;
        let mut hints = SelectorHints::default();
        hints.set("homeTeam", ".h").unwrap();
        hints.set("awayTeam", ".a").unwrap();
        hints.set("score", ".s").unwrap();
        let recs = run(html, &hints);
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].title, "Union - Freiburg");
        assert_eq!(recs[0].score, "2:2");
    }

    #[test]
    fn test_no_match_data_yields_empty_list() {
        let html = "<html><body><p>Nothing sporty here.</p></body></html>";
        assert!(run(html, &SelectorHints::default()).is_empty());
    }

    #[test]
    fn test_empty_text_containers_filtered_out() {
        // Qualifying container (descendant matches .score) but all three
        // fields are empty text: the inclusion predicate drops it.
        let html = r#"
        <html><body>
          <div><span class="score"></span></div>
        </body></html>
        "#;
        assert!(run(html, &SelectorHints::default()).is_empty());
    }
}
