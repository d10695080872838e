//! Export formatting for extracted records.
//!
//! Two collaborator-facing formats: a JSON envelope with source metadata,
//! and a plain-text report with one titled block per record and one line
//! per non-empty field.

use chrono::{SecondsFormat, Utc};
use serde_json::{json, Value};

use crate::extract::Record;

/// Field values longer than this are elided in the report.
const REPORT_VALUE_MAX: usize = 100;

/// Wrap records in the JSON export envelope.
pub fn json_report(records: &[Record], source_url: &str) -> Value {
    json!({
        "metadata": {
            "sourceUrl": source_url,
            "exportDate": Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            "totalItems": records.len(),
            "exportedBy": "pagesift",
        },
        "data": records,
    })
}

/// Render records as a printable plain-text report.
pub fn text_report(records: &[Record], source_url: &str) -> String {
    let mut out = String::new();
    out.push_str("Scrape report\n");
    out.push_str(&format!("Source: {source_url}\n"));
    out.push_str(&format!(
        "Exported: {}\n",
        Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)
    ));
    out.push_str(&format!("Total items: {}\n\n", records.len()));

    for (index, rec) in records.iter().enumerate() {
        let title = if rec.title.is_empty() {
            "(untitled)"
        } else {
            rec.title.as_str()
        };
        out.push_str(&format!("{}. {}\n", index + 1, title));
        for (name, value) in rec.fields() {
            if name == "title" || value.is_empty() {
                continue;
            }
            out.push_str(&format!("  {name}: {}\n", elide(value)));
        }
        out.push('\n');
    }
    out
}

fn elide(value: &str) -> String {
    if value.chars().count() > REPORT_VALUE_MAX {
        let cut: String = value.chars().take(REPORT_VALUE_MAX).collect();
        format!("{cut}...")
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Record {
        let mut rec = Record::with_id("item-1".to_string());
        rec.title = "Widget".to_string();
        rec.price = "$9.99".to_string();
        rec
    }

    #[test]
    fn test_json_report_envelope() {
        let report = json_report(&[sample()], "https://a.com");
        assert_eq!(report["metadata"]["sourceUrl"], "https://a.com");
        assert_eq!(report["metadata"]["totalItems"], 1);
        assert_eq!(report["data"][0]["title"], "Widget");
        assert!(report["metadata"]["exportDate"].as_str().unwrap().contains('T'));
    }

    #[test]
    fn test_text_report_skips_empty_fields() {
        let report = text_report(&[sample()], "https://a.com");
        assert!(report.contains("1. Widget"));
        assert!(report.contains("price: $9.99"));
        assert!(!report.contains("author:"));
        assert!(!report.contains("homeTeam:"));
    }

    #[test]
    fn test_text_report_elides_long_values() {
        let mut rec = sample();
        rec.description = "d".repeat(150);
        let report = text_report(&[rec], "https://a.com");
        let line = report
            .lines()
            .find(|l| l.trim_start().starts_with("description:"))
            .unwrap();
        assert!(line.ends_with("..."));
        assert!(line.len() < 150);
    }

    #[test]
    fn test_text_report_untitled_placeholder() {
        let rec = Record::with_id("item-1".to_string());
        let report = text_report(&[rec], "https://a.com");
        assert!(report.contains("1. (untitled)"));
    }
}
