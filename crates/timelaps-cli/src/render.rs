//! Journal and preset rendering for the terminal.

use chrono::Local;
use serde_json::json;
use timelaps_core::{Journal, SessionRecord};

const EMPTY_JOURNAL: &str = "No timer sessions recorded yet.\nYour sessions will appear here once a countdown completes.";

/// Journal views as JSON: `{ "pinned": [...], "unpinned": [...] }`.
pub fn journal_json(journal: &Journal) -> serde_json::Value {
    json!({
        "pinned": journal.pinned_view(),
        "unpinned": journal.unpinned_view(),
    })
}

/// Journal views as grouped text rows.
pub fn journal_text(journal: &Journal) -> String {
    if journal.is_empty() {
        return EMPTY_JOURNAL.to_string();
    }

    let mut out = String::from("Session history\n");
    for (title, view) in [
        ("Pinned", journal.pinned_view()),
        ("Unpinned", journal.unpinned_view()),
    ] {
        if view.is_empty() {
            continue;
        }
        out.push_str(&format!("\n{title}\n"));
        for record in view {
            out.push_str(&row(record));
            out.push('\n');
        }
    }
    out
}

fn row(record: &SessionRecord) -> String {
    let recorded = record.recorded_at.with_timezone(&Local);
    let started = record.started_at.with_timezone(&Local);
    format!(
        "  #{:<4} {:<24} {}  started {}  {}",
        record.id,
        record.display_name(),
        recorded.format("%b %e, %Y"),
        started.format("%H:%M:%S"),
        record.display_duration(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn empty_journal_has_hint() {
        assert_eq!(journal_text(&Journal::new()), EMPTY_JOURNAL);
    }

    #[test]
    fn groups_pinned_before_unpinned() {
        let mut journal = Journal::new();
        let at = Utc.timestamp_opt(1_700_000_000, 0).unwrap();
        let first = journal.record("Reading", 600, at, at);
        journal.record("", 300, at, at);
        journal.toggle_pin(first);

        let text = journal_text(&journal);
        let pinned = text.find("Pinned").unwrap();
        let unpinned = text.find("Unpinned").unwrap();
        let reading = text.find("Reading").unwrap();
        let unnamed = text.find("Unnamed session").unwrap();
        assert!(pinned < reading && reading < unpinned && unpinned < unnamed);
        assert!(text.contains("00:10:00"));
    }

    #[test]
    fn json_lists_both_groups() {
        let mut journal = Journal::new();
        let at = Utc.timestamp_opt(1_700_000_000, 0).unwrap();
        journal.record("Focus", 600, at, at);
        let value = journal_json(&journal);
        assert_eq!(value["pinned"].as_array().unwrap().len(), 0);
        assert_eq!(value["unpinned"][0]["name"], "Focus");
        assert_eq!(value["unpinned"][0]["duration_secs"], 600);
    }
}
