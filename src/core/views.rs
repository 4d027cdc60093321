//! Text renderings of the history: recent rows, mood overview, pending goals.

use crate::models::CheckinRecord;
use crate::store;
use crate::utils::colors::{colour_for_emotion, completed_mark, paint_emotion};
use crate::utils::formatting::{pad_right, single_line};
use crate::utils::table::{Column, Table};
use chrono::NaiveDateTime;

const BAR_WIDTH: usize = 30;

/// Last `limit` rows as a table, or an empty-state line.
pub fn render_recent(records: &[CheckinRecord], limit: usize) -> String {
    if records.is_empty() {
        return "No history yet. Your check-ins will appear here.\n".to_string();
    }

    let mut table = Table::new(vec![
        Column::new("id", 8),
        Column::new("when", 16),
        Column::new("emotion", 10),
        Column::new("done", 4),
        Column::new("goal", 48),
        Column::new("text", 40),
    ]);

    for rec in store::recent(records, limit) {
        table.add_row(vec![
            rec.short_id(),
            short_when(&rec.timestamp),
            paint_emotion(&rec.emotion),
            completed_mark(rec.completed),
            rec.goal.clone(),
            single_line(&rec.text),
        ]);
    }

    table.render()
}

/// Horizontal bar chart of emotions over the last `days` days.
pub fn render_mood(records: &[CheckinRecord], days: i64, now: NaiveDateTime) -> String {
    if records.is_empty() {
        return "No mood data yet.\n".to_string();
    }

    let counts = store::mood_counts(records, days, now);
    if counts.is_empty() {
        return format!("No data for the last {days} days yet.\n");
    }

    let max = counts.iter().map(|c| c.count).max().unwrap_or(1).max(1);
    let label_w = counts.iter().map(|c| c.emotion.len()).max().unwrap_or(0);

    let mut out = String::new();
    for c in &counts {
        let len = (c.count * BAR_WIDTH).div_ceil(max);
        let bar = colour_for_emotion(&c.emotion)
            .paint("█".repeat(len))
            .to_string();
        out.push_str(&format!(
            "{} {} {}\n",
            pad_right(&c.emotion, label_w),
            bar,
            c.count
        ));
    }
    out
}

/// Pending goals, one per line, addressable by short id.
pub fn render_pending(records: &[CheckinRecord]) -> String {
    if records.is_empty() {
        return "No goals logged yet.\n".to_string();
    }

    let pending = store::pending(records);
    if pending.is_empty() {
        return "You have no pending goals. Great job!\n".to_string();
    }

    let mut out = String::new();
    for rec in pending {
        out.push_str(&format!(
            "[{}] {} (from {})\n",
            rec.short_id(),
            rec.goal,
            short_when(&rec.timestamp)
        ));
    }
    out
}

/// Every goal with its completion mark.
pub fn render_all_goals(records: &[CheckinRecord]) -> String {
    if records.is_empty() {
        return "No goals logged yet.\n".to_string();
    }

    let mut out = String::new();
    for rec in records {
        out.push_str(&format!(
            "{} [{}] {} (from {})\n",
            completed_mark(rec.completed),
            rec.short_id(),
            rec.goal,
            short_when(&rec.timestamp)
        ));
    }
    out
}

/// `YYYY-MM-DDTHH:MM` part of a stored timestamp.
fn short_when(ts: &str) -> String {
    ts.chars().take(16).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::formatting::strip_ansi;
    use chrono::NaiveDate;

    fn rec(ts: &str, emotion: &str, goal: &str, done: bool) -> CheckinRecord {
        let mut r = CheckinRecord::new(ts, "some text", emotion, goal);
        r.completed = done;
        r
    }

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 11, 10)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap()
    }

    #[test]
    fn empty_states() {
        assert!(render_recent(&[], 15).starts_with("No history yet"));
        assert_eq!(render_mood(&[], 7, now()), "No mood data yet.\n");
        assert_eq!(render_pending(&[]), "No goals logged yet.\n");
    }

    #[test]
    fn old_rows_only_give_no_weekly_data() {
        let recs = vec![rec("2025-10-01T10:00:00", "joy", "g", false)];
        assert_eq!(render_mood(&recs, 7, now()), "No data for the last 7 days yet.\n");
    }

    #[test]
    fn mood_bars_scale_to_the_top_label() {
        let recs = vec![
            rec("2025-11-09T10:00:00", "joy", "a", false),
            rec("2025-11-09T10:00:00", "joy", "b", false),
            rec("2025-11-08T10:00:00", "fear", "c", false),
        ];
        let out = strip_ansi(&render_mood(&recs, 7, now()));
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("joy "));
        assert!(lines[0].ends_with(" 2"));
        assert_eq!(lines[0].matches('█').count(), BAR_WIDTH);
        assert_eq!(lines[1].matches('█').count(), BAR_WIDTH / 2);
    }

    #[test]
    fn pending_lists_only_open_goals() {
        let recs = vec![
            rec("2025-11-09T10:00:00.000001", "joy", "Open one", false),
            rec("2025-11-09T10:00:00.000001", "joy", "Done one", true),
        ];
        let out = render_pending(&recs);
        assert!(out.contains("Open one (from 2025-11-09T10:00)"));
        assert!(out.contains(&recs[0].short_id()));
        assert!(!out.contains("Done one"));

        let all_done = vec![rec("2025-11-09T10:00:00", "joy", "x", true)];
        assert_eq!(render_pending(&all_done), "You have no pending goals. Great job!\n");
    }

    #[test]
    fn recent_table_has_header_and_rows() {
        let recs: Vec<_> = (0..20)
            .map(|i| rec("2025-11-09T10:00:00", "anger", &format!("goal {i}"), false))
            .collect();
        let out = strip_ansi(&render_recent(&recs, 15));
        assert_eq!(out.lines().count(), 2 + 15);
        assert!(out.contains("goal 19"));
        assert!(!out.contains("goal 4 "));
    }

    #[test]
    fn all_goals_include_completed_ones() {
        let recs = vec![
            rec("2025-11-09T10:00:00", "joy", "Open one", false),
            rec("2025-11-09T10:00:00", "joy", "Done one", true),
        ];
        let out = strip_ansi(&render_all_goals(&recs));
        assert!(out.contains("· ["));
        assert!(out.contains("✔ ["));
        assert!(out.contains("Done one (from 2025-11-09T10:00)"));
        assert_eq!(render_all_goals(&[]), "No goals logged yet.\n");
    }
}
