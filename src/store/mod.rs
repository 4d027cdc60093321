//! CSV-backed history of check-ins.
//!
//! The whole table is rewritten on every save: load, mutate, overwrite.
//! There is no locking, the last writer wins.

use crate::errors::{AppError, AppResult};
use crate::models::checkin::{CheckinRow, now_timestamp};
use crate::models::{CheckinRecord, MoodCount};
use chrono::{Duration, NaiveDateTime};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use uuid::Uuid;

/// Column order of the history file.
pub const HEADERS: [&str; 6] = ["timestamp", "text", "emotion", "goal", "completed", "id"];

pub struct HistoryStore {
    path: PathBuf,
}

impl HistoryStore {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read every row. A missing file is an empty history.
    ///
    /// Rows written without an id (older files) get one here, and the file
    /// is rewritten at once so the same ids come back on the next load.
    pub fn load(&self) -> AppResult<Vec<CheckinRecord>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let mut rdr = csv::Reader::from_path(&self.path)?;
        let mut records = Vec::new();
        let mut assigned = 0;
        for row in rdr.deserialize::<CheckinRow>() {
            let (record, fresh_id) = row?.into_record();
            if fresh_id {
                assigned += 1;
            }
            records.push(record);
        }
        drop(rdr);

        if assigned > 0 {
            info!(path = %self.path.display(), assigned, "assigned ids to history rows");
            self.save(&records)?;
        }

        debug!(path = %self.path.display(), rows = records.len(), "history loaded");
        Ok(records)
    }

    /// Overwrite the file with `records`. The header row is always written.
    pub fn save(&self, records: &[CheckinRecord]) -> AppResult<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        let mut wtr = csv::WriterBuilder::new()
            .has_headers(false)
            .from_path(&self.path)?;
        wtr.write_record(HEADERS)?;
        for rec in records {
            wtr.serialize(rec)?;
        }
        wtr.flush()?;

        debug!(path = %self.path.display(), rows = records.len(), "history saved");
        Ok(())
    }

    /// Create the file with just the header when it does not exist yet.
    pub fn ensure_exists(&self) -> AppResult<()> {
        if !self.path.exists() {
            self.save(&[])?;
        }
        Ok(())
    }

    /// Append one row per goal, all sharing a single timestamp. Returns the
    /// rows that were added.
    pub fn append(
        &self,
        text: &str,
        emotion: &str,
        goals: &[String],
    ) -> AppResult<Vec<CheckinRecord>> {
        let mut records = self.load()?;
        let ts = now_timestamp();

        let new_rows: Vec<CheckinRecord> = goals
            .iter()
            .map(|g| CheckinRecord::new(&ts, text, emotion, g))
            .collect();

        records.extend(new_rows.iter().cloned());
        self.save(&records)?;
        Ok(new_rows)
    }

    /// Mark rows at the given positions as completed. An out-of-range
    /// position aborts before anything is written. Returns how many rows
    /// changed state.
    pub fn mark_completed(&self, indices: &[usize]) -> AppResult<usize> {
        let mut records = self.load()?;

        if let Some(&bad) = indices.iter().find(|&&i| i >= records.len()) {
            return Err(AppError::InvalidIndex(bad));
        }

        let mut changed = 0;
        for &i in indices {
            if !records[i].completed {
                records[i].complete();
                changed += 1;
            }
        }

        self.save(&records)?;
        Ok(changed)
    }

    /// Same as [`mark_completed`](Self::mark_completed) but addressed by
    /// stable id.
    pub fn mark_completed_ids(&self, ids: &[Uuid]) -> AppResult<usize> {
        let mut records = self.load()?;

        if let Some(missing) = ids.iter().find(|id| !records.iter().any(|r| r.id == **id)) {
            return Err(AppError::UnknownRecord(missing.to_string()));
        }

        let mut changed = 0;
        for rec in records.iter_mut().filter(|r| ids.contains(&r.id)) {
            if !rec.completed {
                rec.complete();
                changed += 1;
            }
        }

        self.save(&records)?;
        Ok(changed)
    }
}

/// Rows still waiting to be done, in file order.
pub fn pending(records: &[CheckinRecord]) -> Vec<&CheckinRecord> {
    records.iter().filter(|r| !r.completed).collect()
}

/// The last `limit` rows, oldest first.
pub fn recent(records: &[CheckinRecord], limit: usize) -> &[CheckinRecord] {
    let start = records.len().saturating_sub(limit);
    &records[start..]
}

/// Tally of emotions for rows newer than `now - days`. Rows with an
/// unparseable timestamp are skipped. Sorted by count, then label.
pub fn mood_counts(records: &[CheckinRecord], days: i64, now: NaiveDateTime) -> Vec<MoodCount> {
    let cutoff = now - Duration::days(days);

    let mut tally: HashMap<&str, usize> = HashMap::new();
    for rec in records {
        match rec.datetime() {
            Some(dt) if dt >= cutoff => *tally.entry(rec.emotion.as_str()).or_default() += 1,
            _ => {}
        }
    }

    let mut counts: Vec<MoodCount> = tally
        .into_iter()
        .map(|(emotion, count)| MoodCount {
            emotion: emotion.to_string(),
            count,
        })
        .collect();
    counts.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.emotion.cmp(&b.emotion)));
    counts
}

/// Resolve user-typed ids (full UUIDs or hex prefixes, hyphens optional).
pub fn resolve_ids(records: &[CheckinRecord], inputs: &[String]) -> AppResult<Vec<Uuid>> {
    let mut out = Vec::with_capacity(inputs.len());

    for raw in inputs {
        let needle = raw.trim().replace('-', "").to_ascii_lowercase();
        if needle.is_empty() {
            return Err(AppError::UnknownRecord(raw.clone()));
        }

        let matches: Vec<Uuid> = records
            .iter()
            .filter(|r| r.id.simple().to_string().starts_with(&needle))
            .map(|r| r.id)
            .collect();

        match matches.as_slice() {
            [] => return Err(AppError::UnknownRecord(raw.clone())),
            [one] => out.push(*one),
            _ => return Err(AppError::AmbiguousRecord(raw.clone())),
        }
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn store() -> (tempfile::TempDir, HistoryStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = HistoryStore::new(dir.path().join("data").join("history.csv"));
        (dir, store)
    }

    fn goals(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn at(ts: &str, emotion: &str) -> CheckinRecord {
        CheckinRecord::new(ts, "x", emotion, "g")
    }

    #[test]
    fn missing_file_is_empty_history() {
        let (_dir, store) = store();
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn empty_save_writes_header_only() {
        let (_dir, store) = store();
        store.ensure_exists().unwrap();
        let content = fs::read_to_string(store.path()).unwrap();
        assert_eq!(content.trim(), "timestamp,text,emotion,goal,completed,id");
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn append_two_goals_adds_two_sibling_rows() {
        let (_dir, store) = store();
        store
            .append("first", "joy", &goals(&["Share something"]))
            .unwrap();

        let added = store
            .append("I failed my exam today", "sadness", &goals(&["a", "b"]))
            .unwrap();
        assert_eq!(added.len(), 2);

        let all = store.load().unwrap();
        assert_eq!(all.len(), 3);
        let (x, y) = (&all[1], &all[2]);
        assert_eq!(x.timestamp, y.timestamp);
        assert_eq!(x.text, "I failed my exam today");
        assert_eq!(y.text, x.text);
        assert_eq!(x.emotion, "sadness");
        assert_eq!(y.emotion, "sadness");
        assert!(!x.completed && !y.completed);
        assert_ne!(x.id, y.id);
    }

    #[test]
    fn text_with_commas_and_quotes_survives() {
        let (_dir, store) = store();
        let text = "ugh, \"fine\"\nI guess";
        store.append(text, "anger", &goals(&["Breathe, slowly"])).unwrap();
        let all = store.load().unwrap();
        assert_eq!(all[0].text, text);
        assert_eq!(all[0].goal, "Breathe, slowly");
    }

    #[test]
    fn mark_completed_is_idempotent() {
        let (_dir, store) = store();
        store.append("t", "fear", &goals(&["a", "b", "c"])).unwrap();

        assert_eq!(store.mark_completed(&[0, 2]).unwrap(), 2);
        let once = store.load().unwrap();

        assert_eq!(store.mark_completed(&[0, 2]).unwrap(), 0);
        let twice = store.load().unwrap();

        assert_eq!(once, twice);
        assert!(twice[0].completed);
        assert!(!twice[1].completed);
        assert!(twice[2].completed);
    }

    #[test]
    fn out_of_range_index_writes_nothing() {
        let (_dir, store) = store();
        store.append("t", "joy", &goals(&["a"])).unwrap();
        let err = store.mark_completed(&[0, 5]).unwrap_err();
        assert!(matches!(err, AppError::InvalidIndex(5)));
        assert!(!store.load().unwrap()[0].completed);
    }

    #[test]
    fn ids_are_stable_across_saves() {
        let (_dir, store) = store();
        let added = store.append("t", "joy", &goals(&["a", "b"])).unwrap();
        store.append("u", "anger", &goals(&["c"])).unwrap();

        assert_eq!(store.mark_completed_ids(&[added[1].id]).unwrap(), 1);
        let all = store.load().unwrap();
        assert_eq!(all[1].id, added[1].id);
        assert!(all[1].completed);
        assert!(!all[0].completed);
    }

    #[test]
    fn legacy_five_column_file_loads() {
        let (_dir, store) = store();
        fs::create_dir_all(store.path().parent().unwrap()).unwrap();
        fs::write(
            store.path(),
            "timestamp,text,emotion,goal,completed\n\
             2025-11-04T09:15:02.123456,tired,sadness,Send a message,False\n\
             2025-11-04T09:15:02.123456,tired,sadness,Listen to a song,True\n",
        )
        .unwrap();

        let all = store.load().unwrap();
        assert_eq!(all.len(), 2);
        assert!(!all[0].completed);
        assert!(all[1].completed);

        let content = fs::read_to_string(store.path()).unwrap();
        assert!(content.starts_with("timestamp,text,emotion,goal,completed,id\n"));

        let again = store.load().unwrap();
        assert_eq!(again[0].id, all[0].id);
        assert_eq!(again[1].id, all[1].id);
    }

    #[test]
    fn legacy_ids_resolve_across_loads() {
        let (_dir, store) = store();
        fs::create_dir_all(store.path().parent().unwrap()).unwrap();
        fs::write(
            store.path(),
            "timestamp,text,emotion,goal,completed\n\
             2025-11-04T09:15:02.123456,tired,sadness,Send a message,False\n",
        )
        .unwrap();

        let shown = store.load().unwrap()[0].short_id();
        let reloaded = store.load().unwrap();
        let ids = resolve_ids(&reloaded, &[shown]).unwrap();
        assert_eq!(store.mark_completed_ids(&ids).unwrap(), 1);
        assert!(store.load().unwrap()[0].completed);
    }

    #[test]
    fn recent_takes_the_tail() {
        let recs: Vec<_> = (0..20).map(|i| at(&format!("2025-01-01T00:00:{i:02}"), "joy")).collect();
        let tail = recent(&recs, 15);
        assert_eq!(tail.len(), 15);
        assert_eq!(tail[0].timestamp, "2025-01-01T00:00:05");
        assert_eq!(recent(&recs[..3], 15).len(), 3);
    }

    #[test]
    fn mood_counts_respect_window_and_skip_bad_timestamps() {
        let now = NaiveDate::from_ymd_opt(2025, 11, 10)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap();
        let recs = vec![
            at("2025-11-09T08:00:00", "joy"),
            at("2025-11-09T08:00:00", "joy"),
            at("2025-11-08T08:00:00", "anger"),
            at("2025-11-01T08:00:00", "sadness"),
            at("not a date", "fear"),
        ];

        let counts = mood_counts(&recs, 7, now);
        assert_eq!(
            counts,
            vec![
                MoodCount { emotion: "joy".into(), count: 2 },
                MoodCount { emotion: "anger".into(), count: 1 },
            ]
        );
    }

    #[test]
    fn resolve_by_prefix() {
        let recs = vec![at("2025-01-01T00:00:00", "joy"), at("2025-01-01T00:00:00", "joy")];
        let short = recs[1].short_id();
        let ids = resolve_ids(&recs, &[short.to_uppercase()]).unwrap();
        assert_eq!(ids, vec![recs[1].id]);

        let full = recs[0].id.to_string();
        assert_eq!(resolve_ids(&recs, &[full]).unwrap(), vec![recs[0].id]);

        assert!(matches!(
            resolve_ids(&recs, &["zzzz".into()]),
            Err(AppError::UnknownRecord(_))
        ));
    }
}
