use thiserror::Error;

use crate::models::{parse_stamp, Record};

use super::{LogStore, StoreError};

/// How many history entries each page shows.
pub const RECENT_LIMIT: usize = 3;

/// Errors raised while assembling a user's history view.
#[derive(Debug, Error)]
pub enum HistoryError {
    #[error(transparent)]
    Store(#[from] StoreError),

    /// A matching row carried a timestamp outside the audit format. The
    /// caller degrades this to a "no data" notice rather than rendering a
    /// partial, mis-sorted history.
    #[error("row has unparseable timestamp {value:?}")]
    BadTimestamp { value: String },
}

/// Rows whose stored user matches, by trimmed lowercase string equality.
///
/// This is the entire identity model: no account ids, just what the user
/// typed at the access gate.
pub fn rows_for_user<R: Record>(
    log: &dyn LogStore<R>,
    user: &str,
) -> Result<Vec<R>, StoreError> {
    let needle = user.trim().to_lowercase();
    Ok(log
        .read_all()?
        .into_iter()
        .filter(|row| row.user().trim().to_lowercase() == needle)
        .collect())
}

/// The user's most recent rows: filtered, sorted by timestamp descending,
/// truncated to `limit`.
pub fn recent_for_user<R: Record>(
    log: &dyn LogStore<R>,
    user: &str,
    limit: usize,
) -> Result<Vec<R>, HistoryError> {
    let mut dated: Vec<(chrono::NaiveDateTime, R)> = Vec::new();
    for row in rows_for_user(log, user)? {
        let stamp = parse_stamp(row.timestamp()).ok_or_else(|| HistoryError::BadTimestamp {
            value: row.timestamp().to_string(),
        })?;
        dated.push((stamp, row));
    }

    dated.sort_by(|a, b| b.0.cmp(&a.0));
    dated.truncate(limit);
    Ok(dated.into_iter().map(|(_, row)| row).collect())
}

#[cfg(test)]
mod tests {
    use crate::models::StylistRecord;
    use crate::store::MemoryLog;

    use super::*;

    fn row(stamp: &str, user: &str, prompt: &str) -> StylistRecord {
        StylistRecord {
            timestamp: stamp.to_string(),
            user: user.to_string(),
            prompt: prompt.to_string(),
            result: "ok".to_string(),
        }
    }

    fn seeded_log() -> MemoryLog<StylistRecord> {
        let log = MemoryLog::new();
        log.append(&row("2026-08-01 09:00:00", "Alice", "first")).unwrap();
        log.append(&row("2026-08-01 11:00:00", " alice ", "third")).unwrap();
        log.append(&row("2026-08-01 10:00:00", "ALICE", "second")).unwrap();
        log.append(&row("2026-08-01 12:00:00", "bob", "not hers")).unwrap();
        log.append(&row("2026-08-01 08:00:00", "alice", "oldest")).unwrap();
        log
    }

    #[test]
    fn test_recent_filters_sorts_and_truncates() {
        let log = seeded_log();

        let recent = recent_for_user(&log, "Alice", RECENT_LIMIT).unwrap();

        let prompts: Vec<&str> = recent.iter().map(|r| r.prompt.as_str()).collect();
        assert_eq!(prompts, vec!["third", "second", "first"]);
    }

    #[test]
    fn test_matching_is_trimmed_and_case_insensitive() {
        let log = seeded_log();

        let rows = rows_for_user(&log, "  ALICE ").unwrap();
        assert_eq!(rows.len(), 4);
        assert!(rows.iter().all(|r| r.user.trim().to_lowercase() == "alice"));
    }

    #[test]
    fn test_no_rows_for_unknown_user() {
        let log = seeded_log();
        assert!(recent_for_user(&log, "mallory", RECENT_LIMIT)
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_bad_timestamp_is_an_error_not_a_panic() {
        let log = MemoryLog::new();
        log.append(&row("around noon", "alice", "vague")).unwrap();

        let err = recent_for_user(&log, "alice", RECENT_LIMIT).unwrap_err();
        assert!(matches!(err, HistoryError::BadTimestamp { .. }));
    }

    #[test]
    fn test_other_users_bad_rows_do_not_interfere() {
        let log = seeded_log();
        log.append(&row("garbage", "mallory", "junk")).unwrap();

        // Alice's history is unaffected by mallory's unparseable row
        let recent = recent_for_user(&log, "alice", RECENT_LIMIT).unwrap();
        assert_eq!(recent.len(), 3);
    }
}
