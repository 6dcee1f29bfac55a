use std::fmt;
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};

/// Maximum size of the journal before inline trimming (512 KB).
const MAX_LOG_SIZE: u64 = 524_288;

/// Entries older than this are dropped when the journal is trimmed.
const TRIM_AGE_DAYS: i64 = 30;

/// Self-documenting header written at the top of a new journal.
const FILE_HEADER: &str = "\
<!-- tick journal — append-only error capture
     This file holds task data that tick couldn't save or read normally.
     If something went missing, check here.
     View with: tk journal
     Safe to delete if empty or stale. -->

---
";

/// Category of a journal entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JournalCategory {
    /// Persisted payload failed to decode; the list fell back to empty.
    Decode,
    /// A write to storage failed; the payload is preserved here.
    Write,
}

impl fmt::Display for JournalCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JournalCategory::Decode => write!(f, "decode"),
            JournalCategory::Write => write!(f, "write"),
        }
    }
}

impl JournalCategory {
    fn parse_category(s: &str) -> Option<Self> {
        match s {
            "decode" => Some(JournalCategory::Decode),
            "write" => Some(JournalCategory::Write),
            _ => None,
        }
    }
}

/// A single entry in the journal.
#[derive(Debug, Clone)]
pub struct JournalEntry {
    pub timestamp: DateTime<Utc>,
    pub category: JournalCategory,
    pub description: String,
    pub fields: Vec<(String, String)>,
    pub body: String,
}

impl JournalEntry {
    /// Format this entry as a markdown block.
    fn to_markdown(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!(
            "## {} — {}: {}\n",
            self.timestamp
                .to_rfc3339_opts(chrono::SecondsFormat::Secs, true),
            self.category,
            self.description,
        ));
        out.push('\n');

        for (key, value) in &self.fields {
            out.push_str(&format!("{}: {}\n", key, value));
        }

        if !self.body.is_empty() {
            out.push('\n');
            out.push_str("```text\n");
            out.push_str(&self.body);
            if !self.body.ends_with('\n') {
                out.push('\n');
            }
            out.push_str("```\n");
        }

        out.push('\n');
        out.push_str("---\n");
        out
    }

    /// Serialize to JSON for `tk journal --json`.
    pub fn to_json(&self) -> serde_json::Value {
        let fields: serde_json::Map<String, serde_json::Value> = self
            .fields
            .iter()
            .map(|(k, v)| (k.clone(), serde_json::Value::String(v.clone())))
            .collect();

        serde_json::json!({
            "timestamp": self.timestamp.to_rfc3339_opts(chrono::SecondsFormat::Secs, true),
            "category": self.category.to_string(),
            "description": self.description,
            "fields": fields,
            "body": self.body,
        })
    }
}

/// Return the path to the journal file.
pub fn journal_path(tick_dir: &Path) -> PathBuf {
    tick_dir.join(".journal.log")
}

/// Append an entry to the journal. Errors are swallowed and printed to
/// stderr — journaling is itself a failure path and must not cascade.
pub fn log_journal(tick_dir: &Path, entry: JournalEntry) {
    if let Err(e) = log_journal_inner(tick_dir, entry) {
        eprintln!("warning: could not write to journal: {}", e);
    }
}

fn log_journal_inner(tick_dir: &Path, entry: JournalEntry) -> io::Result<()> {
    let path = journal_path(tick_dir);

    // Single process owns this file; trim inline when it grows too large.
    if let Ok(meta) = std::fs::metadata(&path)
        && meta.len() > MAX_LOG_SIZE
    {
        trim_journal(&path);
    }

    let needs_header = !path.exists() || std::fs::metadata(&path).map_or(true, |m| m.len() == 0);

    let mut file = OpenOptions::new().create(true).append(true).open(&path)?;
    if needs_header {
        file.write_all(FILE_HEADER.as_bytes())?;
    }
    file.write_all(entry.to_markdown().as_bytes())?;
    Ok(())
}

/// Record a storage write failure together with the payload that was lost.
pub fn log_write_failure(tick_dir: &Path, key: &str, error: &io::Error, payload: &str) {
    log_journal(
        tick_dir,
        JournalEntry {
            timestamp: Utc::now(),
            category: JournalCategory::Write,
            description: format!("could not persist \"{}\"", key),
            fields: vec![
                ("Key".to_string(), key.to_string()),
                ("Error".to_string(), error.to_string()),
            ],
            body: payload.to_string(),
        },
    );
}

/// Record an undecodable persisted payload before falling back to empty.
pub fn log_decode_failure(tick_dir: &Path, key: &str, error: &str, payload: &str) {
    log_journal(
        tick_dir,
        JournalEntry {
            timestamp: Utc::now(),
            category: JournalCategory::Decode,
            description: format!("stored \"{}\" was unreadable", key),
            fields: vec![
                ("Key".to_string(), key.to_string()),
                ("Error".to_string(), error.to_string()),
            ],
            body: payload.to_string(),
        },
    );
}

/// Read journal entries, most recent first.
pub fn read_journal_entries(tick_dir: &Path, limit: Option<usize>) -> Vec<JournalEntry> {
    let path = journal_path(tick_dir);
    let content = match std::fs::read_to_string(&path) {
        Ok(c) => c,
        Err(_) => return Vec::new(),
    };

    let mut entries = parse_entries(&content);
    if let Some(n) = limit {
        let skip = entries.len().saturating_sub(n);
        entries = entries.into_iter().skip(skip).collect();
    }
    entries.reverse();
    entries
}

/// Drop entries older than TRIM_AGE_DAYS, keeping the file header.
fn trim_journal(path: &Path) {
    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(_) => return,
    };
    let cutoff = Utc::now() - chrono::Duration::days(TRIM_AGE_DAYS);
    let trimmed = drop_entries_before(&content, &cutoff);
    if trimmed.len() < content.len() {
        let _ = std::fs::write(path, trimmed.as_bytes());
    }
}

/// Parse all entries from the journal content, oldest first.
fn parse_entries(content: &str) -> Vec<JournalEntry> {
    let mut entries = Vec::new();
    let mut lines = content.lines();

    while let Some(line) = lines.next() {
        let Some(header) = line.strip_prefix("## ") else {
            continue;
        };
        let Some((timestamp, category, description)) = parse_entry_header(header) else {
            continue;
        };

        let mut fields = Vec::new();
        let mut body = String::new();
        let mut in_code_block = false;

        for line in lines.by_ref() {
            if line == "---" && !in_code_block {
                break;
            }
            if in_code_block {
                if line == "```" {
                    in_code_block = false;
                } else {
                    if !body.is_empty() {
                        body.push('\n');
                    }
                    body.push_str(line);
                }
                continue;
            }
            if line.starts_with("```") {
                in_code_block = true;
                continue;
            }
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }
            if let Some(colon) = trimmed.find(": ") {
                fields.push((trimmed[..colon].to_string(), trimmed[colon + 2..].to_string()));
            }
        }

        entries.push(JournalEntry {
            timestamp,
            category,
            description,
            fields,
            body,
        });
    }

    entries
}

/// Parse an entry header: `<timestamp> — <category>: <description>`
fn parse_entry_header(header: &str) -> Option<(DateTime<Utc>, JournalCategory, String)> {
    let dash_pos = header.find(" — ")?;
    let timestamp_str = &header[..dash_pos];
    let rest = &header[dash_pos + " — ".len()..];

    let timestamp = DateTime::parse_from_rfc3339(timestamp_str)
        .ok()?
        .with_timezone(&Utc);

    let colon_pos = rest.find(": ")?;
    let category = JournalCategory::parse_category(&rest[..colon_pos])?;
    Some((timestamp, category, rest[colon_pos + 2..].to_string()))
}

/// Remove entries with timestamps before `cutoff`, preserving the header.
fn drop_entries_before(content: &str, cutoff: &DateTime<Utc>) -> String {
    let mut result = String::new();
    let mut current_entry = String::new();
    let mut current_timestamp: Option<DateTime<Utc>> = None;
    let mut in_header = true;

    for line in content.lines() {
        if in_header {
            result.push_str(line);
            result.push('\n');
            if line == "---" {
                in_header = false;
            }
            continue;
        }

        if let Some(stripped) = line.strip_prefix("## ") {
            if let Some(ts) = current_timestamp
                && ts >= *cutoff
            {
                result.push_str(&current_entry);
            }
            current_entry.clear();
            current_timestamp = parse_entry_header(stripped).map(|(ts, _, _)| ts);
            current_entry.push_str(line);
            current_entry.push('\n');
        } else {
            current_entry.push_str(line);
            current_entry.push('\n');
        }
    }

    if let Some(ts) = current_timestamp
        && ts >= *cutoff
    {
        result.push_str(&current_entry);
    }

    result
}
