use std::fmt;
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use tempfile::NamedTempFile;
use tracing::warn;

use crate::model::plant::PlantFields;

/// Header written at the top of a new recovery log.
const FILE_HEADER: &str = "\
<!-- frond recovery log: append-only
     Plant data that could not be saved normally ends up here.
     View with: frond recovery
     Safe to delete once you have re-entered anything you need. -->

---
";

const SEPARATOR: &str = "---";
const FENCE: &str = "```";

// ---------------------------------------------------------------------------
// Data types
// ---------------------------------------------------------------------------

/// Category of a recovery entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecoveryCategory {
    /// A create or update from the form failed
    Save,
    /// A sample plant could not be created while seeding
    Seed,
}

impl fmt::Display for RecoveryCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecoveryCategory::Save => write!(f, "save"),
            RecoveryCategory::Seed => write!(f, "seed"),
        }
    }
}

impl RecoveryCategory {
    pub fn parse_category(s: &str) -> Option<Self> {
        match s {
            "save" => Some(RecoveryCategory::Save),
            "seed" => Some(RecoveryCategory::Seed),
            _ => None,
        }
    }
}

/// A single entry in the recovery log.
#[derive(Debug, Clone, PartialEq)]
pub struct RecoveryEntry {
    pub timestamp: DateTime<Utc>,
    pub category: RecoveryCategory,
    pub description: String,
    pub fields: Vec<(String, String)>,
    pub body: String,
}

/// Return the path to the recovery log file.
pub fn recovery_log_path(catalog_dir: &Path) -> PathBuf {
    catalog_dir.join(".recovery.log")
}

// ---------------------------------------------------------------------------
// Atomic file write
// ---------------------------------------------------------------------------

/// Write `content` to `path` atomically using a temp file + rename.
pub fn atomic_write(path: &Path, content: &[u8]) -> io::Result<()> {
    let dir = path.parent().unwrap_or(Path::new("."));
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(content)?;
    tmp.flush()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Writing
// ---------------------------------------------------------------------------

impl RecoveryEntry {
    /// An entry holding the packaged values of a submission that failed
    pub fn failed_save(target: &str, fields: &PlantFields, error: &str) -> Self {
        RecoveryEntry {
            timestamp: Utc::now(),
            category: RecoveryCategory::Save,
            description: format!("{} not saved", display_name(fields)),
            fields: vec![
                ("Target".to_string(), target.to_string()),
                ("Error".to_string(), error.to_string()),
            ],
            body: serde_json::to_string_pretty(fields).unwrap_or_default(),
        }
    }

    /// An entry for a sample plant that seeding could not create
    pub fn failed_seed(fields: &PlantFields, error: &str) -> Self {
        RecoveryEntry {
            timestamp: Utc::now(),
            category: RecoveryCategory::Seed,
            description: format!("sample {} not created", display_name(fields)),
            fields: vec![("Error".to_string(), error.to_string())],
            body: String::new(),
        }
    }

    /// One log block: header line, `Key: value` lines, then the packaged
    /// values in a fenced JSON body when there are any.
    fn to_markdown(&self) -> String {
        let stamp = self
            .timestamp
            .to_rfc3339_opts(chrono::SecondsFormat::Secs, true);
        let mut lines = vec![
            format!("## {} {}: {}", stamp, self.category, self.description),
            String::new(),
        ];
        lines.extend(self.fields.iter().map(|(k, v)| format!("{}: {}", k, v)));
        if !self.body.is_empty() {
            lines.push(String::new());
            lines.push(format!("{}json", FENCE));
            lines.extend(self.body.lines().map(str::to_string));
            lines.push(FENCE.to_string());
        }
        lines.push(String::new());
        lines.push(SEPARATOR.to_string());
        let mut out = lines.join("\n");
        out.push('\n');
        out
    }

    /// Serialize to JSON for `frond recovery --json`.
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

    /// Human-readable form for the CLI
    pub fn to_display_markdown(&self) -> String {
        self.to_markdown()
    }
}

fn display_name(fields: &PlantFields) -> String {
    let name = fields.name.trim();
    if name.is_empty() {
        "unnamed plant".to_string()
    } else {
        format!("\"{}\"", name)
    }
}

/// Append a recovery entry to the log. Errors are logged, not returned.
pub fn log_recovery(catalog_dir: &Path, entry: RecoveryEntry) {
    if let Err(e) = log_recovery_inner(catalog_dir, &entry) {
        warn!(error = %e, "could not write to recovery log");
    }
}

fn log_recovery_inner(catalog_dir: &Path, entry: &RecoveryEntry) -> io::Result<()> {
    let path = recovery_log_path(catalog_dir);
    let needs_header = std::fs::metadata(&path).map_or(true, |m| m.len() == 0);

    let mut file = OpenOptions::new().create(true).append(true).open(&path)?;
    if needs_header {
        file.write_all(FILE_HEADER.as_bytes())?;
    }
    file.write_all(entry.to_markdown().as_bytes())?;
    Ok(())
}

/// Read recovery entries, most recent first.
pub fn read_recovery_entries(catalog_dir: &Path, limit: Option<usize>) -> Vec<RecoveryEntry> {
    let Ok(content) = std::fs::read_to_string(recovery_log_path(catalog_dir)) else {
        return Vec::new();
    };
    let mut entries: Vec<RecoveryEntry> = split_blocks(&content)
        .into_iter()
        .filter_map(parse_block)
        .collect();
    entries.reverse();
    if let Some(n) = limit {
        entries.truncate(n);
    }
    entries
}

/// Split the log on separator lines outside fenced bodies
fn split_blocks(content: &str) -> Vec<Vec<&str>> {
    let mut blocks = vec![Vec::new()];
    let mut fenced = false;
    for line in content.lines() {
        if line.starts_with(FENCE) {
            fenced = !fenced;
        } else if line == SEPARATOR && !fenced {
            blocks.push(Vec::new());
            continue;
        }
        if let Some(block) = blocks.last_mut() {
            block.push(line);
        }
    }
    blocks
}

/// A block without a valid `## <timestamp> <category>: <description>`
/// header (such as the file header comment) yields `None`.
fn parse_block(lines: Vec<&str>) -> Option<RecoveryEntry> {
    let mut rest = lines.into_iter().skip_while(|l| !l.starts_with("## "));
    let header = rest.next()?.strip_prefix("## ")?;
    let (stamp, rest_of_header) = header.split_once(' ')?;
    let timestamp = DateTime::parse_from_rfc3339(stamp).ok()?.with_timezone(&Utc);
    let (category, description) = rest_of_header.split_once(": ")?;
    let category = RecoveryCategory::parse_category(category)?;

    let mut fields = Vec::new();
    let mut body: Vec<&str> = Vec::new();
    let mut fenced = false;
    for line in rest {
        match (fenced, line.starts_with(FENCE)) {
            (_, true) => fenced = !fenced,
            (true, false) => body.push(line),
            (false, false) => {
                if let Some((key, value)) = line.trim().split_once(": ") {
                    fields.push((key.to_string(), value.to_string()));
                }
            }
        }
    }

    Some(RecoveryEntry {
        timestamp,
        category,
        description: description.to_string(),
        fields,
        body: body.join("\n"),
    })
}
