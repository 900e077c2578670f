//! Tracker snapshot files
//!
//! A snapshot is a JSON export of the tracker: projects with their board
//! columns, the optional status catalog, and every ticket with its change
//! history. Values are stored as the tracker reports them (column ids,
//! status keys, numeric priorities); [`super::Catalog`] turns them into the
//! names patterns are written against.

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("Failed to read snapshot {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse snapshot {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// A full tracker export
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Snapshot {
    pub projects: Vec<ProjectRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub statuses: Option<StatusCatalog>,
    pub tasks: Vec<TaskRecord>,
}

/// A project, which doubles as a workboard when it has columns
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectRecord {
    pub id: String,
    pub name: String,
    /// Hashtags the project can also be referred to by
    #[serde(default)]
    pub slugs: Vec<String>,
    #[serde(default)]
    pub columns: Vec<ColumnRecord>,
}

/// A workboard column; `sequence` orders columns left to right
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnRecord {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub sequence: i64,
}

/// Statuses configured on the tracker
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatusCatalog {
    /// Open status keys, in workflow order
    pub open: Vec<String>,
    /// Closed status keys, in workflow order
    pub closed: Vec<String>,
    /// Status key to display name
    pub names: HashMap<String, String>,
}

/// A ticket
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskRecord {
    pub id: u64,
    pub title: String,
    pub status: String,
    pub priority: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Ids of the projects the ticket is tagged with
    #[serde(default)]
    pub projects: Vec<String>,
    /// Board id to the id of the column the ticket is in
    #[serde(default)]
    pub columns: BTreeMap<String, String>,
    #[serde(default)]
    pub history: Vec<Change>,
}

impl TaskRecord {
    /// Returns the short identifier, e.g. `T42`
    pub fn monogram(&self) -> String {
        format!("T{}", self.id)
    }

    /// Ids of the boards the ticket is currently on
    pub fn boards(&self) -> impl Iterator<Item = &str> {
        self.columns.keys().map(String::as_str)
    }
}

/// One recorded change, as exported
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "field", rename_all = "snake_case")]
pub enum Change {
    Status {
        #[serde(default)]
        old: Option<String>,
        new: String,
        at: DateTime<Utc>,
    },
    Priority {
        #[serde(default)]
        old: Option<String>,
        new: String,
        at: DateTime<Utc>,
    },
    Column {
        board: String,
        #[serde(default)]
        old: Option<String>,
        new: String,
        at: DateTime<Utc>,
    },
}

impl Snapshot {
    /// Loads a snapshot file
    pub fn load(path: &Path) -> Result<Self, SnapshotError> {
        let content = fs::read_to_string(path).map_err(|source| SnapshotError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        serde_json::from_str(&content).map_err(|source| SnapshotError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}
