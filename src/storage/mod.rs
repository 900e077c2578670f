//! # Storage Layer
//!
//! Everything `tq` reads from disk.
//!
//! | Data | Format | Location |
//! |------|--------|----------|
//! | Snapshot | JSON export of the tracker | `--snapshot`, `TQ_SNAPSHOT` or config |
//! | Config | TOML | platform config dir, `tq/config.toml` |
//! | Search templates | Multi-document YAML | `tq search --template FILE` |
//!
//! ## Key Types
//!
//! - [`Snapshot`] - Projects, boards, statuses and tickets with their history
//! - [`Catalog`] - Rank tables and name lookups built from a snapshot
//! - [`Config`] - User configuration
//! - [`SearchTemplate`] - Saved searches run in sequence

mod catalog;
mod config;
mod snapshot;
mod template;

pub use catalog::{priority_name, Board, Catalog};
pub use config::{Config, ConfigError, FormatSetting};
pub use snapshot::{
    Change, ColumnRecord, ProjectRecord, Snapshot, SnapshotError, StatusCatalog, TaskRecord,
};
pub use template::{SearchTemplate, TemplateError, TemplateSearch};
