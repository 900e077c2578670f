//! Name lookups built from a snapshot
//!
//! The catalog owns every rank table used during one invocation (one column
//! table per board, one for priority, one for status) and translates the
//! raw values found in ticket histories into state names.

use std::collections::HashMap;

use super::config::Config;
use super::snapshot::{Change, Snapshot, TaskRecord};
use crate::domain::{
    BoardHistory, Domain, Event, NameMatch, ProjectCondition, ProjectResolver, RankTable,
};

/// Numeric priority values reported by the tracker API
const PRIORITY_VALUES: [(&str, &str); 6] = [
    ("100", "Unbreak Now!"),
    ("90", "Triage"),
    ("80", "High"),
    ("50", "Normal"),
    ("25", "Low"),
    ("0", "Wishlist"),
];

/// Translates a numeric priority value to its name; names pass through
pub fn priority_name(value: &str) -> &str {
    PRIORITY_VALUES
        .iter()
        .find(|(v, _)| *v == value.trim())
        .map(|(_, name)| *name)
        .unwrap_or(value)
}

/// One workboard's columns
#[derive(Debug, Clone)]
pub struct Board {
    pub id: String,
    pub domain: Domain,
    column_names: HashMap<String, String>,
}

impl Board {
    /// Returns the name of a column, or the raw id if the column is unknown
    pub fn column_name<'a>(&'a self, column_id: &'a str) -> &'a str {
        self.column_names
            .get(column_id)
            .map(String::as_str)
            .unwrap_or(column_id)
    }

    /// Returns true if the column id belongs to this board
    pub fn knows_column(&self, column_id: &str) -> bool {
        self.column_names.contains_key(column_id)
    }
}

#[derive(Debug, Clone)]
struct ProjectEntry {
    id: String,
    name: String,
    /// Lowercased primary name and hashtags
    aliases: Vec<String>,
}

/// Lookups for one snapshot
#[derive(Debug, Clone)]
pub struct Catalog {
    projects: Vec<ProjectEntry>,
    boards: HashMap<String, Board>,
    /// Stand-in for boards missing from the snapshot: no ranked columns
    unknown_board: Domain,
    status: Domain,
    priority: Domain,
    status_names: HashMap<String, String>,
}

impl Catalog {
    pub fn build(snapshot: &Snapshot, config: &Config) -> Self {
        let projects = snapshot
            .projects
            .iter()
            .map(|p| {
                let mut aliases = vec![p.name.to_lowercase()];
                aliases.extend(p.slugs.iter().filter(|s| !s.is_empty()).map(|s| s.to_lowercase()));
                ProjectEntry {
                    id: p.id.clone(),
                    name: p.name.clone(),
                    aliases,
                }
            })
            .collect();

        let boards = snapshot
            .projects
            .iter()
            .filter(|p| !p.columns.is_empty())
            .map(|p| {
                let ranks = RankTable::from_pairs(
                    NameMatch::Exact,
                    p.columns.iter().map(|c| (c.name.as_str(), c.sequence)),
                );
                let column_names = p
                    .columns
                    .iter()
                    .map(|c| (c.id.clone(), c.name.clone()))
                    .collect();
                let board = Board {
                    id: p.id.clone(),
                    domain: Domain::column(ranks),
                    column_names,
                };
                (p.id.clone(), board)
            })
            .collect();

        let (status_ranks, status_names) = match &snapshot.statuses {
            Some(catalog) => (
                RankTable::status_from_catalog(&catalog.open, &catalog.closed, &catalog.names),
                catalog.names.clone(),
            ),
            None if !config.status_order.is_empty() => (
                RankTable::from_order(NameMatch::IgnoreCase, &config.status_order),
                HashMap::new(),
            ),
            None => (RankTable::status_fallback(), HashMap::new()),
        };

        let priority_ranks = if config.priority_order.is_empty() {
            RankTable::priority()
        } else {
            RankTable::from_order(NameMatch::IgnoreCase, &config.priority_order)
        };

        Self {
            projects,
            boards,
            unknown_board: Domain::column(RankTable::new(NameMatch::Exact)),
            status: Domain::status(status_ranks),
            priority: Domain::priority(priority_ranks),
            status_names,
        }
    }

    pub fn status_domain(&self) -> &Domain {
        &self.status
    }

    pub fn priority_domain(&self) -> &Domain {
        &self.priority
    }

    pub fn board(&self, id: &str) -> Option<&Board> {
        self.boards.get(id)
    }

    /// Returns the column domain of a board; unknown boards rank nothing
    pub fn board_domain(&self, id: &str) -> &Domain {
        self.boards
            .get(id)
            .map(|b| &b.domain)
            .unwrap_or(&self.unknown_board)
    }

    /// Returns a project's primary name
    pub fn project_name(&self, id: &str) -> Option<&str> {
        self.projects
            .iter()
            .find(|p| p.id == id)
            .map(|p| p.name.as_str())
    }

    /// Translates a status key to its display name
    pub fn status_name<'a>(&'a self, value: &'a str) -> &'a str {
        self.status_names
            .get(value)
            .map(String::as_str)
            .unwrap_or(value)
    }

    /// Status changes of a ticket, as names
    pub fn status_events(&self, task: &TaskRecord) -> Vec<Event> {
        task.history
            .iter()
            .filter_map(|change| match change {
                Change::Status { old, new, at } => Some(Event {
                    prior: old.as_deref().map(|v| self.status_name(v).to_string()),
                    new: self.status_name(new).to_string(),
                    at: *at,
                }),
                _ => None,
            })
            .collect()
    }

    /// Priority changes of a ticket, as names
    pub fn priority_events(&self, task: &TaskRecord) -> Vec<Event> {
        task.history
            .iter()
            .filter_map(|change| match change {
                Change::Priority { old, new, at } => Some(Event {
                    prior: old.as_deref().map(|v| priority_name(v).to_string()),
                    new: priority_name(new).to_string(),
                    at: *at,
                }),
                _ => None,
            })
            .collect()
    }

    /// Column changes of a ticket on one board, as column names
    pub fn column_events(&self, task: &TaskRecord, board: &str) -> Vec<Event> {
        let lookup = self.boards.get(board);
        let name = |id: &str| -> String {
            lookup.map(|b| b.column_name(id)).unwrap_or(id).to_string()
        };
        task.history
            .iter()
            .filter_map(|change| match change {
                Change::Column { board: b, old, new, at } if b == board => Some(Event {
                    prior: old.as_deref().map(|v| name(v)),
                    new: name(new),
                    at: *at,
                }),
                _ => None,
            })
            .collect()
    }

    /// Column ids in a ticket's history that no board in the snapshot knows
    pub fn unknown_columns<'a>(&self, task: &'a TaskRecord) -> Vec<&'a str> {
        task.history
            .iter()
            .filter_map(|change| match change {
                Change::Column { board, old, new, .. } => Some((board, old, new)),
                _ => None,
            })
            .flat_map(|(board, old, new)| {
                old.iter()
                    .chain(std::iter::once(new))
                    .filter(move |id| !self.boards.get(board).is_some_and(|b| b.knows_column(id)))
                    .map(String::as_str)
            })
            .collect()
    }

    /// The ticket's current column name on a board
    pub fn current_column(&self, task: &TaskRecord, board: &str) -> Option<String> {
        let column = task.columns.get(board)?;
        Some(match self.boards.get(board) {
            Some(b) => b.column_name(column).to_string(),
            None => column.clone(),
        })
    }

    /// Per-board column histories for the given boards
    pub fn board_histories<'a>(&'a self, task: &TaskRecord, boards: &[&'a str]) -> Vec<BoardHistory<'a>> {
        boards
            .iter()
            .map(|&board| BoardHistory {
                board,
                domain: self.board_domain(board),
                events: self.column_events(task, board),
                current: self.current_column(task, board),
            })
            .collect()
    }
}

impl ProjectResolver for Catalog {
    /// Resolves a name or hashtag, case-insensitively, to project ids
    ///
    /// `*` matches every project.
    fn resolve(&self, name: &str) -> Vec<String> {
        let condition = ProjectCondition::new(name);
        let mut ids: Vec<String> = Vec::new();
        for project in &self.projects {
            let hit = name == "*" || project.aliases.iter().any(|a| condition.matches_name(a));
            if hit && !ids.contains(&project.id) {
                ids.push(project.id.clone());
            }
        }
        ids
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PatternSet;

    fn snapshot() -> Snapshot {
        serde_json::from_str(
            r#"{
            "projects": [
                {"id": "P1", "name": "Backend", "slugs": ["be", "server"],
                 "columns": [{"id": "C1", "name": "Backlog", "sequence": 0},
                             {"id": "C2", "name": "Doing", "sequence": 10},
                             {"id": "C3", "name": "Done", "sequence": 20}]},
                {"id": "P2", "name": "Team Alpha", "slugs": ["team-alpha"]},
                {"id": "P3", "name": "Team Beta"}
            ],
            "tasks": [
                {"id": 1, "title": "One", "status": "open", "priority": "50",
                 "created_at": "2025-01-01T00:00:00Z", "updated_at": "2025-01-03T00:00:00Z",
                 "projects": ["P1", "P2"], "columns": {"P1": "C1"},
                 "history": [
                    {"field": "column", "board": "P1", "old": "C1", "new": "C2", "at": "2025-01-02T00:00:00Z"},
                    {"field": "column", "board": "P1", "old": "C2", "new": "C1", "at": "2025-01-03T00:00:00Z"},
                    {"field": "column", "board": "P9", "old": "X1", "new": "X2", "at": "2025-01-03T00:00:00Z"},
                    {"field": "priority", "old": "50", "new": "80", "at": "2025-01-02T00:00:00Z"},
                    {"field": "status", "old": "open", "new": "resolved", "at": "2025-01-02T00:00:00Z"}
                 ]}
            ]
        }"#,
        )
        .unwrap()
    }

    #[test]
    fn priority_values_map_to_names() {
        assert_eq!(priority_name("100"), "Unbreak Now!");
        assert_eq!(priority_name("0"), "Wishlist");
        assert_eq!(priority_name("High"), "High");
    }

    #[test]
    fn resolves_names_slugs_and_wildcards() {
        let catalog = Catalog::build(&snapshot(), &Config::default());
        assert_eq!(catalog.resolve("backend"), vec!["P1"]);
        assert_eq!(catalog.resolve("SERVER"), vec!["P1"]);
        assert_eq!(catalog.resolve("team*"), vec!["P2", "P3"]);
        assert_eq!(catalog.resolve("*"), vec!["P1", "P2", "P3"]);
        assert!(catalog.resolve("frontend").is_empty());
    }

    #[test]
    fn wildcard_matching_several_slugs_counts_once() {
        let catalog = Catalog::build(&snapshot(), &Config::default());
        assert_eq!(catalog.resolve("*e*"), vec!["P1", "P2", "P3"]);
    }

    #[test]
    fn column_events_use_names_and_filter_by_board() {
        let snapshot = snapshot();
        let catalog = Catalog::build(&snapshot, &Config::default());
        let task = &snapshot.tasks[0];

        let events = catalog.column_events(task, "P1");
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].prior(), Some("Backlog"));
        assert_eq!(events[0].new, "Doing");
        assert_eq!(catalog.current_column(task, "P1"), Some("Backlog".to_string()));

        // unknown board keeps raw ids
        let events = catalog.column_events(task, "P9");
        assert_eq!(events[0].new, "X2");
        assert_eq!(catalog.unknown_columns(task), vec!["X1", "X2"]);
    }

    #[test]
    fn board_histories_match_column_patterns() {
        let snapshot = snapshot();
        let catalog = Catalog::build(&snapshot, &Config::default());
        let task = &snapshot.tasks[0];

        let boards = catalog.board_histories(task, &["P1", "P9"]);
        let patterns = PatternSet::parse("from:Doing:backward", catalog.board_domain("P1")).unwrap();
        let matched = crate::domain::match_boards(&patterns, &boards);
        assert_eq!(matched.len(), 1);
        assert_eq!(matched[0].board, "P1");
    }

    #[test]
    fn priority_and_status_events() {
        let snapshot = snapshot();
        let catalog = Catalog::build(&snapshot, &Config::default());
        let task = &snapshot.tasks[0];

        let priority = catalog.priority_events(task);
        assert_eq!(priority[0].prior(), Some("Normal"));
        assert_eq!(priority[0].new, "High");
        assert!(catalog.priority_domain().moved(crate::domain::Direction::Raised, "Normal", "High"));

        let status = catalog.status_events(task);
        assert_eq!(status[0].new, "resolved");
        assert_eq!(catalog.status_domain().rank("Resolved"), Some(5));
    }

    #[test]
    fn status_catalog_replaces_fallback() {
        let mut snapshot = snapshot();
        snapshot.statuses = Some(crate::storage::StatusCatalog {
            open: vec!["open".to_string()],
            closed: vec!["resolved".to_string()],
            names: HashMap::from([
                ("open".to_string(), "Open".to_string()),
                ("resolved".to_string(), "Resolved".to_string()),
            ]),
        });
        let catalog = Catalog::build(&snapshot, &Config::default());
        assert_eq!(catalog.status_domain().rank("Resolved"), Some(1));
        assert_eq!(catalog.status_domain().rank("Blocked"), None);
        assert_eq!(catalog.status_events(&snapshot.tasks[0])[0].new, "Resolved");
    }

    #[test]
    fn config_orders_override_defaults() {
        let config = Config {
            status_order: vec!["Todo".to_string(), "Shipped".to_string()],
            priority_order: vec!["Now".to_string(), "Later".to_string()],
            ..Config::default()
        };
        let catalog = Catalog::build(&snapshot(), &config);
        assert_eq!(catalog.status_domain().rank("shipped"), Some(1));
        assert_eq!(catalog.priority_domain().rank("now"), Some(0));
        assert_eq!(catalog.priority_domain().rank("High"), None);
    }

    #[test]
    fn project_names() {
        let catalog = Catalog::build(&snapshot(), &Config::default());
        assert_eq!(catalog.project_name("P2"), Some("Team Alpha"));
        assert_eq!(catalog.project_name("P7"), None);
        assert!(catalog.board("P2").is_none());
        assert!(catalog.board("P1").is_some());
    }
}
