//! Search command
//!
//! Filters the tickets of a snapshot by column, priority, status and project
//! patterns, plus title and age filters. All filters must hold.
//!
//! With `--template` the searches saved in a YAML file run one after another
//! against the same snapshot. Flags given on the command line override the
//! values of every saved search.

use std::collections::BTreeSet;
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{DateTime, Duration, Utc};
use clap::Args;
use serde::Serialize;

use super::check::grammar;
use super::output::Output;
use crate::domain::{
    match_boards, sort_chronologically, Axis, Event, PatternSet, ProjectPatternSet, ResolvedProjects,
};
use crate::storage::{
    priority_name, Catalog, Change, Config, SearchTemplate, Snapshot, TaskRecord, TemplateSearch,
};

/// Above this many tickets a search reports how much it is about to scan
const LARGE_SNAPSHOT: usize = 1000;

#[derive(Args, Debug, Default, Clone)]
pub struct SearchArgs {
    /// Column pattern, e.g. "from:Doing:backward,in:Done"
    #[arg(long)]
    pub column: Option<String>,

    /// Priority pattern, e.g. "raised+not:in:Low"
    #[arg(long)]
    pub priority: Option<String>,

    /// Status pattern, e.g. "to:Resolved"
    #[arg(long)]
    pub status: Option<String>,

    /// Project pattern, e.g. "Team*+Backend"; "*" disables project filtering
    #[arg(long)]
    pub tag: Option<String>,

    /// Case-insensitive text the title must contain
    #[arg(long, short)]
    pub query: Option<String>,

    /// Only tickets created within this many days
    #[arg(long, value_name = "DAYS")]
    pub created_after: Option<u32>,

    /// Only tickets updated within this many days
    #[arg(long, value_name = "DAYS")]
    pub updated_after: Option<u32>,

    /// Include the recorded changes of each ticket
    #[arg(long)]
    pub show_history: bool,

    /// Include which boards and patterns matched
    #[arg(long)]
    pub show_metadata: bool,

    /// YAML file of saved searches to run in sequence
    #[arg(long, value_name = "FILE")]
    pub template: Option<PathBuf>,
}

impl SearchArgs {
    fn has_criteria(&self) -> bool {
        self.column.is_some()
            || self.priority.is_some()
            || self.status.is_some()
            || self.tag.is_some()
            || self.query.is_some()
            || self.created_after.is_some()
            || self.updated_after.is_some()
    }

    /// Fills every flag not given on the command line from a saved search
    fn with_template(&self, saved: &TemplateSearch) -> Self {
        Self {
            column: self.column.clone().or_else(|| saved.column.clone()),
            priority: self.priority.clone().or_else(|| saved.priority.clone()),
            status: self.status.clone().or_else(|| saved.status.clone()),
            tag: self.tag.clone().or_else(|| saved.tag.clone()),
            query: self.query.clone().or_else(|| saved.text_query.clone()),
            created_after: self.created_after.or(saved.created_after),
            updated_after: self.updated_after.or(saved.updated_after),
            show_history: self.show_history || saved.show_history,
            show_metadata: self.show_metadata || saved.show_metadata,
            template: None,
        }
    }
}

/// The instant `days` days before `now`, or the earliest time if that underflows
fn days_before(now: DateTime<Utc>, days: u32) -> DateTime<Utc> {
    Duration::try_days(i64::from(days))
        .and_then(|span| now.checked_sub_signed(span))
        .unwrap_or(DateTime::<Utc>::MIN_UTC)
}

/// Parsed filters, ready to evaluate against tickets
#[derive(Debug, Default)]
struct Filters {
    column: Option<PatternSet>,
    priority: Option<PatternSet>,
    status: Option<PatternSet>,
    tag: Option<ProjectPatternSet>,
    query: Option<String>,
    created_since: Option<DateTime<Utc>>,
    updated_since: Option<DateTime<Utc>>,
}

impl Filters {
    fn parse(args: &SearchArgs, now: DateTime<Utc>) -> Result<Self> {
        let tag = match args.tag.as_deref().map(str::trim) {
            None | Some("*") => None,
            Some(tag) => Some(
                ProjectPatternSet::parse(tag).with_context(|| format!("Invalid --tag pattern '{}'", tag))?,
            ),
        };

        Ok(Self {
            column: parse_axis(Axis::Column, args.column.as_deref())?,
            priority: parse_axis(Axis::Priority, args.priority.as_deref())?,
            status: parse_axis(Axis::Status, args.status.as_deref())?,
            tag,
            query: args.query.as_ref().map(|q| q.to_lowercase()),
            created_since: args.created_after.map(|days| days_before(now, days)),
            updated_since: args.updated_after.map(|days| days_before(now, days)),
        })
    }

    fn describe(&self) -> String {
        let mut parts = Vec::new();
        if let Some(tag) = &self.tag {
            parts.push(format!("tag='{}'", tag));
        }
        if let Some(query) = &self.query {
            parts.push(format!("query='{}'", query));
        }
        if let Some(since) = self.created_since {
            parts.push(format!("created-after={}", since.format("%Y-%m-%d")));
        }
        if let Some(since) = self.updated_since {
            parts.push(format!("updated-after={}", since.format("%Y-%m-%d")));
        }
        for (name, set) in [("column", &self.column), ("priority", &self.priority), ("status", &self.status)] {
            if let Some(set) = set {
                parts.push(format!("{}='{}'", name, set));
            }
        }
        parts.join(", ")
    }
}

fn parse_axis(axis: Axis, pattern: Option<&str>) -> Result<Option<PatternSet>> {
    let (Some(pattern), Some(domain)) = (pattern, grammar(axis)) else {
        return Ok(None);
    };
    let set = PatternSet::parse(pattern, &domain)
        .with_context(|| format!("Invalid --{} pattern '{}'", axis, pattern))?;
    Ok(Some(set))
}

/// Why a ticket matched
#[derive(Debug, Serialize)]
struct Metadata {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    matched_boards: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    matched_priority: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    matched_status: Option<String>,
}

#[derive(Debug, Serialize)]
struct ColumnChange {
    board: String,
    #[serde(flatten)]
    event: Event,
}

#[derive(Debug, Serialize)]
struct History {
    columns: Vec<ColumnChange>,
    priority: Vec<Event>,
    status: Vec<Event>,
}

/// One ticket in the results
#[derive(Debug, Serialize)]
struct Hit {
    id: String,
    title: String,
    status: String,
    priority: String,
    projects: Vec<String>,
    #[serde(flatten)]
    metadata: Option<Metadata>,
    #[serde(skip_serializing_if = "Option::is_none")]
    history: Option<History>,
}

/// Ids of the boards a ticket is on or has moved on, in first-seen order
fn history_boards(task: &TaskRecord) -> Vec<&str> {
    let mut boards: Vec<&str> = task.boards().collect();
    for change in &task.history {
        if let Change::Column { board, .. } = change {
            if !boards.contains(&board.as_str()) {
                boards.push(board.as_str());
            }
        }
    }
    boards
}

struct Search<'a> {
    filters: &'a Filters,
    catalog: &'a Catalog,
    resolved: Option<&'a ResolvedProjects>,
}

impl<'a> Search<'a> {
    /// Returns the metadata of a matching ticket, or None if any filter fails
    fn evaluate(&self, task: &'a TaskRecord) -> Option<Metadata> {
        let filters = self.filters;

        if let Some(query) = &filters.query {
            if !task.title.to_lowercase().contains(query) {
                return None;
            }
        }
        if filters.created_since.is_some_and(|since| task.created_at < since) {
            return None;
        }
        if filters.updated_since.is_some_and(|since| task.updated_at < since) {
            return None;
        }

        if let Some(resolved) = self.resolved {
            resolved.find_match(&task.projects)?;
        }

        let mut matched_boards = Vec::new();
        if let Some(column) = &filters.column {
            // the tag's boards when searching by tag, else the boards the ticket is on
            let candidates: Vec<&str> = match self.resolved {
                Some(resolved) => resolved.all_ids().into_iter().collect(),
                None => task.boards().collect(),
            };
            let histories = self.catalog.board_histories(task, &candidates);
            let matches = match_boards(column, &histories);
            if matches.is_empty() {
                return None;
            }
            matched_boards = matches
                .into_iter()
                .map(|m| self.catalog.project_name(&m.board).unwrap_or(&m.board).to_string())
                .collect();
        }

        let matched_priority = match &filters.priority {
            Some(set) => {
                let events = self.catalog.priority_events(task);
                let current = priority_name(&task.priority);
                let found = set.find_match(&events, Some(current), self.catalog.priority_domain())?;
                Some(found.pattern.to_string())
            }
            None => None,
        };

        let matched_status = match &filters.status {
            Some(set) => {
                let events = self.catalog.status_events(task);
                let current = self.catalog.status_name(&task.status);
                let found = set.find_match(&events, Some(current), self.catalog.status_domain())?;
                Some(found.pattern.to_string())
            }
            None => None,
        };

        Some(Metadata {
            matched_boards,
            matched_priority,
            matched_status,
        })
    }

    fn history(&self, task: &TaskRecord) -> History {
        let mut columns: Vec<ColumnChange> = history_boards(task)
            .into_iter()
            .flat_map(|board| {
                let name = self.catalog.project_name(board).unwrap_or(board).to_string();
                self.catalog
                    .column_events(task, board)
                    .into_iter()
                    .map(move |event| ColumnChange {
                        board: name.clone(),
                        event,
                    })
            })
            .collect();
        columns.sort_by_key(|c| c.event.at);

        let mut priority = self.catalog.priority_events(task);
        sort_chronologically(&mut priority);
        let mut status = self.catalog.status_events(task);
        sort_chronologically(&mut status);

        History {
            columns,
            priority,
            status,
        }
    }
}

/// A heading for a search loaded from a template
#[derive(Debug, Clone)]
struct Heading {
    title: String,
    description: Option<String>,
}

/// One parsed search, ready to run
#[derive(Debug)]
struct Plan {
    heading: Option<Heading>,
    filters: Filters,
    show_history: bool,
    show_metadata: bool,
}

impl Plan {
    fn new(args: &SearchArgs, heading: Option<Heading>, now: DateTime<Utc>) -> Result<Self> {
        if !args.has_criteria() {
            anyhow::bail!("No search criteria specified");
        }
        Ok(Self {
            heading,
            filters: Filters::parse(args, now)?,
            show_history: args.show_history,
            show_metadata: args.show_metadata,
        })
    }
}

/// Parses every search up front, so a bad pattern in any of them aborts
/// before a ticket is evaluated
fn plans(output: &Output, args: &SearchArgs, now: DateTime<Utc>) -> Result<Vec<Plan>> {
    let Some(path) = &args.template else {
        return Ok(vec![Plan::new(args, None, now)?]);
    };

    let templates = SearchTemplate::load(path)?;
    output.verbose_ctx(
        "search",
        &format!("Loaded {} search(es) from {}", templates.len(), path.display()),
    );

    templates
        .into_iter()
        .map(|template| {
            let merged = args.with_template(&template.search);
            let heading = Heading {
                title: template.title,
                description: template.description,
            };
            let title = heading.title.clone();
            Plan::new(&merged, Some(heading), now).with_context(|| format!("Search '{}'", title))
        })
        .collect()
}

pub fn run(output: &Output, args: &SearchArgs, snapshot: Option<PathBuf>, config: &Config) -> Result<()> {
    let plans = plans(output, args, Utc::now())?;
    for plan in &plans {
        output.verbose_ctx("search", &format!("Filters: {}", plan.filters.describe()));
    }

    let path = snapshot
        .context("No snapshot given; pass --snapshot, set TQ_SNAPSHOT or set 'snapshot' in config.toml")?;
    output.verbose_ctx("search", &format!("Loading snapshot: {}", path.display()));
    let snapshot = Snapshot::load(&path)?;
    let catalog = Catalog::build(&snapshot, config);

    if snapshot.tasks.len() > LARGE_SNAPSHOT {
        output.warn(&format!(
            "Filtering {} tasks; every ticket's history is evaluated",
            snapshot.tasks.len()
        ));
    }

    for (index, plan) in plans.iter().enumerate() {
        let hits = execute(output, plan, &snapshot, &catalog)?;
        report(output, plan, &hits, index == 0);
    }

    Ok(())
}

fn has_column_history(task: &TaskRecord) -> bool {
    task.history.iter().any(|c| matches!(c, Change::Column { .. }))
}

fn execute(output: &Output, plan: &Plan, snapshot: &Snapshot, catalog: &Catalog) -> Result<Vec<Hit>> {
    let filters = &plan.filters;
    let resolved = filters
        .tag
        .as_ref()
        .map(|tag| tag.resolve(catalog))
        .transpose()?;
    if let Some(resolved) = &resolved {
        output.verbose_ctx(
            "search",
            &format!("Tag resolved to {} project(s)", resolved.all_ids().len()),
        );
    }

    // without an `in:` condition a column pattern can only hold through history
    let column_needs_history = filters
        .column
        .as_ref()
        .is_some_and(|set| !set.conditions().any(|c| c.is_current_only()));

    let search = Search {
        filters,
        catalog,
        resolved: resolved.as_ref(),
    };

    let mut unknown_columns = BTreeSet::new();
    let mut hits = Vec::new();
    for task in &snapshot.tasks {
        if column_needs_history && output.is_verbose() && !has_column_history(task) {
            output.verbose_ctx(
                "search",
                &format!("{} has no column history; only negated and never: conditions can hold", task.monogram()),
            );
        }

        let Some(metadata) = search.evaluate(task) else {
            continue;
        };
        unknown_columns.extend(catalog.unknown_columns(task));
        hits.push(Hit {
            id: task.monogram(),
            title: task.title.clone(),
            status: catalog.status_name(&task.status).to_string(),
            priority: priority_name(&task.priority).to_string(),
            projects: task
                .projects
                .iter()
                .map(|id| catalog.project_name(id).unwrap_or(id).to_string())
                .collect(),
            metadata: plan.show_metadata.then_some(metadata),
            history: plan.show_history.then(|| search.history(task)),
        });
    }

    if filters.column.is_some() || plan.show_history {
        for id in &unknown_columns {
            output.warn(&format!("Column '{}' is not on any board in the snapshot; kept as its id", id));
        }
    }

    output.verbose_ctx(
        "search",
        &format!("Found {} matches out of {} tasks", hits.len(), snapshot.tasks.len()),
    );
    Ok(hits)
}

fn report(output: &Output, plan: &Plan, hits: &[Hit], first: bool) {
    if output.is_json() {
        match &plan.heading {
            Some(heading) => output.data(&serde_json::json!({
                "title": heading.title,
                "description": heading.description,
                "tasks": hits,
            })),
            None => output.data(&hits),
        }
        return;
    }

    if let Some(heading) = &plan.heading {
        if !first {
            output.line("");
        }
        output.line(&format!("== {} ==", heading.title));
        if let Some(description) = &heading.description {
            output.line(description);
        }
    }

    if hits.is_empty() {
        output.line("No matching tasks.");
    } else {
        for hit in hits {
            print_hit(output, hit);
        }
        output.line("");
        output.line(&format!("Found {} task(s)", hits.len()));
    }
}

fn print_hit(output: &Output, hit: &Hit) {
    output.line(&format!("{}  {}  {}  {}", hit.id, hit.status, hit.priority, hit.title));

    if let Some(metadata) = &hit.metadata {
        if !metadata.matched_boards.is_empty() {
            output.line(&format!("    matched boards: {}", metadata.matched_boards.join(", ")));
        }
        if let Some(pattern) = &metadata.matched_priority {
            output.line(&format!("    matched priority: {}", pattern));
        }
        if let Some(pattern) = &metadata.matched_status {
            output.line(&format!("    matched status: {}", pattern));
        }
    }

    if let Some(history) = &hit.history {
        for change in &history.columns {
            output.line(&format!("    column {}: {}", change.board, describe(&change.event)));
        }
        for event in &history.priority {
            output.line(&format!("    priority: {}", describe(event)));
        }
        for event in &history.status {
            output.line(&format!("    status: {}", describe(event)));
        }
    }
}

fn describe(event: &Event) -> String {
    let date = event.at.format("%Y-%m-%d");
    match event.prior() {
        Some(prior) => format!("{} -> {} ({})", prior, event.new, date),
        None => format!("-> {} ({})", event.new, date),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot() -> Snapshot {
        serde_json::from_str(
            r#"{
            "projects": [
                {"id": "P1", "name": "Backend",
                 "columns": [{"id": "C1", "name": "Backlog", "sequence": 0},
                             {"id": "C2", "name": "Doing", "sequence": 1},
                             {"id": "C3", "name": "Done", "sequence": 2}]},
                {"id": "P2", "name": "Frontend",
                 "columns": [{"id": "F1", "name": "Backlog", "sequence": 0},
                             {"id": "F2", "name": "Done", "sequence": 1}]}
            ],
            "tasks": [
                {"id": 1, "title": "Bounced back", "status": "open", "priority": "80",
                 "created_at": "2025-01-01T00:00:00Z", "updated_at": "2025-01-05T00:00:00Z",
                 "projects": ["P1", "P2"], "columns": {"P1": "C1", "P2": "F2"},
                 "history": [
                    {"field": "column", "board": "P1", "old": "C1", "new": "C2", "at": "2025-01-02T00:00:00Z"},
                    {"field": "column", "board": "P1", "old": "C2", "new": "C1", "at": "2025-01-03T00:00:00Z"},
                    {"field": "column", "board": "P2", "old": "F1", "new": "F2", "at": "2025-01-03T00:00:00Z"},
                    {"field": "priority", "old": "50", "new": "80", "at": "2025-01-02T00:00:00Z"}
                 ]},
                {"id": 2, "title": "Straight through", "status": "resolved", "priority": "50",
                 "created_at": "2025-01-01T00:00:00Z", "updated_at": "2025-01-02T00:00:00Z",
                 "projects": ["P1"], "columns": {"P1": "C3"},
                 "history": [
                    {"field": "column", "board": "P1", "old": "C1", "new": "C3", "at": "2025-01-02T00:00:00Z"},
                    {"field": "status", "old": "open", "new": "resolved", "at": "2025-01-02T00:00:00Z"}
                 ]}
            ]
        }"#,
        )
        .unwrap()
    }

    fn matching(args: SearchArgs) -> Vec<u64> {
        let snapshot = snapshot();
        let catalog = Catalog::build(&snapshot, &Config::default());
        let now = "2025-01-06T00:00:00Z".parse().unwrap();
        let filters = Filters::parse(&args, now).unwrap();
        let resolved = filters.tag.as_ref().map(|t| t.resolve(&catalog).unwrap());
        let search = Search {
            filters: &filters,
            catalog: &catalog,
            resolved: resolved.as_ref(),
        };
        snapshot
            .tasks
            .iter()
            .filter(|t| search.evaluate(t).is_some())
            .map(|t| t.id)
            .collect()
    }

    #[test]
    fn requires_criteria() {
        assert!(!SearchArgs::default().has_criteria());
        let args = SearchArgs {
            show_history: true,
            ..Default::default()
        };
        assert!(!args.has_criteria());
    }

    #[test]
    fn column_backward_move() {
        let args = SearchArgs {
            column: Some("backward".to_string()),
            ..Default::default()
        };
        assert_eq!(matching(args), vec![1]);
    }

    #[test]
    fn column_patterns_are_evaluated_per_board() {
        // ticket 1 is in Done only on the Frontend board
        let args = SearchArgs {
            column: Some("in:Done+been:Doing".to_string()),
            ..Default::default()
        };
        assert!(matching(args).is_empty());

        let args = SearchArgs {
            column: Some("in:Done".to_string()),
            ..Default::default()
        };
        assert_eq!(matching(args), vec![1, 2]);
    }

    #[test]
    fn tag_limits_candidate_boards() {
        let args = SearchArgs {
            column: Some("in:Done".to_string()),
            tag: Some("backend".to_string()),
            ..Default::default()
        };
        assert_eq!(matching(args), vec![2]);
    }

    #[test]
    fn wildcard_tag_is_no_filter() {
        let args = SearchArgs {
            tag: Some("*".to_string()),
            ..Default::default()
        };
        assert_eq!(matching(args), vec![1, 2]);
    }

    #[test]
    fn priority_and_status_use_names() {
        let args = SearchArgs {
            priority: Some("raised+in:High".to_string()),
            ..Default::default()
        };
        assert_eq!(matching(args), vec![1]);

        let args = SearchArgs {
            status: Some("to:Resolved".to_string()),
            ..Default::default()
        };
        assert_eq!(matching(args), vec![2]);
    }

    #[test]
    fn text_and_age_filters() {
        let args = SearchArgs {
            query: Some("BOUNCED".to_string()),
            ..Default::default()
        };
        assert_eq!(matching(args), vec![1]);

        let args = SearchArgs {
            updated_after: Some(2),
            ..Default::default()
        };
        assert_eq!(matching(args), vec![1]);
    }

    #[test]
    fn metadata_names_matching_boards() {
        let snapshot = snapshot();
        let catalog = Catalog::build(&snapshot, &Config::default());
        let args = SearchArgs {
            column: Some("been:Backlog".to_string()),
            priority: Some("raised".to_string()),
            ..Default::default()
        };
        let filters = Filters::parse(&args, Utc::now()).unwrap();
        let search = Search {
            filters: &filters,
            catalog: &catalog,
            resolved: None,
        };
        let metadata = search.evaluate(&snapshot.tasks[0]).unwrap();
        assert_eq!(metadata.matched_boards, vec!["Backend", "Frontend"]);
        assert_eq!(metadata.matched_priority.as_deref(), Some("raised"));
        assert!(metadata.matched_status.is_none());
    }

    #[test]
    fn history_is_chronological() {
        let snapshot = snapshot();
        let catalog = Catalog::build(&snapshot, &Config::default());
        let filters = Filters::default();
        let search = Search {
            filters: &filters,
            catalog: &catalog,
            resolved: None,
        };
        let history = search.history(&snapshot.tasks[0]);
        let moves: Vec<_> = history.columns.iter().map(|c| (c.board.as_str(), c.event.new.as_str())).collect();
        assert_eq!(moves, vec![("Backend", "Doing"), ("Backend", "Backlog"), ("Frontend", "Done")]);
        assert_eq!(history.priority[0].new, "High");
    }

    #[test]
    fn huge_day_counts_reach_back_to_the_earliest_time() {
        let args = SearchArgs {
            created_after: Some(u32::MAX),
            updated_after: Some(u32::MAX),
            ..Default::default()
        };
        let filters = Filters::parse(&args, Utc::now()).unwrap();
        assert_eq!(filters.created_since, Some(DateTime::<Utc>::MIN_UTC));
        assert_eq!(filters.updated_since, Some(DateTime::<Utc>::MIN_UTC));
        assert_eq!(matching(args), vec![1, 2]);
    }

    #[test]
    fn boards_left_behind_are_not_searched() {
        let snapshot: Snapshot = serde_json::from_str(
            r#"{
            "projects": [
                {"id": "P1", "name": "Backend",
                 "columns": [{"id": "C1", "name": "Backlog", "sequence": 0}]},
                {"id": "P2", "name": "Ops",
                 "columns": [{"id": "D1", "name": "Todo", "sequence": 0},
                             {"id": "D2", "name": "Done", "sequence": 1}]}
            ],
            "tasks": [
                {"id": 9, "title": "Moved away", "status": "open", "priority": "50",
                 "created_at": "2025-01-01T00:00:00Z", "updated_at": "2025-01-02T00:00:00Z",
                 "projects": ["P1", "P2"], "columns": {"P1": "C1"},
                 "history": [
                    {"field": "column", "board": "P2", "old": "D1", "new": "D2", "at": "2025-01-02T00:00:00Z"}
                 ]}
            ]
        }"#,
        )
        .unwrap();
        let catalog = Catalog::build(&snapshot, &Config::default());
        let task = &snapshot.tasks[0];

        let args = SearchArgs {
            column: Some("been:Done".to_string()),
            ..Default::default()
        };
        let filters = Filters::parse(&args, Utc::now()).unwrap();
        let search = Search {
            filters: &filters,
            catalog: &catalog,
            resolved: None,
        };
        assert!(search.evaluate(task).is_none());

        // a tag naming the board brings it back into the search
        let args = SearchArgs {
            column: Some("been:Done".to_string()),
            tag: Some("ops".to_string()),
            ..Default::default()
        };
        let filters = Filters::parse(&args, Utc::now()).unwrap();
        let resolved = filters.tag.as_ref().map(|t| t.resolve(&catalog).unwrap());
        let search = Search {
            filters: &filters,
            catalog: &catalog,
            resolved: resolved.as_ref(),
        };
        let metadata = search.evaluate(task).unwrap();
        assert_eq!(metadata.matched_boards, vec!["Ops"]);

        // history still shows every board
        assert_eq!(search.history(task).columns[0].board, "Ops");
    }

    #[test]
    fn command_line_flags_override_saved_searches() {
        let args = SearchArgs {
            column: Some("in:Done".to_string()),
            show_history: true,
            ..Default::default()
        };
        let saved = TemplateSearch {
            column: Some("backward".to_string()),
            priority: Some("raised".to_string()),
            text_query: Some("login".to_string()),
            created_after: Some(3),
            show_metadata: true,
            ..Default::default()
        };

        let merged = args.with_template(&saved);
        assert_eq!(merged.column.as_deref(), Some("in:Done"));
        assert_eq!(merged.priority.as_deref(), Some("raised"));
        assert_eq!(merged.query.as_deref(), Some("login"));
        assert_eq!(merged.created_after, Some(3));
        assert!(merged.show_history && merged.show_metadata);
        assert!(merged.template.is_none());
    }

    #[test]
    fn saved_search_without_criteria_is_named() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("searches.yaml");
        std::fs::write(&path, "title: First\nsearch:\n  status: in:Open\n---\ntitle: Empty\nsearch:\n  show-history: true\n").unwrap();

        let args = SearchArgs {
            template: Some(path),
            ..Default::default()
        };
        let output = Output::new(crate::cli::OutputFormat::Text, false);
        let err = plans(&output, &args, Utc::now()).unwrap_err();
        assert_eq!(format!("{:#}", err), "Search 'Empty': No search criteria specified");
    }

    #[test]
    fn invalid_pattern_names_the_flag() {
        let args = SearchArgs {
            status: Some("forward".to_string()),
            ..Default::default()
        };
        let err = Filters::parse(&args, Utc::now()).unwrap_err();
        assert!(format!("{:#}", err).starts_with("Invalid --status pattern 'forward'"));
    }
}
