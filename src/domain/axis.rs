//! Axes a ticket can move along, and the rank tables that order them
//!
//! Three axes are ordered (board column, priority, status) and share one
//! pattern engine. The project/tag axis is unordered and has its own matcher
//! in [`super::project`].
//!
//! A [`Domain`] bundles everything the engine needs to know about an ordered
//! axis: which direction keywords it accepts, how names compare, and the
//! rank of every known state. Domains are built once per invocation and
//! passed by reference.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use super::condition::ConditionType;

/// One axis of classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    Column,
    Priority,
    Status,
    Project,
}

impl Axis {
    /// Returns the lowercase name used in messages and on the command line
    pub fn name(&self) -> &'static str {
        match self {
            Axis::Column => "column",
            Axis::Priority => "priority",
            Axis::Status => "status",
            Axis::Project => "project",
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Axis {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "column" | "columns" => Ok(Axis::Column),
            "priority" => Ok(Axis::Priority),
            "status" => Ok(Axis::Status),
            "project" | "tag" => Ok(Axis::Project),
            other => Err(format!(
                "unknown axis '{}', expected one of: column, priority, status, project",
                other
            )),
        }
    }
}

/// A named movement between two ranked states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Forward,
    Backward,
    Raised,
    Lowered,
}

impl Direction {
    /// Returns the keyword as written in patterns
    pub fn keyword(&self) -> &'static str {
        match self {
            Direction::Forward => "forward",
            Direction::Backward => "backward",
            Direction::Raised => "raised",
            Direction::Lowered => "lowered",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// How state names are compared on an axis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameMatch {
    /// Byte-for-byte (column names come from a live board)
    Exact,
    /// Case-insensitive (priority and status names)
    IgnoreCase,
}

impl NameMatch {
    /// Compares two state names under this rule
    pub fn eq(&self, a: &str, b: &str) -> bool {
        match self {
            NameMatch::Exact => a == b,
            NameMatch::IgnoreCase => a.to_lowercase() == b.to_lowercase(),
        }
    }

    fn key(&self, name: &str) -> String {
        match self {
            NameMatch::Exact => name.to_string(),
            NameMatch::IgnoreCase => name.to_lowercase(),
        }
    }
}

/// Default priority ranking, most urgent first
pub const PRIORITY_ORDER: [&str; 6] = ["unbreak now!", "triage", "high", "normal", "low", "wishlist"];

/// Status ranking used when the tracker does not provide its status list
pub const FALLBACK_STATUS_ORDER: [&str; 6] =
    ["open", "blocked", "wontfix", "invalid", "duplicate", "resolved"];

/// Immutable mapping from state name to rank
#[derive(Debug, Clone, PartialEq)]
pub struct RankTable {
    names: NameMatch,
    ranks: HashMap<String, i64>,
}

impl RankTable {
    /// Creates an empty table
    pub fn new(names: NameMatch) -> Self {
        Self {
            names,
            ranks: HashMap::new(),
        }
    }

    /// Builds a table ranking names by their position in `order`
    ///
    /// A name listed twice takes its last position.
    pub fn from_order<S: AsRef<str>>(names: NameMatch, order: &[S]) -> Self {
        Self::from_pairs(names, order.iter().enumerate().map(|(rank, name)| (name, rank as i64)))
    }

    /// Builds a table from explicit `(name, rank)` pairs
    pub fn from_pairs<S: AsRef<str>>(names: NameMatch, pairs: impl IntoIterator<Item = (S, i64)>) -> Self {
        let mut table = Self::new(names);
        for (name, rank) in pairs {
            let key = table.names.key(name.as_ref());
            table.ranks.insert(key, rank);
        }
        table
    }

    /// The built-in priority ranking (0 = most urgent)
    pub fn priority() -> Self {
        Self::from_order(NameMatch::IgnoreCase, &PRIORITY_ORDER)
    }

    /// The fallback status ranking (open statuses before closed ones)
    pub fn status_fallback() -> Self {
        Self::from_order(NameMatch::IgnoreCase, &FALLBACK_STATUS_ORDER)
    }

    /// Builds the status ranking from the tracker's status catalog
    ///
    /// Open statuses come first in listed order, closed statuses after them.
    /// Keys are translated to display names through `display` when present.
    pub fn status_from_catalog(
        open: &[String],
        closed: &[String],
        display: &HashMap<String, String>,
    ) -> Self {
        let order: Vec<&str> = open
            .iter()
            .chain(closed.iter())
            .map(|key| display.get(key).map(String::as_str).unwrap_or(key.as_str()))
            .collect();
        if order.is_empty() {
            return Self::status_fallback();
        }
        Self::from_order(NameMatch::IgnoreCase, &order)
    }

    /// Returns the rank of a state, or None if the state is unknown
    pub fn get(&self, name: &str) -> Option<i64> {
        if name.is_empty() {
            return None;
        }
        self.ranks.get(&self.names.key(name)).copied()
    }

    /// Returns the name comparison rule of this table
    pub fn name_match(&self) -> NameMatch {
        self.names
    }

    /// Returns the number of ranked states
    pub fn len(&self) -> usize {
        self.ranks.len()
    }

    /// Returns true if no state is ranked
    pub fn is_empty(&self) -> bool {
        self.ranks.is_empty()
    }
}

/// Descriptor of one ordered axis
#[derive(Debug, Clone, PartialEq)]
pub struct Domain {
    axis: Axis,
    /// Keyword that holds when the rank goes up
    ascending: Direction,
    /// Keyword that holds when the rank goes down
    descending: Direction,
    ranks: RankTable,
}

impl Domain {
    /// Board column axis: a higher rank is a later column
    pub fn column(ranks: RankTable) -> Self {
        Self {
            axis: Axis::Column,
            ascending: Direction::Forward,
            descending: Direction::Backward,
            ranks,
        }
    }

    /// Priority axis: rank 0 is most urgent, so "raised" means the rank went down
    pub fn priority(ranks: RankTable) -> Self {
        Self {
            axis: Axis::Priority,
            ascending: Direction::Lowered,
            descending: Direction::Raised,
            ranks,
        }
    }

    /// Status axis: rank follows workflow progression, so "raised" means it went up
    pub fn status(ranks: RankTable) -> Self {
        Self {
            axis: Axis::Status,
            ascending: Direction::Raised,
            descending: Direction::Lowered,
            ranks,
        }
    }

    pub fn axis(&self) -> Axis {
        self.axis
    }

    pub fn name(&self) -> &'static str {
        self.axis.name()
    }

    /// Condition types that take a value on this axis
    pub fn valid_types(&self) -> &'static [ConditionType] {
        &ConditionType::ALL
    }

    /// The two direction keywords of this axis, in the order they are documented
    pub fn direction_keywords(&self) -> [Direction; 2] {
        match self.axis {
            Axis::Column => [Direction::Forward, Direction::Backward],
            _ => [Direction::Raised, Direction::Lowered],
        }
    }

    /// Looks up a direction keyword accepted by this axis
    pub fn direction(&self, keyword: &str) -> Option<Direction> {
        self.direction_keywords()
            .into_iter()
            .find(|d| d.keyword() == keyword)
    }

    /// Returns the rank of a state, or None if it is unknown
    pub fn rank(&self, name: &str) -> Option<i64> {
        self.ranks.get(name)
    }

    pub fn ranks(&self) -> &RankTable {
        &self.ranks
    }

    /// Compares two state names under this axis' case rule
    pub fn same_state(&self, a: &str, b: &str) -> bool {
        self.ranks.name_match().eq(a, b)
    }

    /// Returns true if moving from `prior` to `new` is a `direction` move
    ///
    /// Unknown states never satisfy a direction.
    pub fn moved(&self, direction: Direction, prior: &str, new: &str) -> bool {
        let (Some(from), Some(to)) = (self.rank(prior), self.rank(new)) else {
            return false;
        };
        if direction == self.ascending {
            to > from
        } else if direction == self.descending {
            to < from
        } else {
            false
        }
    }
}
