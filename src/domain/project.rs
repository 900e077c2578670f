//! Project/tag patterns
//!
//! The project axis is unordered: a pattern is a list of project names or
//! `*` wildcards joined with `+` (AND) and `,` (OR). There are no condition
//! types, negation or directions.
//!
//! Patterns can be matched two ways:
//! - by name, against the names a ticket's projects are known by
//!   ([`ProjectPatternSet::find_match`]);
//! - by identifier, after resolving each name to project ids through a
//!   [`ProjectResolver`] ([`ProjectPatternSet::resolve`]). An AND pattern then
//!   becomes the cartesian product of its names' id sets, and a ticket matches
//!   if its ids contain at least one combination.

use std::collections::{BTreeSet, HashSet};
use std::fmt;

use thiserror::Error;
use wildmatch::WildMatchPattern;

use super::axis::Axis;
use super::parser::{split_groups, PatternError};

/// Wildcard matcher with `*` as the only metacharacter
type Glob = WildMatchPattern<'*', '\u{0}'>;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ProjectError {
    #[error("No projects matched '{name}' in tag pattern '{pattern}'")]
    Unresolved { name: String, pattern: String },
}

/// Resolves a project name or wildcard to project identifiers
pub trait ProjectResolver {
    /// Returns the ids of every project matching `name`; empty if none do
    fn resolve(&self, name: &str) -> Vec<String>;
}

/// A project name or `*` wildcard
#[derive(Debug, Clone)]
pub struct ProjectCondition {
    raw: String,
    glob: Option<Glob>,
}

impl ProjectCondition {
    pub fn new(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let glob = raw.contains('*').then(|| Glob::new(&raw.to_lowercase()));
        Self { raw, glob }
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn is_wildcard(&self) -> bool {
        self.glob.is_some()
    }

    /// Case-insensitive match against one project name
    pub fn matches_name(&self, name: &str) -> bool {
        let name = name.to_lowercase();
        match &self.glob {
            Some(glob) => glob.matches(&name),
            None => name == self.raw.to_lowercase(),
        }
    }

    /// Returns true if any of `names` matches
    pub fn matches_any<S: AsRef<str>>(&self, names: &[S]) -> bool {
        names.iter().any(|n| self.matches_name(n.as_ref()))
    }
}

impl PartialEq for ProjectCondition {
    fn eq(&self, other: &Self) -> bool {
        self.raw == other.raw
    }
}

impl Eq for ProjectCondition {}

impl fmt::Display for ProjectCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// Project conditions that must all hold (AND)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectPattern {
    conditions: Vec<ProjectCondition>,
}

impl ProjectPattern {
    pub fn conditions(&self) -> &[ProjectCondition] {
        &self.conditions
    }

    /// Returns true if every condition matches some name
    ///
    /// Different conditions may be satisfied by different projects.
    pub fn matches<S: AsRef<str>>(&self, names: &[S]) -> bool {
        self.conditions.iter().all(|c| c.matches_any(names))
    }
}

impl fmt::Display for ProjectPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<&str> = self.conditions.iter().map(ProjectCondition::as_str).collect();
        f.write_str(&parts.join("+"))
    }
}

/// Project patterns of which at least one must hold (OR)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectPatternSet {
    patterns: Vec<ProjectPattern>,
}

impl ProjectPatternSet {
    /// Parses a project pattern such as `Team*+Backend,Infra`
    pub fn parse(input: &str) -> Result<Self, PatternError> {
        let patterns = split_groups(input, Axis::Project)?
            .into_iter()
            .map(|group| ProjectPattern {
                conditions: group.into_iter().map(ProjectCondition::new).collect(),
            })
            .collect();
        Ok(Self { patterns })
    }

    pub fn patterns(&self) -> &[ProjectPattern] {
        &self.patterns
    }

    /// Returns true if some pattern matches the ticket's project names
    pub fn matches<S: AsRef<str>>(&self, names: &[S]) -> bool {
        self.find_match(names).is_some()
    }

    /// Returns the index of the first pattern matching the ticket's project names
    pub fn find_match<S: AsRef<str>>(&self, names: &[S]) -> Option<usize> {
        self.patterns.iter().position(|p| p.matches(names))
    }

    /// Resolves every name to project ids
    ///
    /// Fails on the first name that resolves to nothing.
    pub fn resolve(&self, resolver: &impl ProjectResolver) -> Result<ResolvedProjects, ProjectError> {
        let mut alternatives = Vec::with_capacity(self.patterns.len());
        for pattern in &self.patterns {
            let mut ids_by_name = Vec::with_capacity(pattern.conditions.len());
            for condition in &pattern.conditions {
                let ids = resolver.resolve(condition.as_str());
                if ids.is_empty() {
                    return Err(ProjectError::Unresolved {
                        name: condition.as_str().to_string(),
                        pattern: self.to_string(),
                    });
                }
                ids_by_name.push(ids);
            }
            alternatives.push(cartesian_product(&ids_by_name));
        }
        Ok(ResolvedProjects { alternatives })
    }
}

impl fmt::Display for ProjectPatternSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.patterns.iter().map(ToString::to_string).collect();
        f.write_str(&parts.join(","))
    }
}

/// Every way of picking one id per name
fn cartesian_product(ids_by_name: &[Vec<String>]) -> Vec<BTreeSet<String>> {
    ids_by_name.iter().fold(vec![BTreeSet::new()], |combos, ids| {
        combos
            .iter()
            .flat_map(|combo| {
                ids.iter().map(move |id| {
                    let mut next = combo.clone();
                    next.insert(id.clone());
                    next
                })
            })
            .collect()
    })
}

/// A project pattern set in identifier space
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedProjects {
    /// Per OR pattern, the id combinations that satisfy it
    alternatives: Vec<Vec<BTreeSet<String>>>,
}

impl ResolvedProjects {
    pub fn alternatives(&self) -> &[Vec<BTreeSet<String>>] {
        &self.alternatives
    }

    /// Every id mentioned by any combination
    pub fn all_ids(&self) -> BTreeSet<&str> {
        self.alternatives
            .iter()
            .flatten()
            .flatten()
            .map(String::as_str)
            .collect()
    }

    /// Returns the index of the first pattern one of whose combinations the
    /// ticket's ids contain
    pub fn find_match<S: AsRef<str>>(&self, task_ids: &[S]) -> Option<usize> {
        if task_ids.is_empty() {
            return None;
        }
        let owned: HashSet<&str> = task_ids.iter().map(AsRef::as_ref).collect();
        self.alternatives.iter().position(|combos| {
            combos
                .iter()
                .any(|combo| combo.iter().all(|id| owned.contains(id.as_str())))
        })
    }

    pub fn matches<S: AsRef<str>>(&self, task_ids: &[S]) -> bool {
        self.find_match(task_ids).is_some()
    }
}
