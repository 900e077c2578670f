//! Pattern check command
//!
//! Parses a pattern without a snapshot and prints its normalized form, one
//! OR group per line.

use anyhow::{Context, Result};

use super::output::Output;
use crate::domain::{Axis, Domain, NameMatch, PatternSet, ProjectPatternSet, RankTable};

/// Returns the domain a pattern for `axis` is parsed against
///
/// Parsing only needs the axis vocabulary, so the built-in rank tables are
/// used. Project patterns have no domain.
pub(super) fn grammar(axis: Axis) -> Option<Domain> {
    match axis {
        Axis::Column => Some(Domain::column(RankTable::new(NameMatch::Exact))),
        Axis::Priority => Some(Domain::priority(RankTable::priority())),
        Axis::Status => Some(Domain::status(RankTable::status_fallback())),
        Axis::Project => None,
    }
}

/// Parses `pattern` for `axis`, returning the printed form of each group
pub(super) fn normalize(axis: Axis, pattern: &str) -> Result<(String, Vec<String>)> {
    match grammar(axis) {
        Some(domain) => {
            let set = PatternSet::parse(pattern, &domain)?;
            let groups = set.patterns().iter().map(ToString::to_string).collect();
            Ok((set.to_string(), groups))
        }
        None => {
            let set = ProjectPatternSet::parse(pattern)?;
            let groups = set.patterns().iter().map(ToString::to_string).collect();
            Ok((set.to_string(), groups))
        }
    }
}

pub fn run(output: &Output, axis: Axis, pattern: &str) -> Result<()> {
    output.verbose_ctx("check", &format!("Parsing {} pattern: {}", axis, pattern));

    let (normalized, groups) =
        normalize(axis, pattern).with_context(|| format!("Invalid {} pattern", axis))?;

    output.verbose_ctx("check", &format!("{} group(s)", groups.len()));

    if output.is_json() {
        output.data(&serde_json::json!({
            "axis": axis.name(),
            "pattern": normalized,
            "groups": groups,
        }));
    } else {
        for group in &groups {
            output.line(group);
        }
    }

    Ok(())
}
