//! Transition pattern engine
//!
//! Pure parsing and matching, without any I/O. Callers supply a pattern
//! string once, then per ticket its change history and current value.

mod axis;
mod board;
mod condition;
mod event;
mod matcher;
mod parser;
mod project;

pub use axis::{Axis, Direction, Domain, NameMatch, RankTable, FALLBACK_STATUS_ORDER, PRIORITY_ORDER};
pub use board::{match_boards, BoardHistory, BoardMatch};
pub use condition::{Condition, ConditionKind, ConditionType, Pattern, PatternSet};
pub use event::{sort_chronologically, Event};
pub use matcher::{evaluate, PatternMatch};
pub use parser::{parse, PatternError};
pub use project::{
    ProjectCondition, ProjectError, ProjectPattern, ProjectPatternSet, ProjectResolver,
    ResolvedProjects,
};
