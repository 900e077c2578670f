//! Ticket Query - filter tracker tickets by how they moved
//!
//! Tickets move along board columns, priorities and statuses. `tq` parses
//! small filter patterns (`from:Doing:backward`, `not:been:Blocked`,
//! `raised`, `Team*+Backend`) and evaluates them against each ticket's
//! recorded change history and current values.

pub mod domain;
pub mod storage;
pub mod cli;

pub use domain::{Axis, Domain, Event, PatternError, PatternSet, ProjectPatternSet, RankTable};
