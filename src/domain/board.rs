//! Column patterns across several workboards
//!
//! A ticket can sit on many boards at once, each with its own columns. A
//! column pattern is evaluated per board, against that board's column moves
//! and ranks, and the ticket matches if any board does.

use super::axis::Domain;
use super::condition::PatternSet;
use super::event::Event;

/// A ticket's column history on one board
#[derive(Debug, Clone)]
pub struct BoardHistory<'a> {
    pub board: &'a str,
    pub domain: &'a Domain,
    /// Column moves made on this board only
    pub events: Vec<Event>,
    /// Column the ticket is in on this board
    pub current: Option<String>,
}

/// A board on which the column pattern matched
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardMatch {
    pub board: String,
    /// Index of the pattern that matched on this board
    pub pattern: usize,
}

/// Returns every board on which `patterns` matches, in input order
pub fn match_boards(patterns: &PatternSet, boards: &[BoardHistory<'_>]) -> Vec<BoardMatch> {
    boards
        .iter()
        .filter_map(|b| {
            patterns
                .find_match(&b.events, b.current.as_deref(), b.domain)
                .map(|m| BoardMatch {
                    board: b.board.to_string(),
                    pattern: m.index,
                })
        })
        .collect()
}
