//! Condition evaluation and pattern matching
//!
//! Evaluation is pure and total: it never fails, and a state missing from
//! the rank table simply never satisfies a direction. Each condition is first
//! evaluated as written, then flipped if it carries `not:`.
//!
//! Matching returns the pattern that matched together with the event that
//! satisfied each of its conditions, so callers can explain a match without
//! walking the structure a second time.

use super::axis::{Direction, Domain};
use super::condition::{Condition, ConditionKind, Pattern, PatternSet};
use super::event::Event;

/// Outcome of one condition, with the event that made it hold
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Verdict {
    holds: bool,
    /// Index into the event slice. Only set for a non-negated existential
    /// condition that holds.
    witness: Option<usize>,
}

impl Verdict {
    fn found(index: Option<usize>) -> Self {
        Self {
            holds: index.is_some(),
            witness: index,
        }
    }

    fn plain(holds: bool) -> Self {
        Self {
            holds,
            witness: None,
        }
    }
}

/// Evaluates one condition against a ticket's history and current value
pub fn evaluate(condition: &Condition, events: &[Event], current: Option<&str>, domain: &Domain) -> bool {
    verdict(condition, events, current, domain).holds
}

fn verdict(condition: &Condition, events: &[Event], current: Option<&str>, domain: &Domain) -> Verdict {
    let raw = match &condition.kind {
        ConditionKind::From { target, direction } => {
            Verdict::found(find(events, |e| left(e, target, *direction, domain)))
        }
        ConditionKind::To { target } => {
            Verdict::found(find(events, |e| domain.same_state(&e.new, target)))
        }
        ConditionKind::In { target } => {
            Verdict::plain(current.is_some_and(|c| domain.same_state(c, target)))
        }
        ConditionKind::Been { target } => Verdict::found(find(events, |e| visited(e, target, domain))),
        ConditionKind::Never { target } => {
            Verdict::plain(!events.iter().any(|e| visited(e, target, domain)))
        }
        ConditionKind::Moved(direction) => {
            Verdict::found(find(events, |e| moved(e, *direction, domain)))
        }
    };

    if condition.negated {
        Verdict::plain(!raw.holds)
    } else {
        raw
    }
}

fn find(events: &[Event], predicate: impl Fn(&Event) -> bool) -> Option<usize> {
    events.iter().position(predicate)
}

fn left(event: &Event, target: &str, direction: Option<Direction>, domain: &Domain) -> bool {
    let Some(prior) = event.prior() else {
        return false;
    };
    if !domain.same_state(prior, target) {
        return false;
    }
    match direction {
        None => true,
        Some(direction) => domain.moved(direction, prior, &event.new),
    }
}

fn visited(event: &Event, target: &str, domain: &Domain) -> bool {
    event.endpoints().any(|value| domain.same_state(value, target))
}

fn moved(event: &Event, direction: Direction, domain: &Domain) -> bool {
    event
        .prior()
        .is_some_and(|prior| domain.moved(direction, prior, &event.new))
}

/// A pattern that matched, with supporting events per condition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternMatch<'a> {
    /// Position of the pattern within its set
    pub index: usize,
    pub pattern: &'a Pattern,
    /// For each condition, the event that satisfied it (None for conditions
    /// that hold without a single witnessing event, such as `in:` or `never:`)
    pub witnesses: Vec<Option<usize>>,
}

impl PatternMatch<'_> {
    /// Returns the witnessing events, paired with the condition they satisfied
    pub fn evidence<'e>(&self, events: &'e [Event]) -> Vec<(&Condition, &'e Event)> {
        self.pattern
            .conditions()
            .iter()
            .zip(&self.witnesses)
            .filter_map(|(condition, witness)| witness.and_then(|i| events.get(i)).map(|e| (condition, e)))
            .collect()
    }
}

impl Pattern {
    /// Returns true if every condition holds
    pub fn matches(&self, events: &[Event], current: Option<&str>, domain: &Domain) -> bool {
        self.conditions()
            .iter()
            .all(|c| evaluate(c, events, current, domain))
    }

    /// Evaluates every condition, stopping at the first that fails
    fn witnesses(&self, events: &[Event], current: Option<&str>, domain: &Domain) -> Option<Vec<Option<usize>>> {
        let mut witnesses = Vec::with_capacity(self.len());
        for condition in self.conditions() {
            let v = verdict(condition, events, current, domain);
            if !v.holds {
                return None;
            }
            witnesses.push(v.witness);
        }
        Some(witnesses)
    }
}

impl PatternSet {
    /// Returns true if at least one pattern matches
    pub fn matches(&self, events: &[Event], current: Option<&str>, domain: &Domain) -> bool {
        self.find_match(events, current, domain).is_some()
    }

    /// Returns the first pattern that matches, or None if none does
    pub fn find_match(&self, events: &[Event], current: Option<&str>, domain: &Domain) -> Option<PatternMatch<'_>> {
        self.patterns().iter().enumerate().find_map(|(index, pattern)| {
            pattern
                .witnesses(events, current, domain)
                .map(|witnesses| PatternMatch {
                    index,
                    pattern,
                    witnesses,
                })
        })
    }
}
