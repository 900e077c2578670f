//! Compiled transition patterns
//!
//! A [`PatternSet`] is an OR of [`Pattern`]s, and each pattern is an AND of
//! [`Condition`]s. The `Display` implementations print the pattern language
//! back out, so `parse(p.to_string())` yields the same structure as `p`.

use std::fmt;

use super::axis::Direction;

/// Condition types that take a state value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConditionType {
    From,
    To,
    In,
    Been,
    Never,
}

impl ConditionType {
    pub const ALL: [ConditionType; 5] = [
        ConditionType::From,
        ConditionType::To,
        ConditionType::In,
        ConditionType::Been,
        ConditionType::Never,
    ];

    pub fn keyword(&self) -> &'static str {
        match self {
            ConditionType::From => "from",
            ConditionType::To => "to",
            ConditionType::In => "in",
            ConditionType::Been => "been",
            ConditionType::Never => "never",
        }
    }

    pub fn from_keyword(keyword: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.keyword() == keyword)
    }
}

impl fmt::Display for ConditionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// What a condition tests, before negation
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ConditionKind {
    /// Left `target`, optionally with a required direction
    From {
        target: String,
        direction: Option<Direction>,
    },
    /// Entered `target`
    To { target: String },
    /// Currently in `target`
    In { target: String },
    /// Was in `target` at some point
    Been { target: String },
    /// Was never in `target`
    Never { target: String },
    /// Any single move in `direction`
    Moved(Direction),
}

/// A single condition, possibly negated with `not:`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Condition {
    pub kind: ConditionKind,
    pub negated: bool,
}

impl Condition {
    pub fn new(kind: ConditionKind) -> Self {
        Self {
            kind,
            negated: false,
        }
    }

    /// `from:TARGET` or `from:TARGET:DIRECTION`
    pub fn left(target: impl Into<String>, direction: Option<Direction>) -> Self {
        Self::new(ConditionKind::From {
            target: target.into(),
            direction,
        })
    }

    /// `to:TARGET`
    pub fn entered(target: impl Into<String>) -> Self {
        Self::new(ConditionKind::To {
            target: target.into(),
        })
    }

    /// `in:TARGET`
    pub fn currently(target: impl Into<String>) -> Self {
        Self::new(ConditionKind::In {
            target: target.into(),
        })
    }

    /// `been:TARGET`
    pub fn been(target: impl Into<String>) -> Self {
        Self::new(ConditionKind::Been {
            target: target.into(),
        })
    }

    /// `never:TARGET`
    pub fn never(target: impl Into<String>) -> Self {
        Self::new(ConditionKind::Never {
            target: target.into(),
        })
    }

    /// A bare direction keyword such as `forward` or `raised`
    pub fn moved(direction: Direction) -> Self {
        Self::new(ConditionKind::Moved(direction))
    }

    /// Returns this condition with its negation flipped
    pub fn negate(mut self) -> Self {
        self.negated = !self.negated;
        self
    }

    /// Returns the value-taking type, or None for a direction keyword
    pub fn condition_type(&self) -> Option<ConditionType> {
        match &self.kind {
            ConditionKind::From { .. } => Some(ConditionType::From),
            ConditionKind::To { .. } => Some(ConditionType::To),
            ConditionKind::In { .. } => Some(ConditionType::In),
            ConditionKind::Been { .. } => Some(ConditionType::Been),
            ConditionKind::Never { .. } => Some(ConditionType::Never),
            ConditionKind::Moved(_) => None,
        }
    }

    pub fn target(&self) -> Option<&str> {
        match &self.kind {
            ConditionKind::From { target, .. }
            | ConditionKind::To { target }
            | ConditionKind::In { target }
            | ConditionKind::Been { target }
            | ConditionKind::Never { target } => Some(target),
            ConditionKind::Moved(_) => None,
        }
    }

    pub fn direction(&self) -> Option<Direction> {
        match &self.kind {
            ConditionKind::From { direction, .. } => *direction,
            ConditionKind::Moved(direction) => Some(*direction),
            _ => None,
        }
    }

    /// Returns true if this condition only looks at the current value
    pub fn is_current_only(&self) -> bool {
        matches!(self.kind, ConditionKind::In { .. })
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.negated {
            f.write_str("not:")?;
        }
        match (&self.kind, self.condition_type(), self.target()) {
            (ConditionKind::Moved(direction), _, _) => write!(f, "{}", direction),
            (ConditionKind::From { direction: Some(d), .. }, Some(ty), Some(target)) => {
                write!(f, "{}:{}:{}", ty, target, d)
            }
            (_, Some(ty), Some(target)) => write!(f, "{}:{}", ty, target),
            _ => Ok(()),
        }
    }
}

/// Conditions that must all hold (AND)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Pattern {
    conditions: Vec<Condition>,
}

impl Pattern {
    /// Creates a pattern, or None if `conditions` is empty
    pub fn new(conditions: Vec<Condition>) -> Option<Self> {
        if conditions.is_empty() {
            None
        } else {
            Some(Self { conditions })
        }
    }

    pub fn conditions(&self) -> &[Condition] {
        &self.conditions
    }

    pub fn len(&self) -> usize {
        self.conditions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, condition) in self.conditions.iter().enumerate() {
            if i > 0 {
                f.write_str("+")?;
            }
            write!(f, "{}", condition)?;
        }
        Ok(())
    }
}

/// Patterns of which at least one must hold (OR)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PatternSet {
    patterns: Vec<Pattern>,
}

impl PatternSet {
    /// Creates a pattern set, or None if `patterns` is empty
    pub fn new(patterns: Vec<Pattern>) -> Option<Self> {
        if patterns.is_empty() {
            None
        } else {
            Some(Self { patterns })
        }
    }

    pub fn patterns(&self) -> &[Pattern] {
        &self.patterns
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Iterates over every condition of every pattern
    pub fn conditions(&self) -> impl Iterator<Item = &Condition> {
        self.patterns.iter().flat_map(|p| p.conditions.iter())
    }
}

impl fmt::Display for PatternSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, pattern) in self.patterns.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{}", pattern)?;
        }
        Ok(())
    }
}
