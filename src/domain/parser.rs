//! Pattern parser
//!
//! Grammar:
//!
//! ```text
//! pattern  := or_group (',' or_group)*
//! or_group := and_part ('+' and_part)*
//! and_part := ['not:'] body
//! body     := keyword | type ':' value [':' direction]
//! ```
//!
//! `keyword` is one of the axis' two direction keywords, `type` is one of
//! `from|to|in|been|never`, and the `direction` suffix is only legal on
//! `from`. Blank groups and parts are skipped, but a pattern that yields no
//! condition at all is an error.

use thiserror::Error;

use super::axis::{Axis, Domain};
use super::condition::{Condition, ConditionKind, ConditionType, Pattern, PatternSet};

/// Invalid pattern string
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PatternError {
    #[error("Empty {axis} pattern")]
    Empty { axis: Axis },

    #[error("No valid {axis} patterns found")]
    NoPatterns { axis: Axis },

    #[error("Invalid {axis} condition syntax: '{condition}'. Expected format: TYPE:VALUE (e.g. 'in:VALUE', 'not:in:VALUE'). Valid types: {valid}")]
    InvalidSyntax {
        axis: Axis,
        condition: String,
        valid: String,
    },

    #[error("Invalid {axis} condition type: '{found}'. Valid types: {valid}")]
    UnknownType {
        axis: Axis,
        found: String,
        valid: String,
    },

    #[error("Empty {axis} name in condition: '{condition}'")]
    MissingValue { axis: Axis, condition: String },

    #[error("Direction modifier only allowed for 'from' patterns, got: '{condition}'")]
    DirectionNotAllowed { condition: String },

    #[error("Invalid direction: '{found}'. Valid directions: {valid}")]
    InvalidDirection { found: String, valid: String },
}

const NOT_PREFIX: &str = "not:";

/// Parses a pattern string for an ordered axis
pub fn parse(input: &str, domain: &Domain) -> Result<PatternSet, PatternError> {
    let axis = domain.axis();
    let parts = split_groups(input, axis)?;

    let mut patterns = Vec::with_capacity(parts.len());
    for group in parts {
        let conditions = group
            .into_iter()
            .map(|part| parse_condition(part, domain))
            .collect::<Result<Vec<_>, _>>()?;
        patterns.extend(Pattern::new(conditions));
    }

    PatternSet::new(patterns).ok_or(PatternError::NoPatterns { axis })
}

/// Splits a pattern into OR groups of trimmed, non-empty AND parts
///
/// Shared with the project matcher, which uses the same separators.
pub(crate) fn split_groups(input: &str, axis: Axis) -> Result<Vec<Vec<&str>>, PatternError> {
    if input.trim().is_empty() {
        return Err(PatternError::Empty { axis });
    }

    let groups: Vec<Vec<&str>> = input
        .split(',')
        .map(|group| {
            group
                .split('+')
                .map(str::trim)
                .filter(|part| !part.is_empty())
                .collect::<Vec<_>>()
        })
        .filter(|group| !group.is_empty())
        .collect();

    if groups.is_empty() {
        return Err(PatternError::NoPatterns { axis });
    }
    Ok(groups)
}

fn parse_condition(part: &str, domain: &Domain) -> Result<Condition, PatternError> {
    let (negated, body) = match part.strip_prefix(NOT_PREFIX) {
        Some(rest) => (true, rest.trim()),
        None => (false, part),
    };

    let mut condition = parse_body(body, domain)?;
    condition.negated = negated;
    Ok(condition)
}

fn parse_body(body: &str, domain: &Domain) -> Result<Condition, PatternError> {
    let axis = domain.axis();

    if let Some(direction) = domain.direction(body) {
        return Ok(Condition::moved(direction));
    }

    let Some((ty, rest)) = body.split_once(':') else {
        return Err(PatternError::InvalidSyntax {
            axis,
            condition: body.to_string(),
            valid: valid_types(domain),
        });
    };

    let ty = ty.trim();
    let Some(condition_type) = ConditionType::from_keyword(ty) else {
        return Err(PatternError::UnknownType {
            axis,
            found: ty.to_string(),
            valid: valid_types(domain),
        });
    };

    let (value, direction) = match rest.split_once(':') {
        Some((value, direction)) => (value.trim(), Some(direction.trim())),
        None => (rest.trim(), None),
    };

    if value.is_empty() {
        return Err(PatternError::MissingValue {
            axis,
            condition: body.to_string(),
        });
    }
    let target = value.to_string();

    let kind = match (condition_type, direction) {
        (ConditionType::From, direction) => {
            let direction = direction
                .map(|keyword| {
                    domain
                        .direction(keyword)
                        .ok_or_else(|| PatternError::InvalidDirection {
                            found: keyword.to_string(),
                            valid: valid_directions(domain),
                        })
                })
                .transpose()?;
            ConditionKind::From { target, direction }
        }
        (_, Some(_)) => {
            return Err(PatternError::DirectionNotAllowed {
                condition: body.to_string(),
            })
        }
        (ConditionType::To, None) => ConditionKind::To { target },
        (ConditionType::In, None) => ConditionKind::In { target },
        (ConditionType::Been, None) => ConditionKind::Been { target },
        (ConditionType::Never, None) => ConditionKind::Never { target },
    };

    Ok(Condition::new(kind))
}

fn valid_types(domain: &Domain) -> String {
    domain
        .valid_types()
        .iter()
        .map(ConditionType::keyword)
        .chain(domain.direction_keywords().iter().map(|d| d.keyword()))
        .collect::<Vec<_>>()
        .join(", ")
}

fn valid_directions(domain: &Domain) -> String {
    domain
        .direction_keywords()
        .iter()
        .map(|d| d.keyword())
        .collect::<Vec<_>>()
        .join(", ")
}

impl PatternSet {
    /// Parses a pattern string for `domain`
    pub fn parse(input: &str, domain: &Domain) -> Result<Self, PatternError> {
        parse(input, domain)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::axis::{Direction, NameMatch, RankTable};

    fn column() -> Domain {
        Domain::column(RankTable::new(NameMatch::Exact))
    }

    fn priority() -> Domain {
        Domain::priority(RankTable::priority())
    }

    fn status() -> Domain {
        Domain::status(RankTable::status_fallback())
    }

    fn single(input: &str, domain: &Domain) -> Condition {
        let set = parse(input, domain).unwrap();
        assert_eq!(set.len(), 1);
        assert_eq!(set.patterns()[0].len(), 1);
        set.patterns()[0].conditions()[0].clone()
    }

    #[test]
    fn parses_keywords() {
        assert_eq!(single("forward", &column()), Condition::moved(Direction::Forward));
        assert_eq!(single("backward", &column()), Condition::moved(Direction::Backward));
        assert_eq!(single("raised", &priority()), Condition::moved(Direction::Raised));
        assert_eq!(single("lowered", &status()), Condition::moved(Direction::Lowered));
    }

    #[test]
    fn parses_value_conditions() {
        let domain = column();
        assert_eq!(single("from:Up Next", &domain), Condition::left("Up Next", None));
        assert_eq!(single("to:Done", &domain), Condition::entered("Done"));
        assert_eq!(single("in:Inbox", &domain), Condition::currently("Inbox"));
        assert_eq!(single("been:Review", &domain), Condition::been("Review"));
        assert_eq!(single("never:Blocked", &domain), Condition::never("Blocked"));
    }

    #[test]
    fn parses_from_with_direction() {
        assert_eq!(
            single("from:Up Next:forward", &column()),
            Condition::left("Up Next", Some(Direction::Forward))
        );
        assert_eq!(
            single("from:Normal:raised", &priority()),
            Condition::left("Normal", Some(Direction::Raised))
        );
    }

    #[test]
    fn trims_whitespace_everywhere() {
        assert_eq!(
            single("  from : Up Next : backward  ", &column()),
            Condition::left("Up Next", Some(Direction::Backward))
        );
        assert_eq!(single("not: in:Done", &column()), Condition::currently("Done").negate());
    }

    #[test]
    fn parses_negation() {
        assert_eq!(single("not:in:Blocked", &column()), Condition::currently("Blocked").negate());
        assert_eq!(single("not:raised", &status()), Condition::moved(Direction::Raised).negate());
        assert_eq!(
            single("not:from:Open:raised", &status()),
            Condition::left("Open", Some(Direction::Raised)).negate()
        );
    }

    #[test]
    fn parses_and_or_structure() {
        let set = parse("from:A:forward+in:B,to:C", &column()).unwrap();
        assert_eq!(set.len(), 2);
        assert_eq!(
            set.patterns()[0].conditions(),
            &[Condition::left("A", Some(Direction::Forward)), Condition::currently("B")]
        );
        assert_eq!(set.patterns()[1].conditions(), &[Condition::entered("C")]);
    }

    #[test]
    fn skips_blank_groups_and_parts() {
        let set = parse(",in:A++to:B,, ,", &column()).unwrap();
        assert_eq!(set.len(), 1);
        assert_eq!(set.patterns()[0].len(), 2);
    }

    #[test]
    fn empty_input_is_rejected_for_every_axis() {
        for domain in [column(), priority(), status()] {
            assert_eq!(parse("", &domain), Err(PatternError::Empty { axis: domain.axis() }));
            assert_eq!(parse("   ", &domain), Err(PatternError::Empty { axis: domain.axis() }));
        }
    }

    #[test]
    fn separators_only_is_rejected() {
        assert_eq!(
            parse(", + ,", &column()),
            Err(PatternError::NoPatterns { axis: Axis::Column })
        );
    }

    #[test]
    fn unknown_type_lists_valid_types() {
        let err = parse("moved:Done", &column()).unwrap_err();
        assert!(matches!(err, PatternError::UnknownType { ref found, .. } if found == "moved"));
        let message = err.to_string();
        assert!(message.contains("from, to, in, been, never, forward, backward"));
    }

    #[test]
    fn missing_colon_is_syntax_error() {
        let err = parse("Done", &column()).unwrap_err();
        assert!(matches!(err, PatternError::InvalidSyntax { .. }));

        // keywords of another axis are not keywords here
        let err = parse("forward", &priority()).unwrap_err();
        assert!(err.to_string().contains("raised, lowered"));
    }

    #[test]
    fn empty_value_is_rejected() {
        assert!(matches!(
            parse("in:", &column()),
            Err(PatternError::MissingValue { .. })
        ));
        assert!(matches!(
            parse("from:  :forward", &column()),
            Err(PatternError::MissingValue { .. })
        ));
    }

    #[test]
    fn direction_only_on_from() {
        for input in ["to:Done:forward", "in:Done:forward", "been:A:backward", "never:A:forward"] {
            assert!(matches!(
                parse(input, &column()),
                Err(PatternError::DirectionNotAllowed { .. })
            ));
        }
    }

    #[test]
    fn invalid_direction_lists_valid_directions() {
        let err = parse("from:Open:forward", &status()).unwrap_err();
        assert_eq!(
            err,
            PatternError::InvalidDirection {
                found: "forward".to_string(),
                valid: "raised, lowered".to_string(),
            }
        );
        assert!(matches!(
            parse("from:A:", &column()),
            Err(PatternError::InvalidDirection { .. })
        ));
    }

    #[test]
    fn target_containing_colon_is_not_a_value() {
        assert!(matches!(
            parse("in:a:b", &column()),
            Err(PatternError::DirectionNotAllowed { .. })
        ));
    }

    #[test]
    fn bare_not_is_rejected() {
        assert!(matches!(
            parse("not:", &column()),
            Err(PatternError::InvalidSyntax { .. })
        ));
    }

    #[test]
    fn one_bad_part_fails_the_whole_pattern() {
        assert!(parse("in:A,bogus:B", &column()).is_err());
        assert!(parse("in:A+to:B:forward", &column()).is_err());
    }

    #[test]
    fn print_then_parse_is_identity() {
        let domain = column();
        for input in [
            "forward",
            "not:backward",
            "from:Up Next:forward+in:Done",
            "not:been:Blocked,to:Review+never:Inbox",
            " from : A ,  in:B + not:to:C ",
        ] {
            let parsed = parse(input, &domain).unwrap();
            let reparsed = parse(&parsed.to_string(), &domain).unwrap();
            assert_eq!(parsed, reparsed, "round trip of {:?}", input);
        }
    }
}
