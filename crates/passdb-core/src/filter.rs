// SPDX-FileCopyrightText: 2026 passdb Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Query predicate builder shared by search and delete.
//!
//! A [`Filter`] holds up to four optional inputs. [`Filter::predicate`]
//! turns them into exactly one [`Predicate`] using first-match precedence,
//! or `None` when no supported combination was supplied. A predicate is a
//! list of `(field, operator, value)` clauses; rendering it into a query
//! with bound parameters is the storage layer's job.

use strum::Display;

/// Columns a predicate may constrain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum Field {
    Id,
    Service,
    Username,
    Tag,
}

/// How a clause compares the column with its value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchOp {
    /// Column equals the value.
    Exact,
    /// Column contains the value as a literal substring.
    Contains,
}

/// The value side of a clause.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClauseValue {
    Integer(i64),
    Text(String),
}

/// One `(field, operator, value)` triple.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Clause {
    pub field: Field,
    pub op: MatchOp,
    pub value: ClauseValue,
}

impl Clause {
    fn exact(field: Field, value: &str) -> Self {
        Self {
            field,
            op: MatchOp::Exact,
            value: ClauseValue::Text(value.to_string()),
        }
    }

    fn contains(field: Field, value: &str) -> Self {
        Self {
            field,
            op: MatchOp::Contains,
            value: ClauseValue::Text(value.to_string()),
        }
    }
}

/// The eight supported predicate shapes, in precedence order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "kebab-case")]
pub enum PredicateShape {
    Id,
    ServiceUsernameTag,
    ServiceUsername,
    ServiceTag,
    UsernameTag,
    Service,
    Username,
    Tag,
}

/// A conjunction of clauses selected by one shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Predicate {
    pub shape: PredicateShape,
    pub clauses: Vec<Clause>,
}

/// Optional search/delete inputs.
///
/// Empty or whitespace-only strings count as not supplied.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filter {
    pub id: Option<i64>,
    pub service: Option<String>,
    pub username: Option<String>,
    pub tag: Option<String>,
}

impl Filter {
    pub fn by_id(id: i64) -> Self {
        Self {
            id: Some(id),
            ..Self::default()
        }
    }

    pub fn service(mut self, service: impl Into<String>) -> Self {
        self.service = Some(service.into());
        self
    }

    pub fn username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    /// Build the predicate for this filter.
    ///
    /// Returns `None` when no supported combination is present. `None` never
    /// means "match everything"; callers must select nothing.
    pub fn predicate(&self) -> Option<Predicate> {
        use Field::{Service, Tag, Username};

        let service = supplied(&self.service);
        let username = supplied(&self.username);
        let tag = supplied(&self.tag);

        let (shape, clauses) = if let Some(id) = self.id {
            (
                PredicateShape::Id,
                vec![Clause {
                    field: Field::Id,
                    op: MatchOp::Exact,
                    value: ClauseValue::Integer(id),
                }],
            )
        } else {
            match (service, username, tag) {
                (Some(s), Some(u), Some(t)) => (
                    PredicateShape::ServiceUsernameTag,
                    vec![
                        Clause::exact(Service, s),
                        Clause::exact(Username, u),
                        Clause::contains(Tag, t),
                    ],
                ),
                (Some(s), Some(u), None) => (
                    PredicateShape::ServiceUsername,
                    vec![Clause::exact(Service, s), Clause::exact(Username, u)],
                ),
                (Some(s), None, Some(t)) => (
                    PredicateShape::ServiceTag,
                    vec![Clause::exact(Service, s), Clause::contains(Tag, t)],
                ),
                (None, Some(u), Some(t)) => (
                    PredicateShape::UsernameTag,
                    vec![Clause::contains(Username, u), Clause::contains(Tag, t)],
                ),
                (Some(s), None, None) => {
                    (PredicateShape::Service, vec![Clause::contains(Service, s)])
                }
                (None, Some(u), None) => {
                    (PredicateShape::Username, vec![Clause::contains(Username, u)])
                }
                (None, None, Some(t)) => (PredicateShape::Tag, vec![Clause::contains(Tag, t)]),
                (None, None, None) => {
                    tracing::debug!(filter = ?self, "no supported filter combination");
                    return None;
                }
            }
        };

        Some(Predicate { shape, clauses })
    }
}

fn supplied(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn filter_from_mask(mask: u8) -> Filter {
        Filter {
            id: (mask & 0b1000 != 0).then_some(42),
            service: (mask & 0b0100 != 0).then(|| "svc".to_string()),
            username: (mask & 0b0010 != 0).then(|| "usr".to_string()),
            tag: (mask & 0b0001 != 0).then(|| "tg".to_string()),
        }
    }

    fn expected_shape(mask: u8) -> Option<PredicateShape> {
        if mask & 0b1000 != 0 {
            return Some(PredicateShape::Id);
        }
        match mask {
            0b0111 => Some(PredicateShape::ServiceUsernameTag),
            0b0110 => Some(PredicateShape::ServiceUsername),
            0b0101 => Some(PredicateShape::ServiceTag),
            0b0011 => Some(PredicateShape::UsernameTag),
            0b0100 => Some(PredicateShape::Service),
            0b0010 => Some(PredicateShape::Username),
            0b0001 => Some(PredicateShape::Tag),
            _ => None,
        }
    }

    #[test]
    fn every_presence_combination_selects_its_row() {
        for mask in 0u8..16 {
            let shape = filter_from_mask(mask).predicate().map(|p| p.shape);
            assert_eq!(shape, expected_shape(mask), "mask {mask:04b}");
        }
    }

    #[test]
    fn id_ignores_all_other_fields() {
        let p = Filter::by_id(3)
            .service("github")
            .username("alice")
            .tag("work")
            .predicate()
            .unwrap();
        assert_eq!(
            p.clauses,
            vec![Clause {
                field: Field::Id,
                op: MatchOp::Exact,
                value: ClauseValue::Integer(3),
            }]
        );
    }

    #[test]
    fn service_and_tag_is_not_service_only() {
        let p = Filter::default().service("x").tag("y").predicate().unwrap();
        assert_eq!(p.shape, PredicateShape::ServiceTag);
        assert_eq!(p.clauses[0].op, MatchOp::Exact);
        assert_eq!(p.clauses[1].op, MatchOp::Contains);
    }

    #[test]
    fn three_field_shape_mixes_exact_and_contains() {
        let p = Filter::default()
            .service("github")
            .username("alice")
            .tag("work")
            .predicate()
            .unwrap();
        let ops: Vec<_> = p.clauses.iter().map(|c| (c.field, c.op)).collect();
        assert_eq!(
            ops,
            vec![
                (Field::Service, MatchOp::Exact),
                (Field::Username, MatchOp::Exact),
                (Field::Tag, MatchOp::Contains),
            ]
        );
    }

    #[test]
    fn username_and_tag_are_both_substring() {
        let p = Filter::default().username("al").tag("wo").predicate().unwrap();
        assert!(p.clauses.iter().all(|c| c.op == MatchOp::Contains));
    }

    #[test]
    fn empty_filter_yields_no_predicate() {
        assert!(Filter::default().predicate().is_none());
    }

    #[test]
    fn blank_strings_count_as_absent() {
        let f = Filter::default().service("").username("   ").tag("\t");
        assert!(f.predicate().is_none());

        let p = Filter::default().service("").tag("work").predicate().unwrap();
        assert_eq!(p.shape, PredicateShape::Tag);
    }

    proptest! {
        #[test]
        fn values_are_carried_verbatim(service in "[a-z%_'\\\\ ]{1,12}[a-z]", tag in "[a-z%_']{1,8}") {
            let p = Filter::default().service(service.clone()).tag(tag.clone()).predicate().unwrap();
            prop_assert_eq!(&p.clauses[0].value, &ClauseValue::Text(service));
            prop_assert_eq!(&p.clauses[1].value, &ClauseValue::Text(tag));
        }
    }
}
