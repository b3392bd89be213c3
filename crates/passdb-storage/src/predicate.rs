// SPDX-FileCopyrightText: 2026 passdb Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Rendering of [`Predicate`]s into parameterized SQL.
//!
//! Column names come from [`Field`], never from caller text. Every value is
//! bound as a parameter, and substring values have their `LIKE`
//! metacharacters escaped so they match literally.

use passdb_core::{ClauseValue, Field, MatchOp, Predicate};
use rusqlite::types::Value;

/// Escape character used in every rendered `LIKE ... ESCAPE` clause.
const LIKE_ESCAPE: char = '\\';

/// A `WHERE` clause body and the values bound to its `?N` placeholders.
#[derive(Debug, Clone, PartialEq)]
pub struct WhereClause {
    pub sql: String,
    pub params: Vec<Value>,
}

fn column(field: Field) -> &'static str {
    match field {
        Field::Id => "id",
        Field::Service => "service",
        Field::Username => "username",
        Field::Tag => "tag",
    }
}

/// Escape `%`, `_` and the escape character itself.
pub fn escape_like(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        if matches!(c, '%' | '_' | LIKE_ESCAPE) {
            out.push(LIKE_ESCAPE);
        }
        out.push(c);
    }
    out
}

/// Render `predicate` as a conjunction of its clauses.
pub fn render(predicate: &Predicate) -> WhereClause {
    let mut parts = Vec::with_capacity(predicate.clauses.len());
    let mut params = Vec::with_capacity(predicate.clauses.len());

    for (i, clause) in predicate.clauses.iter().enumerate() {
        let n = i + 1;
        let col = column(clause.field);
        match (&clause.op, &clause.value) {
            (MatchOp::Exact, ClauseValue::Integer(v)) => {
                parts.push(format!("{col} = ?{n}"));
                params.push(Value::Integer(*v));
            }
            (MatchOp::Exact, ClauseValue::Text(v)) => {
                parts.push(format!("{col} = ?{n}"));
                params.push(Value::Text(v.clone()));
            }
            (MatchOp::Contains, ClauseValue::Integer(v)) => {
                parts.push(format!("CAST({col} AS TEXT) LIKE ?{n} ESCAPE '{LIKE_ESCAPE}'"));
                params.push(Value::Text(format!("%{v}%")));
            }
            (MatchOp::Contains, ClauseValue::Text(v)) => {
                parts.push(format!("{col} LIKE ?{n} ESCAPE '{LIKE_ESCAPE}'"));
                params.push(Value::Text(format!("%{}%", escape_like(v))));
            }
        }
    }

    WhereClause {
        sql: parts.join(" AND "),
        params,
    }
}
