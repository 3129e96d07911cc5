// SPDX-License-Identifier: PMPL-1.0-or-later
//! Query clauses for Atlan's index search.
//!
//! A [`Query`] is a small, owned tree that renders to the Elasticsearch query
//! DSL understood by the `/api/meta/search/indexsearch` endpoint. Queries are
//! normally produced by the typed fields in [`crate::fields`] rather than
//! constructed by hand.

use serde::{Serialize, Serializer};
use serde_json::{json, Map, Value};

/// A single clause of an index-search query.
#[derive(Debug, Clone, PartialEq)]
pub enum Query {
    /// Exact match on a keyword or numeric index field.
    Term {
        field: String,
        value: Value,
        case_insensitive: bool,
    },
    /// Exact match on any of several values.
    Terms { field: String, values: Vec<Value> },
    /// Keyword starts with the given prefix.
    Prefix {
        field: String,
        value: String,
        case_insensitive: bool,
    },
    /// Keyword matches a `*` / `?` wildcard pattern.
    Wildcard {
        field: String,
        pattern: String,
        case_insensitive: bool,
    },
    /// Analysed full-text match on a text index field.
    Match { field: String, query: String },
    /// The field holds any non-null value.
    Exists { field: String },
    /// Bounded range over a numeric or date field.
    Range(RangeQuery),
    /// Matches every document.
    MatchAll,
    /// Boolean combination of other clauses.
    Bool(BoolQuery),
}

/// Bounds of a range clause. Unset bounds are left open.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RangeQuery {
    pub field: String,
    pub gt: Option<Value>,
    pub gte: Option<Value>,
    pub lt: Option<Value>,
    pub lte: Option<Value>,
}

/// Boolean query with the four standard occurrence types.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BoolQuery {
    pub must: Vec<Query>,
    pub filter: Vec<Query>,
    pub should: Vec<Query>,
    pub must_not: Vec<Query>,
    pub minimum_should_match: Option<usize>,
}

impl BoolQuery {
    /// True when no clause of any kind has been added.
    pub fn is_empty(&self) -> bool {
        self.must.is_empty()
            && self.filter.is_empty()
            && self.should.is_empty()
            && self.must_not.is_empty()
    }
}

impl Query {
    /// Every clause must hold (non-scoring).
    pub fn all_of(queries: impl IntoIterator<Item = Query>) -> Self {
        Query::Bool(BoolQuery {
            filter: queries.into_iter().collect(),
            ..Default::default()
        })
    }

    /// At least one clause must hold.
    pub fn any_of(queries: impl IntoIterator<Item = Query>) -> Self {
        Query::Bool(BoolQuery {
            should: queries.into_iter().collect(),
            minimum_should_match: Some(1),
            ..Default::default()
        })
    }

    /// None of the clauses may hold.
    pub fn none_of(queries: impl IntoIterator<Item = Query>) -> Self {
        Query::Bool(BoolQuery {
            must_not: queries.into_iter().collect(),
            ..Default::default()
        })
    }

    /// Negate this clause.
    pub fn negate(self) -> Self {
        Query::none_of([self])
    }

    /// Render to the Elasticsearch query DSL.
    pub fn to_dsl(&self) -> Value {
        match self {
            Query::Term {
                field,
                value,
                case_insensitive,
            } => {
                let mut inner = Map::new();
                inner.insert("value".to_string(), value.clone());
                if *case_insensitive {
                    inner.insert("case_insensitive".to_string(), Value::Bool(true));
                }
                json!({ "term": { field.as_str(): inner } })
            }
            Query::Terms { field, values } => json!({ "terms": { field.as_str(): values } }),
            Query::Prefix {
                field,
                value,
                case_insensitive,
            } => json!({ "prefix": { field.as_str(): keyword_pattern(value, *case_insensitive) } }),
            Query::Wildcard {
                field,
                pattern,
                case_insensitive,
            } => json!({ "wildcard": { field.as_str(): keyword_pattern(pattern, *case_insensitive) } }),
            Query::Match { field, query } => json!({ "match": { field.as_str(): { "query": query } } }),
            Query::Exists { field } => json!({ "exists": { "field": field } }),
            Query::Range(range) => {
                let mut bounds = Map::new();
                for (key, bound) in [
                    ("gt", &range.gt),
                    ("gte", &range.gte),
                    ("lt", &range.lt),
                    ("lte", &range.lte),
                ] {
                    if let Some(value) = bound {
                        bounds.insert(key.to_string(), value.clone());
                    }
                }
                json!({ "range": { range.field.as_str(): bounds } })
            }
            Query::MatchAll => json!({ "match_all": {} }),
            Query::Bool(b) => {
                let mut inner = Map::new();
                for (key, clauses) in [
                    ("must", &b.must),
                    ("filter", &b.filter),
                    ("should", &b.should),
                    ("must_not", &b.must_not),
                ] {
                    if !clauses.is_empty() {
                        let rendered: Vec<Value> = clauses.iter().map(Query::to_dsl).collect();
                        inner.insert(key.to_string(), Value::Array(rendered));
                    }
                }
                if let Some(min) = b.minimum_should_match {
                    if !b.should.is_empty() {
                        inner.insert("minimum_should_match".to_string(), json!(min));
                    }
                }
                json!({ "bool": inner })
            }
        }
    }
}

fn keyword_pattern(value: &str, case_insensitive: bool) -> Value {
    if case_insensitive {
        json!({ "value": value, "case_insensitive": true })
    } else {
        json!({ "value": value })
    }
}

impl Serialize for Query {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_dsl().serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_term_renders_value_object() {
        let q = Query::Term {
            field: "__guid".to_string(),
            value: json!("abc"),
            case_insensitive: false,
        };
        assert_eq!(q.to_dsl(), json!({ "term": { "__guid": { "value": "abc" } } }));
    }

    #[test]
    fn test_case_insensitive_flag_only_when_set() {
        let q = Query::Prefix {
            field: "qualifiedName".to_string(),
            value: "default/api".to_string(),
            case_insensitive: true,
        };
        assert_eq!(
            q.to_dsl(),
            json!({ "prefix": { "qualifiedName": { "value": "default/api", "case_insensitive": true } } })
        );
    }

    #[test]
    fn test_range_omits_open_bounds() {
        let q = Query::Range(RangeQuery {
            field: "__timestamp".to_string(),
            gte: Some(json!(10)),
            ..Default::default()
        });
        assert_eq!(q.to_dsl(), json!({ "range": { "__timestamp": { "gte": 10 } } }));
    }

    #[test]
    fn test_bool_skips_empty_sections() {
        let q = Query::any_of([Query::MatchAll, Query::Exists { field: "name".to_string() }]);
        let dsl = q.to_dsl();
        assert!(dsl["bool"].get("filter").is_none());
        assert_eq!(dsl["bool"]["should"].as_array().map(Vec::len), Some(2));
        assert_eq!(dsl["bool"]["minimum_should_match"], json!(1));
    }

    #[test]
    fn test_negate_wraps_in_must_not() {
        let q = Query::Exists { field: "description".to_string() }.negate();
        assert_eq!(
            q.to_dsl(),
            json!({ "bool": { "must_not": [ { "exists": { "field": "description" } } ] } })
        );
    }

    #[test]
    fn test_serialize_matches_dsl() {
        let q = Query::MatchAll;
        let text = serde_json::to_string(&q).unwrap();
        assert_eq!(text, r#"{"match_all":{}}"#);
    }
}
