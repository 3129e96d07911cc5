// SPDX-License-Identifier: PMPL-1.0-or-later
//! Typed search fields.
//!
//! Every searchable attribute of an asset is described by one of these field
//! types. A field knows both the Atlan attribute name (used when asking for
//! the attribute to be returned on results) and the name of the index field(s)
//! it is stored in, and offers only the predicates that make sense for its
//! index mapping: keyword fields get exact and prefix matches, text fields
//! get analysed matches, numeric fields get ranges.

use serde_json::Value;

use crate::aggregation::Aggregation;
use crate::query::{Query, RangeQuery};
use crate::sort::{SortItem, SortOrder};

/// Anything that can be named in `include_on_results`.
pub trait SearchableField {
    /// Attribute name as it appears in an entity's `attributes` map.
    fn atlan_field_name(&self) -> &'static str;
}

// ---------------------------------------------------------------------------
// KeywordField
// ---------------------------------------------------------------------------

/// Field indexed only as an exact-match keyword.
#[derive(Debug, Clone, Copy)]
pub struct KeywordField {
    atlan: &'static str,
    keyword: &'static str,
}

impl KeywordField {
    pub const fn new(atlan: &'static str, keyword: &'static str) -> Self {
        Self { atlan, keyword }
    }

    pub fn index_field(&self) -> &'static str {
        self.keyword
    }

    /// Exact match.
    pub fn eq(&self, value: impl Into<String>) -> Query {
        term(self.keyword, Value::String(value.into()), false)
    }

    /// Exact match, ignoring case.
    pub fn eq_ignore_case(&self, value: impl Into<String>) -> Query {
        term(self.keyword, Value::String(value.into()), true)
    }

    /// Matches any one of `values`.
    pub fn within<I, S>(&self, values: I) -> Query
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Query::Terms {
            field: self.keyword.to_string(),
            values: values.into_iter().map(|v| Value::String(v.into())).collect(),
        }
    }

    pub fn starts_with(&self, prefix: impl Into<String>, case_insensitive: bool) -> Query {
        Query::Prefix {
            field: self.keyword.to_string(),
            value: prefix.into(),
            case_insensitive,
        }
    }

    pub fn wildcard(&self, pattern: impl Into<String>) -> Query {
        Query::Wildcard {
            field: self.keyword.to_string(),
            pattern: pattern.into(),
            case_insensitive: false,
        }
    }

    pub fn has_any_value(&self) -> Query {
        exists(self.keyword)
    }

    pub fn order(&self, order: SortOrder) -> SortItem {
        SortItem::new(self.keyword, order)
    }

    /// Bucket results by this field's distinct values.
    pub fn bucket_by(&self, size: usize) -> Aggregation {
        Aggregation::Terms {
            field: self.keyword.to_string(),
            size,
        }
    }

    /// Approximate number of distinct values.
    pub fn distinct(&self) -> Aggregation {
        Aggregation::Cardinality {
            field: self.keyword.to_string(),
        }
    }
}

impl SearchableField for KeywordField {
    fn atlan_field_name(&self) -> &'static str {
        self.atlan
    }
}

// ---------------------------------------------------------------------------
// TextField
// ---------------------------------------------------------------------------

/// Field indexed only as analysed text.
#[derive(Debug, Clone, Copy)]
pub struct TextField {
    atlan: &'static str,
    text: &'static str,
}

impl TextField {
    pub const fn new(atlan: &'static str, text: &'static str) -> Self {
        Self { atlan, text }
    }

    pub fn index_field(&self) -> &'static str {
        self.text
    }

    /// Full-text match.
    pub fn matches(&self, query: impl Into<String>) -> Query {
        Query::Match {
            field: self.text.to_string(),
            query: query.into(),
        }
    }

    pub fn has_any_value(&self) -> Query {
        exists(self.text)
    }
}

impl SearchableField for TextField {
    fn atlan_field_name(&self) -> &'static str {
        self.atlan
    }
}

// ---------------------------------------------------------------------------
// KeywordTextField
// ---------------------------------------------------------------------------

/// Field indexed both as keyword and as analysed text.
#[derive(Debug, Clone, Copy)]
pub struct KeywordTextField {
    atlan: &'static str,
    keyword: KeywordField,
    text: TextField,
}

impl KeywordTextField {
    pub const fn new(atlan: &'static str, keyword: &'static str, text: &'static str) -> Self {
        Self {
            atlan,
            keyword: KeywordField::new(atlan, keyword),
            text: TextField::new(atlan, text),
        }
    }

    pub fn keyword_field(&self) -> &'static str {
        self.keyword.index_field()
    }

    pub fn text_field(&self) -> &'static str {
        self.text.index_field()
    }

    pub fn eq(&self, value: impl Into<String>) -> Query {
        self.keyword.eq(value)
    }

    pub fn eq_ignore_case(&self, value: impl Into<String>) -> Query {
        self.keyword.eq_ignore_case(value)
    }

    pub fn within<I, S>(&self, values: I) -> Query
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.keyword.within(values)
    }

    pub fn starts_with(&self, prefix: impl Into<String>, case_insensitive: bool) -> Query {
        self.keyword.starts_with(prefix, case_insensitive)
    }

    pub fn wildcard(&self, pattern: impl Into<String>) -> Query {
        self.keyword.wildcard(pattern)
    }

    pub fn matches(&self, query: impl Into<String>) -> Query {
        self.text.matches(query)
    }

    pub fn has_any_value(&self) -> Query {
        self.keyword.has_any_value()
    }

    pub fn order(&self, order: SortOrder) -> SortItem {
        self.keyword.order(order)
    }

    pub fn bucket_by(&self, size: usize) -> Aggregation {
        self.keyword.bucket_by(size)
    }
}

impl SearchableField for KeywordTextField {
    fn atlan_field_name(&self) -> &'static str {
        self.atlan
    }
}

// ---------------------------------------------------------------------------
// NumericField
// ---------------------------------------------------------------------------

/// Numeric or epoch-millisecond date field.
#[derive(Debug, Clone, Copy)]
pub struct NumericField {
    atlan: &'static str,
    numeric: &'static str,
}

impl NumericField {
    pub const fn new(atlan: &'static str, numeric: &'static str) -> Self {
        Self { atlan, numeric }
    }

    pub fn index_field(&self) -> &'static str {
        self.numeric
    }

    pub fn eq(&self, value: impl Into<Value>) -> Query {
        term(self.numeric, value.into(), false)
    }

    pub fn gt(&self, value: impl Into<Value>) -> Query {
        self.range(RangeQuery {
            gt: Some(value.into()),
            ..Default::default()
        })
    }

    pub fn gte(&self, value: impl Into<Value>) -> Query {
        self.range(RangeQuery {
            gte: Some(value.into()),
            ..Default::default()
        })
    }

    pub fn lt(&self, value: impl Into<Value>) -> Query {
        self.range(RangeQuery {
            lt: Some(value.into()),
            ..Default::default()
        })
    }

    pub fn lte(&self, value: impl Into<Value>) -> Query {
        self.range(RangeQuery {
            lte: Some(value.into()),
            ..Default::default()
        })
    }

    /// Inclusive on both ends.
    pub fn between(&self, from: impl Into<Value>, to: impl Into<Value>) -> Query {
        self.range(RangeQuery {
            gte: Some(from.into()),
            lte: Some(to.into()),
            ..Default::default()
        })
    }

    pub fn has_any_value(&self) -> Query {
        exists(self.numeric)
    }

    pub fn order(&self, order: SortOrder) -> SortItem {
        SortItem::new(self.numeric, order)
    }

    pub fn min(&self) -> Aggregation {
        Aggregation::Min {
            field: self.numeric.to_string(),
        }
    }

    pub fn max(&self) -> Aggregation {
        Aggregation::Max {
            field: self.numeric.to_string(),
        }
    }

    pub fn sum(&self) -> Aggregation {
        Aggregation::Sum {
            field: self.numeric.to_string(),
        }
    }

    pub fn avg(&self) -> Aggregation {
        Aggregation::Avg {
            field: self.numeric.to_string(),
        }
    }

    fn range(&self, bounds: RangeQuery) -> Query {
        Query::Range(RangeQuery {
            field: self.numeric.to_string(),
            ..bounds
        })
    }
}

impl SearchableField for NumericField {
    fn atlan_field_name(&self) -> &'static str {
        self.atlan
    }
}

// ---------------------------------------------------------------------------
// BooleanField
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy)]
pub struct BooleanField {
    atlan: &'static str,
    boolean: &'static str,
}

impl BooleanField {
    pub const fn new(atlan: &'static str, boolean: &'static str) -> Self {
        Self { atlan, boolean }
    }

    pub fn index_field(&self) -> &'static str {
        self.boolean
    }

    pub fn eq(&self, value: bool) -> Query {
        term(self.boolean, Value::Bool(value), false)
    }

    pub fn has_any_value(&self) -> Query {
        exists(self.boolean)
    }
}

impl SearchableField for BooleanField {
    fn atlan_field_name(&self) -> &'static str {
        self.atlan
    }
}

// ---------------------------------------------------------------------------
// RelationField
// ---------------------------------------------------------------------------

/// Relationship attribute. Not searchable, only requestable on results.
#[derive(Debug, Clone, Copy)]
pub struct RelationField {
    atlan: &'static str,
}

impl RelationField {
    pub const fn new(atlan: &'static str) -> Self {
        Self { atlan }
    }
}

impl SearchableField for RelationField {
    fn atlan_field_name(&self) -> &'static str {
        self.atlan
    }
}

fn term(field: &str, value: Value, case_insensitive: bool) -> Query {
    Query::Term {
        field: field.to_string(),
        value,
        case_insensitive,
    }
}

fn exists(field: &str) -> Query {
    Query::Exists {
        field: field.to_string(),
    }
}
