// SPDX-License-Identifier: PMPL-1.0-or-later
//! Atlan Search
//!
//! Index-search DSL for the Atlan metadata catalog.
//! Typed fields produce [`Query`] clauses, sorts and aggregations; a
//! [`SearchCriteria`] combines them into the request body posted to the
//! catalog's index-search endpoint. Nothing here performs I/O.

pub mod aggregation;
pub mod asset;
pub mod fields;
pub mod query;
pub mod request;
pub mod sort;

pub use aggregation::Aggregation;
pub use fields::{
    BooleanField, KeywordField, KeywordTextField, NumericField, RelationField, SearchableField,
    TextField,
};
pub use query::{BoolQuery, Query, RangeQuery};
pub use request::{IndexSearchDsl, IndexSearchRequest, SearchCriteria, DEFAULT_PAGE_SIZE};
pub use sort::{SortItem, SortOrder};
