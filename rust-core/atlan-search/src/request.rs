// SPDX-License-Identifier: PMPL-1.0-or-later
//! Index-search request bodies and the criteria builder that produces them.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::aggregation::Aggregation;
use crate::asset::GUID_INDEX_FIELD;
use crate::fields::SearchableField;
use crate::query::{BoolQuery, Query};
use crate::sort::{SortItem, SortOrder};

/// Page size used when the caller does not choose one.
pub const DEFAULT_PAGE_SIZE: usize = 100;

/// The `dsl` section of an index-search request.
#[derive(Debug, Clone, Serialize)]
pub struct IndexSearchDsl {
    pub from: usize,
    pub size: usize,
    pub query: Query,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub sort: Vec<SortItem>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub aggregations: BTreeMap<String, Aggregation>,
    pub track_total_hits: bool,
}

/// Full body posted to `/api/meta/search/indexsearch`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexSearchRequest {
    pub dsl: IndexSearchDsl,
    /// Attributes to return on each matching entity.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub attributes: Vec<String>,
    /// Attributes to return on each related entity.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub relation_attributes: Vec<String>,
    pub suppress_logs: bool,
    pub show_search_score: bool,
    pub exclude_meanings: bool,
    pub exclude_classifications: bool,
    pub allow_deleted_relations: bool,
}

/// Client-independent description of a search.
///
/// Clauses added with [`where_`](Self::where_) must all match, clauses added
/// with [`where_not`](Self::where_not) must not match, and at least
/// [`min_somes`](Self::min_somes) of the [`where_some`](Self::where_some)
/// clauses must match.
#[derive(Debug, Clone)]
pub struct SearchCriteria {
    wheres: Vec<Query>,
    where_nots: Vec<Query>,
    where_somes: Vec<Query>,
    min_somes: usize,
    sorts: Vec<SortItem>,
    page_size: usize,
    attributes: Vec<String>,
    relation_attributes: Vec<String>,
    aggregations: BTreeMap<String, Aggregation>,
    exclude_meanings: bool,
    exclude_atlan_tags: bool,
    allow_deleted_relations: bool,
}

impl Default for SearchCriteria {
    fn default() -> Self {
        Self {
            wheres: Vec::new(),
            where_nots: Vec::new(),
            where_somes: Vec::new(),
            min_somes: 1,
            sorts: Vec::new(),
            page_size: DEFAULT_PAGE_SIZE,
            attributes: Vec::new(),
            relation_attributes: Vec::new(),
            aggregations: BTreeMap::new(),
            exclude_meanings: false,
            exclude_atlan_tags: false,
            allow_deleted_relations: false,
        }
    }
}

impl SearchCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a mandatory clause.
    pub fn where_(mut self, query: Query) -> Self {
        self.wheres.push(query);
        self
    }

    /// Add an exclusion clause.
    pub fn where_not(mut self, query: Query) -> Self {
        self.where_nots.push(query);
        self
    }

    /// Add an optional clause; see [`min_somes`](Self::min_somes).
    pub fn where_some(mut self, query: Query) -> Self {
        self.where_somes.push(query);
        self
    }

    /// How many `where_some` clauses must match (default 1).
    pub fn min_somes(mut self, minimum: usize) -> Self {
        self.min_somes = minimum;
        self
    }

    pub fn sort(mut self, item: SortItem) -> Self {
        self.sorts.push(item);
        self
    }

    /// Results per page. Zero is raised to one.
    pub fn page_size(mut self, size: usize) -> Self {
        self.page_size = size.max(1);
        self
    }

    pub fn include_on_results(mut self, field: &impl SearchableField) -> Self {
        self.push_attribute(field.atlan_field_name().to_string());
        self
    }

    /// Include an attribute by its raw name (custom or unmodelled attributes).
    pub fn include_attribute(mut self, name: impl Into<String>) -> Self {
        self.push_attribute(name.into());
        self
    }

    pub fn include_on_relations(self, field: &impl SearchableField) -> Self {
        self.include_relation_attribute(field.atlan_field_name())
    }

    pub fn include_relation_attribute(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        if !self.relation_attributes.contains(&name) {
            self.relation_attributes.push(name);
        }
        self
    }

    pub fn aggregate(mut self, key: impl Into<String>, aggregation: Aggregation) -> Self {
        self.aggregations.insert(key.into(), aggregation);
        self
    }

    pub fn exclude_meanings(mut self, exclude: bool) -> Self {
        self.exclude_meanings = exclude;
        self
    }

    pub fn exclude_atlan_tags(mut self, exclude: bool) -> Self {
        self.exclude_atlan_tags = exclude;
        self
    }

    pub fn allow_deleted_relations(mut self, allow: bool) -> Self {
        self.allow_deleted_relations = allow;
        self
    }

    pub fn get_page_size(&self) -> usize {
        self.page_size
    }

    pub fn attributes(&self) -> &[String] {
        &self.attributes
    }

    /// The combined boolean query.
    pub fn to_query(&self) -> Query {
        let mut query = BoolQuery {
            filter: self.wheres.clone(),
            must_not: self.where_nots.clone(),
            should: self.where_somes.clone(),
            ..Default::default()
        };
        if !query.should.is_empty() {
            query.minimum_should_match = Some(self.min_somes);
        }
        if query.is_empty() {
            query.filter.push(Query::MatchAll);
        }
        Query::Bool(query)
    }

    /// Sorts to send, with the GUID tie-breaker appended when missing.
    pub fn effective_sorts(&self) -> Vec<SortItem> {
        let mut sorts = self.sorts.clone();
        if !sorts.iter().any(|s| s.field() == GUID_INDEX_FIELD) {
            sorts.push(SortItem::new(GUID_INDEX_FIELD, SortOrder::Asc));
        }
        sorts
    }

    /// Build the request body for the page starting at `from`.
    pub fn to_request(&self, from: usize) -> IndexSearchRequest {
        self.to_request_sized(from, self.page_size)
    }

    /// As [`to_request`](Self::to_request) but with an explicit page size.
    pub fn to_request_sized(&self, from: usize, size: usize) -> IndexSearchRequest {
        IndexSearchRequest {
            dsl: IndexSearchDsl {
                from,
                size,
                query: self.to_query(),
                sort: self.effective_sorts(),
                aggregations: self.aggregations.clone(),
                track_total_hits: true,
            },
            attributes: self.attributes.clone(),
            relation_attributes: self.relation_attributes.clone(),
            suppress_logs: true,
            show_search_score: false,
            exclude_meanings: self.exclude_meanings,
            exclude_classifications: self.exclude_atlan_tags,
            allow_deleted_relations: self.allow_deleted_relations,
        }
    }

    fn push_attribute(&mut self, name: String) {
        if !self.attributes.contains(&name) {
            self.attributes.push(name);
        }
    }
}
