// SPDX-License-Identifier: PMPL-1.0-or-later
//! Index search and the client-bound [`FluentSearch`] builder.

use atlan_model::{Asset, AssetKind, Entity};
use atlan_search::{Aggregation, IndexSearchRequest, Query, SearchCriteria, SearchableField, SortItem};
use futures::stream::{self, Stream, StreamExt, TryStreamExt};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, instrument};

use crate::client::AtlanClient;
use crate::error::{AtlanError, Result};

/// One page of index-search results.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct IndexSearchResponse {
    /// Total hits across all pages, as estimated by the search engine.
    pub approximate_count: u64,
    pub entities: Vec<Entity>,
    #[serde(skip_serializing_if = "Map::is_empty")]
    pub aggregations: Map<String, Value>,
}

impl AtlanClient {
    /// Run one index-search request.
    #[instrument(skip(self, request), fields(from = request.dsl.from, size = request.dsl.size))]
    pub async fn index_search(&self, request: &IndexSearchRequest) -> Result<IndexSearchResponse> {
        let url = self.endpoint(&["api", "meta", "search", "indexsearch"])?;
        let response: IndexSearchResponse = self.post(url, &[], request).await?;
        debug!(
            returned = response.entities.len(),
            approximate_count = response.approximate_count,
            "search page received"
        );
        Ok(response)
    }
}

/// A search bound to a client.
///
/// Clauses are collected into [`SearchCriteria`]; the terminal methods run
/// the search. Results are paged by offset, with a GUID tie-breaker sort so
/// pages neither skip nor repeat assets.
#[derive(Debug, Clone)]
pub struct FluentSearch<'a> {
    client: &'a AtlanClient,
    criteria: SearchCriteria,
}

impl<'a> FluentSearch<'a> {
    pub fn new(client: &'a AtlanClient) -> Self {
        Self::with_criteria(client, SearchCriteria::new())
    }

    pub fn with_criteria(client: &'a AtlanClient, criteria: SearchCriteria) -> Self {
        Self { client, criteria }
    }

    pub fn criteria(&self) -> &SearchCriteria {
        &self.criteria
    }

    pub fn into_criteria(self) -> SearchCriteria {
        self.criteria
    }

    fn edit(mut self, edit: impl FnOnce(SearchCriteria) -> SearchCriteria) -> Self {
        self.criteria = edit(self.criteria);
        self
    }

    pub fn where_(self, query: Query) -> Self {
        self.edit(|c| c.where_(query))
    }

    pub fn where_not(self, query: Query) -> Self {
        self.edit(|c| c.where_not(query))
    }

    pub fn where_some(self, query: Query) -> Self {
        self.edit(|c| c.where_some(query))
    }

    pub fn min_somes(self, minimum: usize) -> Self {
        self.edit(|c| c.min_somes(minimum))
    }

    pub fn sort(self, item: SortItem) -> Self {
        self.edit(|c| c.sort(item))
    }

    pub fn page_size(self, size: usize) -> Self {
        self.edit(|c| c.page_size(size))
    }

    pub fn include_on_results(self, field: &impl SearchableField) -> Self {
        self.edit(|c| c.include_on_results(field))
    }

    pub fn include_attribute(self, name: impl Into<String>) -> Self {
        self.edit(|c| c.include_attribute(name))
    }

    pub fn include_on_relations(self, field: &impl SearchableField) -> Self {
        self.edit(|c| c.include_on_relations(field))
    }

    pub fn include_relation_attribute(self, name: impl Into<String>) -> Self {
        self.edit(|c| c.include_relation_attribute(name))
    }

    pub fn aggregate(self, key: impl Into<String>, aggregation: Aggregation) -> Self {
        self.edit(|c| c.aggregate(key, aggregation))
    }

    // -- Terminal operations ------------------------------------------------

    /// The page starting at offset `from`.
    pub async fn execute(&self, from: usize) -> Result<IndexSearchResponse> {
        self.client.index_search(&self.criteria.to_request(from)).await
    }

    /// Approximate number of matching assets.
    pub async fn count(&self) -> Result<u64> {
        let response = self
            .client
            .index_search(&self.criteria.to_request_sized(0, 1))
            .await?;
        Ok(response.approximate_count)
    }

    /// First match in sort order, if any.
    pub async fn first(&self) -> Result<Option<Entity>> {
        let response = self
            .client
            .index_search(&self.criteria.to_request_sized(0, 1))
            .await?;
        Ok(response.entities.into_iter().next())
    }

    /// Every page in turn, stopping after a short or empty page or once the
    /// reported count has been reached.
    pub fn pages(&self) -> impl Stream<Item = Result<IndexSearchResponse>> + 'a {
        let client = self.client;
        let criteria = self.criteria.clone();
        let size = criteria.get_page_size();
        stream::try_unfold(Some(0usize), move |next| {
            let request = next.map(|from| criteria.to_request(from));
            async move {
                let Some(request) = request else {
                    return Ok::<_, AtlanError>(None);
                };
                let page = client.index_search(&request).await?;
                let fetched = request.dsl.from + page.entities.len();
                let exhausted =
                    page.entities.len() < size || fetched as u64 >= page.approximate_count;
                Ok(Some((page, (!exhausted).then_some(fetched))))
            }
        })
    }

    /// Every match, fetched a page at a time as the stream is polled.
    pub fn stream(&self) -> impl Stream<Item = Result<Entity>> + 'a {
        self.pages()
            .map_ok(|page| stream::iter(page.entities.into_iter().map(Ok::<Entity, AtlanError>)))
            .try_flatten()
    }

    /// Every match of type `K`, cast; matches of other types are skipped.
    pub fn stream_assets<K: AssetKind>(&self) -> impl Stream<Item = Result<Asset<K>>> + 'a {
        self.stream()
            .try_filter(|entity| futures::future::ready(entity.type_name == K::TYPE_NAME))
            .and_then(|entity| async move { Asset::<K>::try_from_entity(entity).map_err(AtlanError::from) })
    }

    /// Up to `limit` matches (all of them when `None`).
    pub async fn to_list(&self, limit: Option<usize>) -> Result<Vec<Entity>> {
        match limit {
            Some(limit) => self.stream().take(limit).try_collect().await,
            None => self.stream().try_collect().await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use atlan_search::asset;
    use serde_json::json;

    #[test]
    fn test_response_tolerates_missing_fields() {
        let response: IndexSearchResponse = serde_json::from_value(json!({
            "queryType": "INDEX",
            "approximateCount": 0
        }))
        .unwrap();
        assert!(response.entities.is_empty());
        assert!(response.aggregations.is_empty());
    }

    #[test]
    fn test_fluent_search_forwards_criteria() {
        let client = AtlanClient::new("http://localhost:8080").unwrap();
        let search = client
            .search()
            .where_(asset::TYPE_NAME.eq("APIObject"))
            .include_on_results(&asset::DESCRIPTION)
            .page_size(25);
        let request = search.criteria().to_request(50);
        assert_eq!(request.dsl.from, 50);
        assert_eq!(request.dsl.size, 25);
        assert_eq!(request.attributes, vec!["description".to_string()]);
    }
}
