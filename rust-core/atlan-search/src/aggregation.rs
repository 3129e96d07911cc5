// SPDX-License-Identifier: PMPL-1.0-or-later
//! Aggregations requested alongside a search.

use serde::{Serialize, Serializer};
use serde_json::{json, Value};

/// Metric or bucket aggregation over a single index field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Aggregation {
    /// Bucket documents by distinct keyword value.
    Terms { field: String, size: usize },
    /// Approximate count of distinct values.
    Cardinality { field: String },
    Min { field: String },
    Max { field: String },
    Sum { field: String },
    Avg { field: String },
}

impl Aggregation {
    pub fn field(&self) -> &str {
        match self {
            Aggregation::Terms { field, .. }
            | Aggregation::Cardinality { field }
            | Aggregation::Min { field }
            | Aggregation::Max { field }
            | Aggregation::Sum { field }
            | Aggregation::Avg { field } => field,
        }
    }

    pub fn to_dsl(&self) -> Value {
        match self {
            Aggregation::Terms { field, size } => json!({ "terms": { "field": field, "size": size } }),
            Aggregation::Cardinality { field } => json!({ "cardinality": { "field": field } }),
            Aggregation::Min { field } => json!({ "min": { "field": field } }),
            Aggregation::Max { field } => json!({ "max": { "field": field } }),
            Aggregation::Sum { field } => json!({ "sum": { "field": field } }),
            Aggregation::Avg { field } => json!({ "avg": { "field": field } }),
        }
    }
}

impl Serialize for Aggregation {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_dsl().serialize(serializer)
    }
}
