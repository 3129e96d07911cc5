// SPDX-License-Identifier: PMPL-1.0-or-later
//! Sort specifications for index search.

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

/// Direction of a sort.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    Desc,
}

/// One sort key, rendered as `{ "<field>": { "order": "asc" } }`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortItem {
    field: String,
    order: SortOrder,
}

impl SortItem {
    pub fn new(field: impl Into<String>, order: SortOrder) -> Self {
        Self {
            field: field.into(),
            order,
        }
    }

    /// Index field being sorted on.
    pub fn field(&self) -> &str {
        &self.field
    }

    pub fn order(&self) -> SortOrder {
        self.order
    }
}

#[derive(Serialize)]
struct OrderBody {
    order: SortOrder,
}

impl Serialize for SortItem {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(&self.field, &OrderBody { order: self.order })?;
        map.end()
    }
}
