// SPDX-License-Identifier: PMPL-1.0-or-later
//! Output formatters for catalog entities.
//!
//! - **Table**: columnar output using `comfy-table`.
//! - **JSON**: the entities exactly as the catalog returned them, pretty-printed.
//! - **CSV**: one summary row per entity for pipeline consumption.

use atlan_model::Entity;
use comfy_table::{Cell, ContentArrangement, Table};
use serde_json::Value;
use std::fmt;

/// Summary columns shown for each entity in table and CSV output.
pub const COLUMNS: [&str; 6] = ["typeName", "guid", "qualifiedName", "name", "status", "certificate"];

/// Available output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Json,
    Csv,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Table => write!(f, "table"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Csv => write!(f, "csv"),
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            "csv" => Ok(OutputFormat::Csv),
            other => Err(format!(
                "Unknown format '{other}'. Valid formats: table, json, csv"
            )),
        }
    }
}

/// Summary cells for one entity, in [`COLUMNS`] order.
fn entity_row(entity: &Entity) -> Vec<String> {
    vec![
        entity.type_name.clone(),
        entity.guid.clone().unwrap_or_default(),
        entity.qualified_name().unwrap_or_default().to_string(),
        entity.name().unwrap_or_default().to_string(),
        entity.status.map(|s| s.to_string()).unwrap_or_default(),
        entity
            .attribute("certificateStatus")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string(),
    ]
}

/// Format a list of entities, such as search results.
pub fn format_entities(entities: &[Entity], format: OutputFormat) -> String {
    match format {
        OutputFormat::Json => format_json(entities),
        OutputFormat::Table => format_entity_table(entities),
        OutputFormat::Csv => format_entity_csv(entities),
    }
}

/// Format one entity with all of its attributes.
pub fn format_entity(entity: &Entity, format: OutputFormat) -> String {
    match format {
        OutputFormat::Json => format_json(entity),
        OutputFormat::Table => format_detail_table(entity),
        OutputFormat::Csv => format_entity_csv(std::slice::from_ref(entity)),
    }
}

fn format_json<T: serde::Serialize + ?Sized>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|e| format!("{{\"error\": \"{e}\"}}"))
}

fn format_entity_table(entities: &[Entity]) -> String {
    if entities.is_empty() {
        return "(0 rows)".to_string();
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(COLUMNS.iter().map(|c| Cell::new(c)));
    for entity in entities {
        table.add_row(entity_row(entity).into_iter().map(Cell::new));
    }

    let row_count = entities.len();
    format!("{table}\n({row_count} row{})", if row_count == 1 { "" } else { "s" })
}

/// Render a single entity as a two-column table (Field | Value).
///
/// Summary fields come first, then every non-null attribute by name.
fn format_detail_table(entity: &Entity) -> String {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![Cell::new("Field"), Cell::new("Value")]);

    for (column, value) in COLUMNS.iter().zip(entity_row(entity)) {
        table.add_row(vec![Cell::new(column), Cell::new(value)]);
    }
    for (key, val) in &entity.attributes {
        if val.is_null() || key == "qualifiedName" || key == "name" || key == "certificateStatus" {
            continue;
        }
        table.add_row(vec![Cell::new(key), Cell::new(value_to_cell(val))]);
    }
    if !entity.classifications.is_empty() {
        let tags: Vec<&str> = entity.classifications.iter().map(|t| t.type_name.as_str()).collect();
        table.add_row(vec![Cell::new("atlanTags"), Cell::new(tags.join(", "))]);
    }

    table.to_string()
}

/// Convert a JSON value to a short string suitable for a table cell.
///
/// Arrays and nested objects are truncated to avoid overwhelming the table.
fn value_to_cell(value: &Value) -> String {
    match value {
        Value::Null => "NULL".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        Value::Array(arr) => {
            if arr.len() <= 3 {
                format!("{value}")
            } else {
                format!("[{} items]", arr.len())
            }
        }
        Value::Object(obj) => {
            if obj.len() <= 3 {
                format!("{value}")
            } else {
                format!("{{{} fields}}", obj.len())
            }
        }
    }
}

fn format_entity_csv(entities: &[Entity]) -> String {
    let mut output = COLUMNS.join(",");
    output.push('\n');
    for entity in entities {
        let cells: Vec<String> = entity_row(entity).iter().map(|c| csv_escape(c)).collect();
        output.push_str(&cells.join(","));
        output.push('\n');
    }
    output
}

/// Escape a string for CSV output per RFC 4180.
fn csv_escape(s: &str) -> String {
    if s.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}
