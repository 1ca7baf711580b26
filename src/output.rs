//! JSON output for predicate documents and query descriptors.
//!
//! Documents render as MongoDB extended JSON: object ids become
//! `{"$oid": "..."}` and regular expressions become
//! `{"$regex": "...", "$options": "..."}`. Keys keep insertion order.
//!
//! # Examples
//!
//! ```
//! use odata_mongo::{filter_to_predicate, output::to_json};
//!
//! let doc = filter_to_predicate("Name eq 'john'").unwrap();
//! assert_eq!(to_json(&doc).unwrap(), r#"{"Name":{"$eq":"john"}}"#);
//! ```

use serde_json::{Map, Value as Json};

use crate::{ast::QueryDescriptor, error::Error, value::Document};

/// Converts a document to a `serde_json::Value`.
pub fn to_value(doc: &Document) -> Result<Json, serde_json::Error> {
    serde_json::to_value(doc)
}

/// Compact JSON for a document.
pub fn to_json(doc: &Document) -> Result<String, serde_json::Error> {
    serde_json::to_string(doc)
}

/// Pretty-printed JSON (2-space indentation) for a document.
pub fn to_json_pretty(doc: &Document) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(doc)
}

/// Renders a query descriptor, translating its filter.
///
/// Options that were not given are left out of the object.
pub fn query_to_value(query: &QueryDescriptor) -> Result<Json, Error> {
    let mut out = Map::new();

    if query.filter.is_some() {
        let predicate = query.predicate()?;
        out.insert("filter".to_string(), to_json_value(&predicate)?);
    }
    if let Some(select) = &query.select {
        out.insert("select".to_string(), Json::from(select.clone()));
    }
    if let Some(limit) = query.limit {
        out.insert("limit".to_string(), Json::from(limit));
    }
    if let Some(skip) = query.skip {
        out.insert("skip".to_string(), Json::from(skip));
    }
    if let Some(sort) = &query.sort {
        let sort: Map<String, Json> = sort
            .iter()
            .map(|(field, direction)| (field.clone(), Json::from(*direction)))
            .collect();
        out.insert("sort".to_string(), Json::Object(sort));
    }

    Ok(Json::Object(out))
}

fn to_json_value(doc: &Document) -> Result<Json, Error> {
    to_value(doc).map_err(|e| Error::invalid_input(format!("cannot render predicate: {e}")))
}
