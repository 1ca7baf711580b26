//! Query options other than the filter grammar: `$select`, `$orderby`,
//! `$top`, `$skip`, and assembly of all options into a [`QueryDescriptor`].

use indexmap::IndexMap;
use log::debug;

use crate::{
    ast::{OrderItem, QueryDescriptor, SortDirection},
    error::{Error, Result},
    parser::parse_str,
};

pub const FILTER: &str = "$filter";
pub const SELECT: &str = "$select";
pub const ORDER_BY: &str = "$orderby";
pub const TOP: &str = "$top";
pub const SKIP: &str = "$skip";

/// Characters rejected anywhere in an `$orderby` item.
pub const ORDER_BY_DISALLOWED: &str = "~!@#$%^&*()_+-";

/// Splits on commas and trims each entry.
fn split_list(text: &str) -> Result<Vec<&str>> {
    if text.trim().is_empty() {
        return Err(Error::invalid_input("cannot parse zero length string"));
    }
    Ok(text.split(',').map(str::trim).collect())
}

/// Parses `$select`.
///
/// A lone `*` selects every field and yields an empty list. Any other list is
/// returned as given, in order.
pub fn parse_select(text: &str) -> Result<Vec<String>> {
    let fields = split_list(text)?;
    if fields == ["*"] {
        return Ok(Vec::new());
    }
    if fields.iter().any(|f| f.is_empty()) {
        return Err(Error::invalid_input(format!(
            "empty field name in $select '{text}'"
        )));
    }
    Ok(fields.into_iter().map(str::to_string).collect())
}

/// Parses `$orderby` into items, in order.
pub fn parse_order_items(text: &str) -> Result<Vec<OrderItem>> {
    let items = split_list(text)?;

    for item in &items {
        if item.is_empty() || item.contains(|c: char| ORDER_BY_DISALLOWED.contains(c)) {
            return Err(Error::invalid_input(format!("cannot support field {item}")));
        }
    }

    items
        .into_iter()
        .map(|item| {
            let parts: Vec<&str> = item.split_whitespace().collect();
            match parts.as_slice() {
                [field] => Ok(OrderItem {
                    field: field.to_string(),
                    direction: SortDirection::Asc,
                }),
                [field, direction] => {
                    let direction = match *direction {
                        "asc" => SortDirection::Asc,
                        "desc" => SortDirection::Desc,
                        _ => {
                            return Err(Error::invalid_input(
                                "second value in orderby needs to be asc or desc",
                            ));
                        }
                    };
                    Ok(OrderItem {
                        field: field.to_string(),
                        direction,
                    })
                }
                _ => Err(Error::invalid_input(
                    "cannot have more than 2 items in orderby query",
                )),
            }
        })
        .collect()
}

/// Parses `$orderby` into a sort mapping (`asc` → 1, `desc` → -1).
///
/// Fields keep the order they were given in. A repeated field keeps its first
/// position and takes the last direction.
pub fn parse_orderby(text: &str) -> Result<IndexMap<String, i32>> {
    Ok(parse_order_items(text)?
        .into_iter()
        .map(|item| (item.field, item.direction.as_sort_value()))
        .collect())
}

fn parse_count(name: &str, text: &str) -> Result<u64> {
    text.trim().parse::<u64>().map_err(|e| {
        Error::invalid_input(format!(
            "{name} must be a non-negative integer, got '{text}': {e}"
        ))
    })
}

/// Parses `$top`.
pub fn parse_top(text: &str) -> Result<u64> {
    parse_count(TOP, text)
}

/// Parses `$skip`.
pub fn parse_skip(text: &str) -> Result<u64> {
    parse_count(SKIP, text)
}

fn set_once<T>(slot: &mut Option<T>, key: &str, value: T) -> Result<()> {
    if slot.is_some() {
        return Err(Error::invalid_input(format!("duplicate query option {key}")));
    }
    *slot = Some(value);
    Ok(())
}

/// Assembles a [`QueryDescriptor`] from query parameters.
///
/// Only `$filter`, `$select`, `$orderby`, `$top` and `$skip` are read; other
/// keys are ignored. Options that are not present stay `None`.
///
/// # Examples
///
/// ```
/// use odata_mongo::parse_query;
///
/// let query = parse_query([("$top", "10"), ("$orderby", "Name desc")]).unwrap();
/// assert_eq!(query.limit, Some(10));
/// assert_eq!(query.skip, None);
/// assert_eq!(query.sort.unwrap()["Name"], -1);
/// ```
pub fn parse_query<I, K, V>(params: I) -> Result<QueryDescriptor>
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    let mut query = QueryDescriptor::default();

    for (key, value) in params {
        let (key, value) = (key.as_ref(), value.as_ref());
        match key {
            FILTER => set_once(&mut query.filter, key, parse_str(value)?)?,
            SELECT => set_once(&mut query.select, key, parse_select(value)?)?,
            ORDER_BY => set_once(&mut query.sort, key, parse_orderby(value)?)?,
            TOP => set_once(&mut query.limit, key, parse_top(value)?)?,
            SKIP => set_once(&mut query.skip, key, parse_skip(value)?)?,
            _ => debug!("ignoring query parameter {key}"),
        }
    }

    Ok(query)
}

/// Decodes a raw `application/x-www-form-urlencoded` query string (an
/// optional leading `?` is skipped) and assembles it with [`parse_query`].
pub fn parse_query_string(raw: &str) -> Result<QueryDescriptor> {
    let raw = raw.strip_prefix('?').unwrap_or(raw);
    parse_query(url::form_urlencoded::parse(raw.as_bytes()))
}
