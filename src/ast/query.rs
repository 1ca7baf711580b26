use indexmap::IndexMap;

use crate::{
    ast::Expr,
    translate::{TranslateError, translate},
    value::Document,
};

/// Sort direction of an `$orderby` item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    /// MongoDB sort value: `1` ascending, `-1` descending.
    pub fn as_sort_value(self) -> i32 {
        match self {
            SortDirection::Asc => 1,
            SortDirection::Desc => -1,
        }
    }
}

/// One `$orderby` item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderItem {
    pub field: String,
    pub direction: SortDirection,
}

/// All query options parsed from one request.
///
/// `None` means the option was not given. `select == Some(vec![])` means
/// `$select=*`, i.e. every field.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct QueryDescriptor {
    /// Parsed `$filter`
    pub filter: Option<Expr>,

    /// Fields named by `$select`
    pub select: Option<Vec<String>>,

    /// `$top`
    pub limit: Option<u64>,

    /// `$skip`
    pub skip: Option<u64>,

    /// `$orderby` as field → `1`/`-1`, in the order given
    pub sort: Option<IndexMap<String, i32>>,
}

impl QueryDescriptor {
    /// Translates the filter, or returns an empty document (match everything)
    /// when there is none.
    pub fn predicate(&self) -> Result<Document, TranslateError> {
        match &self.filter {
            Some(expr) => translate(expr),
            None => Ok(Document::new()),
        }
    }
}
