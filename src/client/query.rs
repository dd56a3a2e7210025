//! Table query description: the select/filter/order/paginate chain handlers build
//! before handing it to a `TableClient`.

use serde_json::Value;

#[derive(Clone, Debug, PartialEq)]
pub enum Filter {
    Eq(String, Value),
    Neq(String, Value),
}

impl Filter {
    pub fn column(&self) -> &str {
        match self {
            Filter::Eq(c, _) | Filter::Neq(c, _) => c,
        }
    }

    pub fn value(&self) -> &Value {
        match self {
            Filter::Eq(_, v) | Filter::Neq(_, v) => v,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct TableQuery {
    pub table: String,
    /// Projected columns; empty means every column.
    pub columns: Vec<String>,
    pub filters: Vec<Filter>,
    /// Ascending sort columns, most significant first.
    pub order: Vec<String>,
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

impl TableQuery {
    pub fn table(name: &str) -> Self {
        TableQuery {
            table: name.to_string(),
            columns: Vec::new(),
            filters: Vec::new(),
            order: Vec::new(),
            limit: None,
            offset: None,
        }
    }

    pub fn select(mut self, columns: &[&str]) -> Self {
        self.columns = columns.iter().map(|c| c.to_string()).collect();
        self
    }

    pub fn eq(mut self, column: &str, value: impl Into<Value>) -> Self {
        self.filters.push(Filter::Eq(column.to_string(), value.into()));
        self
    }

    pub fn neq(mut self, column: &str, value: impl Into<Value>) -> Self {
        self.filters.push(Filter::Neq(column.to_string(), value.into()));
        self
    }

    pub fn order(mut self, column: &str) -> Self {
        self.order.push(column.to_string());
        self
    }

    pub fn limit(mut self, n: u32) -> Self {
        self.limit = Some(n);
        self
    }

    pub fn offset(mut self, n: u32) -> Self {
        self.offset = Some(n);
        self
    }

    /// Every column name the query touches (projection, filters, ordering).
    pub fn referenced_columns(&self) -> impl Iterator<Item = &str> {
        self.columns
            .iter()
            .map(String::as_str)
            .chain(self.filters.iter().map(Filter::column))
            .chain(self.order.iter().map(String::as_str))
    }
}
