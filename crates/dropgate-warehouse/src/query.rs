//! Parameterized query construction

use std::fmt;

use dropgate_config::DataTypeDefinition;
use serde::Serialize;

/// A positional query parameter
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum QueryParam {
    Text(String),
    Integer(i64),
}

impl QueryParam {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            QueryParam::Text(s) => Some(s),
            QueryParam::Integer(_) => None,
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            QueryParam::Integer(n) => Some(*n),
            QueryParam::Text(_) => None,
        }
    }
}

impl From<&str> for QueryParam {
    fn from(s: &str) -> Self {
        QueryParam::Text(s.to_string())
    }
}

impl From<String> for QueryParam {
    fn from(s: String) -> Self {
        QueryParam::Text(s)
    }
}

/// Where a query came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuerySource {
    /// Built from the catalog entry with this id
    Catalog(String),
    /// Caller-supplied text, with the optional data-type hint from the request
    Dynamic(Option<String>),
}

impl QuerySource {
    /// Data type the query targets, when known
    pub fn data_type(&self) -> Option<&str> {
        match self {
            QuerySource::Catalog(id) => Some(id),
            QuerySource::Dynamic(hint) => hint.as_deref(),
        }
    }
}

impl fmt::Display for QuerySource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuerySource::Catalog(id) => f.write_str(id),
            QuerySource::Dynamic(_) => f.write_str("dynamic"),
        }
    }
}

/// Template text plus ordered parameters, ready for a data source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WarehouseQuery {
    pub sql: String,
    pub params: Vec<QueryParam>,
    pub source: QuerySource,
}

impl WarehouseQuery {
    /// Caller-supplied query; parameters bind as text
    pub fn dynamic(sql: impl Into<String>, params: Vec<String>, data_type: Option<String>) -> Self {
        Self {
            sql: sql.into(),
            params: params.into_iter().map(QueryParam::Text).collect(),
            source: QuerySource::Dynamic(data_type),
        }
    }
}

/// Builds catalog queries from a definition and a search term.
///
/// The first parameter is the raw term, used by templates for their
/// "empty term means no filter" branch. Each search field then gets the
/// upper-cased term wrapped in `%` wildcards. An optional trailing integer
/// carries the result limit. The template text is passed through untouched;
/// binding is left to the data source.
pub struct QueryBuilder;

impl QueryBuilder {
    pub fn build(
        definition: &DataTypeDefinition,
        term: &str,
        max_results: Option<u32>,
    ) -> WarehouseQuery {
        let pattern = format!("%{}%", term.to_uppercase());

        let mut params = Vec::with_capacity(definition.search_fields.len() + 2);
        params.push(QueryParam::Text(term.to_string()));
        params.extend(
            definition
                .search_fields
                .iter()
                .map(|_| QueryParam::Text(pattern.clone())),
        );
        if let Some(limit) = max_results {
            params.push(QueryParam::Integer(i64::from(limit)));
        }

        WarehouseQuery {
            sql: definition.query.clone(),
            params,
            source: QuerySource::Catalog(definition.id.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cost_centers() -> DataTypeDefinition {
        DataTypeDefinition {
            id: "cc".to_string(),
            query: "SELECT v, l FROM t WHERE (? = '' OR a LIKE ? OR b LIKE ?)".to_string(),
            search_fields: vec!["a".to_string(), "b".to_string()],
            enabled: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_build_params() {
        let query = QueryBuilder::build(&cost_centers(), "fin", None);
        assert_eq!(
            query.params,
            vec![
                QueryParam::from("fin"),
                QueryParam::from("%FIN%"),
                QueryParam::from("%FIN%"),
            ]
        );
        assert_eq!(query.sql, cost_centers().query);
        assert_eq!(query.source, QuerySource::Catalog("cc".to_string()));
    }

    #[test]
    fn test_build_with_limit() {
        let query = QueryBuilder::build(&cost_centers(), "", Some(25));
        assert_eq!(query.params.len(), 4);
        assert_eq!(query.params[0], QueryParam::from(""));
        assert_eq!(query.params[1], QueryParam::from("%%"));
        assert_eq!(query.params[3].as_integer(), Some(25));
    }

    #[test]
    fn test_dynamic_query() {
        let query = WarehouseQuery::dynamic("SELECT 1", vec!["a".into()], Some("wbs".into()));
        assert_eq!(query.source.to_string(), "dynamic");
        assert_eq!(query.source.data_type(), Some("wbs"));
        assert_eq!(query.params[0].as_text(), Some("a"));
    }
}
