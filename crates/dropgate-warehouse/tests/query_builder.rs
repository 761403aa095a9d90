//! Property tests for catalog query construction

use dropgate_config::DataTypeDefinition;
use dropgate_warehouse::{QueryBuilder, QueryParam, QuerySource};
use proptest::prelude::*;

fn definition(fields: usize) -> DataTypeDefinition {
    DataTypeDefinition {
        id: "dt".to_string(),
        query: "SELECT value, label FROM t".to_string(),
        search_fields: (0..fields).map(|i| format!("F{}", i)).collect(),
        enabled: true,
        ..Default::default()
    }
}

proptest! {
    #[test]
    fn params_follow_the_field_layout(
        fields in 0usize..6,
        term in ".{0,30}",
        limit in proptest::option::of(1u32..1000),
    ) {
        let def = definition(fields);
        let query = QueryBuilder::build(&def, &term, limit);

        let expected_len = fields + 1 + usize::from(limit.is_some());
        prop_assert_eq!(query.params.len(), expected_len);
        prop_assert_eq!(&query.params[0], &QueryParam::Text(term.clone()));

        let pattern = format!("%{}%", term.to_uppercase());
        for param in &query.params[1..=fields] {
            prop_assert_eq!(param, &QueryParam::Text(pattern.clone()));
        }

        match limit {
            Some(n) => prop_assert_eq!(query.params.last().and_then(QueryParam::as_integer), Some(i64::from(n))),
            None => prop_assert!(query.params.iter().all(|p| p.as_integer().is_none())),
        }

        prop_assert_eq!(&query.sql, &def.query);
        prop_assert_eq!(query.source, QuerySource::Catalog("dt".to_string()));
    }
}

#[test]
fn test_default_cost_center_template() {
    let config = dropgate_config::GatewayConfig::default();
    let cc = &config.data_types[0];
    let query = QueryBuilder::build(cc, "it", None);
    assert_eq!(query.params.len(), cc.placeholder_count());
}
