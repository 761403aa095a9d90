//! Property tests for the data-type catalog

use dropgate_config::*;
use proptest::prelude::*;

fn arb_definition() -> impl Strategy<Value = DataTypeDefinition> {
    ("[a-z]{1,4}", any::<bool>()).prop_map(|(id, enabled)| DataTypeDefinition {
        name: id.to_uppercase(),
        id,
        enabled,
        ..Default::default()
    })
}

proptest! {
    #[test]
    fn list_enabled_is_the_enabled_subset_in_order(defs in prop::collection::vec(arb_definition(), 0..20)) {
        let catalog = DataTypeCatalog::new(defs.clone());
        let listed: Vec<DataTypeDefinition> =
            catalog.list_enabled().into_iter().cloned().collect();
        let expected: Vec<DataTypeDefinition> =
            defs.into_iter().filter(|d| d.enabled).collect();
        prop_assert_eq!(listed, expected);
    }

    #[test]
    fn lookup_only_succeeds_for_enabled_ids(
        defs in prop::collection::vec(arb_definition(), 0..20),
        probe in "[a-z]{1,4}",
    ) {
        let catalog = DataTypeCatalog::new(defs.clone());
        let first_enabled = defs.iter().find(|d| d.enabled && d.id == probe);
        match (catalog.lookup(&probe), first_enabled) {
            (Ok(found), Some(expected)) => prop_assert_eq!(found, expected),
            (Err(ConfigError::NotFoundOrDisabled(id)), None) => prop_assert_eq!(id, probe),
            (other, expected) => prop_assert!(false, "lookup {:?} vs {:?}", other, expected),
        }
    }
}

#[test]
fn test_default_config_validates() {
    let config = GatewayConfig::default();
    assert!(ConfigManager::validate_config(&config).is_ok());
    let loaded = LoadedConfig::from_config(config).unwrap();
    assert_eq!(loaded.catalog.lookup("wbs").unwrap().name, "WBS Elements");
}

#[test]
fn test_env_policy_from_map() {
    let env = MapEnv::new()
        .with("AUTH_ENABLED", "true")
        .with("API_KEYS", "alpha");
    let mode = AuthMode::from_env(&env).unwrap();
    assert_eq!(
        mode,
        AuthMode::Layered(SecurityPolicy::default().with_api_keys(["alpha"]))
    );
}
