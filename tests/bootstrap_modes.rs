//! Startup mode selection scenarios.

use std::collections::BTreeMap;
use std::time::Duration;

use sharding_proxy::bootstrap::{
    create_bootstrap_initializer, BootstrapError, BootstrapInitializer, StartupMode,
};
use sharding_proxy::governance::{GovernanceError, GovernanceProviderRegistry};
use sharding_proxy::lifecycle::startup;
use sharding_proxy::persist::{DefaultRepositoryFactory, MetadataPersistConfig};
use sharding_proxy::Shutdown;

mod common;

use common::{config, CountingProvider, RecordingFactory};

fn counting_registry() -> (GovernanceProviderRegistry, CountingProvider) {
    let provider = CountingProvider::default();
    let mut registry = GovernanceProviderRegistry::new();
    registry.register(provider.clone());
    (registry, provider)
}

#[test]
fn test_standard_with_first_persist_rule() {
    let config = config(
        r#"
        [[server.rules]]
        type = "sharding"
        tables = ["t_order"]

        [[server.rules]]
        type = "metadata_persist"
        persist_type = "ZooKeeper"
        overwrite = false
        props = { ns = "/ss" }
        "#,
    );
    let factory = RecordingFactory::default();
    let (registry, provider) = counting_registry();

    let initializer = create_bootstrap_initializer(&config, &factory, &registry).unwrap();

    let expected = MetadataPersistConfig {
        persist_type: "ZooKeeper".into(),
        overwrite: false,
        props: BTreeMap::from([("ns".to_string(), "/ss".to_string())]),
    };
    assert_eq!(initializer.mode(), StartupMode::Standard);
    match &initializer {
        BootstrapInitializer::Standard(standard) => {
            assert_eq!(standard.persist_config(), &expected)
        }
        other => panic!("expected standard initializer, got {other:?}"),
    }
    assert_eq!(factory.calls(), vec![expected]);
    assert_eq!(provider.count(), 0);
}

#[test]
fn test_standard_with_default_persist_config() {
    let config = config("");
    let factory = RecordingFactory::default();
    let (registry, provider) = counting_registry();

    let initializer = create_bootstrap_initializer(&config, &factory, &registry).unwrap();

    assert_eq!(initializer.mode(), StartupMode::Standard);
    let calls = factory.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].persist_type, "Local");
    assert!(calls[0].overwrite);
    assert!(calls[0].props.is_empty());
    assert_eq!(provider.count(), 0);
}

#[test]
fn test_later_persist_rules_are_ignored() {
    let config = config(
        r#"
        [[server.rules]]
        type = "metadata_persist"
        persist_type = "Local"
        overwrite = false

        [[server.rules]]
        type = "metadata_persist"
        persist_type = "Etcd"
        "#,
    );
    let factory = RecordingFactory::default();

    create_bootstrap_initializer(&config, &factory, &GovernanceProviderRegistry::default())
        .unwrap();

    let calls = factory.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].persist_type, "Local");
    assert!(!calls[0].overwrite);
}

#[test]
fn test_governance_present_selects_governance() {
    let config = config(
        r#"
        [[server.rules]]
        type = "sharding"

        [server.governance]
        namespace = "/gov"
        servers = "host:2181"
        "#,
    );
    let factory = RecordingFactory::default();
    let (registry, provider) = counting_registry();

    let initializer = create_bootstrap_initializer(&config, &factory, &registry).unwrap();

    assert_eq!(initializer.mode(), StartupMode::Governance);
    match &initializer {
        BootstrapInitializer::Governance(governance) => {
            let rule = governance.rule();
            assert_eq!(rule.config().name, "/gov");
            assert_eq!(rule.config().registry_center.server_lists, "host:2181");
        }
        other => panic!("expected governance initializer, got {other:?}"),
    }
    assert!(factory.calls().is_empty());
    assert_eq!(provider.count(), 1);
}

#[test]
fn test_governance_path_ignores_rule_list() {
    // A rule list that could not be converted does not matter in cluster mode.
    let config = config(
        r#"
        [[server.rules]]
        type = "shadow"

        [[server.rules]]
        type = "metadata_persist"
        persist_type = "Local"

        [server.governance]
        namespace = "/gov"
        servers = "host:2181"
        "#,
    );
    let factory = RecordingFactory::default();

    let initializer =
        create_bootstrap_initializer(&config, &factory, &GovernanceProviderRegistry::default())
            .unwrap();

    assert_eq!(initializer.mode(), StartupMode::Governance);
    assert!(factory.calls().is_empty());
}

#[test]
fn test_malformed_governance_is_fatal() {
    let config = config(
        r#"
        [server.governance]
        namespace = "/gov"
        "#,
    );
    let factory = RecordingFactory::default();

    let err = create_bootstrap_initializer(&config, &factory, &GovernanceProviderRegistry::default())
        .err()
        .unwrap();

    assert!(matches!(
        err,
        BootstrapError::Governance(GovernanceError::Shape(_))
    ));
    assert!(factory.calls().is_empty());
}

#[test]
fn test_unsupported_rule_fails_standard_startup() {
    let config = config(
        r#"
        [[server.rules]]
        type = "shadow"
        "#,
    );

    let err = create_bootstrap_initializer(
        &config,
        &RecordingFactory::default(),
        &GovernanceProviderRegistry::default(),
    )
    .err()
    .unwrap();
    assert!(matches!(err, BootstrapError::Rule(_)));
}

#[tokio::test]
async fn test_standard_init_serves_until_shutdown() {
    let config = config(
        r#"
        [listener]
        bind_host = "127.0.0.1"

        [[server.rules]]
        type = "sharding"
        tables = ["t_order"]
        "#,
    );
    let initializer = create_bootstrap_initializer(
        &config,
        &DefaultRepositoryFactory,
        &GovernanceProviderRegistry::default(),
    )
    .unwrap();

    let repository = match &initializer {
        BootstrapInitializer::Standard(standard) => standard.repository().clone(),
        other => panic!("expected standard initializer, got {other:?}"),
    };

    let shutdown = Shutdown::new();
    let rx = shutdown.subscribe();
    let handle = tokio::spawn(async move { initializer.init(&config, 0, rx).await });

    tokio::time::sleep(Duration::from_millis(100)).await;
    shutdown.trigger();

    let result = tokio::time::timeout(Duration::from_secs(5), handle)
        .await
        .unwrap()
        .unwrap();
    assert!(result.is_ok());
    assert!(repository.get("/rules/0-sharding").unwrap().is_some());
}

#[tokio::test]
async fn test_governance_init_serves_until_shutdown() {
    let config = config(
        r#"
        [listener]
        bind_host = "127.0.0.1"

        [server.governance]
        name = "governance_ds"
        [server.governance.registry_center]
        server_lists = "zk-0:2181,zk-1:2181"
        "#,
    );
    let initializer = create_bootstrap_initializer(
        &config,
        &DefaultRepositoryFactory,
        &GovernanceProviderRegistry::default(),
    )
    .unwrap();

    let shutdown = Shutdown::new();
    let rx = shutdown.subscribe();
    shutdown.trigger();

    let result = tokio::time::timeout(Duration::from_secs(5), initializer.init(&config, 0, rx))
        .await
        .unwrap();
    assert!(result.is_ok());
}

#[tokio::test]
async fn test_run_returns_startup_error_to_caller() {
    let config = config(
        r#"
        [[server.rules]]
        type = "metadata_persist"
        persist_type = "Etcd"
        "#,
    );

    let result = tokio::time::timeout(
        Duration::from_secs(5),
        startup::run(config, 0, Shutdown::new()),
    )
    .await
    .unwrap();
    assert!(matches!(result, Err(BootstrapError::Persist(_))));
}
