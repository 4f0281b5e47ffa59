use std::io::Write;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use deploy_profiles::primitives::{SecretRef, SecretValue, TargetName};
use deploy_profiles::registry::{ProfileRegistry, RegistryError};
use deploy_profiles::resolver::{ResolveError, Resolver};
use deploy_profiles::secrets::{
    JsonFileSecretProvider, LayeredSecretProvider, MemorySecretProvider, SecretError,
    SecretProvider, SecretResult,
};

const NETWORKS: &str = include_str!("../../demos/multichain-resolve/networks.toml");

struct CountingProvider {
    inner: MemorySecretProvider,
    calls: AtomicUsize,
}

#[async_trait]
impl SecretProvider for CountingProvider {
    async fn get(&self, name: &SecretRef) -> SecretResult<SecretValue> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.get(name).await
    }
}

fn reference(value: &str) -> SecretRef {
    SecretRef::new(value).unwrap()
}

fn secrets() -> MemorySecretProvider {
    MemorySecretProvider::with_secrets([
        (reference("pk"), "0x59c6995e998f97a5a0044966f0945389dc9e86dae88c7a8412f4603b6b78690d"),
        (reference("apiKey"), "EXPLORER-KEY"),
        (reference("infuraKey"), "infura-project"),
    ])
}

fn networks() -> ProfileRegistry {
    ProfileRegistry::from_toml_str(NETWORKS).expect("bundled networks load")
}

#[test]
fn bundled_networks_load_in_file_order() {
    let registry = networks();
    let names: Vec<_> = registry.names().map(TargetName::as_str).collect();

    assert_eq!(names.len(), 45);
    assert_eq!(&names[..3], ["arbitrum", "aurora", "cronos"]);
    assert_eq!(names.last(), Some(&"gasZeroGoerliL2"));
    assert_eq!(registry.default_target().map(TargetName::as_str), Some("bscTest"));

    let build = registry.build_settings().unwrap();
    assert_eq!(build.compiler_version(), "0.8.20");
    assert_eq!(build.optimizer_runs(), 1000);
    assert!(build.output_selection().contains("evm.deployedBytecode"));
}

#[test]
fn repeated_names_and_placeholders_are_rejected() {
    let duplicate = format!(
        "{NETWORKS}\n[[targets]]\nname = \"polygon\"\nendpoint = \"https://rpc-mainnet.maticvigil.com\"\ncredential = \"pk\"\n"
    );
    let err = ProfileRegistry::from_toml_str(&duplicate).expect_err("duplicate polygon");
    assert!(matches!(err, RegistryError::DuplicateTargetName { ref name } if name.as_str() == "polygon"));

    let placeholder = r#"
[[targets]]
name = "ethereum"
endpoint = "https://mainnet.infura.io/v3/{your eth api key}"
credential = "pk"
"#;
    let err = ProfileRegistry::from_toml_str(placeholder).expect_err("placeholder");
    assert!(matches!(err, RegistryError::InvalidEndpoint { .. }));
}

#[tokio::test]
async fn resolves_every_bundled_target() {
    let resolver = Resolver::new(Arc::new(networks()), Arc::new(secrets()));

    let results = resolver.resolve_all().await;
    assert_eq!(results.len(), 45);
    for (name, result) in &results {
        let resolved = result.as_ref().unwrap_or_else(|err| panic!("{name}: {err}"));
        assert_eq!(resolved.explorer_key().map(SecretValue::expose), Some("EXPLORER-KEY"));
        assert_eq!(resolved.build().optimizer_runs(), 1000);
    }

    let linea = resolver.resolve("linea").await.unwrap();
    assert_eq!(
        linea.endpoint().as_str(),
        "https://linea-mainnet.infura.io/v3/infura-project"
    );
    assert_eq!(linea.chain_id(), Some(59_144));
    assert!(!format!("{linea:?}").contains("infura-project"));
}

#[tokio::test]
async fn concurrent_resolution_across_tasks() {
    let resolver = Resolver::new(Arc::new(networks()), Arc::new(secrets()));

    let handles: Vec<_> = ["bsc", "base", "optimism", "mantle"]
        .into_iter()
        .map(|name| {
            let resolver = resolver.clone();
            tokio::spawn(async move { resolver.resolve(name).await })
        })
        .collect();

    for handle in futures::future::join_all(handles).await {
        let resolved = handle.expect("task").expect("resolved");
        assert_eq!(resolved.credential().expose().len(), 66);
    }
}

#[tokio::test]
async fn unknown_target_skips_secret_provider() {
    let provider = Arc::new(CountingProvider {
        inner: secrets(),
        calls: AtomicUsize::new(0),
    });
    let resolver = Resolver::new(Arc::new(networks()), provider.clone());

    let err = resolver.resolve("solana").await.expect_err("unknown");
    assert!(matches!(err, ResolveError::Registry(RegistryError::UnknownTarget { .. })));
    assert_eq!(provider.calls.load(Ordering::SeqCst), 0);

    resolver.resolve("arbitrum").await.unwrap();
    assert_eq!(provider.calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn file_secrets_rotate_and_env_overlay_wins() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(br#"{"pk": "FILE_KEY_A", "apiKey": "FILE_API"}"#)
        .unwrap();
    file.flush().unwrap();

    let overlay = Arc::new(MemorySecretProvider::new());
    let provider = LayeredSecretProvider::new()
        .with_layer(overlay.clone())
        .with_layer(Arc::new(JsonFileSecretProvider::new(file.path())));

    let registry = ProfileRegistry::from_toml_str(
        r#"
explorer_key = "apiKey"

[build]
compiler_version = "0.8.20"

[[targets]]
name = "aurora"
endpoint = "https://mainnet.aurora.dev"
credential = "pk"
"#,
    )
    .unwrap();
    let resolver = Resolver::new(Arc::new(registry), Arc::new(provider));

    let first = resolver.resolve("aurora").await.unwrap();
    assert_eq!(first.credential().expose(), "FILE_KEY_A");

    std::fs::write(file.path(), br#"{"pk": "FILE_KEY_B", "apiKey": "FILE_API"}"#).unwrap();
    let rotated = resolver.resolve("aurora").await.unwrap();
    assert_eq!(rotated.credential().expose(), "FILE_KEY_B");

    overlay.insert(reference("pk"), "OVERLAY_KEY").unwrap();
    let overlaid = resolver.resolve("aurora").await.unwrap();
    assert_eq!(overlaid.credential().expose(), "OVERLAY_KEY");
    assert_eq!(overlaid.explorer_key().map(SecretValue::expose), Some("FILE_API"));
}

#[tokio::test]
async fn missing_infura_key_only_breaks_infura_targets() {
    let provider = MemorySecretProvider::with_secrets([
        (reference("pk"), "0xabc"),
        (reference("apiKey"), "EXPLORER-KEY"),
    ]);
    let resolver = Resolver::new(Arc::new(networks()), Arc::new(provider));

    let failed: Vec<_> = resolver
        .resolve_all()
        .await
        .into_iter()
        .filter_map(|(name, result)| match result {
            Err(ResolveError::Secret(SecretError::NotFound { name: secret })) => {
                assert_eq!(secret.as_str(), "infuraKey");
                Some(name)
            }
            Err(other) => panic!("{name}: unexpected {other}"),
            Ok(_) => None,
        })
        .collect();

    assert_eq!(failed, ["rinkeby", "ethereum", "linea"]);
}

#[tokio::test]
async fn unreadable_secret_file_is_unavailable() {
    let dir = tempfile::tempdir().unwrap();
    let provider = LayeredSecretProvider::new()
        .with_layer(Arc::new(MemorySecretProvider::new()))
        .with_layer(Arc::new(JsonFileSecretProvider::new(dir.path().join(".secret.json"))));
    let resolver = Resolver::new(Arc::new(networks()), Arc::new(provider));

    let err = resolver.resolve("bsc").await.expect_err("no secrets file");
    assert!(matches!(err, ResolveError::Secret(SecretError::Unavailable { .. })));
}
