//! Unit tests for CLI commands.

use super::*;
use indexmap::IndexMap;
use std::fs;
use std::path::Path;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use verpin_core::types::{Manifest, ReleaseMeta, SemverParts};
use verpin_manifest::{FsManifestStore, ManifestStore};

/// Create a temporary directory for testing
fn create_temp_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp directory")
}

fn test_context() -> CommandContext {
    CommandContext::new()
}

fn manifest_of(versions: &[&str]) -> Manifest {
    let entries: IndexMap<String, ReleaseMeta> = versions
        .iter()
        .map(|v| {
            (
                v.to_string(),
                ReleaseMeta::new(*v, SemverParts::parse(v).unwrap()),
            )
        })
        .collect();
    Manifest::from_entries(entries).unwrap()
}

/// Mount both registry endpoints, each expecting `expect` hits
async fn mock_registry(expect: u64) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/demo-package/versions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            "2025.12.1",
            "2026.1.0",
            "2026.2.26",
            "2026.3.0-beta.1"
        ])))
        .expect(expect)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/demo-package/dist-tags"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({"latest": "2026.2.26"})),
        )
        .expect(expect)
        .mount(&server)
        .await;
    server
}

fn resolve_args(registry: &str, manifest_path: &Path) -> resolve::ResolveArgs {
    resolve::ResolveArgs {
        package: "demo-package".to_string(),
        spec: Vec::new(),
        specs: None,
        manifest_file: Some(manifest_path.to_path_buf()),
        registry: registry.to_string(),
        refresh: false,
        use_manifest: None,
        debian_default: None,
        alpine_default: None,
        variant: Vec::new(),
        arch: Vec::new(),
    }
}

#[tokio::test]
async fn test_resolve_writes_manifest() {
    let temp_dir = create_temp_dir();
    let manifest_path = temp_dir.path().join("versions.json");
    let server = mock_registry(1).await;
    let ctx = test_context();

    // No specifiers given: the resolver defaults to "latest"
    resolve::execute(resolve_args(&server.uri(), &manifest_path), &ctx)
        .await
        .unwrap();

    let written = fs::read_to_string(&manifest_path).unwrap();
    assert!(written.contains("\"2026.2.26\""));
    assert!(written.ends_with('\n'));
}

#[tokio::test]
async fn test_second_invocation_uses_cache() {
    let temp_dir = create_temp_dir();
    let manifest_path = temp_dir.path().join("versions.json");
    // Each endpoint must be hit exactly once across both invocations
    let server = mock_registry(1).await;
    let ctx = test_context();

    resolve::execute(resolve_args(&server.uri(), &manifest_path), &ctx)
        .await
        .unwrap();
    resolve::execute(resolve_args(&server.uri(), &manifest_path), &ctx)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_refresh_requeries_registry() {
    let temp_dir = create_temp_dir();
    let manifest_path = temp_dir.path().join("versions.json");
    let server = mock_registry(2).await;
    let ctx = test_context();

    resolve::execute(resolve_args(&server.uri(), &manifest_path), &ctx)
        .await
        .unwrap();

    let mut again = resolve_args(&server.uri(), &manifest_path);
    again.refresh = true;
    resolve::execute(again, &ctx).await.unwrap();
}

#[tokio::test]
async fn test_invalid_cached_manifest_is_replaced() {
    let temp_dir = create_temp_dir();
    let manifest_path = temp_dir.path().join("versions.json");
    fs::write(&manifest_path, "{ broken").unwrap();

    let server = mock_registry(1).await;
    resolve::execute(resolve_args(&server.uri(), &manifest_path), &test_context())
        .await
        .unwrap();

    let manifest = FsManifestStore::new().read(&manifest_path).unwrap();
    assert!(manifest.get("2026.2.26").is_some());
}

#[tokio::test]
async fn test_use_manifest_bypasses_registry() {
    let temp_dir = create_temp_dir();
    let source_path = temp_dir.path().join("prebuilt.json");
    let manifest_path = temp_dir.path().join("versions.json");

    let store = FsManifestStore::new();
    store
        .write(&source_path, &manifest_of(&["2026.1.0"]))
        .unwrap();

    // No mocks mounted: any registry request would fail the command
    let server = MockServer::start().await;
    let mut args = resolve_args(&server.uri(), &manifest_path);
    args.use_manifest = Some(source_path);
    resolve::execute(args, &test_context()).await.unwrap();

    // The output artifact is still produced
    let written = store.read(&manifest_path).unwrap();
    assert_eq!(written, manifest_of(&["2026.1.0"]));
}

#[tokio::test]
async fn test_use_manifest_parse_failure_is_fatal() {
    let temp_dir = create_temp_dir();
    let source_path = temp_dir.path().join("prebuilt.json");
    fs::write(&source_path, "not json").unwrap();

    let server = MockServer::start().await;
    let mut args = resolve_args(&server.uri(), &temp_dir.path().join("versions.json"));
    args.use_manifest = Some(source_path);

    match resolve::execute(args, &test_context()).await.unwrap_err() {
        VerpinError::ManifestParse { .. } => {},
        other => panic!("Expected ManifestParse, got {:?}", other),
    }
}

#[tokio::test]
async fn test_registry_failure_leaves_existing_manifest_untouched() {
    let temp_dir = create_temp_dir();
    let manifest_path = temp_dir.path().join("versions.json");

    let store = FsManifestStore::new();
    store
        .write(&manifest_path, &manifest_of(&["2025.12.1"]))
        .unwrap();
    let before = fs::read_to_string(&manifest_path).unwrap();

    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/demo-package/versions"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let mut args = resolve_args(&server.uri(), &manifest_path);
    args.refresh = true;
    assert!(resolve::execute(args, &test_context()).await.is_err());

    assert_eq!(fs::read_to_string(&manifest_path).unwrap(), before);
}

#[tokio::test]
async fn test_invalid_specifier_writes_nothing() {
    let temp_dir = create_temp_dir();
    let manifest_path = temp_dir.path().join("versions.json");
    let server = mock_registry(1).await;

    let mut args = resolve_args(&server.uri(), &manifest_path);
    args.spec = vec!["2026.x".to_string()];

    match resolve::execute(args, &test_context()).await.unwrap_err() {
        VerpinError::InvalidSpecFormat { spec, .. } => assert_eq!(spec, "2026.x"),
        other => panic!("Expected InvalidSpecFormat, got {:?}", other),
    }
    assert!(!manifest_path.exists());
}

#[tokio::test]
async fn test_blank_specifiers_write_empty_manifest() {
    let temp_dir = create_temp_dir();
    let manifest_path = temp_dir.path().join("versions.json");
    let server = mock_registry(1).await;

    let mut args = resolve_args(&server.uri(), &manifest_path);
    args.specs = Some(" , ".to_string());
    resolve::execute(args, &test_context()).await.unwrap();

    assert_eq!(fs::read_to_string(&manifest_path).unwrap(), "{}\n");
}

#[tokio::test]
async fn test_build_matrix_flags_reach_the_manifest() {
    let temp_dir = create_temp_dir();
    let manifest_path = temp_dir.path().join("versions.json");
    let server = mock_registry(1).await;

    let mut args = resolve_args(&server.uri(), &manifest_path);
    args.debian_default = Some("trixie".to_string());
    args.variant = vec!["trixie".to_string()];
    resolve::execute(args, &test_context()).await.unwrap();

    let manifest = FsManifestStore::new().read(&manifest_path).unwrap();
    let meta = manifest.get("2026.2.26").unwrap();
    assert_eq!(meta.debian_default.as_deref(), Some("trixie"));
    // Arch defaults apply only because a variant was requested
    assert_eq!(
        meta.variants.get("trixie").unwrap(),
        &vec!["amd64".to_string(), "arm64v8".to_string()]
    );
}

#[tokio::test]
async fn test_show_reads_stored_manifest() {
    let temp_dir = create_temp_dir();
    let manifest_path = temp_dir.path().join("versions.json");
    FsManifestStore::new()
        .write(&manifest_path, &manifest_of(&["2026.2.26", "2025.12.1"]))
        .unwrap();

    let result = show::execute(Some(manifest_path), &test_context()).await;
    assert!(result.is_ok());
}

#[tokio::test]
async fn test_show_missing_manifest_is_io_error() {
    let temp_dir = create_temp_dir();
    let result = show::execute(
        Some(temp_dir.path().join("absent.json")),
        &test_context(),
    )
    .await;

    match result.unwrap_err() {
        VerpinError::ManifestIo { .. } => {},
        other => panic!("Expected ManifestIo, got {:?}", other),
    }
}

#[tokio::test]
async fn test_show_version() {
    let result = show_version(&test_context()).await;
    assert!(result.is_ok());
}
