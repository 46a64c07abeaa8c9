// storefront/tests/storefront_cli.rs
// Commands end to end: session file in a temp dir, catalog from the mock

use clap::Parser;
use storefront::cli::{Cli, run_with_output};
use storefront::{Config, SessionStore};
use tempfile::TempDir;
use vitrine_mock::{MockServer, MockState};

const CATALOG: &str = r#"{
  "shopName": "La Heladería",
  "categories": ["Helados", "Paletas"],
  "products": [
    {"id": "p1", "name": {"es": "Fresa", "en": "Strawberry"}, "category": "Helados", "price": 3.5, "stock": 0, "status": "out"},
    {"id": "p2", "name": "Mango", "category": "Paletas", "price": 2, "stock": 6, "status": "ok"},
    {"id": "p3", "name": "Pistache", "category": "Helados", "price": 4, "stock": 0, "status": "soon"}
  ]
}
"#;

const SALES: &str = r#"{"sales": [{"id": "s1", "customer": "Ana", "date": "2024-05-01", "items": [{"productId": "p1", "qty": 3}]}]}"#;

fn config(server: &MockServer, work_dir: &TempDir) -> Config {
    Config {
        work_dir: work_dir.path().to_string_lossy().into_owned(),
        api_base: server.url(),
        raw_base: server.raw_url(),
        owner: "acme".into(),
        repo: "shop".into(),
        branch: "main".into(),
        token: Some("t0k".into()),
        catalog_path: "data/products.json".into(),
        sales_path: "data/sales.json".into(),
        bundled_catalog: String::new(),
        request_timeout_secs: 5,
        log_level: "info".into(),
        log_dir: None,
    }
}

async fn start() -> MockServer {
    let state = MockState::new("acme", "shop")
        .with_token("t0k")
        .with_file("data/products.json", CATALOG)
        .with_file("data/sales.json", SALES);
    MockServer::start(state).await.unwrap()
}

async fn run(args: &[&str], config: &Config) -> anyhow::Result<String> {
    let mut argv = vec!["vitrine"];
    argv.extend_from_slice(args);
    let cli = Cli::try_parse_from(argv)?;
    let mut out = Vec::new();
    run_with_output(cli, config, &mut out).await?;
    Ok(String::from_utf8(out)?)
}

#[tokio::test]
async fn test_show_renders_live_catalog() {
    let server = start().await;
    let dir = TempDir::new().unwrap();
    let config = config(&server, &dir);

    let text = run(&["show"], &config).await.unwrap();
    assert!(text.starts_with("== La Heladería =="));
    assert!(text.contains("[Todos los productos] | Próximamente | Helados | Paletas"));
    assert!(text.contains("Fresa"));
    assert!(text.contains("Agotado"));

    let requests = server.state.raw_requests().await;
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].path, "data/products.json");
}

#[tokio::test]
async fn test_preferences_persist_between_runs() {
    let server = start().await;
    let dir = TempDir::new().unwrap();
    let config = config(&server, &dir);

    assert_eq!(run(&["lang"], &config).await.unwrap(), "language: en\n");
    assert_eq!(
        run(&["category", "Helados"], &config).await.unwrap(),
        "category: Helados\n"
    );
    run(&["sort", "price-desc"], &config).await.unwrap();

    let prefs = SessionStore::new(dir.path(), "session.json").load();
    assert_eq!(prefs.language, shared::Language::En);

    let text = run(&["show"], &config).await.unwrap();
    assert!(text.contains("All products | Coming soon | [Helados] | Paletas"));
    assert!(text.contains("Strawberry"));
    assert!(!text.contains("Mango"));

    // per-run overrides leave the session alone
    let text = run(&["show", "--lang", "es", "--category", "soon"], &config)
        .await
        .unwrap();
    assert!(text.contains("[Próximamente]"));
    assert!(text.contains("Pistache"));
    assert!(!text.contains("Fresa"));
    let prefs = SessionStore::new(dir.path(), "session.json").load();
    assert_eq!(prefs.language, shared::Language::En);
}

#[tokio::test]
async fn test_show_json() {
    let server = start().await;
    let dir = TempDir::new().unwrap();
    let config = config(&server, &dir);

    let json = run(&["show", "--json", "--category", "Paletas"], &config)
        .await
        .unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["title"], "La Heladería");
    assert_eq!(value["cards"].as_array().unwrap().len(), 1);
    assert_eq!(value["cards"][0]["id"], "p2");
}

#[tokio::test]
async fn test_show_load_failure_renders_panel() {
    let server = start().await;
    let dir = TempDir::new().unwrap();
    let mut config = config(&server, &dir);
    config.catalog_path = "data/missing.json".into();

    let text = run(&["show"], &config).await.unwrap();
    assert!(text.starts_with('!'));
    assert!(text.contains("No se pudo cargar el catálogo"));
}

#[tokio::test]
async fn test_repo_selection_feeds_admin() {
    let server = start().await;
    let dir = TempDir::new().unwrap();
    let mut config = config(&server, &dir);
    config.owner = String::new();
    config.repo = String::new();

    let err = run(&["admin", "list"], &config).await.unwrap_err();
    assert!(err.to_string().contains("no repository selected"));

    assert_eq!(
        run(&["repo", "acme", "shop"], &config).await.unwrap(),
        "repository: acme/shop@main\n"
    );
    assert_eq!(
        run(&["repo", "acme", "shop", "pages"], &config).await.unwrap(),
        "repository: acme/shop@pages\n"
    );
    // no files on that branch
    assert!(run(&["admin", "list"], &config).await.is_err());

    run(&["repo", "acme", "shop", "main"], &config).await.unwrap();
    let listing = run(&["admin", "list"], &config).await.unwrap();
    assert_eq!(listing.lines().count(), 3);
    assert!(listing.lines().next().unwrap().starts_with("p1"));
}

#[tokio::test]
async fn test_admin_commands_write_through() {
    let server = start().await;
    let dir = TempDir::new().unwrap();
    let config = config(&server, &dir);

    let line = run(&["admin", "delete-sale", "s1"], &config).await.unwrap();
    assert_eq!(line, "deleted sale s1; restocked p1\n");

    let line = run(
        &["admin", "sell", "Luis", "p2:2", "--date", "2024-07-01"],
        &config,
    )
    .await
    .unwrap();
    assert_eq!(line, "recorded sale s1 (2 units)\n");

    let sales = run(&["admin", "sales"], &config).await.unwrap();
    assert!(sales.contains("Luis"));
    assert!(sales.contains("$4.00"));

    let catalog = server.state.content("data/products.json").await.unwrap();
    let catalog = shared::Catalog::from_json(&catalog).unwrap();
    assert_eq!(catalog.product("p1").unwrap().stock, 3);
    assert_eq!(catalog.product("p2").unwrap().stock, 4);
}

#[tokio::test]
async fn test_admin_without_token_is_rejected() {
    let server = start().await;
    let dir = TempDir::new().unwrap();
    let mut config = config(&server, &dir);
    config.token = None;

    let err = run(&["admin", "status", "p1", "ok"], &config)
        .await
        .unwrap_err();
    let err = err.downcast::<storefront::AdminError>().unwrap();
    assert!(matches!(
        err,
        storefront::AdminError::Store(vitrine_client::ClientError::Unauthorized(_))
    ));
}
