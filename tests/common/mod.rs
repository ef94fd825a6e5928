//! Shared helpers for integration tests.

use seathub::{AppConfig, Broker, DatabaseConfig, SeedConfig, SeedTool};

/// A started broker plus the tempdir holding its database file.
pub struct TestBroker {
    pub broker: Broker,
    pub _dir: tempfile::TempDir,
}

/// A seed entry with an explicit split and a 1000.0 commit price.
pub fn seed_tool(
    name: &str,
    total: i64,
    commit_qty: i64,
    max_overage: i64,
    overage_price: f64,
) -> SeedTool {
    SeedTool {
        tool: name.to_string(),
        total,
        commit_qty: Some(commit_qty),
        max_overage: Some(max_overage),
        commit_price: Some(1000.0),
        overage_price_per_license: Some(overage_price),
    }
}

/// Boot a broker against a fresh file-backed database.
pub async fn start_broker(tools: Vec<SeedTool>) -> TestBroker {
    let dir = tempfile::tempdir().expect("create tempdir");
    let path = dir.path().join("seathub.db");

    let config = AppConfig {
        database: DatabaseConfig::for_path(path.to_string_lossy()),
        logging: Default::default(),
        seed: SeedConfig { tools },
    };

    let broker = Broker::start(&config).await.expect("start broker");
    TestBroker { broker, _dir: dir }
}
