//! Snapshot persistence against a real database file.

use std::path::PathBuf;

use omniprice_core::{compute, ChannelKey, Snapshot};
use omniprice_db::{Database, DbConfig};

fn scratch_path(name: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!(
        "omniprice-{}-{}.db",
        name,
        std::process::id()
    ));
    remove_db_files(&path);
    path
}

fn remove_db_files(path: &PathBuf) {
    for suffix in ["", "-wal", "-shm"] {
        let mut file = path.clone().into_os_string();
        file.push(suffix);
        let _ = std::fs::remove_file(file);
    }
}

#[tokio::test]
async fn state_survives_reopen() {
    let path = scratch_path("reopen");

    let mut snapshot = Snapshot::defaults();
    snapshot.inputs.discount_rate = 20.0;
    snapshot.selected_channels = vec![ChannelKey::Web, ChannelKey::MarketplaceC];
    snapshot.settings.update_value("siteShip", 99.0).unwrap();

    {
        let db = Database::new(DbConfig::new(&path)).await.unwrap();
        db.snapshots().save_snapshot(&snapshot).await.unwrap();
        db.close().await;
    }

    let db = Database::new(DbConfig::new(&path)).await.unwrap();
    let loaded = db.snapshots().load_or_default().await.unwrap();
    assert_eq!(loaded, snapshot);

    // same prices from the reloaded state
    let before = compute(&snapshot.inputs, &snapshot.settings, &snapshot.selected_channels);
    let after = compute(&loaded.inputs, &loaded.settings, &loaded.selected_channels);
    assert_eq!(before, after);
    assert_eq!(after.len(), 2);

    db.close().await;
    remove_db_files(&path);
}

#[tokio::test]
async fn fresh_file_reports_migrations() {
    let path = scratch_path("fresh");

    let db = Database::new(DbConfig::new(&path)).await.unwrap();
    assert!(db.health_check().await);
    assert_eq!(db.migration_status().await.unwrap(), (1, 1));
    assert!(db.snapshots().load_snapshot().await.unwrap().is_none());

    db.close().await;
    remove_db_files(&path);
}
