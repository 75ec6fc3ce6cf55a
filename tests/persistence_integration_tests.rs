/// Persistence integration tests
///
/// Records written through the file-backed store survive a reopen
/// Run with: cargo test --test persistence_integration_tests

use legacyvault::{
    FileKvStore, KeyValueStore, LegacyError, LegacyStatus, LegacyVault, NewLegacy, VaultConfig,
};
use std::sync::Arc;
use tempfile::tempdir;

#[tokio::test]
async fn test_records_survive_reopen() {
    let temp = tempdir().expect("temp dir should be created");
    let config = VaultConfig::new().data_path(temp.path().join("vault.snapshot"));

    let id = {
        let vault = LegacyVault::open(&config, "0xAAA").expect("vault should open");
        let id = vault
            .create(
                NewLegacy::new("Financial Account", "iban + pin", "0xBEEF")
                    .conditions("on proof of death"),
            )
            .await
            .expect("create should succeed");
        vault.trigger_inheritance(&id).await.expect("inherit should succeed");
        id
    };

    let reopened = LegacyVault::open(&config, "0xaaa").expect("vault should reopen");
    let record = reopened.get(&id).await.expect("record should be readable");
    assert_eq!(record.status(), LegacyStatus::Inherited);
    assert_eq!(record.inheritance_conditions(), "on proof of death");

    let err = reopened.expire(&id).await.expect_err("terminal state must stick");
    assert!(matches!(err, LegacyError::InvalidState { .. }));
    assert_eq!(reopened.list_mine().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_payloads_written_by_older_clients_are_listed() {
    let temp = tempdir().expect("temp dir should be created");
    let path = temp.path().join("vault.snapshot");

    {
        let store = FileKvStore::open(&path).unwrap();
        store
            .set("legacy_keys", br#"["1690000000000-k2j4h5x"]"#.to_vec())
            .await
            .unwrap();
        store
            .set(
                "legacy_1690000000000-k2j4h5x",
                br#"{"data":"FHE-eyJ9","timestamp":1690000000,"owner":"0xAAA","category":"Crypto Wallet"}"#.to_vec(),
            )
            .await
            .unwrap();
    }

    let config = VaultConfig::new().data_path(&path);
    let vault = LegacyVault::with_store(&config, "0xAAA", Arc::new(FileKvStore::open(&path).unwrap()));

    let records = vault.list().await.unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].id(), "1690000000000-k2j4h5x");
    assert_eq!(records[0].status(), LegacyStatus::Active);

    let expired = vault.expire("1690000000000-k2j4h5x").await.unwrap();
    assert_eq!(expired.status(), LegacyStatus::Expired);
}
