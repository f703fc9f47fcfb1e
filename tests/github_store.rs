//! Round trip against a real GitHub repository.
//!
//! Needs `GITHUB_TOKEN`, `GITHUB_OWNER` and `GITHUB_REPO`, and writes a
//! scratch file under `data/`. Skipped when credentials are missing.

#![cfg(feature = "integration_test")]
#![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

use chordsbox::config::Config;
use chordsbox::error::Error;
use chordsbox::store::{DocumentStore, GitHubStore};

fn setup_store() -> Option<GitHubStore> {
    match Config::load() {
        Ok(config) if config.has_store_credentials() => Some(GitHubStore::new(&config)),
        Ok(_) => {
            println!("Skipping integration test: GitHub credentials not found in environment/.env file.");
            None
        }
        Err(e) => {
            println!("Skipping integration test: Failed to load config: {e}");
            None
        }
    }
}

#[tokio::test]
async fn test_document_round_trip() {
    let Some(store) = setup_store() else { return };
    let path = format!("data/integration-{}.json", uuid::Uuid::new_v4());

    assert!(store.get(&path).await.unwrap().is_none());

    let r1 = store.put(&path, "{\"n\":1}", None, "Integration test create").await.unwrap();
    let doc = store.get(&path).await.unwrap().unwrap();
    assert_eq!(doc.content, "{\"n\":1}");
    assert_eq!(doc.revision, r1);

    let r2 = store.put(&path, "{\"n\":2}", Some(&r1), "Integration test update").await.unwrap();

    let err = store.put(&path, "{\"n\":3}", Some(&r1), "Integration test stale").await.unwrap_err();
    assert!(matches!(err, Error::Conflict { .. }), "expected conflict, got {err}");

    store.delete(&path, &r2, "Integration test cleanup").await.unwrap();
    assert!(store.get(&path).await.unwrap().is_none());
}
