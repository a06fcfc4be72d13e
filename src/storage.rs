use crate::errors::AppError;
use crate::models::{Account, AccountStatus, HistoryEntry};
use chrono::NaiveDate;
use std::{env, path::Path, path::PathBuf};
use tokio::fs;
use tracing::{error, info};

/// The on-disk slot holding the whole collection, the file equivalent of
/// the dashboard's old `ea_accounts` browser-storage key.
pub fn resolve_data_path() -> Result<PathBuf, std::io::Error> {
    if let Ok(path) = env::var("APP_DATA_PATH") {
        return Ok(PathBuf::from(path));
    }

    Ok(PathBuf::from("data/ea_accounts.json"))
}

/// Loads the collection, falling back to the demo seed when the file is
/// missing or unreadable. A broken file never takes the server down; the
/// in-memory state simply restarts from the seed.
pub async fn load_accounts(path: &Path) -> Vec<Account> {
    match fs::read(path).await {
        Ok(bytes) => match serde_json::from_slice(&bytes) {
            Ok(accounts) => accounts,
            Err(err) => {
                error!("failed to parse accounts file: {err}");
                seed_accounts()
            }
        },
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            info!("no accounts file yet, starting from demo seed");
            seed_accounts()
        }
        Err(err) => {
            error!("failed to read accounts file: {err}");
            seed_accounts()
        }
    }
}

/// Best-effort mirror of the collection to disk. Callers log a failure
/// and keep going; the in-memory collection stays authoritative for the
/// session.
pub async fn persist_accounts(path: &Path, accounts: &[Account]) -> Result<(), AppError> {
    let payload = serde_json::to_vec_pretty(accounts).map_err(AppError::internal)?;
    fs::write(path, payload).await.map_err(AppError::internal)?;
    Ok(())
}

/// The two demo records the dashboard ships with: one live subscription
/// with a payment on record, one lapsed one with no history.
pub fn seed_accounts() -> Vec<Account> {
    vec![
        Account {
            account: "EA-001".to_string(),
            expire: seed_date(2025, 5, 10),
            status: AccountStatus::Active,
            package: "$22".to_string(),
            history: vec![HistoryEntry {
                date: seed_date(2024, 5, 10),
                package: "$22".to_string(),
                added: "1 month".to_string(),
            }],
        },
        Account {
            account: "EA-002".to_string(),
            expire: seed_date(2024, 1, 1),
            status: AccountStatus::Inactive,
            package: "$15".to_string(),
            history: Vec::new(),
        },
    ]
}

fn seed_date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("seed dates are valid")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(tag: &str) -> PathBuf {
        let nanos = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        let mut path = std::env::temp_dir();
        path.push(format!("ea_manager_{tag}_{}_{nanos}.json", std::process::id()));
        path
    }

    #[tokio::test]
    async fn save_then_load_round_trips() {
        let path = temp_path("roundtrip");
        let accounts = seed_accounts();

        persist_accounts(&path, &accounts).await.unwrap();
        let loaded = load_accounts(&path).await;

        assert_eq!(loaded, accounts);
        let _ = tokio::fs::remove_file(&path).await;
    }

    #[tokio::test]
    async fn missing_file_falls_back_to_seed() {
        let path = temp_path("missing");
        let loaded = load_accounts(&path).await;
        assert_eq!(loaded, seed_accounts());
    }

    #[tokio::test]
    async fn corrupt_file_falls_back_to_seed() {
        let path = temp_path("corrupt");
        tokio::fs::write(&path, b"not json at all").await.unwrap();

        let loaded = load_accounts(&path).await;
        assert_eq!(loaded, seed_accounts());
        let _ = tokio::fs::remove_file(&path).await;
    }

    #[test]
    fn seed_has_demo_records() {
        let seed = seed_accounts();
        assert_eq!(seed.len(), 2);
        assert_eq!(seed[0].account, "EA-001");
        assert_eq!(seed[0].history.len(), 1);
        assert_eq!(seed[1].account, "EA-002");
        assert!(seed[1].history.is_empty());
    }
}
