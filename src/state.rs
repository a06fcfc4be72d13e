use crate::auth::CredentialCheck;
use crate::models::Account;
use crate::summary::{AuditCache, AuditGenerator};
use std::{path::PathBuf, sync::Arc};
use tokio::sync::Mutex;

/// Shared state behind every handler. The account collection is the one
/// mutable resource; only the lifecycle entry points in `handlers` write
/// to it, everything else reads.
#[derive(Clone)]
pub struct AppState {
    pub data_path: PathBuf,
    pub accounts: Arc<Mutex<Vec<Account>>>,
    pub audit: Arc<Mutex<AuditCache>>,
    pub generator: Arc<dyn AuditGenerator>,
    pub credentials: Arc<dyn CredentialCheck>,
}

impl AppState {
    pub fn new(
        data_path: PathBuf,
        accounts: Vec<Account>,
        generator: Arc<dyn AuditGenerator>,
        credentials: Arc<dyn CredentialCheck>,
    ) -> Self {
        Self {
            data_path,
            accounts: Arc::new(Mutex::new(accounts)),
            audit: Arc::new(Mutex::new(AuditCache::default())),
            generator,
            credentials,
        }
    }
}
