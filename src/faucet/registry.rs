//! The set of configured faucets.

use std::collections::BTreeMap;
use std::sync::Arc;
use thiserror::Error;

use crate::config::validation::ValidationError;
use crate::config::FaucetServiceConfig;
use crate::faucet::{Faucet, FaucetId};
use crate::observability::Metricer;
use crate::txmgr::{SimpleTxManager, TxManagerError};

/// Failure to bring up one configured faucet.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("faucet {id}: {source}")]
    TxManager {
        id: FaucetId,
        #[source]
        source: TxManagerError,
    },

    #[error("faucet {id}: {source}")]
    Config {
        id: FaucetId,
        #[source]
        source: ValidationError,
    },
}

/// Faucets by ID. Cheap to clone; the set is fixed after construction.
#[derive(Debug, Clone, Default)]
pub struct FaucetRegistry {
    faucets: Arc<BTreeMap<FaucetId, Arc<Faucet>>>,
}

impl FaucetRegistry {
    pub fn new(faucets: impl IntoIterator<Item = Arc<Faucet>>) -> Self {
        let faucets = faucets
            .into_iter()
            .map(|f| (f.id().clone(), f))
            .collect();
        Self {
            faucets: Arc::new(faucets),
        }
    }

    /// Start a transaction manager and faucet for every configured entry.
    pub async fn from_config(
        config: &FaucetServiceConfig,
        metrics: Arc<dyn Metricer>,
    ) -> Result<Self, RegistryError> {
        let mut faucets = Vec::with_capacity(config.faucets.len());

        for (id, entry) in &config.faucets {
            let tokens = entry.token_ledger().map_err(|source| RegistryError::Config {
                id: id.clone(),
                source,
            })?;
            let tx_mgr = SimpleTxManager::from_config(id.clone(), entry)
                .await
                .map_err(|source| RegistryError::TxManager {
                    id: id.clone(),
                    source,
                })?;

            let faucet = Faucet::new(id.clone(), Arc::new(tx_mgr), metrics.clone(), tokens);
            if entry.disabled {
                faucet.disable().await;
            }
            faucets.push(Arc::new(faucet));
        }

        tracing::info!(count = faucets.len(), "Faucets initialized");
        Ok(Self::new(faucets))
    }

    pub fn get(&self, id: &FaucetId) -> Option<Arc<Faucet>> {
        self.faucets.get(id).cloned()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<Faucet>> {
        self.faucets.values()
    }

    pub fn len(&self) -> usize {
        self.faucets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.faucets.is_empty()
    }

    /// Apply the `disabled` flags of a reloaded config.
    ///
    /// Faucets added or removed by the new config are only logged; that needs a restart.
    pub async fn apply_config(&self, config: &FaucetServiceConfig) {
        for (id, entry) in &config.faucets {
            let Some(faucet) = self.get(id) else {
                tracing::warn!(faucet = %id, "New faucet in config ignored until restart");
                continue;
            };
            if faucet.is_enabled().await == entry.disabled {
                if entry.disabled {
                    faucet.disable().await;
                } else {
                    faucet.enable().await;
                }
            }
        }

        for id in self.faucets.keys() {
            if !config.faucets.contains_key(id) {
                tracing::warn!(faucet = %id, "Faucet removed from config stays active until restart");
            }
        }
    }

    /// Close every faucet.
    pub async fn close_all(&self) {
        for faucet in self.faucets.values() {
            faucet.close().await;
        }
    }
}
