//! Token contract addresses by chain.

use alloy::primitives::{address, Address};
use std::collections::BTreeMap;

use crate::faucet::types::{FaucetError, FaucetResult};
use crate::txmgr::ChainId;

/// Symbol of the token in the built-in table.
pub const USDC_E_SYMBOL: &str = "USDC.e";

/// Fixed mapping from chain to the contract of one token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenLedger {
    symbol: String,
    addresses: BTreeMap<ChainId, Address>,
}

impl TokenLedger {
    pub fn new(
        symbol: impl Into<String>,
        addresses: impl IntoIterator<Item = (ChainId, Address)>,
    ) -> Self {
        Self {
            symbol: symbol.into(),
            addresses: addresses.into_iter().collect(),
        }
    }

    /// Bridged USDC on OP Stack mainnets and testnets.
    pub fn usdc_e() -> Self {
        Self::new(
            USDC_E_SYMBOL,
            [
                (ChainId(10), address!("0x7F5c764cBc14f9669B88837ca1490cCa17c31607")),
                (ChainId(420), address!("0x7E07E15D2a87A24492740D16f5bdF58c16db0c4E")),
                (ChainId(11155420), address!("0x5fd84259d66Cd46123540766Be93DFE6D43130D7")),
                (ChainId(8453), address!("0x833589fCD6eDb6E08f4c7C32D4f71b54bdA02913")),
                (ChainId(84531), address!("0xf175520c52418dfe19c8098071a252da48cd1c19")),
                (ChainId(84532), address!("0x036CbD53842c5426634e7929541eC2318f3dCF7e")),
            ],
        )
    }

    /// Same table under another symbol.
    pub fn with_symbol(mut self, symbol: impl Into<String>) -> Self {
        self.symbol = symbol.into();
        self
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Whether `symbol` names this ledger's token, ignoring ASCII case.
    pub fn serves(&self, symbol: &str) -> bool {
        self.symbol.eq_ignore_ascii_case(symbol)
    }

    /// Token contract on `chain_id`.
    pub fn address_for(&self, chain_id: ChainId) -> FaucetResult<Address> {
        self.addresses
            .get(&chain_id)
            .copied()
            .ok_or(FaucetError::UnsupportedChainForToken(chain_id))
    }

    pub fn chains(&self) -> impl Iterator<Item = ChainId> + '_ {
        self.addresses.keys().copied()
    }
}

impl Default for TokenLedger {
    fn default() -> Self {
        Self::usdc_e()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_lookup() {
        let ledger = TokenLedger::default();
        assert_eq!(
            ledger.address_for(ChainId(8453)).unwrap(),
            address!("0x833589fCD6eDb6E08f4c7C32D4f71b54bdA02913")
        );
        assert_eq!(ledger.chains().count(), 6);
    }

    #[test]
    fn test_unknown_chain() {
        let ledger = TokenLedger::default();
        for chain in [1u64, 31337, 0, u64::MAX] {
            assert!(matches!(
                ledger.address_for(ChainId(chain)),
                Err(FaucetError::UnsupportedChainForToken(c)) if c == ChainId(chain)
            ));
        }
    }

    #[test]
    fn test_custom_table() {
        let ledger = TokenLedger::new("TST", [(ChainId(31337), Address::repeat_byte(0xaa))]);
        assert_eq!(ledger.address_for(ChainId(31337)).unwrap(), Address::repeat_byte(0xaa));
        assert!(ledger.address_for(ChainId(10)).is_err());
        assert!(ledger.serves("tst"));
        assert!(!ledger.serves("USDC.e"));
    }
}
