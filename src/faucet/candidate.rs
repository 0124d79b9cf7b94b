//! Transaction candidates for native and token funding.

use alloy::primitives::{Address, Bytes, U256};
use alloy::sol;
use alloy::sol_types::SolCall;

use crate::txmgr::TxCandidate;

sol! {
    /// ERC-20 transfer.
    function transfer(address to, uint256 amount) external returns (bool);
}

const PUSH20: u8 = 0x73;
const SELFDESTRUCT: u8 = 0xff;

/// What a candidate moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transfer {
    Native,
    Token { contract: Address },
}

/// Build the candidate for `transfer`. Token amounts are in token units.
pub fn build(transfer: Transfer, target: Address, amount: U256) -> TxCandidate {
    match transfer {
        Transfer::Native => native_transfer(target, amount),
        Transfer::Token { contract } => token_transfer(contract, target, amount),
    }
}

/// Init code that self-destructs to `target`, endowed with `amount`.
///
/// Deploying it forwards the value without running any code at `target`.
pub fn native_transfer(target: Address, amount: U256) -> TxCandidate {
    let mut code = Vec::with_capacity(22);
    code.push(PUSH20);
    code.extend_from_slice(target.as_slice());
    code.push(SELFDESTRUCT);

    TxCandidate {
        tx_data: Bytes::from(code),
        to: None,
        gas_limit: 0,
        value: amount,
    }
}

/// `transfer(target, amount)` on `contract`, no native value.
pub fn token_transfer(contract: Address, target: Address, amount: U256) -> TxCandidate {
    let call = transferCall { to: target, amount };

    TxCandidate {
        tx_data: Bytes::from(call.abi_encode()),
        to: Some(contract),
        gas_limit: 0,
        value: U256::ZERO,
    }
}
