//! Native amount to token units.

use alloy::primitives::U256;

/// 10^(18 - 6): wei per smallest unit of a 6-decimal token.
const TOKEN_SCALE: U256 = U256::from_limbs([1_000_000_000_000, 0, 0, 0]);

/// Scale an 18-decimal native amount to 6-decimal token units.
///
/// Floor division; any remainder below one token unit is dropped.
pub fn native_to_token_units(amount: U256) -> U256 {
    amount / TOKEN_SCALE
}
