//! Token amounts and prices.

use alloy_primitives::{utils::format_ether, U256};

use crate::error::WalletError;

/// 0.001 ether per whole token.
pub const TOKEN_PRICE_WEI: U256 = U256::from_limbs([1_000_000_000_000_000, 0, 0, 0]);

/// Tokens granted for each unclaimed NFT.
pub const TOKENS_PER_NFT: u64 = 10;

/// Hard cap enforced by the contract, in whole tokens.
pub const MAX_TOTAL_SUPPLY: u64 = 10_000;

/// Payment to attach to `mint(amount)`.
pub fn mint_value(amount: U256) -> Result<U256, WalletError> {
    amount
        .checked_mul(TOKEN_PRICE_WEI)
        .ok_or_else(|| WalletError::InvalidAmount(format!("{amount} tokens overflows the price")))
}

/// Parse the mint-amount input. Blank input counts as zero.
pub fn parse_token_amount(input: &str) -> Result<U256, WalletError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Ok(U256::ZERO);
    }
    U256::from_str_radix(trimmed, 10)
        .map_err(|_| WalletError::InvalidAmount(format!("{trimmed:?} is not a whole number")))
}

/// Render a base-unit amount as ether, e.g. `1.5`, `0.0`.
pub fn format_tokens(amount: U256) -> String {
    let full = format_ether(amount);
    match full.split_once('.') {
        Some((whole, frac)) => {
            let frac = frac.trim_end_matches('0');
            if frac.is_empty() {
                format!("{whole}.0")
            } else {
                format!("{whole}.{frac}")
            }
        }
        None => full,
    }
}
