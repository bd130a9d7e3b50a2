//! Counting the NFTs whose token allotment has not been claimed yet.

use alloy_primitives::{Address, U256};

use crate::contracts::{NftContract, TokenContract};
use crate::error::WalletError;
use crate::provider::Provider;

/// Count the NFTs held by `owner` whose token allotment is still unclaimed.
///
/// One `balanceOf` on the collection, then an index lookup and a claimed
/// check per NFT. Errors abort the scan; callers treat that as zero.
pub async fn tokens_to_be_claimed<P: Provider>(
    nft: &NftContract<'_, P>,
    token: &TokenContract<'_, P>,
    owner: Address,
) -> Result<u64, WalletError> {
    let owned = nft.balance_of(owner).await?;
    if owned.is_zero() {
        return Ok(0);
    }

    let mut unclaimed = 0u64;
    let mut index = U256::ZERO;
    while index < owned {
        let token_id = nft.token_of_owner_by_index(owner, index).await?;
        if !token.token_ids_claimed(token_id).await? {
            unclaimed += 1;
        }
        index += U256::from(1);
    }
    Ok(unclaimed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::NetworkConfig;
    use crate::session::{Capability, WalletSession};
    use crate::testing::{Call, MockChain, ALICE, BOB};

    async fn scan(chain: &std::sync::Arc<MockChain>, owner: Address) -> Result<u64, WalletError> {
        let session = WalletSession::new(chain.clone(), NetworkConfig::default());
        let handle = session.handle(Capability::Read).await?;
        let nft = NftContract::new(chain.nft(), handle);
        let token = TokenContract::new(chain.token(), handle);
        tokens_to_be_claimed(&nft, &token, owner).await
    }

    #[tokio::test]
    async fn no_nfts_means_no_per_item_queries() {
        let chain = MockChain::goerli();
        assert_eq!(scan(&chain, BOB).await.unwrap(), 0);
        assert_eq!(chain.contract_calls(), vec![Call::NftBalanceOf]);
    }

    #[tokio::test]
    async fn counts_unclaimed_ids() {
        let chain = MockChain::goerli();
        chain.give_nfts(ALICE, &[3, 8, 21, 34, 55]);
        chain.mark_claimed(&[8, 55]);

        assert_eq!(scan(&chain, ALICE).await.unwrap(), 3);

        let calls = chain.contract_calls();
        let count = |c: Call| calls.iter().filter(|x| **x == c).count();
        assert_eq!(count(Call::NftBalanceOf), 1);
        assert_eq!(count(Call::TokenOfOwnerByIndex), 5);
        assert_eq!(count(Call::TokenIdsClaimed), 5);
    }

    #[tokio::test]
    async fn result_does_not_depend_on_order() {
        let forward = MockChain::goerli();
        forward.give_nfts(ALICE, &[1, 2, 3, 4]);
        forward.mark_claimed(&[1, 2]);

        let reversed = MockChain::goerli();
        reversed.give_nfts(ALICE, &[4, 3, 2, 1]);
        reversed.mark_claimed(&[1, 2]);

        assert_eq!(scan(&forward, ALICE).await.unwrap(), 2);
        assert_eq!(scan(&reversed, ALICE).await.unwrap(), 2);
    }

    #[tokio::test]
    async fn failure_mid_scan_is_an_error() {
        let chain = MockChain::goerli();
        chain.give_nfts(ALICE, &[1, 2, 3]);
        chain.fail_after(Call::TokenIdsClaimed, 1);

        assert!(scan(&chain, ALICE).await.is_err());
    }
}
