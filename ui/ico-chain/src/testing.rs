//! In-memory chain used by the unit tests.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, MutexGuard};

use alloy_primitives::{address, keccak256, Address, Bytes, TxHash, U256, U64};
use alloy_sol_types::{SolCall, SolInterface};

use crate::contracts::{ICryptoDevToken, ICryptoDevs};
use crate::error::WalletError;
use crate::provider::Provider;
use crate::rpc::{TransactionReceipt, TransactionRequest};
use crate::units::{TOKENS_PER_NFT, TOKEN_PRICE_WEI};

pub const ALICE: Address = address!("70997970c51812dc3a010c7d01b50e0d17dc79c8");
pub const BOB: Address = address!("3c44cdddb6a900fa2b585dd299e03d12fa4293bc");
pub const DEPLOYER: Address = address!("f39fd6e51aad88f6f4ce6ab8827279cfffb92266");

const TOKEN: Address = address!("5fbdb2315678afecb367f032d93f642f64180aa3");
const NFT: Address = address!("e7f1725e7734ce288f8367e1bb143e90bb3f0512");

fn whole(tokens: u64) -> U256 {
    U256::from(tokens) * U256::from(10u64).pow(U256::from(18))
}

/// Every contract entry point the page can hit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Call {
    NftBalanceOf,
    TokenOfOwnerByIndex,
    TokenBalanceOf,
    TotalSupply,
    Owner,
    TokenIdsClaimed,
    Mint,
    Claim,
    Withdraw,
}

struct Ledger {
    chain_id: u64,
    account: Address,
    reject_connection: bool,
    owner: Address,
    balances: HashMap<Address, U256>,
    total_supply: U256,
    nfts: HashMap<Address, Vec<U256>>,
    claimed: HashSet<U256>,
    withdrawn: bool,
    calls: Vec<Call>,
    chain_id_queries: usize,
    failures: HashMap<Call, usize>,
    receipt_delay: usize,
    receipts: HashMap<TxHash, (TransactionReceipt, usize)>,
    sent: Vec<TransactionRequest>,
    nonce: u64,
}

pub struct MockChain {
    ledger: Mutex<Ledger>,
}

impl MockChain {
    /// Goerli, ALICE connected, DEPLOYER owning the token contract.
    pub fn goerli() -> Arc<Self> {
        Arc::new(Self {
            ledger: Mutex::new(Ledger {
                chain_id: 5,
                account: ALICE,
                reject_connection: false,
                owner: DEPLOYER,
                balances: HashMap::new(),
                total_supply: U256::ZERO,
                nfts: HashMap::new(),
                claimed: HashSet::new(),
                withdrawn: false,
                calls: Vec::new(),
                chain_id_queries: 0,
                failures: HashMap::new(),
                receipt_delay: 0,
                receipts: HashMap::new(),
                sent: Vec::new(),
                nonce: 0,
            }),
        })
    }

    fn ledger(&self) -> MutexGuard<'_, Ledger> {
        self.ledger.lock().unwrap()
    }

    pub fn token(&self) -> Address {
        TOKEN
    }

    pub fn nft(&self) -> Address {
        NFT
    }

    pub fn switch_chain(&self, chain_id: u64) {
        self.ledger().chain_id = chain_id;
    }

    pub fn switch_account(&self, account: Address) {
        self.ledger().account = account;
    }

    pub fn reject_connection(&self) {
        self.ledger().reject_connection = true;
    }

    pub fn give_nfts(&self, owner: Address, ids: &[u64]) {
        let ids = ids.iter().map(|id| U256::from(*id));
        self.ledger().nfts.entry(owner).or_default().extend(ids);
    }

    pub fn mark_claimed(&self, ids: &[u64]) {
        self.ledger().claimed.extend(ids.iter().map(|id| U256::from(*id)));
    }

    pub fn set_balance(&self, account: Address, tokens: u64) {
        let mut ledger = self.ledger();
        let amount = whole(tokens);
        let previous = ledger.balances.insert(account, amount).unwrap_or_default();
        ledger.total_supply = ledger.total_supply - previous + amount;
    }

    /// Let `call` succeed `successes` more times, then fail with an RPC error.
    pub fn fail_after(&self, call: Call, successes: usize) {
        self.ledger().failures.insert(call, successes);
    }

    /// Receipts only show up after this many polls.
    pub fn delay_receipts(&self, polls: usize) {
        self.ledger().receipt_delay = polls;
    }

    pub fn contract_calls(&self) -> Vec<Call> {
        self.ledger().calls.clone()
    }

    pub fn chain_id_queries(&self) -> usize {
        self.ledger().chain_id_queries
    }

    pub fn sent(&self) -> Vec<TransactionRequest> {
        self.ledger().sent.clone()
    }

    pub fn withdrawn(&self) -> bool {
        self.ledger().withdrawn
    }
}

impl Ledger {
    fn record(&mut self, call: Call) -> Result<(), WalletError> {
        self.calls.push(call);
        if let Some(remaining) = self.failures.get_mut(&call) {
            if *remaining == 0 {
                return Err(WalletError::Rpc {
                    code: -32000,
                    message: format!("{call:?} failed"),
                });
            }
            *remaining -= 1;
        }
        Ok(())
    }

    fn read_token(&mut self, data: &[u8]) -> Result<Vec<u8>, WalletError> {
        use ICryptoDevToken::ICryptoDevTokenCalls as C;
        match C::abi_decode(data)? {
            C::balanceOf(c) => {
                self.record(Call::TokenBalanceOf)?;
                let balance = self.balances.get(&c.account).copied().unwrap_or_default();
                Ok(ICryptoDevToken::balanceOfCall::abi_encode_returns(&balance))
            }
            C::totalSupply(_) => {
                self.record(Call::TotalSupply)?;
                Ok(ICryptoDevToken::totalSupplyCall::abi_encode_returns(&self.total_supply))
            }
            C::owner(_) => {
                self.record(Call::Owner)?;
                Ok(ICryptoDevToken::ownerCall::abi_encode_returns(&self.owner))
            }
            C::tokenIdsClaimed(c) => {
                self.record(Call::TokenIdsClaimed)?;
                let claimed = self.claimed.contains(&c.tokenId);
                Ok(ICryptoDevToken::tokenIdsClaimedCall::abi_encode_returns(&claimed))
            }
            _ => Err(WalletError::Rpc {
                code: -32000,
                message: "eth_call on a state-changing function".into(),
            }),
        }
    }

    fn read_nft(&mut self, data: &[u8]) -> Result<Vec<u8>, WalletError> {
        use ICryptoDevs::ICryptoDevsCalls as C;
        match C::abi_decode(data)? {
            C::balanceOf(c) => {
                self.record(Call::NftBalanceOf)?;
                let owned = self.nfts.get(&c.owner).map_or(0, Vec::len);
                Ok(ICryptoDevs::balanceOfCall::abi_encode_returns(&U256::from(owned)))
            }
            C::tokenOfOwnerByIndex(c) => {
                self.record(Call::TokenOfOwnerByIndex)?;
                let index: usize = c.index.to();
                let id = self
                    .nfts
                    .get(&c.owner)
                    .and_then(|ids| ids.get(index).copied())
                    .ok_or_else(|| WalletError::Rpc {
                        code: 3,
                        message: "owner index out of bounds".into(),
                    })?;
                Ok(ICryptoDevs::tokenOfOwnerByIndexCall::abi_encode_returns(&id))
            }
        }
    }

    /// Apply a state-changing call; `false` means the contract reverted.
    fn execute(&mut self, from: Address, value: U256, data: &[u8]) -> Result<bool, WalletError> {
        use ICryptoDevToken::ICryptoDevTokenCalls as C;
        match C::abi_decode(data)? {
            C::mint(c) => {
                self.record(Call::Mint)?;
                let minted = c.amount * whole(1);
                if value != c.amount * TOKEN_PRICE_WEI
                    || self.total_supply + minted > whole(10_000)
                {
                    return Ok(false);
                }
                *self.balances.entry(from).or_default() += minted;
                self.total_supply += minted;
                Ok(true)
            }
            C::claim(_) => {
                self.record(Call::Claim)?;
                let owned = self.nfts.get(&from).cloned().unwrap_or_default();
                let unclaimed: Vec<U256> = owned
                    .into_iter()
                    .filter(|id| !self.claimed.contains(id))
                    .collect();
                if unclaimed.is_empty() {
                    return Ok(false);
                }
                let granted = whole(TOKENS_PER_NFT * unclaimed.len() as u64);
                self.claimed.extend(unclaimed);
                *self.balances.entry(from).or_default() += granted;
                self.total_supply += granted;
                Ok(true)
            }
            C::withdraw(_) => {
                self.record(Call::Withdraw)?;
                if from != self.owner {
                    return Ok(false);
                }
                self.withdrawn = true;
                Ok(true)
            }
            _ => Err(WalletError::Rpc {
                code: -32000,
                message: "transaction to a view function".into(),
            }),
        }
    }
}

impl Provider for MockChain {
    async fn request_accounts(&self) -> Result<Vec<Address>, WalletError> {
        let ledger = self.ledger();
        if ledger.reject_connection {
            return Err(WalletError::UserRejected);
        }
        Ok(vec![ledger.account])
    }

    async fn accounts(&self) -> Result<Vec<Address>, WalletError> {
        let ledger = self.ledger();
        if ledger.reject_connection {
            return Ok(Vec::new());
        }
        Ok(vec![ledger.account])
    }

    async fn chain_id(&self) -> Result<u64, WalletError> {
        let mut ledger = self.ledger();
        ledger.chain_id_queries += 1;
        Ok(ledger.chain_id)
    }

    async fn call(&self, request: &TransactionRequest) -> Result<Bytes, WalletError> {
        let mut ledger = self.ledger();
        let data = request.data.clone().unwrap_or_default();
        let output = if request.to == Some(TOKEN) {
            ledger.read_token(&data)?
        } else if request.to == Some(NFT) {
            ledger.read_nft(&data)?
        } else {
            return Ok(Bytes::new());
        };
        Ok(output.into())
    }

    async fn send_transaction(&self, request: &TransactionRequest) -> Result<TxHash, WalletError> {
        let mut ledger = self.ledger();
        ledger.sent.push(request.clone());

        let from = request.from.ok_or(WalletError::NotSigner)?;
        let data = request.data.clone().unwrap_or_default();
        let value = request.value.unwrap_or_default();
        let succeeded = if request.to == Some(TOKEN) {
            ledger.execute(from, value, &data)?
        } else {
            true
        };

        ledger.nonce += 1;
        let hash = keccak256(ledger.nonce.to_be_bytes());
        let receipt = TransactionReceipt {
            transaction_hash: hash,
            block_number: Some(U64::from(ledger.nonce)),
            status: Some(U64::from(succeeded as u8)),
            contract_address: None,
        };
        let delay = ledger.receipt_delay;
        ledger.receipts.insert(hash, (receipt, delay));
        Ok(hash)
    }

    async fn transaction_receipt(
        &self,
        hash: TxHash,
    ) -> Result<Option<TransactionReceipt>, WalletError> {
        let mut ledger = self.ledger();
        match ledger.receipts.get_mut(&hash) {
            Some((_, remaining)) if *remaining > 0 => {
                *remaining -= 1;
                Ok(None)
            }
            Some((receipt, _)) => Ok(Some(receipt.clone())),
            None => Ok(None),
        }
    }
}
