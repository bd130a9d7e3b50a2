//! Legacy (EIP-155) transaction building and signing for locally held keys.

use alloy_primitives::{keccak256, Address, Bytes, B256, U256};
use alloy_rlp::{Encodable, Header, EMPTY_STRING_CODE};
use secp256k1::{Message, PublicKey, Secp256k1, SecretKey};

use crate::error::WalletError;

/// An unsigned legacy transaction. `to: None` creates a contract.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LegacyTransaction {
    pub nonce: u64,
    pub gas_price: U256,
    pub gas_limit: u64,
    pub to: Option<Address>,
    pub value: U256,
    pub data: Bytes,
    pub chain_id: u64,
}

/// Result of signing a transaction.
pub struct SignedTransaction {
    pub raw: Vec<u8>,
    pub hash: B256,
}

impl LegacyTransaction {
    /// RLP payload hashed for signing: the nine fields with `chain_id, 0, 0`
    /// in the signature slots.
    pub fn signing_payload(&self) -> Vec<u8> {
        let mut fields = Vec::with_capacity(128 + self.data.len());
        self.encode_fields(&mut fields);
        self.chain_id.encode(&mut fields);
        0u8.encode(&mut fields);
        0u8.encode(&mut fields);
        wrap_list(fields)
    }

    pub fn signing_hash(&self) -> B256 {
        keccak256(self.signing_payload())
    }

    pub fn sign(&self, secret: &SecretKey) -> SignedTransaction {
        let secp = Secp256k1::signing_only();
        let digest = Message::from_digest(self.signing_hash().0);
        let (recovery_id, compact) = secp
            .sign_ecdsa_recoverable(&digest, secret)
            .serialize_compact();

        let v = recovery_id.to_i32() as u64 + self.chain_id * 2 + 35;
        let r = U256::from_be_slice(&compact[..32]);
        let s = U256::from_be_slice(&compact[32..]);

        let mut fields = Vec::with_capacity(192 + self.data.len());
        self.encode_fields(&mut fields);
        v.encode(&mut fields);
        r.encode(&mut fields);
        s.encode(&mut fields);
        let raw = wrap_list(fields);
        let hash = keccak256(&raw);

        SignedTransaction { raw, hash }
    }

    fn encode_fields(&self, out: &mut Vec<u8>) {
        self.nonce.encode(out);
        self.gas_price.encode(out);
        self.gas_limit.encode(out);
        match &self.to {
            Some(to) => to.encode(out),
            None => out.push(EMPTY_STRING_CODE),
        }
        self.value.encode(out);
        self.data.encode(out);
    }
}

/// Parse a hex private key, with or without `0x`.
pub fn parse_secret_key(hex_key: &str) -> Result<SecretKey, WalletError> {
    let trimmed = hex_key.trim();
    let stripped = trimmed.strip_prefix("0x").unwrap_or(trimmed);
    let bytes = alloy_primitives::hex::decode(stripped).map_err(|_| WalletError::InvalidKey)?;
    SecretKey::from_slice(&bytes).map_err(|_| WalletError::InvalidKey)
}

pub fn address_of(secret: &SecretKey) -> Address {
    let secp = Secp256k1::signing_only();
    let public = PublicKey::from_secret_key(&secp, secret);
    let uncompressed = public.serialize_uncompressed();
    // Drop the 0x04 prefix.
    Address::from_raw_public_key(&uncompressed[1..])
}

/// Address a contract gets when created by `sender` at `nonce`.
pub fn contract_address(sender: Address, nonce: u64) -> Address {
    sender.create(nonce)
}

fn wrap_list(payload: Vec<u8>) -> Vec<u8> {
    let mut out = Vec::with_capacity(payload.len() + 9);
    Header {
        list: true,
        payload_length: payload.len(),
    }
    .encode(&mut out);
    out.extend_from_slice(&payload);
    out
}
