use crate::{
    error::LedgerSdkError,
    transaction::{LegacyTransaction, TransactionSignature},
};
use alloy_primitives::{Address, Bytes, B256, U256};
use k256::ecdsa::SigningKey;
use rand::rngs::OsRng;
use std::fmt;

/// A secp256k1 key held in memory, used to sign transactions locally.
#[derive(Clone)]
pub struct LocalSigner {
    key: SigningKey,
    address: Address,
}

impl fmt::Debug for LocalSigner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LocalSigner").field("address", &self.address).finish_non_exhaustive()
    }
}

impl LocalSigner {
    /// Creates a signer from a 32-byte private key, given as hex with or without `0x`.
    pub fn from_hex(private_key: &str) -> Result<Self, LedgerSdkError> {
        let bytes = hex::decode(private_key.trim().trim_start_matches("0x"))?;
        let key = SigningKey::from_slice(&bytes)
            .map_err(|err| LedgerSdkError::InvalidKey(err.to_string()))?;
        Ok(Self::from_key(key))
    }

    /// Creates a signer from a freshly generated random key.
    pub fn random() -> Self {
        Self::from_key(SigningKey::random(&mut OsRng))
    }

    fn from_key(key: SigningKey) -> Self {
        let point = key.verifying_key().to_encoded_point(false);
        // Uncompressed SEC1 points are `0x04 || x || y`, the address hashes `x || y`.
        let address = Address::from_raw_public_key(&point.as_bytes()[1..]);
        Self { key, address }
    }

    /// The address controlled by this key.
    pub const fn address(&self) -> Address {
        self.address
    }

    /// Signs a 32-byte prehash, returning `(recovery_id, r, s)`.
    pub fn sign_hash(&self, hash: B256) -> Result<(u8, U256, U256), LedgerSdkError> {
        let (signature, recovery_id) = self
            .key
            .sign_prehash_recoverable(hash.as_slice())
            .map_err(|err| LedgerSdkError::Signing(err.to_string()))?;
        let bytes = signature.to_bytes();
        let r = U256::from_be_slice(&bytes[..32]);
        let s = U256::from_be_slice(&bytes[32..]);
        Ok((recovery_id.to_byte(), r, s))
    }

    /// Signs `tx` with EIP-155 replay protection and returns the raw transaction bytes.
    pub fn sign_transaction(&self, tx: &LegacyTransaction) -> Result<Bytes, LedgerSdkError> {
        let (recovery_id, r, s) = self.sign_hash(tx.signature_hash())?;
        let v = u64::from(recovery_id) + 35 + 2 * tx.chain_id;
        Ok(tx.encode_signed(&TransactionSignature { v, r, s }))
    }
}
