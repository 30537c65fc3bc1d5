use alloy_primitives::{keccak256, Address, Bytes, B256, U256};
use alloy_rlp::{BufMut, Encodable, Header};

/// A legacy (type 0) transaction with EIP-155 replay protection.
///
/// Legacy transactions are accepted by every EVM-compatible ledger, which makes them the
/// lowest common denominator for a plain value transfer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LegacyTransaction {
    /// The chain id mixed into the signature.
    pub chain_id: u64,
    /// The sender's nonce.
    pub nonce: u64,
    /// Price paid per unit of gas, in wei.
    pub gas_price: U256,
    /// Maximum gas the transaction may consume.
    pub gas_limit: u64,
    /// The recipient.
    pub to: Address,
    /// Native value moved to the recipient, in wei.
    pub value: U256,
    /// Calldata, empty for a plain transfer.
    pub input: Bytes,
}

/// A recoverable secp256k1 signature in EIP-155 form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransactionSignature {
    /// `recovery_id + 35 + 2 * chain_id`.
    pub v: u64,
    pub r: U256,
    pub s: U256,
}

impl LegacyTransaction {
    fn fields_len(&self) -> usize {
        self.nonce.length()
            + self.gas_price.length()
            + self.gas_limit.length()
            + self.to.length()
            + self.value.length()
            + self.input.length()
    }

    fn encode_fields(&self, out: &mut dyn BufMut) {
        self.nonce.encode(out);
        self.gas_price.encode(out);
        self.gas_limit.encode(out);
        self.to.encode(out);
        self.value.encode(out);
        self.input.encode(out);
    }

    /// RLP payload that is hashed and signed:
    /// `[nonce, gas_price, gas_limit, to, value, input, chain_id, 0, 0]`.
    pub fn signing_payload(&self) -> Vec<u8> {
        let payload_length = self.fields_len() + self.chain_id.length() + 2 * 0u8.length();
        let mut out = Vec::with_capacity(payload_length + 3);
        Header { list: true, payload_length }.encode(&mut out);
        self.encode_fields(&mut out);
        self.chain_id.encode(&mut out);
        0u8.encode(&mut out);
        0u8.encode(&mut out);
        out
    }

    /// The keccak hash of [`Self::signing_payload`].
    pub fn signature_hash(&self) -> B256 {
        keccak256(self.signing_payload())
    }

    /// Raw signed transaction as expected by `eth_sendRawTransaction`:
    /// `[nonce, gas_price, gas_limit, to, value, input, v, r, s]`.
    pub fn encode_signed(&self, signature: &TransactionSignature) -> Bytes {
        let payload_length = self.fields_len()
            + signature.v.length()
            + signature.r.length()
            + signature.s.length();
        let mut out = Vec::with_capacity(payload_length + 3);
        Header { list: true, payload_length }.encode(&mut out);
        self.encode_fields(&mut out);
        signature.v.encode(&mut out);
        signature.r.encode(&mut out);
        signature.s.encode(&mut out);
        out.into()
    }
}
