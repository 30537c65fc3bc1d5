use serde::{Deserialize, Serialize};
use std::fmt;

/// The Ethereum JSON-RPC methods used by the SDK.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EthMethod {
    /// Balance of an account at a given block.
    GetBalance,
    /// Number of transactions sent from an account, i.e. its next nonce.
    GetTransactionCount,
    /// Current gas price suggested by the node.
    GasPrice,
    /// Chain id used for EIP-155 replay protection.
    ChainId,
    /// Number of the most recent block.
    BlockNumber,
    /// Broadcast a signed, RLP-encoded transaction.
    SendRawTransaction,
    /// Receipt of a transaction, `null` while it is pending.
    GetTransactionReceipt,
}

impl fmt::Display for EthMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let method = match self {
            Self::GetBalance => "eth_getBalance",
            Self::GetTransactionCount => "eth_getTransactionCount",
            Self::GasPrice => "eth_gasPrice",
            Self::ChainId => "eth_chainId",
            Self::BlockNumber => "eth_blockNumber",
            Self::SendRawTransaction => "eth_sendRawTransaction",
            Self::GetTransactionReceipt => "eth_getTransactionReceipt",
        };
        write!(f, "{method}")
    }
}

/// Block selector for state queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockTag {
    /// The most recent block.
    Latest,
    /// The pending state, including transactions still in the mempool.
    Pending,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_eth_method_to_string() {
        assert_eq!(EthMethod::GetBalance.to_string(), "eth_getBalance");
        assert_eq!(EthMethod::GetTransactionCount.to_string(), "eth_getTransactionCount");
        assert_eq!(EthMethod::GasPrice.to_string(), "eth_gasPrice");
        assert_eq!(EthMethod::ChainId.to_string(), "eth_chainId");
        assert_eq!(EthMethod::BlockNumber.to_string(), "eth_blockNumber");
        assert_eq!(EthMethod::SendRawTransaction.to_string(), "eth_sendRawTransaction");
        assert_eq!(EthMethod::GetTransactionReceipt.to_string(), "eth_getTransactionReceipt");
    }

    #[test]
    fn test_block_tag_serialization() {
        assert_eq!(serde_json::to_string(&BlockTag::Latest).unwrap(), "\"latest\"");
        assert_eq!(serde_json::to_string(&BlockTag::Pending).unwrap(), "\"pending\"");
    }
}
