use crate::{error::LedgerSdkError, methods::EthMethod};
use alloy_primitives::{Address, B256, U256, U64};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;

/// The JSON-RPC protocol version sent with every request.
pub const JSONRPC_VERSION: &str = "2.0";

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct RpcRequest<P> {
    pub jsonrpc: &'static str,
    pub id: u64,
    pub method: String,
    pub params: P,
}

impl<P: Serialize> RpcRequest<P> {
    pub fn new(id: u64, method: EthMethod, params: P) -> Self {
        Self { jsonrpc: JSONRPC_VERSION, id, method: method.to_string(), params }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct RpcErrorObject {
    pub code: i64,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct RpcResponse {
    pub id: Option<u64>,
    #[serde(default)]
    pub result: Value,
    pub error: Option<RpcErrorObject>,
}

impl RpcResponse {
    /// Extracts the typed result, turning an error object into [`LedgerSdkError::Rpc`].
    ///
    /// A `null` result is handed to the target type, so `Option<T>` results such as a
    /// pending transaction receipt decode to `None`.
    pub fn into_result<R: DeserializeOwned>(self, method: EthMethod) -> Result<R, LedgerSdkError> {
        if let Some(error) = self.error {
            return Err(LedgerSdkError::Rpc {
                method: method.to_string(),
                code: error.code,
                message: error.message,
            });
        }

        let was_null = self.result.is_null();
        serde_json::from_value(self.result).map_err(|err| {
            if was_null {
                LedgerSdkError::EmptyResponse(method.to_string())
            } else {
                err.into()
            }
        })
    }
}

/// The subset of an Ethereum transaction receipt needed to judge inclusion and fees.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TransactionReceipt {
    pub transaction_hash: B256,
    pub block_hash: Option<B256>,
    pub block_number: Option<U64>,
    pub from: Option<Address>,
    pub to: Option<Address>,
    /// `0x1` on success, `0x0` when execution reverted.
    pub status: Option<U64>,
    pub gas_used: Option<U64>,
    pub effective_gas_price: Option<U256>,
}

impl TransactionReceipt {
    pub fn block_number(&self) -> Option<u64> {
        self.block_number.map(|n| n.to::<u64>())
    }

    pub fn gas_used(&self) -> Option<u64> {
        self.gas_used.map(|n| n.to::<u64>())
    }

    /// Whether execution succeeded. `None` for pre-Byzantium receipts without a status.
    pub fn succeeded(&self) -> Option<bool> {
        self.status.map(|status| status != U64::ZERO)
    }
}
