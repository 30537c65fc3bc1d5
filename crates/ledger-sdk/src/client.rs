use super::{
    error::LedgerSdkError,
    methods::{BlockTag, EthMethod},
    model::{RpcRequest, RpcResponse, TransactionReceipt},
};
use alloy_primitives::{Address, Bytes, B256, U256, U64};
use reqwest::Client;
use serde::{de::DeserializeOwned, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use url::Url;

/// Parameters for methods that take none; serialized as `[]`.
const NO_PARAMS: [(); 0] = [];

/// A minimal Ethereum JSON-RPC client over HTTP.
#[derive(Debug)]
pub struct JsonRpcClient {
    /// The HTTP client, reused across calls.
    http: Client,
    /// The node endpoint.
    url: Url,
    /// Request id counter.
    ids: AtomicU64,
}

impl JsonRpcClient {
    /// Create a new client for the node at `url`.
    pub fn new(url: Url) -> Self {
        Self { http: Client::new(), url, ids: AtomicU64::new(1) }
    }

    /// Create a new client from an endpoint string.
    pub fn from_endpoint(endpoint: &str) -> Result<Self, LedgerSdkError> {
        Ok(Self::new(Url::parse(endpoint)?))
    }

    pub const fn url(&self) -> &Url {
        &self.url
    }

    /// Sends one JSON-RPC request and decodes its result.
    pub async fn call<P, R>(&self, method: EthMethod, params: P) -> Result<R, LedgerSdkError>
    where
        P: Serialize,
        R: DeserializeOwned,
    {
        let id = self.ids.fetch_add(1, Ordering::Relaxed);
        let request = RpcRequest::new(id, method, params);

        tracing::trace!(target: "ledger::rpc", %method, id, "Sending request");

        let response = self
            .http
            .post(self.url.clone())
            .json(&request)
            .send()
            .await?
            .error_for_status()?
            .json::<RpcResponse>()
            .await?;

        response.into_result(method)
    }

    pub async fn get_balance(&self, address: Address, tag: BlockTag) -> Result<U256, LedgerSdkError> {
        self.call(EthMethod::GetBalance, (address, tag)).await
    }

    pub async fn get_transaction_count(
        &self,
        address: Address,
        tag: BlockTag,
    ) -> Result<u64, LedgerSdkError> {
        let count: U64 = self.call(EthMethod::GetTransactionCount, (address, tag)).await?;
        Ok(count.to())
    }

    pub async fn gas_price(&self) -> Result<U256, LedgerSdkError> {
        self.call(EthMethod::GasPrice, NO_PARAMS).await
    }

    pub async fn chain_id(&self) -> Result<u64, LedgerSdkError> {
        let chain_id: U64 = self.call(EthMethod::ChainId, NO_PARAMS).await?;
        Ok(chain_id.to())
    }

    pub async fn block_number(&self) -> Result<u64, LedgerSdkError> {
        let number: U64 = self.call(EthMethod::BlockNumber, NO_PARAMS).await?;
        Ok(number.to())
    }

    /// Broadcasts a signed transaction and returns its hash.
    pub async fn send_raw_transaction(&self, raw: &Bytes) -> Result<B256, LedgerSdkError> {
        self.call(EthMethod::SendRawTransaction, (raw,)).await
    }

    /// Returns the receipt of `hash`, or `None` while the transaction is not yet included.
    pub async fn get_transaction_receipt(
        &self,
        hash: B256,
    ) -> Result<Option<TransactionReceipt>, LedgerSdkError> {
        self.call(EthMethod::GetTransactionReceipt, (hash,)).await
    }
}
