use thiserror::Error;

#[derive(Debug, Error)]
pub enum LedgerSdkError {
    #[error(transparent)]
    ReqwestError(#[from] reqwest::Error),
    #[error(transparent)]
    SerdeError(#[from] serde_json::Error),
    #[error(transparent)]
    UrlParseError(#[from] url::ParseError),
    #[error(transparent)]
    HexError(#[from] hex::FromHexError),
    #[error("invalid signing key: {0}")]
    InvalidKey(String),
    #[error("signing failed: {0}")]
    Signing(String),
    /// The node answered with a JSON-RPC error object.
    #[error("{method} failed with code {code}: {message}")]
    Rpc { method: String, code: i64, message: String },
    /// The node answered with neither a result nor an error.
    #[error("{0} returned an empty response")]
    EmptyResponse(String),
}

impl LedgerSdkError {
    /// Returns `true` if the node itself refused the call, as opposed to a
    /// transport or decoding failure on our side.
    pub const fn is_rpc_rejection(&self) -> bool {
        matches!(self, Self::Rpc { .. })
    }
}
