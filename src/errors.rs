use thiserror::Error;

/// HTTP error classification
#[derive(Error, Debug, Clone)]
pub enum HttpErrorKind {
    #[error("Client error (code: {code:?}): {message}")]
    Client {
        code: Option<u16>,
        message: String,
        data: Option<String>,
    },
    #[error("Server error: {message}")]
    Server { message: String },
}

/// Main error type for the server.
///
/// Two families only: configuration errors (bad key/address, missing signing
/// key) reported at startup or at the authentication gate, and call errors
/// (transport, HTTP status, parse, remote-reported failure) caught per tool
/// call.
#[derive(Error, Debug, Clone)]
pub enum Error {
    /// HTTP error with status code and classification
    #[error("HTTP error (status {status}): {kind}")]
    Http { status: u16, kind: HttpErrorKind },

    /// Generic request error
    #[error("Generic request error: {0}")]
    GenericRequest(String),

    /// JSON parse error
    #[error("Json parse error: {0}")]
    JsonParse(String),

    /// Remote exchange reported a failure body
    #[error("Exchange rejected request: {0}")]
    ExchangeRejected(String),

    /// Private key parse error
    #[error("Private key parse error: {0}")]
    PrivateKeyParse(String),

    /// Wallet address parse error
    #[error("Wallet address parse error: {0}")]
    AddressParse(String),

    /// Signature failure
    #[error("ECDSA signature failed: {0}")]
    SignatureFailure(String),

    /// Write operation attempted without a configured private key
    #[error("Private key required for trading operations")]
    SigningKeyRequired,

    /// Account query without a user argument or configured wallet
    #[error("Wallet address required: pass `user` or set HYPERLIQUID_WALLET_ADDRESS")]
    WalletAddressRequired,

    /// Cancel intent with neither an order id nor a client order id
    #[error("Either orderId or clientOrderId must be provided")]
    MissingCancelTarget,

    /// Tool argument missing or of the wrong type
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    /// Tool name not in the catalog
    #[error("Unknown tool: {0}")]
    UnknownTool(String),
}

// Convenience constructors for common error patterns
impl Error {
    /// Create an HTTP client error
    pub fn client_error(
        status: u16,
        code: Option<u16>,
        message: String,
        data: Option<String>,
    ) -> Self {
        Error::Http {
            status,
            kind: HttpErrorKind::Client {
                code,
                message,
                data,
            },
        }
    }

    /// Create an HTTP server error
    pub fn server_error(status: u16, message: String) -> Self {
        Error::Http {
            status,
            kind: HttpErrorKind::Server { message },
        }
    }

    /// Create an invalid-arguments error
    pub fn invalid_arguments(msg: impl Into<String>) -> Self {
        Error::InvalidArguments(msg.into())
    }
}
