// Error types for the Ethereum adapter

use thiserror::Error;

/// Main error type for adapter operations
///
/// Implements std::error::Error so it can serve as the associated error type
/// of the poll-traits interfaces.
#[derive(Debug, Error)]
pub enum PollAdapterError {
    /// JSON-RPC transport or node error
    #[error("RPC error: {0}")]
    Rpc(String),

    /// Contract call reverted or could not be decoded
    #[error("Contract call {method} failed: {message}")]
    Contract { method: &'static str, message: String },

    /// Invalid input parameter
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Generic error message, surfaced verbatim
    #[error("{0}")]
    Message(String),
}

impl PollAdapterError {
    /// Create a new RPC error
    pub fn rpc(msg: impl Into<String>) -> Self {
        Self::Rpc(msg.into())
    }

    /// Create a new contract call error
    pub fn contract(method: &'static str, msg: impl Into<String>) -> Self {
        Self::Contract {
            method,
            message: msg.into(),
        }
    }

    /// Create a new invalid input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Create a new message error
    pub fn msg(msg: impl Into<String>) -> Self {
        Self::Message(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_rpc_display() {
        let err = PollAdapterError::rpc("connection refused");
        assert_eq!(format!("{}", err), "RPC error: connection refused");
        assert!(format!("{:?}", err).contains("Rpc"));
    }

    #[test]
    fn test_error_contract_display() {
        let err = PollAdapterError::contract("getVotesByIndex", "execution reverted");
        assert_eq!(
            format!("{}", err),
            "Contract call getVotesByIndex failed: execution reverted"
        );
    }

    #[test]
    fn test_error_invalid_input_display() {
        let err = PollAdapterError::invalid_input("counter exceeds u64");
        assert_eq!(format!("{}", err), "Invalid input: counter exceeds u64");
    }

    // Wallet rejections are shown to the user as-is.
    #[test]
    fn test_error_message_verbatim() {
        let err = PollAdapterError::msg("User denied transaction signature");
        assert_eq!(format!("{}", err), "User denied transaction signature");
    }

    #[test]
    fn test_error_construction_methods() {
        assert!(matches!(PollAdapterError::rpc("x"), PollAdapterError::Rpc(_)));
        assert!(matches!(
            PollAdapterError::contract("vote", "x"),
            PollAdapterError::Contract { method: "vote", .. }
        ));
        assert!(matches!(
            PollAdapterError::invalid_input("x"),
            PollAdapterError::InvalidInput(_)
        ));
        assert!(matches!(PollAdapterError::msg("x"), PollAdapterError::Message(_)));
    }

    #[test]
    fn test_error_send_sync() {
        fn assert_std_error<E: std::error::Error + Send + Sync + 'static>() {}
        assert_std_error::<PollAdapterError>();
    }
}
