// Copyright (c) Aptos Foundation
// SPDX-License-Identifier: Apache-2.0

//! Error types for the poll detail component.

use poll_traits::Address;
use thiserror::Error;

use crate::status::{VoteEvent, VoteStatus};

/// Result type for component operations.
pub type Result<T> = std::result::Result<T, PollDetailError>;

/// Errors returned by poll detail operations.
#[derive(Debug, Error)]
pub enum PollDetailError {
    /// Selected option index does not exist
    #[error("Option {index} is out of range for a poll with {len} options")]
    OptionOutOfRange { index: usize, len: usize },

    /// The account already voted; the ballot is locked
    #[error("The connected account has already voted")]
    AlreadyVoted,

    /// Vote requested without a selected option
    #[error("No option selected")]
    NoSelection,

    /// A previous vote attempt is still awaiting signature or confirmation
    #[error("A vote is already in progress")]
    VoteInProgress,

    /// No wallet account is connected
    #[error("No account connected")]
    NoAccount,

    /// Contract read or encoding failed
    #[error("Contract error: {0}")]
    Contract(String),

    /// Transaction submission failed (rejected signature, node rejection, ...)
    #[error("{0}")]
    Submission(String),

    /// Illegal vote lifecycle transition
    #[error("Invalid transition from {from} on {event}")]
    InvalidTransition { from: VoteStatus, event: VoteEvent },

    /// Invalid component configuration
    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    /// Missing builder input
    #[error("Missing component input: {0}")]
    MissingInput(&'static str),

    /// Props for a different poll were passed to `update`
    #[error("Component is bound to poll {current}, cannot switch to {requested}")]
    PollChanged { current: Address, requested: Address },

    /// Operation attempted after unmount
    #[error("Component has been unmounted")]
    Unmounted,
}

impl PollDetailError {
    /// Create a contract error from any displayable source.
    pub fn contract(err: impl std::fmt::Display) -> Self {
        Self::Contract(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_out_of_range_display() {
        let err = PollDetailError::OptionOutOfRange { index: 4, len: 3 };
        assert_eq!(format!("{}", err), "Option 4 is out of range for a poll with 3 options");
    }

    #[test]
    fn test_error_submission_is_bare_message() {
        let err = PollDetailError::Submission("User denied transaction signature".to_string());
        assert_eq!(format!("{}", err), "User denied transaction signature");
    }

    #[test]
    fn test_error_contract_display() {
        let err = PollDetailError::contract("execution reverted");
        assert_eq!(format!("{}", err), "Contract error: execution reverted");
    }

    #[test]
    fn test_error_invalid_transition_display() {
        let err = PollDetailError::InvalidTransition {
            from: VoteStatus::Idle,
            event: VoteEvent::ReceiptObserved,
        };
        assert_eq!(format!("{}", err), "Invalid transition from Idle on ReceiptObserved");
    }

    #[test]
    fn test_error_poll_changed_display() {
        let err = PollDetailError::PollChanged {
            current: Address([0xaa; 20]),
            requested: Address([0xbb; 20]),
        };
        let msg = format!("{}", err);
        assert!(msg.starts_with("Component is bound to poll 0xaaaa"));
        assert!(msg.contains("cannot switch to 0xbbbb"));
    }

    #[test]
    fn test_error_send_sync() {
        fn is_send<T: Send>() {}
        fn is_sync<T: Sync>() {}

        is_send::<PollDetailError>();
        is_sync::<PollDetailError>();
    }
}
