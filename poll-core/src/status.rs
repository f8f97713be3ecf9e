// Copyright (c) Aptos Foundation
// SPDX-License-Identifier: Apache-2.0

//! Vote transaction lifecycle.
//!
//! One voting attempt moves through
//! `Idle -> AwaitingSignature -> (Failed | AwaitingConfirmation -> Confirmed)`,
//! and both terminal states return to `Idle` when their banner is dismissed.
//! `AwaitingConfirmation` has no timeout of its own: it only leaves on a receipt
//! or when the component is torn down.

use poll_traits::TxHash;
use std::fmt::{self, Display};

use crate::error::{PollDetailError, Result};

/// Banner text while the wallet asks the user to sign.
pub const WAITING_FOR_SIGNATURE: &str = "Waiting for user prompt...";

/// Banner text while the submitted transaction is being confirmed.
pub const WAITING_FOR_CONFIRMATION: &str = "Waiting for a few blocks being confirmed";

/// State of the current voting attempt.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum VoteStatus {
    /// No attempt in progress and no banner shown
    #[default]
    Idle,
    /// Waiting for the wallet to sign and submit
    AwaitingSignature,
    /// Submitted; polling for a receipt
    AwaitingConfirmation { tx: TxHash },
    /// Receipt observed; success banner shown
    Confirmed,
    /// Submission failed; error banner shown
    Failed { message: String },
}

/// Input to the lifecycle state machine.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum VoteEvent {
    /// User pressed vote
    Submit,
    /// Wallet returned a transaction id
    Submitted { tx: TxHash },
    /// Wallet or node rejected the transaction
    Rejected { message: String },
    /// A non-null receipt was returned
    ReceiptObserved,
    /// Auto-dismiss timer fired
    Dismissed,
}

impl VoteStatus {
    /// Apply an event, returning the next state.
    pub fn apply(&self, event: VoteEvent) -> Result<VoteStatus> {
        let next = match (self, &event) {
            (
                VoteStatus::Idle | VoteStatus::Confirmed | VoteStatus::Failed { .. },
                VoteEvent::Submit,
            ) => VoteStatus::AwaitingSignature,
            (VoteStatus::AwaitingSignature, VoteEvent::Submitted { tx }) => {
                VoteStatus::AwaitingConfirmation { tx: *tx }
            }
            (VoteStatus::AwaitingSignature, VoteEvent::Rejected { message }) => VoteStatus::Failed {
                message: message.clone(),
            },
            (VoteStatus::AwaitingConfirmation { .. }, VoteEvent::ReceiptObserved) => {
                VoteStatus::Confirmed
            }
            (VoteStatus::Confirmed | VoteStatus::Failed { .. }, VoteEvent::Dismissed) => {
                VoteStatus::Idle
            }
            _ => {
                return Err(PollDetailError::InvalidTransition {
                    from: self.clone(),
                    event,
                })
            }
        };
        Ok(next)
    }

    /// Whether an attempt is between submission and its outcome.
    pub fn is_in_flight(&self) -> bool {
        matches!(
            self,
            VoteStatus::AwaitingSignature | VoteStatus::AwaitingConfirmation { .. }
        )
    }

    /// Text of the waiting banner, if it is shown.
    pub fn waiting_message(&self) -> Option<&'static str> {
        match self {
            VoteStatus::AwaitingSignature => Some(WAITING_FOR_SIGNATURE),
            VoteStatus::AwaitingConfirmation { .. } => Some(WAITING_FOR_CONFIRMATION),
            _ => None,
        }
    }

    /// Text of the error banner, if it is shown.
    pub fn error_message(&self) -> Option<&str> {
        match self {
            VoteStatus::Failed { message } => Some(message.as_str()),
            _ => None,
        }
    }

    /// Whether the success banner is shown.
    pub fn is_success(&self) -> bool {
        matches!(self, VoteStatus::Confirmed)
    }

    /// Transaction being confirmed, if any.
    pub fn pending_tx(&self) -> Option<TxHash> {
        match self {
            VoteStatus::AwaitingConfirmation { tx } => Some(*tx),
            _ => None,
        }
    }
}

impl Display for VoteStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VoteStatus::Idle => write!(f, "Idle"),
            VoteStatus::AwaitingSignature => write!(f, "AwaitingSignature"),
            VoteStatus::AwaitingConfirmation { tx } => write!(f, "AwaitingConfirmation({})", tx),
            VoteStatus::Confirmed => write!(f, "Confirmed"),
            VoteStatus::Failed { .. } => write!(f, "Failed"),
        }
    }
}

impl Display for VoteEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VoteEvent::Submit => write!(f, "Submit"),
            VoteEvent::Submitted { tx } => write!(f, "Submitted({})", tx),
            VoteEvent::Rejected { .. } => write!(f, "Rejected"),
            VoteEvent::ReceiptObserved => write!(f, "ReceiptObserved"),
            VoteEvent::Dismissed => write!(f, "Dismissed"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tx() -> TxHash {
        TxHash([9u8; 32])
    }

    #[test]
    fn test_successful_attempt() {
        let status = VoteStatus::Idle;
        let status = status.apply(VoteEvent::Submit).unwrap();
        assert_eq!(status.waiting_message(), Some(WAITING_FOR_SIGNATURE));

        let status = status.apply(VoteEvent::Submitted { tx: tx() }).unwrap();
        assert_eq!(status.waiting_message(), Some(WAITING_FOR_CONFIRMATION));
        assert_eq!(status.pending_tx(), Some(tx()));

        let status = status.apply(VoteEvent::ReceiptObserved).unwrap();
        assert!(status.is_success());
        assert_eq!(status.waiting_message(), None);

        let status = status.apply(VoteEvent::Dismissed).unwrap();
        assert_eq!(status, VoteStatus::Idle);
    }

    #[test]
    fn test_rejected_attempt() {
        let status = VoteStatus::AwaitingSignature
            .apply(VoteEvent::Rejected {
                message: "User denied".to_string(),
            })
            .unwrap();
        assert_eq!(status.error_message(), Some("User denied"));
        assert_eq!(status.waiting_message(), None);
        assert!(!status.is_in_flight());

        let status = status.apply(VoteEvent::Dismissed).unwrap();
        assert_eq!(status, VoteStatus::Idle);
    }

    #[test]
    fn test_retry_after_failure_clears_error() {
        let failed = VoteStatus::Failed {
            message: "nope".to_string(),
        };
        let status = failed.apply(VoteEvent::Submit).unwrap();
        assert_eq!(status, VoteStatus::AwaitingSignature);
        assert_eq!(status.error_message(), None);
    }

    #[test]
    fn test_confirmation_has_no_timeout_exit() {
        let status = VoteStatus::AwaitingConfirmation { tx: tx() };
        assert!(status.apply(VoteEvent::Dismissed).is_err());
        assert!(status.apply(VoteEvent::Submit).is_err());
        assert!(status.is_in_flight());
    }

    #[test]
    fn test_invalid_transitions() {
        assert!(VoteStatus::Idle.apply(VoteEvent::ReceiptObserved).is_err());
        assert!(VoteStatus::Idle.apply(VoteEvent::Dismissed).is_err());
        assert!(VoteStatus::AwaitingSignature.apply(VoteEvent::Submit).is_err());
        assert!(VoteStatus::Confirmed.apply(VoteEvent::ReceiptObserved).is_err());
    }

    #[test]
    fn test_status_display() {
        assert_eq!(format!("{}", VoteStatus::Idle), "Idle");
        assert_eq!(format!("{}", VoteStatus::Confirmed), "Confirmed");
        assert!(format!("{}", VoteStatus::AwaitingConfirmation { tx: tx() }).starts_with("AwaitingConfirmation(0x0909"));
    }
}
