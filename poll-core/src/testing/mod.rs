// Copyright (c) Aptos Foundation
// SPDX-License-Identifier: Apache-2.0

//! Testing utilities for poll-core.
//!
//! This module provides in-memory contract and wallet implementations so the
//! poll detail component can be exercised without a node.

mod mock_contract;
mod mock_wallet;

pub use mock_contract::MockPollContract;
pub use mock_wallet::MockWallet;

use poll_traits::Address;
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::types::Poll;

/// Error returned by the mocks.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{0}")]
pub struct MockError(pub String);

impl MockError {
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Address used by [`make_poll`] and [`MockPollContract::new`].
pub fn poll_address() -> Address {
    Address([0xaa; 20])
}

/// Address of the default test voter.
pub fn voter_address() -> Address {
    Address([0x11; 20])
}

/// Create a poll with the given options and total.
///
/// # Example
///
/// ```ignore
/// use poll_core::testing::make_poll;
///
/// let poll = make_poll(&["Yes", "No"], 10);
/// assert_eq!(poll.option_count(), 2);
/// ```
pub fn make_poll(options: &[&str], votes_amount: u64) -> Poll {
    Poll::new(
        poll_address(),
        "Test poll",
        options.iter().map(|o| o.to_string()).collect(),
        1_000,
        votes_amount,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_make_poll() {
        let poll = make_poll(&["Yes", "No", "Abstain"], 12);
        assert_eq!(poll.option_count(), 3);
        assert_eq!(poll.votes_amount, 12);
        assert_eq!(poll.address, poll_address());
    }

    #[test]
    fn test_mock_error_display() {
        assert_eq!(format!("{}", MockError::new("User denied")), "User denied");
    }
}
