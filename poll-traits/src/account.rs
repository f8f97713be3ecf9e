// Copyright © Aptos Foundation
// SPDX-License-Identifier: Apache-2.0

//! Connected-account context.
//!
//! The account address is handed to components explicitly instead of being
//! read from a process-wide store.

use crate::core::Address;

/// The wallet account currently connected to the application, if any.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AccountContext {
    address: Option<Address>,
}

impl AccountContext {
    /// Context for a connected account.
    pub fn connected(address: Address) -> Self {
        Self {
            address: Some(address),
        }
    }

    /// Context with no connected account.
    pub fn disconnected() -> Self {
        Self { address: None }
    }

    /// The connected account address.
    pub fn address(&self) -> Option<Address> {
        self.address
    }

    /// Whether an account is connected.
    pub fn is_connected(&self) -> bool {
        self.address.is_some()
    }
}

impl From<Address> for AccountContext {
    fn from(address: Address) -> Self {
        Self::connected(address)
    }
}
