// Copyright © Aptos Foundation
// SPDX-License-Identifier: Apache-2.0

//! Poll contract binding.
//!
//! This module defines the reads and the payload encoding the poll detail
//! component needs from a deployed poll contract.

use crate::core::Address;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Poll metadata as stored by the contract.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PollInfo {
    /// Poll title
    pub title: String,
    /// Ordered option labels
    pub options: Vec<String>,
    /// Block height after which voting closes
    pub expiry_block_height: u64,
    /// Total number of votes cast
    pub votes_amount: u64,
}

/// Binding to a single deployed poll contract.
///
/// Per-option counters are not stored contiguously on-chain, so they are read
/// one option index at a time.
///
/// # Example
///
/// ```text
/// use poll_traits::PollContract;
///
/// let mut counts = Vec::new();
/// for index in 0..options.len() as u64 {
///     counts.push(contract.votes_by_index(index).await?);
/// }
/// ```
#[async_trait]
pub trait PollContract: Send + Sync + 'static {
    /// Error type for contract reads and encoding.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Address of the contract this binding talks to.
    fn address(&self) -> Address;

    /// Read the vote counter of one option.
    async fn votes_by_index(&self, index: u64) -> Result<u64, Self::Error>;

    /// Read the option index recorded for an account that already voted.
    async fn my_option(&self, account: &Address) -> Result<u64, Self::Error>;

    /// ABI-encode a vote transaction for the given option.
    fn encode_vote(&self, index: u64) -> Result<Vec<u8>, Self::Error>;

    /// Read the poll metadata.
    async fn poll_info(&self) -> Result<PollInfo, Self::Error>;

    /// Whether the account has already cast a vote.
    async fn has_voted(&self, account: &Address) -> Result<bool, Self::Error>;
}
