// Copyright (c) Aptos Foundation
// SPDX-License-Identifier: Apache-2.0

//! Poll props and vote tally types.

use futures::future::try_join_all;
use poll_traits::{Address, PollContract, PollInfo};
use serde::{Deserialize, Serialize};

use crate::config::FetchMode;
use crate::error::{PollDetailError, Result};

/// A poll as supplied to the detail component by its parent.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Poll {
    /// Contract address identifying the poll
    pub address: Address,
    /// Poll title
    pub title: String,
    /// Ordered option labels
    pub options: Vec<String>,
    /// Block height after which voting closes
    pub expiry_block_height: u64,
    /// Total votes reported by the contract
    pub votes_amount: u64,
}

impl Poll {
    /// Create a new poll.
    pub fn new(
        address: Address,
        title: impl Into<String>,
        options: Vec<String>,
        expiry_block_height: u64,
        votes_amount: u64,
    ) -> Self {
        Self {
            address,
            title: title.into(),
            options,
            expiry_block_height,
            votes_amount,
        }
    }

    /// Build a poll from contract metadata.
    pub fn from_info(address: Address, info: PollInfo) -> Self {
        Self {
            address,
            title: info.title,
            options: info.options,
            expiry_block_height: info.expiry_block_height,
            votes_amount: info.votes_amount,
        }
    }

    /// Number of options.
    pub fn option_count(&self) -> usize {
        self.options.len()
    }
}

/// Per-option vote counts, ordered by option index.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteTally {
    votes: Vec<u64>,
}

impl VoteTally {
    /// Create a tally from counts ordered by option index.
    pub fn new(votes: Vec<u64>) -> Self {
        Self { votes }
    }

    /// A tally of zeros, used before counts have been fetched.
    pub fn zeros(option_count: usize) -> Self {
        Self {
            votes: vec![0; option_count],
        }
    }

    /// Read every option counter from the contract.
    ///
    /// Sequential mode issues one read per option in order. Concurrent mode
    /// issues them together; the result is ordered by option index either way.
    pub async fn fetch<C: PollContract>(
        contract: &C,
        option_count: usize,
        mode: FetchMode,
    ) -> Result<Self> {
        let votes = match mode {
            FetchMode::Sequential => {
                let mut votes = Vec::with_capacity(option_count);
                for index in 0..option_count as u64 {
                    let count = contract
                        .votes_by_index(index)
                        .await
                        .map_err(PollDetailError::contract)?;
                    votes.push(count);
                }
                votes
            }
            FetchMode::Concurrent => {
                let reads = (0..option_count as u64).map(|index| contract.votes_by_index(index));
                try_join_all(reads).await.map_err(PollDetailError::contract)?
            }
        };
        Ok(Self { votes })
    }

    /// Counts ordered by option index.
    pub fn votes(&self) -> &[u64] {
        &self.votes
    }

    /// Count for one option.
    pub fn get(&self, index: usize) -> Option<u64> {
        self.votes.get(index).copied()
    }

    /// Number of options covered.
    pub fn len(&self) -> usize {
        self.votes.len()
    }

    /// Whether the tally covers no options.
    pub fn is_empty(&self) -> bool {
        self.votes.is_empty()
    }

    /// Sum of all counts, or `None` if it does not fit in `u64`.
    pub fn total(&self) -> Option<u64> {
        self.votes
            .iter()
            .try_fold(0u64, |sum, count| sum.checked_add(*count))
    }

    /// Whether the counts add up to the total reported by the contract.
    ///
    /// A sum that overflows is never consistent.
    pub fn is_consistent(&self, votes_amount: u64) -> bool {
        self.total() == Some(votes_amount)
    }

    /// Share of one option as a floored whole percentage of `votes_amount`.
    ///
    /// Returns `None` when `votes_amount` is zero or the option is unknown.
    pub fn percentage(&self, index: usize, votes_amount: u64) -> Option<u64> {
        if votes_amount == 0 {
            return None;
        }
        let count = self.get(index)?;
        Some(((count as u128 * 100) / votes_amount as u128) as u64)
    }
}

/// Format an option label, appending the percentage when one is known.
pub fn format_option_label(option: &str, percentage: Option<u64>) -> String {
    match percentage {
        Some(pct) => format!("{} ({}%)", option, pct),
        None => option.to_string(),
    }
}
