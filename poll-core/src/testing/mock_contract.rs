// Copyright (c) Aptos Foundation
// SPDX-License-Identifier: Apache-2.0

use async_trait::async_trait;
use poll_traits::{Address, PollContract, PollInfo};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

use super::{lock, poll_address, MockError};

/// Selector of `vote(uint256)`.
const VOTE_SELECTOR: [u8; 4] = [0x01, 0x21, 0xb9, 0x3f];

/// An in-memory poll contract.
///
/// Counters can be changed at any time to simulate votes landing on-chain, and
/// reads can be made to fail.
#[derive(Debug)]
pub struct MockPollContract {
    address: Address,
    title: String,
    options: Vec<String>,
    expiry_block_height: u64,
    votes: Mutex<Vec<u64>>,
    recorded: Mutex<HashMap<Address, u64>>,
    fail_reads: AtomicBool,
    reads: AtomicUsize,
}

impl MockPollContract {
    /// Create a contract with one counter per entry of `votes`.
    ///
    /// Options are named `Option 0`, `Option 1`, ...
    pub fn new(votes: Vec<u64>) -> Self {
        let options = (0..votes.len()).map(|i| format!("Option {}", i)).collect();
        Self {
            address: poll_address(),
            title: "Test poll".to_string(),
            options,
            expiry_block_height: 1_000,
            votes: Mutex::new(votes),
            recorded: Mutex::new(HashMap::new()),
            fail_reads: AtomicBool::new(false),
            reads: AtomicUsize::new(0),
        }
    }

    /// Overwrite every counter.
    pub fn set_votes(&self, votes: Vec<u64>) {
        *lock(&self.votes) = votes;
    }

    /// Record that `account` voted for `index` and bump that counter.
    pub fn record_vote(&self, account: Address, index: u64) {
        lock(&self.recorded).insert(account, index);
        if let Some(count) = lock(&self.votes).get_mut(index as usize) {
            *count += 1;
        }
    }

    /// Make every counter read fail until reset.
    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    /// Number of counter reads served so far.
    pub fn read_count(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    /// Decode the option index from a payload built by `encode_vote`.
    pub fn decode_vote(data: &[u8]) -> Option<u64> {
        if data.len() != 36 || data[..4] != VOTE_SELECTOR {
            return None;
        }
        let mut word = [0u8; 8];
        word.copy_from_slice(&data[28..36]);
        Some(u64::from_be_bytes(word))
    }
}

#[async_trait]
impl PollContract for MockPollContract {
    type Error = MockError;

    fn address(&self) -> Address {
        self.address
    }

    async fn votes_by_index(&self, index: u64) -> Result<u64, Self::Error> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(MockError::new("node unavailable"));
        }
        lock(&self.votes)
            .get(index as usize)
            .copied()
            .ok_or_else(|| MockError::new(format!("invalid option index {}", index)))
    }

    async fn my_option(&self, account: &Address) -> Result<u64, Self::Error> {
        lock(&self.recorded)
            .get(account)
            .copied()
            .ok_or_else(|| MockError::new(format!("{} has not voted", account)))
    }

    fn encode_vote(&self, index: u64) -> Result<Vec<u8>, Self::Error> {
        let mut data = VOTE_SELECTOR.to_vec();
        data.extend_from_slice(&[0u8; 24]);
        data.extend_from_slice(&index.to_be_bytes());
        Ok(data)
    }

    async fn poll_info(&self) -> Result<PollInfo, Self::Error> {
        Ok(PollInfo {
            title: self.title.clone(),
            options: self.options.clone(),
            expiry_block_height: self.expiry_block_height,
            votes_amount: lock(&self.votes)
                .iter()
                .fold(0u64, |sum, v| sum.saturating_add(*v)),
        })
    }

    async fn has_voted(&self, account: &Address) -> Result<bool, Self::Error> {
        Ok(lock(&self.recorded).contains_key(account))
    }
}
