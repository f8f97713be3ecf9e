// Copyright © Aptos Foundation
// SPDX-License-Identifier: Apache-2.0

//! Wallet traits for transaction submission and confirmation.
//!
//! The wallet signs and submits transactions on behalf of the connected account
//! and answers receipt queries for submitted transaction ids.

use crate::core::{Address, TxHash};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// An unsigned transaction handed to the wallet for signing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransactionRequest {
    /// Sending account
    pub from: Address,
    /// Receiving contract
    pub to: Address,
    /// ABI-encoded call data
    pub data: Vec<u8>,
}

impl TransactionRequest {
    /// Create a new transaction request.
    pub fn new(from: Address, to: Address, data: Vec<u8>) -> Self {
        Self { from, to, data }
    }
}

/// Confirmation record for a transaction included in the chain.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Receipt {
    /// Hash of the confirmed transaction
    pub transaction_hash: TxHash,
    /// Block the transaction was included in, if reported
    pub block_number: Option<u64>,
    /// Execution status (`true` for success), if reported
    pub status: Option<bool>,
}

impl Receipt {
    /// Create a receipt with only the transaction hash populated.
    pub fn new(transaction_hash: TxHash) -> Self {
        Self {
            transaction_hash,
            block_number: None,
            status: None,
        }
    }

    /// Set the inclusion block.
    pub fn with_block_number(mut self, block_number: u64) -> Self {
        self.block_number = Some(block_number);
        self
    }

    /// Set the execution status.
    pub fn with_status(mut self, status: bool) -> Self {
        self.status = Some(status);
        self
    }
}

/// Transaction signing and receipt lookup.
///
/// # Requirements
///
/// Implementations must be:
/// - Thread-safe (Send + Sync)
/// - Able to return a user-facing message through `Self::Error`'s `Display`
///   when the user rejects a signature
#[async_trait]
pub trait Wallet: Send + Sync + 'static {
    /// Error type for submission and receipt queries.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Sign and submit a transaction, returning its id.
    async fn send_transaction(&self, request: TransactionRequest) -> Result<TxHash, Self::Error>;

    /// Look up the receipt of a submitted transaction.
    ///
    /// Returns `Ok(None)` while the transaction is still pending.
    async fn transaction_receipt(&self, hash: &TxHash) -> Result<Option<Receipt>, Self::Error>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_receipt_builder() {
        let receipt = Receipt::new(TxHash([1u8; 32]))
            .with_block_number(42)
            .with_status(true);
        assert_eq!(receipt.block_number, Some(42));
        assert_eq!(receipt.status, Some(true));
    }

    #[test]
    fn test_transaction_request_new() {
        let request = TransactionRequest::new(Address([1u8; 20]), Address([2u8; 20]), vec![0xde, 0xad]);
        assert_eq!(request.from, Address([1u8; 20]));
        assert_eq!(request.to, Address([2u8; 20]));
        assert_eq!(request.data, vec![0xde, 0xad]);
    }
}
