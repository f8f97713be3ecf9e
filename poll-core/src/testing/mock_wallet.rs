// Copyright (c) Aptos Foundation
// SPDX-License-Identifier: Apache-2.0

use async_trait::async_trait;
use poll_traits::{Receipt, TransactionRequest, TxHash, Wallet};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicU8, AtomicUsize, Ordering};
use std::sync::Mutex;

use super::{lock, MockError};

/// A scripted wallet.
///
/// Submissions succeed with a fresh hash unless a rejection has been queued.
/// Receipt queries pop scripted answers in order and report "pending" once the
/// script runs out.
#[derive(Debug, Default)]
pub struct MockWallet {
    rejections: Mutex<VecDeque<String>>,
    receipts: Mutex<VecDeque<Result<Option<()>, String>>>,
    sent: Mutex<Vec<TransactionRequest>>,
    next_tx: AtomicU8,
    receipt_queries: AtomicUsize,
}

impl MockWallet {
    /// Create a wallet with an empty script.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail the next submission with `message`.
    pub fn reject_next(&self, message: impl Into<String>) {
        lock(&self.rejections).push_back(message.into());
    }

    /// Answer the next `count` receipt queries with "pending".
    pub fn push_pending(&self, count: usize) {
        let mut receipts = lock(&self.receipts);
        for _ in 0..count {
            receipts.push_back(Ok(None));
        }
    }

    /// Fail the next receipt query.
    pub fn push_receipt_error(&self, message: impl Into<String>) {
        lock(&self.receipts).push_back(Err(message.into()));
    }

    /// Answer the next receipt query with a receipt.
    pub fn push_receipt(&self) {
        lock(&self.receipts).push_back(Ok(Some(())));
    }

    /// Transactions submitted so far.
    pub fn sent(&self) -> Vec<TransactionRequest> {
        lock(&self.sent).clone()
    }

    /// Number of receipt queries served so far.
    pub fn receipt_queries(&self) -> usize {
        self.receipt_queries.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Wallet for MockWallet {
    type Error = MockError;

    async fn send_transaction(&self, request: TransactionRequest) -> Result<TxHash, Self::Error> {
        if let Some(message) = lock(&self.rejections).pop_front() {
            return Err(MockError(message));
        }
        lock(&self.sent).push(request);
        let n = self.next_tx.fetch_add(1, Ordering::SeqCst).wrapping_add(1);
        Ok(TxHash([n; 32]))
    }

    async fn transaction_receipt(&self, hash: &TxHash) -> Result<Option<Receipt>, Self::Error> {
        self.receipt_queries.fetch_add(1, Ordering::SeqCst);
        match lock(&self.receipts).pop_front() {
            Some(Ok(Some(()))) => Ok(Some(Receipt::new(*hash).with_status(true))),
            Some(Ok(None)) | None => Ok(None),
            Some(Err(message)) => Err(MockError(message)),
        }
    }
}
