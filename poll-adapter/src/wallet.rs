// Wallet implementation over an ethers Middleware

use std::sync::Arc;

use async_trait::async_trait;
use ethers::providers::Middleware;
use ethers::types::{Bytes, TransactionRequest as EthTransactionRequest};
use poll_traits::{Receipt, TransactionRequest, TxHash, Wallet};

use crate::convert::{from_h256, receipt_status, to_h160, to_h256};
use crate::error::PollAdapterError;

/// Submits transactions through the node's unlocked accounts (or a signer
/// middleware) and reads receipts back.
pub struct EthWallet<M> {
    client: Arc<M>,
}

impl<M: Middleware + 'static> EthWallet<M> {
    pub fn new(client: Arc<M>) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &Arc<M> {
        &self.client
    }
}

/// Build the ethers request for a poll transaction.
pub fn to_eth_request(request: &TransactionRequest) -> EthTransactionRequest {
    EthTransactionRequest::new()
        .from(to_h160(&request.from))
        .to(to_h160(&request.to))
        .data(Bytes::from(request.data.clone()))
}

#[async_trait]
impl<M: Middleware + 'static> Wallet for EthWallet<M> {
    type Error = PollAdapterError;

    async fn send_transaction(&self, request: TransactionRequest) -> Result<TxHash, Self::Error> {
        let tx = to_eth_request(&request);
        let pending = self
            .client
            .send_transaction(tx, None)
            .await
            // The node or signer message is shown to the user unchanged.
            .map_err(|e| PollAdapterError::msg(e.to_string()))?;
        let hash = from_h256(pending.tx_hash());
        log::debug!("Transaction {} sent from {} to {}", hash, request.from, request.to);
        Ok(hash)
    }

    async fn transaction_receipt(&self, hash: &TxHash) -> Result<Option<Receipt>, Self::Error> {
        let receipt = self
            .client
            .get_transaction_receipt(to_h256(hash))
            .await
            .map_err(|e| PollAdapterError::rpc(e.to_string()))?;

        Ok(receipt.map(|r| {
            let mut receipt = Receipt::new(from_h256(r.transaction_hash));
            if let Some(block) = r.block_number {
                receipt = receipt.with_block_number(block.as_u64());
            }
            if let Some(status) = receipt_status(r.status) {
                receipt = receipt.with_status(status);
            }
            receipt
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ethers::types::{NameOrAddress, H160};
    use poll_traits::Address;

    #[test]
    fn test_to_eth_request() {
        let request = TransactionRequest::new(Address([1; 20]), Address([2; 20]), vec![0xde, 0xad]);
        let tx = to_eth_request(&request);
        assert_eq!(tx.from, Some(H160::from([1; 20])));
        assert_eq!(tx.to, Some(NameOrAddress::Address(H160::from([2; 20]))));
        assert_eq!(tx.data.map(|d| d.to_vec()), Some(vec![0xde, 0xad]));
        assert_eq!(tx.value, None);
    }
}
