// PollContract implementation over an ethers Middleware

use std::sync::Arc;

use async_trait::async_trait;
use ethers::providers::Middleware;
use ethers::types::U256;
use poll_traits::{Address, PollContract, PollInfo};

use crate::abi::VotingContract;
use crate::convert::{to_h160, u256_to_u64};
use crate::error::PollAdapterError;

/// Poll contract reached through a JSON-RPC node.
pub struct EthPollContract<M> {
    address: Address,
    inner: VotingContract<M>,
}

impl<M: Middleware + 'static> EthPollContract<M> {
    /// Bind the contract deployed at `address`.
    pub fn new(address: Address, client: Arc<M>) -> Self {
        Self {
            address,
            inner: VotingContract::new(to_h160(&address), client),
        }
    }

    /// The underlying ABI binding.
    pub fn binding(&self) -> &VotingContract<M> {
        &self.inner
    }
}

#[async_trait]
impl<M: Middleware + 'static> PollContract for EthPollContract<M> {
    type Error = PollAdapterError;

    fn address(&self) -> Address {
        self.address
    }

    async fn votes_by_index(&self, index: u64) -> Result<u64, Self::Error> {
        let votes = self
            .inner
            .get_votes_by_index(U256::from(index))
            .call()
            .await
            .map_err(|e| PollAdapterError::contract("getVotesByIndex", e.to_string()))?;
        u256_to_u64(votes, "vote counter")
    }

    async fn my_option(&self, account: &Address) -> Result<u64, Self::Error> {
        let option = self
            .inner
            .get_my_option(to_h160(account))
            .call()
            .await
            .map_err(|e| PollAdapterError::contract("getMyOption", e.to_string()))?;
        u256_to_u64(option, "option index")
    }

    fn encode_vote(&self, index: u64) -> Result<Vec<u8>, Self::Error> {
        self.inner
            .vote(U256::from(index))
            .calldata()
            .map(|data| data.to_vec())
            .ok_or_else(|| PollAdapterError::contract("vote", "failed to encode calldata"))
    }

    async fn poll_info(&self) -> Result<PollInfo, Self::Error> {
        let title = self
            .inner
            .get_title()
            .call()
            .await
            .map_err(|e| PollAdapterError::contract("getTitle", e.to_string()))?;
        let options = self
            .inner
            .get_options()
            .call()
            .await
            .map_err(|e| PollAdapterError::contract("getOptions", e.to_string()))?;
        let expiry = self
            .inner
            .expiry_block_number()
            .call()
            .await
            .map_err(|e| PollAdapterError::contract("expiryBlockNumber", e.to_string()))?;
        let votes_amount = self
            .inner
            .votes_amount()
            .call()
            .await
            .map_err(|e| PollAdapterError::contract("votesAmount", e.to_string()))?;

        log::debug!(
            "Loaded poll {} with {} options",
            self.address,
            options.len()
        );
        Ok(PollInfo {
            title,
            options,
            expiry_block_height: u256_to_u64(expiry, "expiry block")?,
            votes_amount: u256_to_u64(votes_amount, "votes amount")?,
        })
    }

    async fn has_voted(&self, account: &Address) -> Result<bool, Self::Error> {
        self.inner
            .is_voted(to_h160(account))
            .call()
            .await
            .map_err(|e| PollAdapterError::contract("isVoted", e.to_string()))
    }
}
