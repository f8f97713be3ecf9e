// Conversions between poll-traits primitives and ethers types

use ethers::types::{H160, H256, U256, U64};
use poll_traits::{Address, TxHash};

use crate::error::PollAdapterError;

pub fn to_h160(address: &Address) -> H160 {
    H160::from(address.0)
}

pub fn to_h256(hash: &TxHash) -> H256 {
    H256::from(hash.0)
}

pub fn from_h256(hash: H256) -> TxHash {
    TxHash(hash.0)
}

/// Narrow a contract counter to `u64`.
pub fn u256_to_u64(value: U256, what: &str) -> Result<u64, PollAdapterError> {
    if value > U256::from(u64::MAX) {
        return Err(PollAdapterError::invalid_input(format!(
            "{} {} does not fit in u64",
            what, value
        )));
    }
    Ok(value.as_u64())
}

/// Receipt status 1 means success, 0 means reverted.
pub fn receipt_status(status: Option<U64>) -> Option<bool> {
    status.map(|s| s.as_u64() == 1)
}
