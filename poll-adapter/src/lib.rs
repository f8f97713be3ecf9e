// Ethereum adapter for the poll detail client
//
// This crate binds the poll-traits collaborator interfaces to a JSON-RPC node:
// - ABI binding for the deployed poll contract
// - PollContract implementation over any ethers Middleware
// - Wallet implementation that submits transactions and polls receipts
// - Conversions between poll-traits and ethers primitive types

pub mod abi;
pub mod contract;
pub mod convert;
pub mod error;
pub mod wallet;

pub use abi::VotingContract;
pub use contract::EthPollContract;
pub use error::PollAdapterError;
pub use wallet::EthWallet;
