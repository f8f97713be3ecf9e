// Copyright © Aptos Foundation
// SPDX-License-Identifier: Apache-2.0

//! # Poll Client Traits
//!
//! This library defines the interfaces the poll detail component consumes from
//! its collaborators. The component never talks to a node directly; it goes
//! through these traits so any wallet or contract binding can drive it.
//!
//! ## Overview
//!
//! - **Core Types**: [`Address`], [`TxHash`], [`ParseError`]
//! - **Contract**: [`PollContract`], [`PollInfo`]
//! - **Wallet**: [`Wallet`], [`TransactionRequest`], [`Receipt`]
//! - **Account**: [`AccountContext`]
//!
//! ## Example
//!
//! ```text
//! use poll_traits::{PollContract, Wallet, TransactionRequest};
//!
//! let count = contract.votes_by_index(0).await?;
//! let data = contract.encode_vote(0)?;
//! let tx = wallet
//!     .send_transaction(TransactionRequest::new(from, contract.address(), data))
//!     .await?;
//! let receipt = wallet.transaction_receipt(&tx).await?;
//! ```

pub mod account;
pub mod contract;
pub mod core;
pub mod wallet;

pub use account::AccountContext;
pub use contract::{PollContract, PollInfo};
pub use core::{Address, ParseError, TxHash};
pub use wallet::{Receipt, TransactionRequest, Wallet};
