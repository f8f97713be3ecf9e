// Copyright (c) Aptos Foundation
// SPDX-License-Identifier: Apache-2.0

//! # Poll Detail Core Library
//!
//! This library provides the poll detail component, generic over any contract
//! binding and wallet implementing the `poll-traits` interfaces.
//!
//! ## Architecture
//!
//! - [`config`] - Timer intervals, fetch mode and colour scheme
//! - [`types`] - Poll props and the fetched vote tally
//! - [`ballot`] - Single-choice option selection
//! - [`status`] - Vote transaction lifecycle state machine
//! - [`chart`] - Pie chart view-model derived from the tally
//! - [`timer`] - Owned, cancellable timer tasks
//! - [`detail`] - The [`PollDetail`] component and its view snapshot
//! - [`testing`] - Mock contract and wallet
//!
//! ## Usage
//!
//! ```rust,no_run,ignore
//! use poll_core::{PollDetailBuilder, PollDetailConfig};
//!
//! let detail = PollDetailBuilder::new()
//!     .poll(poll)
//!     .account(account)
//!     .voted(false)
//!     .contract(contract)
//!     .wallet(wallet)
//!     .build()?;
//!
//! detail.construct().await?;
//! detail.mount().await?;
//! detail.select(1)?;
//! detail.vote().await?;
//! ```

pub mod ballot;
pub mod chart;
pub mod config;
pub mod detail;
pub mod error;
pub mod status;
pub mod testing;
pub mod timer;
pub mod types;

pub use ballot::{Ballot, Selection};
pub use chart::{ChartData, ChartOptions, ChartViewModel, ColorScheme, Rgb};
pub use config::{FetchMode, PollDetailConfig};
pub use detail::{DetailView, OptionRow, PollDetail, PollDetailBuilder};
pub use error::{PollDetailError, Result};
pub use status::{VoteEvent, VoteStatus};
pub use timer::{TaskGuard, TimerSlot};
pub use types::{Poll, VoteTally};
