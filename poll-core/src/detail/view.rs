// Copyright (c) Aptos Foundation
// SPDX-License-Identifier: Apache-2.0

//! Immutable view snapshot published to renderers.

use poll_traits::Address;

use crate::ballot::Ballot;
use crate::chart::{ChartOptions, ChartViewModel};
use crate::status::VoteStatus;
use crate::types::{format_option_label, Poll, VoteTally};

/// Header of the waiting banner.
pub const WAITING_HEADER: &str = "Just a few seconds";

/// Header of the error banner.
pub const ERROR_HEADER: &str = "There was some errors with your submission";

/// Header of the success banner.
pub const SUCCESS_HEADER: &str = "You vote successfully!";

/// Body of the success banner.
pub const SUCCESS_BODY: &str = "Your transaction has been confirmed.";

/// One radio option on the ballot.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OptionRow {
    /// Option index
    pub index: usize,
    /// Bare option title
    pub option: String,
    /// Title with the vote share appended when known
    pub label: String,
    /// Fetched vote count
    pub votes: Option<u64>,
    /// Whether this option is the current selection
    pub checked: bool,
    /// Whether the control is disabled
    pub disabled: bool,
}

/// Everything a renderer needs to draw the poll detail.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DetailView {
    pub address: Address,
    pub title: String,
    pub expiry_block_height: u64,
    pub votes_amount: u64,
    pub rows: Vec<OptionRow>,
    /// "You are voting for ..." / "You have voted for ..."
    pub prompt: Option<String>,
    /// Whether the vote button is offered
    pub can_vote: bool,
    pub status: VoteStatus,
    pub chart: Option<ChartViewModel>,
}

impl DetailView {
    /// Derive a snapshot from component state.
    pub fn new(
        poll: &Poll,
        ballot: &Ballot,
        status: &VoteStatus,
        tally: Option<&VoteTally>,
        chart: Option<&ChartViewModel>,
    ) -> Self {
        let rows = poll
            .options
            .iter()
            .enumerate()
            .map(|(index, option)| {
                let percentage = tally.and_then(|t| t.percentage(index, poll.votes_amount));
                OptionRow {
                    index,
                    option: option.clone(),
                    label: format_option_label(option, percentage),
                    votes: tally.and_then(|t| t.get(index)),
                    checked: ballot.is_selected(index),
                    disabled: ballot.is_locked(),
                }
            })
            .collect();

        Self {
            address: poll.address,
            title: poll.title.clone(),
            expiry_block_height: poll.expiry_block_height,
            votes_amount: poll.votes_amount,
            rows,
            prompt: ballot.prompt(),
            can_vote: ballot.can_vote(),
            status: status.clone(),
            chart: chart.cloned(),
        }
    }

    /// Waiting banner text, if shown.
    pub fn waiting_message(&self) -> Option<&str> {
        self.status.waiting_message()
    }

    /// Error banner text, if shown.
    pub fn error_message(&self) -> Option<&str> {
        self.status.error_message()
    }

    /// Whether the success banner is shown.
    pub fn show_success(&self) -> bool {
        self.status.is_success()
    }

    /// Whether the ballot is disabled.
    pub fn is_locked(&self) -> bool {
        self.rows.first().map(|r| r.disabled).unwrap_or(false)
    }

    /// Currently selected option index.
    pub fn selected_index(&self) -> Option<usize> {
        self.rows.iter().find(|r| r.checked).map(|r| r.index)
    }

    /// Options for the chart renderer.
    pub fn chart_options(&self) -> ChartOptions {
        ChartOptions::default()
    }
}
