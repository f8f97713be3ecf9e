// Copyright (c) Aptos Foundation
// SPDX-License-Identifier: Apache-2.0

//! Single-choice ballot state.

use crate::error::{PollDetailError, Result};

/// The option currently selected on the ballot.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Selection {
    /// Option index
    pub index: usize,
    /// Option label
    pub label: String,
}

/// Client-local ballot.
///
/// An open ballot accepts any single selection. Once the account has voted the
/// ballot is locked on the option recorded on-chain.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Ballot {
    selected: Option<Selection>,
    locked: bool,
}

impl Ballot {
    /// A ballot for an account that has not voted.
    pub fn open() -> Self {
        Self::default()
    }

    /// A ballot for an account that has voted but whose choice is not known yet.
    pub fn voted() -> Self {
        Self {
            selected: None,
            locked: true,
        }
    }

    /// Select one option, replacing any previous selection.
    pub fn select(&mut self, index: usize, options: &[String]) -> Result<()> {
        if self.locked {
            return Err(PollDetailError::AlreadyVoted);
        }
        self.selected = Some(Self::selection(index, options)?);
        Ok(())
    }

    /// Lock the ballot on the option recorded on-chain.
    pub fn lock_recorded(&mut self, index: usize, options: &[String]) -> Result<()> {
        self.selected = Some(Self::selection(index, options)?);
        self.locked = true;
        Ok(())
    }

    fn selection(index: usize, options: &[String]) -> Result<Selection> {
        let label = options.get(index).ok_or(PollDetailError::OptionOutOfRange {
            index,
            len: options.len(),
        })?;
        Ok(Selection {
            index,
            label: label.clone(),
        })
    }

    /// Current selection.
    pub fn selected(&self) -> Option<&Selection> {
        self.selected.as_ref()
    }

    /// Whether the option at `index` is selected.
    pub fn is_selected(&self, index: usize) -> bool {
        self.selected.as_ref().map(|s| s.index) == Some(index)
    }

    /// Whether the ballot is disabled because the account already voted.
    pub fn is_locked(&self) -> bool {
        self.locked
    }

    /// Whether the vote button should be offered.
    pub fn can_vote(&self) -> bool {
        self.selected.is_some() && !self.locked
    }

    /// Prompt shown under the options.
    pub fn prompt(&self) -> Option<String> {
        self.selected.as_ref().map(|s| {
            if self.locked {
                format!("You have voted for {}", s.label)
            } else {
                format!("You are voting for {}", s.label)
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options() -> Vec<String> {
        vec!["Red".to_string(), "Green".to_string(), "Blue".to_string()]
    }

    #[test]
    fn test_select_is_exclusive() {
        let mut ballot = Ballot::open();
        ballot.select(0, &options()).unwrap();
        ballot.select(2, &options()).unwrap();
        assert!(ballot.is_selected(2));
        assert!(!ballot.is_selected(0));
        assert_eq!(ballot.prompt().as_deref(), Some("You are voting for Blue"));
        assert!(ballot.can_vote());
    }

    #[test]
    fn test_select_out_of_range() {
        let mut ballot = Ballot::open();
        let err = ballot.select(3, &options()).unwrap_err();
        assert!(matches!(err, PollDetailError::OptionOutOfRange { index: 3, len: 3 }));
        assert!(ballot.selected().is_none());
    }

    #[test]
    fn test_locked_ballot_rejects_selection() {
        let mut ballot = Ballot::voted();
        ballot.lock_recorded(1, &options()).unwrap();
        assert!(matches!(
            ballot.select(0, &options()),
            Err(PollDetailError::AlreadyVoted)
        ));
        assert!(ballot.is_selected(1));
        assert!(!ballot.can_vote());
        assert_eq!(ballot.prompt().as_deref(), Some("You have voted for Green"));
    }

    #[test]
    fn test_open_ballot_has_no_prompt() {
        let ballot = Ballot::open();
        assert_eq!(ballot.prompt(), None);
        assert!(!ballot.can_vote());
    }
}
