// Copyright (c) Aptos Foundation
// SPDX-License-Identifier: Apache-2.0

//! The poll detail component.
//!
//! [`PollDetail`] owns the poll props, the ballot, the vote tally and the
//! transaction status. All mutable state sits behind one mutex and every
//! change publishes a fresh [`DetailView`] on a watch channel. Background work
//! (receipt polling and banner dismissal) runs in [`TaskGuard`]s parented to
//! a root [`CancellationToken`], which teardown cancels.

mod view;

pub use view::{
    DetailView, OptionRow, ERROR_HEADER, SUCCESS_BODY, SUCCESS_HEADER, WAITING_HEADER,
};

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use poll_traits::{AccountContext, Address, PollContract, TransactionRequest, TxHash, Wallet};
use tokio::sync::watch;
use tokio::time::{Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

use crate::ballot::Ballot;
use crate::chart::ChartViewModel;
use crate::config::PollDetailConfig;
use crate::error::{PollDetailError, Result};
use crate::status::{VoteEvent, VoteStatus};
use crate::timer::{TaskGuard, TimerSlot};
use crate::types::{Poll, VoteTally};

struct DetailState {
    poll: Poll,
    account: AccountContext,
    ballot: Ballot,
    status: VoteStatus,
    tally: Option<VoteTally>,
    chart: Option<ChartViewModel>,
    /// Option index of the transaction being confirmed
    submitted: Option<usize>,
    confirm_timer: TimerSlot,
    dismiss_timer: TimerSlot,
    unmounted: bool,
}

impl DetailState {
    fn view(&self) -> DetailView {
        DetailView::new(
            &self.poll,
            &self.ballot,
            &self.status,
            self.tally.as_ref(),
            self.chart.as_ref(),
        )
    }

    fn record_tally(&mut self, tally: VoteTally) {
        if !tally.is_consistent(self.poll.votes_amount) {
            log::warn!(
                "Vote counts of poll {} sum to {:?} but the contract reports {} votes",
                self.poll.address,
                tally.total(),
                self.poll.votes_amount
            );
        }
        self.tally = Some(tally);
    }

    fn apply(&mut self, event: VoteEvent) -> Result<()> {
        self.status = self.status.apply(event)?;
        Ok(())
    }
}

struct Shared {
    state: Mutex<DetailState>,
    view_tx: watch::Sender<DetailView>,
    config: PollDetailConfig,
    root: CancellationToken,
}

impl Shared {
    fn lock(&self) -> MutexGuard<'_, DetailState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Run `f` against live state and publish the resulting view.
    ///
    /// Fails with [`PollDetailError::Unmounted`] after teardown, so late
    /// completions from the contract or wallet are discarded.
    fn mutate<R>(&self, f: impl FnOnce(&mut DetailState) -> R) -> Result<R> {
        let mut state = self.lock();
        if state.unmounted {
            return Err(PollDetailError::Unmounted);
        }
        let out = f(&mut *state);
        let view = state.view();
        self.view_tx.send_if_modified(|current| {
            if *current == view {
                return false;
            }
            *current = view;
            true
        });
        Ok(out)
    }

    /// Arm the banner dismissal timer, replacing any pending one.
    fn schedule_dismiss(self: &Arc<Self>, state: &mut DetailState) {
        let shared = Arc::clone(self);
        state.dismiss_timer.set(TaskGuard::after(
            &self.root,
            self.config.dismiss_after(),
            move || async move {
                let _ = shared.mutate(|s| {
                    if let Err(e) = s.apply(VoteEvent::Dismissed) {
                        log::debug!("Skipping banner dismissal: {}", e);
                    }
                });
            },
        ));
    }
}

/// Poll receipts for `tx` until one is observed, then refresh the tally.
///
/// Errors from the wallet or the contract are logged and retried on the next
/// tick. The loop only ends when the confirmation has been applied or the
/// component has been torn down.
async fn await_confirmation<C, W>(shared: Arc<Shared>, contract: Arc<C>, wallet: Arc<W>, tx: TxHash)
where
    C: PollContract,
    W: Wallet,
{
    let period = shared.config.confirmation_interval();
    let mut ticker = tokio::time::interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        ticker.tick().await;

        let receipt = match wallet.transaction_receipt(&tx).await {
            Ok(Some(receipt)) => receipt,
            Ok(None) => {
                log::trace!("Transaction {} not mined yet", tx);
                continue;
            }
            Err(e) => {
                log::debug!("Error occurred while polling receipt of {}: {}", tx, e);
                continue;
            }
        };

        let option_count = shared.lock().poll.option_count();
        let tally = match VoteTally::fetch(contract.as_ref(), option_count, shared.config.fetch_mode).await {
            Ok(tally) => tally,
            Err(e) => {
                log::debug!("Error occurred while refreshing votes after {}: {}", tx, e);
                continue;
            }
        };

        let scheme = shared.config.color_scheme;
        let applied = shared.mutate(|s| -> Result<()> {
            s.apply(VoteEvent::ReceiptObserved)?;
            shared.schedule_dismiss(s);

            // The tally now includes our vote, so adopt its total.
            match tally.total() {
                Some(total) => s.poll.votes_amount = total,
                None => log::warn!("Vote counts of poll {} overflow u64", s.poll.address),
            }
            s.tally = Some(tally);
            s.chart = Some(ChartViewModel::build(&s.poll.options, s.tally.as_ref(), scheme));
            if let Some(index) = s.submitted.take() {
                if let Err(e) = s.ballot.lock_recorded(index, &s.poll.options) {
                    log::warn!("Cannot lock ballot on submitted option {}: {}", index, e);
                }
            }
            Ok(())
        });

        match applied {
            Ok(Ok(())) => log::info!(
                "Vote transaction {} confirmed in block {:?}",
                tx,
                receipt.block_number
            ),
            Ok(Err(e)) => log::warn!("Failed to apply confirmation of {}: {}", tx, e),
            Err(_) => log::debug!("Confirmation of {} arrived after teardown", tx),
        }
        break;
    }
}

/// Detail view of one poll: ballot, live tally and vote submission.
pub struct PollDetail<C: PollContract, W: Wallet> {
    shared: Arc<Shared>,
    contract: Arc<C>,
    wallet: Arc<W>,
}

impl<C: PollContract, W: Wallet> PollDetail<C, W> {
    fn new(
        poll: Poll,
        account: AccountContext,
        voted: bool,
        contract: Arc<C>,
        wallet: Arc<W>,
        config: PollDetailConfig,
    ) -> Self {
        let state = DetailState {
            poll,
            account,
            ballot: if voted { Ballot::voted() } else { Ballot::open() },
            status: VoteStatus::Idle,
            tally: None,
            chart: None,
            submitted: None,
            confirm_timer: TimerSlot::new(),
            dismiss_timer: TimerSlot::new(),
            unmounted: false,
        };
        let (view_tx, _) = watch::channel(state.view());
        Self {
            shared: Arc::new(Shared {
                state: Mutex::new(state),
                view_tx,
                config,
                root: CancellationToken::new(),
            }),
            contract,
            wallet,
        }
    }

    /// Initialise the ballot from chain state.
    ///
    /// When the account has already voted, the recorded option is read from
    /// the contract and the ballot is locked on it.
    pub async fn construct(&self) -> Result<()> {
        let (locked, account) = {
            let state = self.shared.lock();
            (state.ballot.is_locked(), state.account.address())
        };
        if !locked {
            return Ok(());
        }
        let account = account.ok_or(PollDetailError::NoAccount)?;
        let index = self
            .contract
            .my_option(&account)
            .await
            .map_err(PollDetailError::contract)?;
        log::debug!("Account {} previously voted for option {}", account, index);
        self.shared
            .mutate(|s| s.ballot.lock_recorded(index as usize, &s.poll.options))?
    }

    /// Fetch the tally and build the chart.
    pub async fn mount(&self) -> Result<()> {
        let option_count = self.shared.lock().poll.option_count();
        let tally = self.fetch_tally(option_count).await?;
        let scheme = self.shared.config.color_scheme;
        self.shared.mutate(|s| {
            s.record_tally(tally);
            s.chart = Some(ChartViewModel::build(&s.poll.options, s.tally.as_ref(), scheme));
        })
    }

    /// Accept new props from the parent.
    ///
    /// The tally is always refetched. The chart is only rebuilt when the option
    /// list changed, and an open ballot is cleared in that case. The contract
    /// binding is fixed at build time, so props for a different poll address
    /// are rejected with [`PollDetailError::PollChanged`]; build a new
    /// component for another poll.
    pub async fn update(&self, poll: Poll) -> Result<()> {
        let option_count = poll.option_count();
        let options_changed = self.shared.mutate(|s| -> Result<bool> {
            if s.poll.address != poll.address {
                return Err(PollDetailError::PollChanged {
                    current: s.poll.address,
                    requested: poll.address,
                });
            }
            let changed = s.poll.options != poll.options;
            if changed && !s.ballot.is_locked() {
                s.ballot = Ballot::open();
            }
            s.poll = poll;
            Ok(changed)
        })??;

        let tally = self.fetch_tally(option_count).await?;
        let scheme = self.shared.config.color_scheme;
        self.shared.mutate(|s| {
            s.record_tally(tally);
            if options_changed && s.chart.is_some() {
                s.chart = Some(ChartViewModel::build(&s.poll.options, s.tally.as_ref(), scheme));
            }
        })
    }

    /// Select an option on an open ballot.
    pub fn select(&self, index: usize) -> Result<()> {
        self.shared
            .mutate(|s| s.ballot.select(index, &s.poll.options))?
    }

    /// Submit a vote for the selected option.
    ///
    /// Returns the transaction hash once the wallet accepts the transaction.
    /// Confirmation continues in the background and is reported through the
    /// view. A wallet rejection is shown as an error banner and returned.
    pub async fn vote(&self) -> Result<TxHash> {
        let (index, from, to) = self.shared.mutate(|s| -> Result<(usize, Address, Address)> {
            if s.ballot.is_locked() {
                return Err(PollDetailError::AlreadyVoted);
            }
            let index = s
                .ballot
                .selected()
                .map(|sel| sel.index)
                .ok_or(PollDetailError::NoSelection)?;
            if s.status.is_in_flight() {
                return Err(PollDetailError::VoteInProgress);
            }
            let from = s.account.address().ok_or(PollDetailError::NoAccount)?;
            s.apply(VoteEvent::Submit)?;
            s.dismiss_timer.cancel();
            s.submitted = Some(index);
            Ok((index, from, s.poll.address))
        })??;

        log::info!("Submitting vote for option {} of poll {}", index, to);
        let submission = match self.contract.encode_vote(index as u64) {
            Ok(data) => self
                .wallet
                .send_transaction(TransactionRequest::new(from, to, data))
                .await
                .map_err(|e| e.to_string()),
            Err(e) => Err(e.to_string()),
        };

        match submission {
            Ok(tx) => {
                let shared = Arc::clone(&self.shared);
                let contract = Arc::clone(&self.contract);
                let wallet = Arc::clone(&self.wallet);
                self.shared.mutate(|s| -> Result<()> {
                    s.apply(VoteEvent::Submitted { tx })?;
                    s.confirm_timer.set(TaskGuard::spawn(&self.shared.root, move |_| {
                        await_confirmation(shared, contract, wallet, tx)
                    }));
                    Ok(())
                })??;
                log::info!("Vote transaction {} submitted, waiting for confirmation", tx);
                Ok(tx)
            }
            Err(message) => {
                log::warn!("Vote submission for poll {} failed: {}", to, message);
                self.shared.mutate(|s| -> Result<()> {
                    s.submitted = None;
                    s.apply(VoteEvent::Rejected {
                        message: message.clone(),
                    })?;
                    self.shared.schedule_dismiss(s);
                    Ok(())
                })??;
                Err(PollDetailError::Submission(message))
            }
        }
    }

    /// Cancel every timer and stop publishing changes.
    pub fn unmount(self) {
        self.teardown();
    }

    fn teardown(&self) {
        let mut state = self.shared.lock();
        if state.unmounted {
            return;
        }
        state.unmounted = true;
        state.confirm_timer.cancel();
        state.dismiss_timer.cancel();
        drop(state);
        self.shared.root.cancel();
        log::debug!("Poll detail torn down");
    }

    async fn fetch_tally(&self, option_count: usize) -> Result<VoteTally> {
        VoteTally::fetch(self.contract.as_ref(), option_count, self.shared.config.fetch_mode).await
    }

    /// Current view snapshot.
    pub fn view(&self) -> DetailView {
        self.shared.view_tx.borrow().clone()
    }

    /// Receiver notified on every view change.
    pub fn subscribe(&self) -> watch::Receiver<DetailView> {
        self.shared.view_tx.subscribe()
    }

    pub fn status(&self) -> VoteStatus {
        self.shared.lock().status.clone()
    }

    pub fn poll(&self) -> Poll {
        self.shared.lock().poll.clone()
    }

    pub fn tally(&self) -> Option<VoteTally> {
        self.shared.lock().tally.clone()
    }

    /// Whether receipt polling is running.
    pub fn is_confirming(&self) -> bool {
        self.shared.lock().confirm_timer.is_active()
    }

    /// Whether a banner dismissal is pending.
    pub fn dismiss_pending(&self) -> bool {
        self.shared.lock().dismiss_timer.is_active()
    }

    pub fn is_mounted(&self) -> bool {
        !self.shared.lock().unmounted
    }

    pub fn config(&self) -> &PollDetailConfig {
        &self.shared.config
    }
}

impl<C: PollContract, W: Wallet> Drop for PollDetail<C, W> {
    fn drop(&mut self) {
        self.teardown();
    }
}

/// Builder for [`PollDetail`].
pub struct PollDetailBuilder<C, W> {
    poll: Option<Poll>,
    account: AccountContext,
    voted: bool,
    contract: Option<Arc<C>>,
    wallet: Option<Arc<W>>,
    config: PollDetailConfig,
}

impl<C: PollContract, W: Wallet> PollDetailBuilder<C, W> {
    /// Create a builder with default configuration and no account.
    pub fn new() -> Self {
        Self {
            poll: None,
            account: AccountContext::disconnected(),
            voted: false,
            contract: None,
            wallet: None,
            config: PollDetailConfig::default(),
        }
    }

    pub fn poll(mut self, poll: Poll) -> Self {
        self.poll = Some(poll);
        self
    }

    pub fn account(mut self, account: AccountContext) -> Self {
        self.account = account;
        self
    }

    /// Whether the account has already voted in this poll.
    pub fn voted(mut self, voted: bool) -> Self {
        self.voted = voted;
        self
    }

    pub fn contract(mut self, contract: Arc<C>) -> Self {
        self.contract = Some(contract);
        self
    }

    pub fn wallet(mut self, wallet: Arc<W>) -> Self {
        self.wallet = Some(wallet);
        self
    }

    pub fn config(mut self, config: PollDetailConfig) -> Self {
        self.config = config;
        self
    }

    /// Build the component.
    ///
    /// Must be called within a Tokio runtime before any operation that
    /// starts a timer.
    pub fn build(self) -> Result<PollDetail<C, W>> {
        self.config.validate()?;
        let poll = self.poll.ok_or(PollDetailError::MissingInput("poll"))?;
        let contract = self.contract.ok_or(PollDetailError::MissingInput("contract"))?;
        let wallet = self.wallet.ok_or(PollDetailError::MissingInput("wallet"))?;
        if contract.address() != poll.address {
            log::warn!(
                "Contract binding {} does not match poll address {}",
                contract.address(),
                poll.address
            );
        }
        Ok(PollDetail::new(
            poll,
            self.account,
            self.voted,
            contract,
            wallet,
            self.config,
        ))
    }
}

impl<C: PollContract, W: Wallet> Default for PollDetailBuilder<C, W> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{make_poll, voter_address, MockPollContract, MockWallet};

    type TestDetail = PollDetail<MockPollContract, MockWallet>;

    fn build(votes: Vec<u64>, voted: bool) -> (TestDetail, Arc<MockPollContract>, Arc<MockWallet>) {
        let names: Vec<String> = (0..votes.len()).map(|i| format!("Option {}", i)).collect();
        let names: Vec<&str> = names.iter().map(String::as_str).collect();
        let total = votes.iter().fold(0u64, |sum, v| sum.saturating_add(*v));
        let contract = Arc::new(MockPollContract::new(votes));
        let wallet = Arc::new(MockWallet::new());
        let detail = PollDetailBuilder::new()
            .poll(make_poll(&names, total))
            .account(AccountContext::connected(voter_address()))
            .voted(voted)
            .contract(contract.clone())
            .wallet(wallet.clone())
            .build()
            .unwrap();
        (detail, contract, wallet)
    }

    #[test]
    fn test_builder_requires_inputs() {
        let result = PollDetailBuilder::<MockPollContract, MockWallet>::new()
            .wallet(Arc::new(MockWallet::new()))
            .contract(Arc::new(MockPollContract::new(vec![0])))
            .build();
        assert!(matches!(result, Err(PollDetailError::MissingInput("poll"))));

        let result = PollDetailBuilder::<MockPollContract, MockWallet>::new()
            .poll(make_poll(&["Yes"], 0))
            .contract(Arc::new(MockPollContract::new(vec![0])))
            .build();
        assert!(matches!(result, Err(PollDetailError::MissingInput("wallet"))));
    }

    #[test]
    fn test_builder_rejects_invalid_config() {
        let mut config = PollDetailConfig::default();
        config.dismiss_after_ms = 0;
        let result = PollDetailBuilder::<MockPollContract, MockWallet>::new()
            .poll(make_poll(&["Yes"], 0))
            .contract(Arc::new(MockPollContract::new(vec![0])))
            .wallet(Arc::new(MockWallet::new()))
            .config(config)
            .build();
        assert!(matches!(result, Err(PollDetailError::InvalidConfig(_))));
    }

    #[tokio::test]
    async fn test_initial_view() {
        let (detail, _, _) = build(vec![1, 2], false);
        let view = detail.view();
        assert_eq!(view.rows.len(), 2);
        assert_eq!(view.chart, None);
        assert!(!view.can_vote);
        assert_eq!(view.status, VoteStatus::Idle);
    }

    #[tokio::test]
    async fn test_mount_fetches_tally() {
        let (detail, contract, _) = build(vec![1, 3], false);
        detail.construct().await.unwrap();
        detail.mount().await.unwrap();

        assert_eq!(contract.read_count(), 2);
        assert_eq!(detail.tally().unwrap().votes(), &[1, 3]);
        let view = detail.view();
        assert_eq!(view.rows[1].label, "Option 1 (75%)");
        assert_eq!(view.chart.unwrap().values(), &[1, 3]);
    }

    #[tokio::test]
    async fn test_mount_propagates_read_failure() {
        let (detail, contract, _) = build(vec![1, 3], false);
        contract.fail_reads(true);
        let err = detail.mount().await.unwrap_err();
        assert!(matches!(err, PollDetailError::Contract(_)));
        assert_eq!(detail.view().chart, None);
    }

    #[tokio::test]
    async fn test_construct_without_account() {
        let contract = Arc::new(MockPollContract::new(vec![0, 0]));
        let detail = PollDetailBuilder::new()
            .poll(make_poll(&["A", "B"], 0))
            .voted(true)
            .contract(contract)
            .wallet(Arc::new(MockWallet::new()))
            .build()
            .unwrap();
        assert!(matches!(detail.construct().await, Err(PollDetailError::NoAccount)));
    }

    #[tokio::test]
    async fn test_select_and_vote_guards() {
        let (detail, _, _) = build(vec![0, 0], false);
        assert!(matches!(detail.vote().await, Err(PollDetailError::NoSelection)));
        assert!(matches!(
            detail.select(5),
            Err(PollDetailError::OptionOutOfRange { index: 5, len: 2 })
        ));

        detail.select(0).unwrap();
        detail.select(1).unwrap();
        let view = detail.view();
        assert_eq!(view.selected_index(), Some(1));
        assert_eq!(view.prompt.as_deref(), Some("You are voting for Option 1"));
        assert!(view.can_vote);
    }

    #[tokio::test]
    async fn test_vote_sends_encoded_transaction() {
        let (detail, _, wallet) = build(vec![0, 0], false);
        detail.select(1).unwrap();
        let tx = detail.vote().await.unwrap();

        let sent = wallet.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].from, voter_address());
        assert_eq!(sent[0].to, detail.poll().address);
        assert_eq!(MockPollContract::decode_vote(&sent[0].data), Some(1));
        assert_eq!(detail.status(), VoteStatus::AwaitingConfirmation { tx });
        assert!(detail.is_confirming());
    }

    #[tokio::test]
    async fn test_update_refetches_and_resets_open_ballot() {
        let (detail, contract, _) = build(vec![1, 1], false);
        detail.mount().await.unwrap();
        detail.select(0).unwrap();
        let chart = detail.view().chart.unwrap();

        // Same options: tally refreshed, chart kept.
        contract.set_votes(vec![2, 1]);
        detail.update(make_poll(&["Option 0", "Option 1"], 3)).await.unwrap();
        let view = detail.view();
        assert_eq!(view.rows[0].votes, Some(2));
        assert_eq!(view.chart.as_ref(), Some(&chart));
        assert_eq!(view.selected_index(), Some(0));

        // New options: ballot cleared and chart rebuilt.
        contract.set_votes(vec![2, 1, 0]);
        detail
            .update(make_poll(&["Option 0", "Option 1", "Option 2"], 3))
            .await
            .unwrap();
        let view = detail.view();
        assert_eq!(view.selected_index(), None);
        assert_eq!(view.chart.unwrap().labels().len(), 3);
    }

    #[tokio::test]
    async fn test_update_rejects_other_poll() {
        let (detail, contract, _) = build(vec![1, 1], false);
        detail.mount().await.unwrap();
        detail.select(1).unwrap();
        let reads = contract.read_count();

        let mut other = make_poll(&["Option 0", "Option 1"], 2);
        other.address = Address([0xbb; 20]);
        let err = detail.update(other).await.unwrap_err();
        assert!(matches!(err, PollDetailError::PollChanged { .. }));

        assert_eq!(contract.read_count(), reads);
        assert_eq!(detail.poll().address, crate::testing::poll_address());
        assert_eq!(detail.view().selected_index(), Some(1));
    }

    #[tokio::test]
    async fn test_mount_with_overflowing_counts() {
        let (detail, _, _) = build(vec![u64::MAX, 1], false);
        detail.mount().await.unwrap();

        let view = detail.view();
        assert_eq!(view.rows[0].votes, Some(u64::MAX));
        assert_eq!(view.rows[1].votes, Some(1));
        assert_eq!(view.chart.unwrap().values(), &[u64::MAX, 1]);
    }

    #[tokio::test]
    async fn test_operations_after_unmount() {
        let (detail, _, _) = build(vec![0, 0], false);
        detail.teardown();
        detail.teardown();
        assert!(!detail.is_mounted());
        assert!(matches!(detail.select(0), Err(PollDetailError::Unmounted)));
        assert!(matches!(detail.mount().await, Err(PollDetailError::Unmounted)));
    }
}
