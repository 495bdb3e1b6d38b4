//! The tips jar app: form state, wallet session and contract calls.
//!
//! All state lives in a single [`AppState`] behind a `RefCell`; the app is
//! driven from one event loop and never holds a borrow across an `.await`.
//! While a request is in flight `loading` is set and further submissions
//! are refused with [`ClientError::Busy`].

use std::cell::RefCell;
use std::future::Future;

use tracing::{debug, info, warn};

use crate::address::AccountId;
use crate::config::ClientConfig;
use crate::contract::{ContractCall, ContractFunction, TipRequest, TipView, TxId};
use crate::error::{ClientError, WalletError};
use crate::form::{SendTipForm, ViewTipForm};
use crate::reader::TipReader;
use crate::render::{render_broadcast, render_tip};
use crate::wallet::{UserIdentity, WalletProvider, WalletSession};

/// Everything the UI renders.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppState {
    pub user: Option<UserIdentity>,
    pub send_form: SendTipForm,
    pub view_form: ViewTipForm,
    /// A submission or query is in flight; submit controls are disabled.
    pub loading: bool,
    pub error: Option<String>,
    /// Rendered result of the last "View Tip" query.
    pub tip_result: Option<String>,
    /// Rendered notice of the last broadcast.
    pub notice: Option<String>,
    pub last_tx: Option<TxId>,
}

pub struct TipsJarApp<W, R> {
    config: ClientConfig,
    session: WalletSession<W>,
    reader: R,
    state: RefCell<AppState>,
}

impl<W: WalletProvider, R: TipReader> TipsJarApp<W, R> {
    pub fn new(config: ClientConfig, wallet: W, reader: R) -> Result<Self, ClientError> {
        config.validate()?;
        let session = WalletSession::new(wallet, config.app_details());
        Ok(Self {
            config,
            session,
            reader,
            state: RefCell::new(AppState::default()),
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn session(&self) -> &WalletSession<W> {
        &self.session
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> AppState {
        self.state.borrow().clone()
    }

    pub fn edit_send_form(&self, edit: impl FnOnce(&mut SendTipForm)) {
        edit(&mut self.state.borrow_mut().send_form);
    }

    pub fn edit_view_form(&self, edit: impl FnOnce(&mut ViewTipForm)) {
        edit(&mut self.state.borrow_mut().view_form);
    }

    /// Restores a sign-in left by an earlier run.
    pub fn restore_session(&self) -> Option<UserIdentity> {
        let user = self.session.restore();
        self.state.borrow_mut().user = user.clone();
        user
    }

    pub async fn connect_wallet(&self) -> Result<UserIdentity, ClientError> {
        let outcome = self.with_timeout(self.session.connect()).await;

        let mut state = self.state.borrow_mut();
        match &outcome {
            Ok(user) => {
                state.user = Some(user.clone());
                state.error = None;
            }
            Err(ClientError::Wallet(WalletError::Cancelled)) => {
                state.error = Some("Wallet connection cancelled".to_string());
            }
            Err(e) => {
                warn!(error = %e, "wallet connection failed");
                state.error = Some(e.user_message());
            }
        }
        outcome
    }

    pub fn disconnect_wallet(&self) {
        self.session.disconnect();
        self.state.borrow_mut().user = None;
    }

    /// Submits the "Send Tip" form as a signed `tip` transaction.
    ///
    /// On success the form is cleared and a broadcast notice recorded. On
    /// failure the form is kept so the user can retry by hand.
    pub async fn send_tip(&self) -> Result<TxId, ClientError> {
        if self.state.borrow().loading {
            return Err(ClientError::Busy);
        }

        let (sender, request) = match self.prepare_tip() {
            Ok(prepared) => prepared,
            Err(e) => {
                self.state.borrow_mut().error = Some(e.user_message());
                return Err(e);
            }
        };
        let call = ContractCall::tip(&self.config.contract_id, &sender, &request);

        self.begin_request();
        debug!(
            contract = %call.contract_id,
            function = %call.function,
            sender = %sender,
            recipient = %request.recipient,
            amount = request.amount,
            "submitting tip"
        );
        let outcome = self.with_timeout(self.session.sign_and_submit(&call)).await;

        let mut state = self.state.borrow_mut();
        state.loading = false;
        match &outcome {
            Ok(tx_id) => {
                info!(tx_id = %tx_id, "tip transaction broadcast");
                state.send_form.clear();
                state.error = None;
                state.notice = Some(render_broadcast(tx_id));
                state.last_tx = Some(tx_id.clone());
            }
            Err(e) => {
                warn!(error = %e, "tip submission failed");
                state.error = Some(e.user_message());
            }
        }
        outcome
    }

    /// Runs the "View Tip" form as a read-only `get_tip_with_message` call.
    ///
    /// `Ok(None)` means no tip is recorded for the pair.
    pub async fn view_tip(&self) -> Result<Option<TipView>, ClientError> {
        if self.state.borrow().loading {
            return Err(ClientError::Busy);
        }

        let validated = self.state.borrow().view_form.validate();
        let query = match validated {
            Ok(query) => query,
            Err(e) => {
                let e = ClientError::from(e);
                self.state.borrow_mut().error = Some(e.user_message());
                return Err(e);
            }
        };

        self.begin_request();
        self.state.borrow_mut().tip_result = None;
        debug!(
            contract = %self.config.contract_id,
            function = %ContractFunction::GetTipWithMessage,
            sender = %query.sender,
            recipient = %query.recipient,
            "querying tip"
        );
        let outcome = self
            .with_timeout(self.reader.get_tip_with_message(
                &self.config.contract_id,
                &query.sender,
                &query.recipient,
            ))
            .await;

        let mut state = self.state.borrow_mut();
        state.loading = false;
        match &outcome {
            Ok(tip) => {
                debug!(found = tip.is_some(), "tip query answered");
                state.tip_result = Some(render_tip(tip.as_ref()));
            }
            Err(e) => {
                warn!(error = %e, "tip query failed");
                state.error = Some(e.user_message());
            }
        }
        outcome
    }

    fn prepare_tip(&self) -> Result<(AccountId, TipRequest), ClientError> {
        let request = self.state.borrow().send_form.validate()?;
        let user = self
            .session
            .current_user()
            .ok_or(ClientError::NotConnected)?;
        Ok((user.address, request))
    }

    fn begin_request(&self) {
        let mut state = self.state.borrow_mut();
        state.loading = true;
        state.error = None;
    }

    async fn with_timeout<T, E>(
        &self,
        request: impl Future<Output = Result<T, E>>,
    ) -> Result<T, ClientError>
    where
        ClientError: From<E>,
    {
        let limit = self.config.request_timeout();
        match tokio::time::timeout(limit, request).await {
            Ok(result) => result.map_err(ClientError::from),
            Err(_) => Err(ClientError::Timeout(limit)),
        }
    }
}
