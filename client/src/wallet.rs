//! Wallet session: connection state with an external wallet provider.

use std::cell::RefCell;

use tracing::{debug, info};

use crate::address::AccountId;
use crate::contract::{ContractCall, TxId};
use crate::error::WalletError;

/// The signed-in user, as reported by the wallet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserIdentity {
    pub address: AccountId,
}

/// How the app presents itself in wallet popups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppDetails {
    pub name: String,
    pub icon: Option<String>,
}

/// An external wallet (browser extension, hardware signer, ...).
///
/// Implementations own the popup flow; every call may be cancelled by the
/// user, which is reported as [`WalletError::Cancelled`].
#[allow(async_fn_in_trait)]
pub trait WalletProvider {
    /// A sign-in that survived from an earlier run, if any.
    fn signed_in_user(&self) -> Option<UserIdentity>;

    /// Asks the user to connect and returns the chosen account.
    async fn connect(&self, app: &AppDetails) -> Result<UserIdentity, WalletError>;

    /// Forgets the sign-in.
    fn disconnect(&self);

    /// Signs `call` as the connected user and broadcasts it.
    async fn sign_and_submit(
        &self,
        app: &AppDetails,
        call: &ContractCall,
    ) -> Result<TxId, WalletError>;
}

/// Tracks the connected user on top of a [`WalletProvider`].
pub struct WalletSession<P> {
    provider: P,
    app: AppDetails,
    user: RefCell<Option<UserIdentity>>,
}

impl<P: WalletProvider> WalletSession<P> {
    pub fn new(provider: P, app: AppDetails) -> Self {
        Self {
            provider,
            app,
            user: RefCell::new(None),
        }
    }

    /// Picks up an existing sign-in from the provider.
    pub fn restore(&self) -> Option<UserIdentity> {
        let user = self.provider.signed_in_user();
        if let Some(user) = &user {
            debug!(address = %user.address, "restored wallet session");
        }
        *self.user.borrow_mut() = user.clone();
        user
    }

    pub async fn connect(&self) -> Result<UserIdentity, WalletError> {
        let user = self.provider.connect(&self.app).await?;
        info!(address = %user.address, "wallet connected");
        *self.user.borrow_mut() = Some(user.clone());
        Ok(user)
    }

    pub fn disconnect(&self) {
        self.provider.disconnect();
        if let Some(user) = self.user.borrow_mut().take() {
            info!(address = %user.address, "wallet disconnected");
        }
    }

    pub fn current_user(&self) -> Option<UserIdentity> {
        self.user.borrow().clone()
    }

    /// Signs and broadcasts `call` through the provider.
    pub async fn sign_and_submit(&self, call: &ContractCall) -> Result<TxId, WalletError> {
        self.provider.sign_and_submit(&self.app, call).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::address::AddressRole;
    use std::cell::Cell;

    const USER: &str = "GAAZI4TCR3TY5OJHCTJC2A4QSY6CJWJH5IAJTGKIN2ER7LBNVKOCCWN7";

    struct StubWallet {
        remembered: Option<UserIdentity>,
        approve: bool,
        disconnects: Cell<u32>,
    }

    impl StubWallet {
        fn new(approve: bool) -> Self {
            Self {
                remembered: None,
                approve,
                disconnects: Cell::new(0),
            }
        }
    }

    impl WalletProvider for StubWallet {
        fn signed_in_user(&self) -> Option<UserIdentity> {
            self.remembered.clone()
        }

        async fn connect(&self, _app: &AppDetails) -> Result<UserIdentity, WalletError> {
            if !self.approve {
                return Err(WalletError::Cancelled);
            }
            Ok(user())
        }

        fn disconnect(&self) {
            self.disconnects.set(self.disconnects.get() + 1);
        }

        async fn sign_and_submit(
            &self,
            _app: &AppDetails,
            _call: &ContractCall,
        ) -> Result<TxId, WalletError> {
            Ok(TxId("stub".into()))
        }
    }

    fn user() -> UserIdentity {
        UserIdentity {
            address: AccountId::parse(AddressRole::Sender, USER).unwrap(),
        }
    }

    fn app() -> AppDetails {
        AppDetails {
            name: "TipsJar".into(),
            icon: None,
        }
    }

    #[tokio::test]
    async fn connect_and_disconnect() {
        let session = WalletSession::new(StubWallet::new(true), app());
        assert_eq!(session.current_user(), None);

        let connected = session.connect().await.unwrap();
        assert_eq!(connected, user());
        assert_eq!(session.current_user(), Some(user()));

        session.disconnect();
        assert_eq!(session.current_user(), None);
        assert_eq!(session.provider.disconnects.get(), 1);
    }

    #[tokio::test]
    async fn cancelled_connect_leaves_session_empty() {
        let session = WalletSession::new(StubWallet::new(false), app());
        assert_eq!(session.connect().await, Err(WalletError::Cancelled));
        assert_eq!(session.current_user(), None);
    }

    #[test]
    fn restore_picks_up_existing_sign_in() {
        let mut wallet = StubWallet::new(true);
        wallet.remembered = Some(user());
        let session = WalletSession::new(wallet, app());

        assert_eq!(session.restore(), Some(user()));
        assert_eq!(session.current_user(), Some(user()));
    }
}
