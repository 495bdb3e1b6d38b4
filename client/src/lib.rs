//! # Tips Jar Client
//!
//! Client-side state and logic for the tips jar contract: connecting a
//! wallet, validating the "Send Tip" and "View Tip" forms, submitting
//! signed `tip` calls and rendering read-only query results.
//!
//! The wallet is external and plugs in through [`WalletProvider`]. Queries
//! go through [`TipReader`], implemented over Soroban RPC by
//! [`RpcTipReader`]. [`TipsJarApp`] drives both and keeps the [`AppState`]
//! a UI shell displays.

pub mod address;
pub mod app;
pub mod config;
pub mod contract;
pub mod error;
pub mod form;
pub mod logging;
pub mod reader;
pub mod render;
pub mod rpc;
pub mod units;
pub mod wallet;

pub use address::{AccountId, AddressRole};
pub use app::{AppState, TipsJarApp};
pub use config::{ClientConfig, Network, NetworkEndpoint, Networks};
pub use contract::{
    CallArg, ContractCall, ContractFunction, TipQuery, TipRequest, TipView, TxId,
    MAX_MESSAGE_CHARS,
};
pub use error::{ClientError, QueryError, ValidationError, WalletError};
pub use form::{SendTipForm, ViewTipForm};
pub use logging::{init_logging, init_logging_from_config, LogFormat};
pub use reader::TipReader;
pub use rpc::RpcTipReader;
pub use wallet::{AppDetails, UserIdentity, WalletProvider, WalletSession};
