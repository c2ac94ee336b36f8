//! # Guestbook Client
//!
//! Client side of the guestbook: a typed HTTP client for the node API, the
//! view state a guestbook page renders from, and a controller that drives
//! that state with requests.
//!
//! ## Modules
//!
//! - [`api`] - HTTP client for `guestbook-node`
//! - [`state`] - View state and its transitions
//! - [`controller`] - Async interactions over shared state
//! - [`render`] - Plain-text view rendering
//! - [`config`] - Persisted client settings

pub mod api;
pub mod config;
pub mod controller;
pub mod render;
pub mod state;

pub use api::{ClientError, GuestbookClient};
pub use config::ClientConfig;
pub use controller::Guestbook;
pub use state::GuestbookState;
