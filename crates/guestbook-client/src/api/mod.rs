//! # API Client
//!
//! HTTP client for communicating with `guestbook-node`.
//!
//! This module provides the [`GuestbookClient`] for making API requests
//! to a running node.

mod client;
mod error;

pub use client::GuestbookClient;
pub use error::{ApiResult, ClientError, INVALID_RESPONSE_MESSAGE};
