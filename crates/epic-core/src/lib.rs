//! Core types and trait definitions for Epic Events.
//!
//! This crate is deliberately free of terminal and database dependencies.
//! The store backend and the CLI both depend on it.

// Native `async fn` in traits; the store trait spells out its `Send` bounds.
#![allow(async_fn_in_trait)]

pub mod account;
pub mod client;
pub mod contract;
pub mod error;
pub mod event;
pub mod record;
pub mod store;

pub use error::{Error, Result};
