//! Interactive terminal front end for Epic Events.
//!
//! An operator logs in once, then moves between numbered menus and CRUD
//! commands on employees, clients, contracts and events. Every command is
//! gated by the role of the logged-in employee.

// Command hooks are native `async fn` in traits, driven on one task.
#![allow(async_fn_in_trait)]

pub mod app;
pub mod command;
pub mod commands;
pub mod config;
pub mod error;
pub mod input;
pub mod menu;
pub mod session;
pub mod term;

pub use error::{Error, Result};
