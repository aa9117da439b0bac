//! The sixteen entity commands.
//!
//! Each entity is one generic struct whose parameter is a [`stage`] marker;
//! the hooks are shared across stages and only the permission table below
//! differs.

/// Type-level names for the four actions.
pub mod stage {
  pub struct List;
  pub struct Create;
  pub struct Update;
  pub struct Delete;
}

/// Implement [`Command`](crate::command::Command) for each stage of an
/// entity command, with the roles allowed to run it.
macro_rules! permissions {
  ($cmd:ident, $record:ty, $entity:ident { $($stage:ident => [$($role:ident),+]),+ $(,)? }) => {
    $(
      impl $crate::command::Command for $cmd<$crate::commands::stage::$stage> {
        type Record = $record;

        const ENTITY: $crate::command::Entity = $crate::command::Entity::$entity;
        const ACTION: $crate::command::Action = $crate::command::Action::$stage;
        const ALLOWED: &'static [epic_core::account::Role] =
          &[$(epic_core::account::Role::$role),+];
      }
    )+
  };
}

mod client;
mod contract;
mod employee;
mod event;

pub use self::{
  client::ClientCommand, contract::ContractCommand, employee::EmployeeCommand,
  event::EventCommand,
};

/// Cells of a date column.
fn day(dt: &chrono::DateTime<chrono::Utc>) -> String { epic_core::record::format_date(dt) }
