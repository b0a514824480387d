//! Memo workflows
//!
//! - provision: make sure today's memo page exists (`daily-memo create`)
//! - dispatch: email today's memo to the roster (`daily-memo send`)
//!
//! Both resolve "today" as the UTC calendar date.

pub mod dispatch;
pub mod provision;

#[cfg(test)]
pub(crate) mod fakes;

pub use dispatch::Dispatcher;
pub use provision::Provisioner;
