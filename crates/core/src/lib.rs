//! `returnshield-core`: shared client building blocks.
//!
//! This crate contains **pure** primitives (no IO, no HTTP).

pub mod error;
pub mod id;
pub mod machine;
pub mod order;

pub use error::{DomainError, DomainResult};
pub use id::{FlowId, LineItemId, OrderId, ReturnId, RuleId, UserId};
pub use machine::StateMachine;
pub use order::{LineItem, Order};
