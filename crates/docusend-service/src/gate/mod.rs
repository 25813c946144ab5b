//! The access gate: decides what a viewer of a shared link sees next.

pub mod evaluator;
pub mod expiration;
pub mod rules;

pub use evaluator::{ViewerState, evaluate};
pub use expiration::is_expired;
pub use rules::{RULES, Rule, RuleInput, VerifiedSet};
