//! Access gate outcome types.

pub mod decision;

pub use decision::AccessDecision;
