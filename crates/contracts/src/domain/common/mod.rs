//! Common types and traits for all aggregates

pub mod aggregate_root;
pub mod write_target;

pub use aggregate_root::AggregateRoot;
pub use write_target::WriteTarget;
