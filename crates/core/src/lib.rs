//! `coachdata-core` — domain foundation for coach records.
//!
//! This crate contains **pure domain** types (no storage or HTTP concerns).

pub mod coach;
pub mod error;
pub mod id;

pub use coach::{Coach, CoachDetails};
pub use error::{DomainError, DomainResult};
pub use id::CoachId;
