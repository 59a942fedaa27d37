//! Bazaar Domain Concerns

pub mod accounts;
pub mod orders;
