//! Accounts, orders and authentication for the Bazaar storefront, backed by `PostgreSQL`.

pub mod auth;
pub mod context;
pub mod database;
pub mod domain;

#[cfg(test)]
mod test;

mod uuids;

pub use uuids::TypedUuid;
