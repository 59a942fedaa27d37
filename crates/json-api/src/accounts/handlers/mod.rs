//! Account Handlers

pub(crate) mod debug_users;
pub(crate) mod profile;
pub(crate) mod register;
