//! Auth Config

use clap::{ArgAction, Args};

/// Session token and development endpoint settings.
#[derive(Debug, Args)]
pub struct AuthConfig {
    /// Secret used to sign session tokens (at least 32 bytes)
    #[arg(long, env = "TOKEN_SECRET", hide_env_values = true)]
    pub token_secret: String,

    /// Mount unauthenticated development endpoints such as `/api/debug/users`
    #[arg(
        long,
        env = "DEBUG_ENDPOINTS_ENABLED",
        default_value_t = false,
        action = ArgAction::Set
    )]
    pub debug_endpoints_enabled: bool,
}
