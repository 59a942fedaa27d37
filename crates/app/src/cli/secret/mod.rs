use bazaar_app::auth::generate_token_secret;
use clap::{Args, Subcommand};

#[derive(Debug, Args)]
pub(crate) struct SecretCommand {
    #[command(subcommand)]
    command: SecretSubcommand,
}

#[derive(Debug, Subcommand)]
enum SecretSubcommand {
    /// Print a random value suitable for TOKEN_SECRET
    Generate,
}

pub(crate) fn run(command: SecretCommand) {
    match command.command {
        SecretSubcommand::Generate => println!("{}", generate_token_secret()),
    }
}
