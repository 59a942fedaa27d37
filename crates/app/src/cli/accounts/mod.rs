use clap::{Args, Subcommand};

mod list;

#[derive(Debug, Args)]
pub(crate) struct AccountsCommand {
    #[command(subcommand)]
    command: AccountsSubcommand,
}

#[derive(Debug, Subcommand)]
enum AccountsSubcommand {
    /// List registered accounts, newest first
    List(list::ListAccountsArgs),
}

pub(crate) async fn run(command: AccountsCommand) -> Result<(), String> {
    match command.command {
        AccountsSubcommand::List(args) => list::run(args).await,
    }
}
