use bazaar_app::{
    database::{self, Db},
    domain::accounts::{AccountsService, PgAccountsService},
};
use clap::Args;

#[derive(Debug, Args)]
pub(crate) struct ListAccountsArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,
}

pub(crate) async fn run(args: ListAccountsArgs) -> Result<(), String> {
    let pool = database::connect(&args.database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    let accounts = PgAccountsService::new(Db::new(pool))
        .list_accounts()
        .await
        .map_err(|error| format!("failed to list accounts: {error}"))?;

    if accounts.is_empty() {
        println!("no accounts registered");
        return Ok(());
    }

    for account in accounts {
        println!("account_uuid: {}", account.uuid);
        println!("name: {}", account.name);
        println!("email: {}", account.email);
        println!("role: {}", account.role);
        println!("created_at: {}", account.created_at);
        println!();
    }

    Ok(())
}
