use clap::{Parser, Subcommand};
use shopdesk_cli::commands::inventory::{run_categories, run_items, CategoriesCommand, ItemsCommand};
use shopdesk_cli::commands::login::run_login;
use shopdesk_cli::commands::purchases::{run_purchases, PurchasesCommand};
use shopdesk_cli::commands::repair::{run_repair, RepairCommand};
use shopdesk_cli::commands::report::{run_report, ReportArgs};

#[derive(Parser)]
#[command(name = "shopdesk", about = "Repair shop inventory and purchase records")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Save the access token (and optionally the backend URL)
    Login {
        token:   String,
        /// Backend base URL, e.g. https://shop.example.com/api/
        #[arg(long)]
        backend: Option<String>,
    },
    /// Purchase transactions
    #[command(subcommand)]
    Purchases(PurchasesCommand),
    /// Inventory categories
    #[command(subcommand)]
    Categories(CategoriesCommand),
    /// Inventory items
    #[command(subcommand)]
    Items(ItemsCommand),
    /// Purchase report with totals
    Report(ReportArgs),
    /// Repair jobs
    #[command(subcommand)]
    Repair(RepairCommand),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    match cli.command {
        Commands::Login { token, backend } => run_login(&token, backend)?,
        Commands::Purchases(command) => run_purchases(command).await?,
        Commands::Categories(command) => run_categories(command).await?,
        Commands::Items(command) => run_items(command).await?,
        Commands::Report(args) => run_report(args).await?,
        Commands::Repair(command) => run_repair(command).await?,
    }
    Ok(())
}
