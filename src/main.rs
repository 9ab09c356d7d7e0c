use anyhow::Result;
use chrono::Local;
use clap::{Parser, Subcommand};

use fintrack::auth::{resolve_owner, SessionStore};
use fintrack::cli::{
    handle_category_command, handle_login, handle_logout, handle_payout_command,
    handle_person_command, handle_report_command, handle_tag_command,
    handle_transaction_command, handle_user_command, handle_whoami, CategoryCommands,
    PayoutCommands, PersonCommands, ReportCommands, TagCommands, TransactionCommands,
    UserCommands,
};
use fintrack::config::{FintrackPaths, Settings};
use fintrack::services::{CategoryService, ReconciliationService, TagService};
use fintrack::storage::Storage;

#[derive(Parser)]
#[command(
    name = "fintrack",
    version,
    about = "Personal finance tracking from the command line",
    long_about = "fintrack tracks income and expenses per owner. Recurring \
                  entries, installment plans, salaries and bonus payouts expand \
                  into concrete transaction records, and generated series are \
                  repaired automatically on load."
)]
struct Cli {
    /// Owner partition to operate on (falls back to the active session)
    #[arg(long, global = true, env = "FINTRACK_OWNER")]
    owner: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize the owner partition with default categories and tags
    Init,

    /// User management commands
    #[command(subcommand)]
    User(UserCommands),

    /// Log in and start a session
    Login {
        /// Username
        username: String,
        /// Password (prompted when omitted)
        #[arg(short, long)]
        password: Option<String>,
    },

    /// End the active session
    Logout,

    /// Show the active session owner
    Whoami,

    /// Transaction management commands
    #[command(subcommand, alias = "tx")]
    Transaction(TransactionCommands),

    /// Category management commands
    #[command(subcommand)]
    Category(CategoryCommands),

    /// Tag management commands
    #[command(subcommand)]
    Tag(TagCommands),

    /// Person (salary earner) management commands
    #[command(subcommand)]
    Person(PersonCommands),

    /// Bonus payout management commands
    #[command(subcommand)]
    Payout(PayoutCommands),

    /// Reporting commands
    #[command(subcommand)]
    Report(ReportCommands),

    /// Repair generated series and report what was synthesized
    Sync,

    /// Show current configuration and paths
    Config,
}

fn open_storage(paths: &FintrackPaths, owner: &str) -> Result<Storage> {
    let storage = Storage::open(paths.clone(), owner)?;
    storage.load_all()?;

    // Best-effort repair pass; a failure must not block the command
    let reconciliation = ReconciliationService::new(&storage);
    match reconciliation.run(Local::now().date_naive()) {
        Ok(report) if !report.is_empty() => {
            eprintln!("Synthesized {} missing records on load.", report.total());
        }
        Ok(_) => {}
        Err(e) => eprintln!("Warning: reconciliation failed: {}", e),
    }

    Ok(storage)
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let paths = FintrackPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;
    let session = SessionStore::new(paths.clone());

    match cli.command {
        Commands::User(cmd) => {
            handle_user_command(&paths, cmd)?;
        }
        Commands::Login { username, password } => {
            handle_login(&paths, &username, password)?;
        }
        Commands::Logout => {
            handle_logout(&paths)?;
        }
        Commands::Whoami => {
            handle_whoami(&paths)?;
        }
        Commands::Init => {
            let owner = resolve_owner(cli.owner, &session)?;
            let storage = Storage::open(paths.clone(), &owner)?;
            storage.load_all()?;

            CategoryService::new(&storage).ensure_seeded()?;
            TagService::new(&storage).ensure_seeded()?;

            let mut settings = settings;
            settings.setup_completed = true;
            settings.save(&paths)?;

            println!("Initialized partition for {}", owner);
            println!("  Data: {}", paths.owner_data_dir(&owner).display());
            println!("Default categories and tags have been created.");
        }
        Commands::Sync => {
            let owner = resolve_owner(cli.owner, &session)?;
            let storage = Storage::open(paths.clone(), &owner)?;
            storage.load_all()?;

            let report = ReconciliationService::new(&storage).run(Local::now().date_naive())?;
            if report.is_empty() {
                println!("Nothing to repair.");
            } else {
                println!("Synthesized {} records:", report.total());
                println!("  Payout installments: {}", report.payout_records);
                println!("  Salary records: {}", report.salary_records);
                println!("  Plan installments: {}", report.installment_records);
            }
        }
        Commands::Config => {
            println!("Base directory: {}", paths.base_dir().display());
            println!("Settings file: {}", paths.settings_file().display());
            println!("Currency symbol: {}", settings.currency_symbol);
            println!("Date format: {}", settings.date_format);
            println!("Recurring months: {}", settings.recurring_months);
            match session.current_owner()? {
                Some(owner) => println!("Session owner: {}", owner),
                None => println!("Session owner: (none)"),
            }
        }
        Commands::Transaction(cmd) => {
            let owner = resolve_owner(cli.owner, &session)?;
            let storage = open_storage(&paths, &owner)?;
            handle_transaction_command(&storage, &settings, cmd)?;
        }
        Commands::Category(cmd) => {
            let owner = resolve_owner(cli.owner, &session)?;
            let storage = open_storage(&paths, &owner)?;
            handle_category_command(&storage, cmd)?;
        }
        Commands::Tag(cmd) => {
            let owner = resolve_owner(cli.owner, &session)?;
            let storage = open_storage(&paths, &owner)?;
            handle_tag_command(&storage, cmd)?;
        }
        Commands::Person(cmd) => {
            let owner = resolve_owner(cli.owner, &session)?;
            let storage = open_storage(&paths, &owner)?;
            handle_person_command(&storage, cmd)?;
        }
        Commands::Payout(cmd) => {
            let owner = resolve_owner(cli.owner, &session)?;
            let storage = open_storage(&paths, &owner)?;
            handle_payout_command(&storage, cmd)?;
        }
        Commands::Report(cmd) => {
            let owner = resolve_owner(cli.owner, &session)?;
            let storage = open_storage(&paths, &owner)?;
            handle_report_command(&storage, &settings, cmd)?;
        }
    }

    Ok(())
}
