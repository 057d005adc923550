mod auth;
mod config;
mod dashboard;
mod db;
mod error;
mod favorites;
mod grocery;
mod logging;
mod models;
mod pipeline;
mod sample;
mod store;
mod summary;
mod tui;

use anyhow::{anyhow, bail, Context, Result};
use chrono::NaiveDate;
use clap::{ArgAction, Parser, Subcommand};
use std::io::{self, Write};
use tracing::warn;

use auth::{require_identity, AuthEvent, AuthProvider, LocalAuth};
use config::Config;
use dashboard::Dashboard;
use db::Database;
use error::{DashboardError, StoreError};
use favorites::FavoriteStore;
use models::{Application, ApplicationPatch, FlyerStatus, GroceryCategory, Identity, NewApplication, Status};
use pipeline::{ListQuery, SortDirection, SortKey, StatusFilter, PAGE_SIZE_OPTIONS};
use store::RecordStore;

#[derive(Parser)]
#[command(name = "apptrack")]
#[command(about = "Track job applications, favorites and grocery savings")]
struct Cli {
    /// More log output (-v info, -vv debug). RUST_LOG takes precedence.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize the database
    Init,

    /// Sign in with an email address
    Login {
        email: String,
    },

    /// Sign out and forget favorites on this device
    Logout,

    /// Show the signed-in user
    Whoami,

    /// Add an application
    Add {
        company: String,
        position: String,
        location: String,

        /// Applied, Interview, Offer, Rejected or Follow-up
        #[arg(short, long, default_value = "Applied")]
        status: Status,

        /// Date applied (YYYY-MM-DD), defaults to today
        #[arg(short, long)]
        date: Option<NaiveDate>,

        #[arg(long)]
        salary: Option<String>,

        #[arg(short, long)]
        notes: Option<String>,

        /// Link to the job posting
        #[arg(short, long)]
        url: Option<String>,

        #[arg(long)]
        hiring_manager: Option<String>,

        /// The posting has been taken down
        #[arg(long)]
        offline: bool,
    },

    /// Change fields of an application. An empty value clears an optional field.
    Edit {
        /// Application ID (or unique prefix)
        id: String,

        #[arg(long)]
        company: Option<String>,

        #[arg(long)]
        position: Option<String>,

        #[arg(long)]
        location: Option<String>,

        #[arg(short, long)]
        date: Option<NaiveDate>,

        #[arg(long)]
        salary: Option<String>,

        #[arg(short, long)]
        notes: Option<String>,

        #[arg(short, long)]
        url: Option<String>,

        #[arg(long)]
        hiring_manager: Option<String>,

        /// Whether the posting is still online (true/false)
        #[arg(long)]
        online: Option<bool>,
    },

    /// List applications
    List {
        /// Match company, position or location
        #[arg(short = 'q', long)]
        search: Option<String>,

        /// Filter by status (all, applied, interview, offer, rejected, follow-up, archived)
        #[arg(short, long)]
        status: Option<StatusFilter>,

        /// Sort by date, company, position or status
        #[arg(long)]
        sort: Option<SortKey>,

        /// Ascending order (default is descending)
        #[arg(long)]
        asc: bool,

        /// Rows per page (6, 12, 24 or 48)
        #[arg(long)]
        page_size: Option<usize>,

        #[arg(short, long, default_value = "1")]
        page: usize,
    },

    /// Show application details
    Show {
        /// Application ID (or unique prefix)
        id: String,
    },

    /// Set the status of an application
    Status {
        /// Application ID (or unique prefix)
        id: String,

        status: Status,
    },

    /// Archive an application (hidden unless listing with --status archived)
    Archive {
        /// Application ID (or unique prefix)
        id: String,
    },

    /// Permanently delete an application
    Delete {
        /// Application ID (or unique prefix)
        id: String,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Toggle an application as favorite
    Fav {
        /// Application ID (or unique prefix)
        id: String,
    },

    /// Show totals by status
    Stats {
        /// Print a bar chart of applications by status
        #[arg(long)]
        chart: bool,
    },

    /// Interactive dashboard
    Browse,

    /// Add random sample applications
    Seed {
        #[arg(default_value = "20")]
        count: usize,
    },

    /// Manage the grocery list
    Grocery {
        #[command(subcommand)]
        command: GroceryCommands,
    },

    /// Manage store flyers
    Flyer {
        #[command(subcommand)]
        command: FlyerCommands,
    },

    /// Record and list store prices
    Price {
        #[command(subcommand)]
        command: PriceCommands,
    },

    /// Show the savings report across stores
    Savings,
}

#[derive(Subcommand)]
enum GroceryCommands {
    /// Add an item to the list
    Add {
        name: String,

        /// Produce, dairy, meat, bakery, pantry, frozen, beverages or snacks
        #[arg(short, long, default_value = "pantry")]
        category: GroceryCategory,

        #[arg(short, long, default_value = "1")]
        quantity: u32,

        #[arg(short, long, default_value = "Any")]
        brand: String,
    },

    /// List items
    List,

    /// Check or uncheck an item
    Check {
        /// Item ID (or unique prefix)
        id: String,
    },

    /// Remove an item
    Rm {
        /// Item ID (or unique prefix)
        id: String,
    },
}

#[derive(Subcommand)]
enum FlyerCommands {
    /// Add a flyer by URL
    Add {
        url: String,
    },

    /// List flyers
    List,

    /// Remove a flyer
    Rm {
        /// Flyer ID (or unique prefix)
        id: String,
    },
}

#[derive(Subcommand)]
enum PriceCommands {
    /// Record a price for an item at a store
    Add {
        item: String,
        store: String,

        /// Current price, e.g. 3.49
        price: String,

        /// Regular price, e.g. 4.29
        regular: String,
    },

    /// List recorded prices
    List,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let config = Config::load()?;
    let db = Database::open(&config.database_path())
        .with_context(|| format!("Failed to open database: {}", config.database_path().display()))?;
    let mut auth = LocalAuth::new(&config.session_path());

    if !matches!(cli.command, Commands::Init) {
        db.ensure_initialized()?;
    }

    match cli.command {
        Commands::Init => {
            db.init()?;
            println!("Database initialized at {}", db.path().display());
        }

        Commands::Login { email } => {
            let identity = auth.sign_in(&email)?;
            println!("Signed in as {} ({})", identity.email, short_id(&identity.id));
        }

        Commands::Logout => {
            let favorites_path = config.favorites_path();
            auth.subscribe(Box::new(move |event| {
                if *event == AuthEvent::SignedOut {
                    if let Err(e) = favorites::remove_file(&favorites_path) {
                        warn!(error = %e, "could not clear favorites on sign-out");
                    }
                }
            }));
            auth.sign_out()?;
            println!("Signed out.");
        }

        Commands::Whoami => match auth.current_identity()? {
            Some(identity) => {
                println!("Email: {}", identity.email);
                println!("User ID: {}", identity.id);
                println!("Signed in: {}", identity.signed_in_at.format("%Y-%m-%d %H:%M UTC"));
            }
            None => println!("Not signed in."),
        },

        Commands::Add {
            company,
            position,
            location,
            status,
            date,
            salary,
            notes,
            url,
            hiring_manager,
            offline,
        } => {
            let mut dash = open_dashboard(&db, &config, &auth, base_query(&config))?;
            let new = NewApplication {
                company,
                position,
                location,
                status,
                date_applied: date,
                salary,
                notes,
                job_url: url,
                posting_online: !offline,
                hiring_manager,
            };
            let app = dash.create(&new).map_err(user_facing)?;
            println!(
                "Added {} at {} ({})",
                app.position,
                app.company,
                short_id(&app.id)
            );
        }

        Commands::Edit {
            id,
            company,
            position,
            location,
            date,
            salary,
            notes,
            url,
            hiring_manager,
            online,
        } => {
            let patch = ApplicationPatch {
                company,
                position,
                location,
                status: None,
                date_applied: date,
                salary: salary.map(Some),
                notes: notes.map(Some),
                job_url: url.map(Some),
                posting_online: online,
                hiring_manager: hiring_manager.map(Some),
            };
            if patch.is_empty() {
                bail!("Nothing to change. Pass at least one field to edit.");
            }
            let mut dash = open_dashboard(&db, &config, &auth, base_query(&config))?;
            let id = resolve_application(&db, &dash.owner().id, &id)?;
            let app = dash.update(&id, &patch).map_err(user_facing)?;
            println!("Updated {} at {}", app.position, app.company);
        }

        Commands::List {
            search,
            status,
            sort,
            asc,
            page_size,
            page,
        } => {
            let mut query = base_query(&config);
            if let Some(search) = search {
                query.search = search;
            }
            if let Some(status) = status {
                query.status = status;
            }
            if let Some(sort) = sort {
                query.sort = sort;
            }
            if asc {
                query.direction = SortDirection::Ascending;
            }
            if let Some(size) = page_size {
                if !PAGE_SIZE_OPTIONS.contains(&size) {
                    bail!("--page-size must be one of {:?}", PAGE_SIZE_OPTIONS);
                }
                query.page_size = size;
            }
            query.page = page.max(1);

            let dash = open_dashboard(&db, &config, &auth, query)?;
            print_page(&dash);
        }

        Commands::Show { id } => {
            let identity = require_identity(&auth)?;
            let id = resolve_application(&db, &identity.id, &id)?;
            let app = db
                .get(&identity.id, &id)?
                .ok_or_else(|| anyhow!("Application {} not found.", short_id(&id)))?;
            let favorites = FavoriteStore::load(&config.favorites_path());
            print_application(&app, favorites.contains(&app.id));
        }

        Commands::Status { id, status } => {
            let mut dash = open_dashboard(&db, &config, &auth, base_query(&config))?;
            let id = resolve_application(&db, &dash.owner().id, &id)?;
            let app = dash.set_status(&id, status).map_err(user_facing)?;
            println!("{} at {} is now {}", app.position, app.company, app.status);
        }

        Commands::Archive { id } => {
            let mut dash = open_dashboard(&db, &config, &auth, base_query(&config))?;
            let id = resolve_application(&db, &dash.owner().id, &id)?;
            let app = dash.archive(&id).map_err(user_facing)?;
            println!("Archived {} at {}", app.position, app.company);
        }

        Commands::Delete { id, yes } => {
            let mut dash = open_dashboard(&db, &config, &auth, base_query(&config))?;
            let id = resolve_application(&db, &dash.owner().id, &id)?;
            let label = match db.get(&dash.owner().id, &id)? {
                Some(app) => format!("{} at {}", app.position, app.company),
                None => short_id(&id).to_string(),
            };
            if !yes && !confirm(&format!("Delete {} permanently?", label))? {
                println!("Cancelled.");
                return Ok(());
            }
            dash.delete(&id).map_err(user_facing)?;
            println!("Deleted {}", label);
        }

        Commands::Fav { id } => {
            let mut dash = open_dashboard(&db, &config, &auth, base_query(&config))?;
            let id = resolve_application(&db, &dash.owner().id, &id)?;
            if dash.toggle_favorite(&id).map_err(user_facing)? {
                println!("Added {} to favorites.", short_id(&id));
            } else {
                println!("Removed {} from favorites.", short_id(&id));
            }
        }

        Commands::Stats { chart } => {
            let dash = open_dashboard(&db, &config, &auth, base_query(&config))?;
            let summary = dash.summary();
            println!("Total applications: {}", summary.total);
            println!("Interviews:         {}", summary.interviews);
            println!("Offers:             {}", summary.offers);
            println!("Favorites:          {}", summary.favorited);

            if chart {
                println!();
                if summary.by_status.is_empty() {
                    println!("No applications yet.");
                }
                let max = summary.by_status.iter().map(|c| c.count).max().unwrap_or(0);
                for count in &summary.by_status {
                    println!(
                        "{:<10} {:<40} {}",
                        count.status.label(),
                        bar(count.count, max, 40),
                        count.count
                    );
                }
            }
        }

        Commands::Browse => {
            let mut dash = open_dashboard(&db, &config, &auth, base_query(&config))?;
            tui::run_browse(&mut dash)?;
        }

        Commands::Seed { count } => {
            let mut dash = open_dashboard(&db, &config, &auth, base_query(&config))?;
            let mut added = 0;
            for new in sample::generate_now(count) {
                dash.create(&new).map_err(user_facing)?;
                added += 1;
            }
            println!("Added {} sample applications.", added);
        }

        Commands::Grocery { command } => {
            let owner = require_identity(&auth)?.id;
            match command {
                GroceryCommands::Add {
                    name,
                    category,
                    quantity,
                    brand,
                } => {
                    grocery::validate_item(&name, quantity)?;
                    let brand = if brand.trim().is_empty() { "Any" } else { brand.trim() };
                    let item = db.add_grocery_item(&owner, name.trim(), category, quantity, brand)?;
                    println!("Added {} x{} ({})", item.name, item.quantity, short_id(&item.id));
                }

                GroceryCommands::List => {
                    let items = db.list_grocery_items(&owner)?;
                    if items.is_empty() {
                        println!("Your grocery list is empty.");
                    } else {
                        println!("{:<9} {:<3} {:<24} {:<10} {:>4} {:<12}", "ID", "", "ITEM", "CATEGORY", "QTY", "BRAND");
                        println!("{}", "-".repeat(67));
                        for item in items {
                            println!(
                                "{:<9} {:<3} {:<24} {:<10} {:>4} {:<12}",
                                short_id(&item.id),
                                if item.checked { "[x]" } else { "[ ]" },
                                truncate(&item.name, 22),
                                item.category,
                                item.quantity,
                                truncate(&item.brand, 12)
                            );
                        }
                    }
                }

                GroceryCommands::Check { id } => {
                    let items = db.list_grocery_items(&owner)?;
                    let id = resolve_prefix(items.iter().map(|i| i.id.as_str()), &id, "item")?;
                    if db.toggle_grocery_item(&owner, &id)? {
                        println!("Checked off {}.", short_id(&id));
                    } else {
                        println!("Unchecked {}.", short_id(&id));
                    }
                }

                GroceryCommands::Rm { id } => {
                    let items = db.list_grocery_items(&owner)?;
                    let id = resolve_prefix(items.iter().map(|i| i.id.as_str()), &id, "item")?;
                    db.delete_grocery_item(&owner, &id)?;
                    println!("Removed {}.", short_id(&id));
                }
            }
        }

        Commands::Flyer { command } => {
            let owner = require_identity(&auth)?.id;
            match command {
                FlyerCommands::Add { url } => {
                    grocery::validate_flyer_url(&url)?;
                    let store = grocery::store_from_url(&url);
                    let flyer = db.add_flyer(&owner, url.trim(), store, FlyerStatus::Processed)?;
                    println!("Added {} flyer ({})", flyer.store, short_id(&flyer.id));
                }

                FlyerCommands::List => {
                    let flyers = db.list_flyers(&owner)?;
                    if flyers.is_empty() {
                        println!(
                            "No flyers yet. Supported stores: {}",
                            grocery::supported_stores().collect::<Vec<_>>().join(", ")
                        );
                    } else {
                        println!("{:<9} {:<10} {:<11} {:<40}", "ID", "STORE", "STATUS", "URL");
                        println!("{}", "-".repeat(72));
                        for flyer in flyers {
                            println!(
                                "{:<9} {:<10} {:<11} {:<40}",
                                short_id(&flyer.id),
                                flyer.store,
                                flyer.status.as_str(),
                                truncate(&flyer.url, 40)
                            );
                        }
                    }
                }

                FlyerCommands::Rm { id } => {
                    let flyers = db.list_flyers(&owner)?;
                    let id = resolve_prefix(flyers.iter().map(|f| f.id.as_str()), &id, "flyer")?;
                    db.delete_flyer(&owner, &id)?;
                    println!("Removed flyer {}.", short_id(&id));
                }
            }
        }

        Commands::Price { command } => {
            let owner = require_identity(&auth)?.id;
            match command {
                PriceCommands::Add {
                    item,
                    store,
                    price,
                    regular,
                } => {
                    let price_cents = grocery::parse_cents(&price)
                        .ok_or_else(|| anyhow!("'{}' is not a valid price", price))?;
                    let regular_cents = grocery::parse_cents(&regular)
                        .ok_or_else(|| anyhow!("'{}' is not a valid price", regular))?;
                    grocery::validate_price(&item, &store, price_cents, regular_cents)?;
                    let entry = db.add_price(&owner, item.trim(), store.trim(), price_cents, regular_cents)?;
                    println!(
                        "{} at {}: {} (save {})",
                        entry.item,
                        entry.store,
                        grocery::format_cents(entry.price_cents),
                        grocery::format_cents(entry.savings_cents())
                    );
                }

                PriceCommands::List => {
                    let prices = db.list_prices(&owner)?;
                    if prices.is_empty() {
                        println!("No prices recorded.");
                    } else {
                        println!("{:<20} {:<12} {:>9} {:>9} {:>9}", "ITEM", "STORE", "PRICE", "REGULAR", "SAVE");
                        println!("{}", "-".repeat(63));
                        for entry in &prices {
                            println!(
                                "{:<20} {:<12} {:>9} {:>9} {:>9}",
                                truncate(&entry.item, 18),
                                truncate(&entry.store, 12),
                                grocery::format_cents(entry.price_cents),
                                grocery::format_cents(entry.regular_cents),
                                grocery::format_cents(entry.savings_cents())
                            );
                        }
                    }
                }
            }
        }

        Commands::Savings => {
            let owner = require_identity(&auth)?.id;
            let prices = db.list_prices(&owner)?;
            let report = grocery::report(&prices);
            if report.items.is_empty() {
                println!("No prices recorded. Add some with 'apptrack price add'.");
                return Ok(());
            }

            println!("{:<20} {:<12} {:>9} {:>9}", "ITEM", "BEST AT", "PRICE", "STORES");
            println!("{}", "-".repeat(53));
            for group in &report.items {
                if let Some(best) = group.best_deal() {
                    println!(
                        "{:<20} {:<12} {:>9} {:>9}",
                        truncate(group.item, 18),
                        truncate(&best.store, 12),
                        grocery::format_cents(best.price_cents),
                        group.entries.len()
                    );
                }
            }

            println!("\nTotal savings: {}", grocery::format_cents(report.total_savings_cents));
            println!("\nStores:");
            for (rank, store) in report.stores.iter().enumerate() {
                let best = if store.best_items.is_empty() {
                    String::new()
                } else {
                    format!("  best for {}", store.best_items.join(", "))
                };
                println!(
                    "  {}. {:<12} save {}{}",
                    rank + 1,
                    store.store,
                    grocery::format_cents(store.savings_cents),
                    best
                );
            }
        }
    }

    Ok(())
}

fn base_query(config: &Config) -> ListQuery {
    ListQuery {
        sort: config.sort,
        direction: config.direction,
        page_size: config.page_size,
        ..ListQuery::default()
    }
}

fn open_dashboard<'a>(
    db: &'a Database,
    config: &Config,
    auth: &dyn AuthProvider,
    query: ListQuery,
) -> Result<Dashboard<'a, Database>> {
    let identity: Identity = require_identity(auth)?;
    let favorites = FavoriteStore::load(&config.favorites_path());
    Dashboard::open(db, identity, favorites, query).map_err(user_facing)
}

/// The detail has already been logged by the dashboard.
fn user_facing(err: DashboardError) -> anyhow::Error {
    anyhow!(err.user_message())
}

fn resolve_application(db: &Database, owner: &str, prefix: &str) -> Result<String> {
    db.resolve_id(owner, prefix).map_err(|e| match e {
        StoreError::NotFound(_) => anyhow!("No application matches '{}'.", prefix),
        StoreError::AmbiguousId(_) => {
            anyhow!("'{}' matches more than one application. Use more characters.", prefix)
        }
        other => other.into(),
    })
}

fn resolve_prefix<'a>(ids: impl IntoIterator<Item = &'a str>, prefix: &str, what: &str) -> Result<String> {
    let prefix = prefix.trim();
    if prefix.is_empty() {
        bail!("No {} id given.", what);
    }
    let matches: Vec<&str> = ids.into_iter().filter(|id| id.starts_with(prefix)).collect();
    match matches.as_slice() {
        [id] => Ok(id.to_string()),
        [] => bail!("No {} matches '{}'.", what, prefix),
        _ => bail!("'{}' matches more than one {}. Use more characters.", prefix, what),
    }
}

fn print_page<S: RecordStore>(dash: &Dashboard<'_, S>) {
    let page = dash.view();
    if page.total == 0 {
        println!("No applications found.");
        return;
    }
    if page.items.is_empty() {
        println!("Page {} is past the end ({} pages).", page.page, page.total_pages);
        return;
    }

    println!(
        "{:<9} {:<1} {:<10} {:<10} {:<28} {:<18} {:<18}",
        "ID", "", "STATUS", "APPLIED", "POSITION", "COMPANY", "LOCATION"
    );
    println!("{}", "-".repeat(100));
    for app in &page.items {
        println!(
            "{:<9} {:<1} {:<10} {:<10} {:<28} {:<18} {:<18}",
            short_id(&app.id),
            if dash.favorites().contains(&app.id) { "*" } else { "" },
            app.status.label(),
            app.date_applied.format("%Y-%m-%d"),
            truncate(&app.position, 26),
            truncate(&app.company, 16),
            truncate(&app.location, 16)
        );
    }
    println!(
        "\nPage {} of {} ({} results)",
        page.page, page.total_pages, page.total
    );
    if !page.is_last_page() {
        println!("Next page: --page {}", page.page + 1);
    }
}

fn print_application(app: &Application, favorite: bool) {
    println!("Application {}", app.id);
    println!("Position: {}", app.position);
    println!("Company: {}", app.company);
    println!("Location: {}", app.location);
    println!("Status: {}", app.status);
    println!("Applied: {}", app.date_applied.format("%b %-d, %Y"));
    if favorite {
        println!("Favorite: yes");
    }
    if let Some(salary) = &app.salary {
        println!("Salary: {}", salary);
    }
    if let Some(manager) = &app.hiring_manager {
        println!("Hiring manager: {}", manager);
    }
    if let Some(url) = &app.job_url {
        println!("URL: {}", url);
        println!("Posting: {}", if app.posting_online { "online" } else { "no longer online" });
    }
    println!("Created: {}", app.created_at.format("%Y-%m-%d %H:%M"));
    println!("Updated: {}", app.updated_at.format("%Y-%m-%d %H:%M"));
    if let Some(notes) = &app.notes {
        println!("\n--- Notes ---\n{}", textwrap::fill(notes, 80));
    }
}

fn confirm(prompt: &str) -> Result<bool> {
    print!("{} [y/N] ", prompt);
    io::stdout().flush()?;
    let mut answer = String::new();
    io::stdin().read_line(&mut answer)?;
    Ok(matches!(answer.trim(), "y" | "Y" | "yes"))
}

fn bar(count: usize, max: usize, width: usize) -> String {
    if max == 0 {
        return String::new();
    }
    let len = (count * width).div_ceil(max);
    "#".repeat(len)
}

fn short_id(id: &str) -> &str {
    id.get(..8).unwrap_or(id)
}

pub(crate) fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", cut)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_prefix() {
        let ids = ["abc123", "abd456", "xyz789"];
        assert_eq!(resolve_prefix(ids, "abc", "item").unwrap(), "abc123");
        assert!(resolve_prefix(ids, "ab", "item").is_err());
        assert!(resolve_prefix(ids, "q", "item").is_err());
        assert!(resolve_prefix(ids, " ", "item").is_err());
    }

    #[test]
    fn test_bar_scales_to_width() {
        assert_eq!(bar(10, 10, 40).len(), 40);
        assert_eq!(bar(1, 10, 40).len(), 4);
        assert_eq!(bar(0, 0, 40), "");
    }

    #[test]
    fn test_short_id_and_truncate() {
        assert_eq!(short_id("0123456789"), "01234567");
        assert_eq!(short_id("abc"), "abc");
        assert_eq!(truncate("Site Reliability Engineer", 10), "Site Re...");
        assert_eq!(truncate("Zürich Engineering", 9), "Zürich...");
        assert_eq!(truncate("short", 9), "short");
    }

    #[test]
    fn test_cli_parses_list_flags() {
        let cli = Cli::try_parse_from([
            "apptrack", "list", "--status", "interview", "--sort", "company", "--asc", "--page-size", "24",
        ])
        .unwrap();
        match cli.command {
            Commands::List {
                status,
                sort,
                asc,
                page_size,
                page,
                ..
            } => {
                assert_eq!(status, Some(StatusFilter::Only(Status::Interview)));
                assert_eq!(sort, Some(SortKey::Company));
                assert!(asc);
                assert_eq!(page_size, Some(24));
                assert_eq!(page, 1);
            }
            _ => panic!("expected list"),
        }
    }
}
