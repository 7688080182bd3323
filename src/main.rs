use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use showcase::config::{Config, Credentials, DEFAULT_CONFIG_PATH};
use showcase::error::ShowcaseError;
use showcase::page::{EventsPage, PageState};
use showcase::providers::clerk::ClerkAuth;
use showcase::providers::supabase::SupabaseStore;
use showcase::render;

const HELP: &str = "\
commands:
  events   show the events page
  upgrade  simulate moving up one tier (demo only, not saved)
  retry    re-fetch after a failed load
  tier     show your current tier
  tiers    show all membership tiers
  help     show this help
  quit     exit
";

const SETUP_STEPS: &str = "\
Setup required. Steps:
  1. Copy .env.example to .env
  2. Get keys from clerk.com and supabase.com
  3. Replace the placeholder keys in .env
  4. Restart
";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("showcase=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config_path = std::env::var("SHOWCASE_CONFIG")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_PATH));
    let config = Config::load_or_default(&config_path)
        .with_context(|| format!("loading {}", config_path.display()))?;

    let credentials = match Credentials::from_env() {
        Ok(credentials) => credentials,
        Err(e @ ShowcaseError::SetupRequired(_)) => {
            eprintln!("{e}\n\n{SETUP_STEPS}");
            std::process::exit(2);
        }
        Err(e) => return Err(e.into()),
    };

    let store_url = config.store_url(&credentials)?;
    let auth = ClerkAuth::new(config.auth_api_url(), credentials.clerk_secret_key)?;
    let store = SupabaseStore::new(&store_url, config.table(), credentials.supabase_anon_key)?;

    let user_id = std::env::args()
        .nth(1)
        .or_else(|| std::env::var("SHOWCASE_USER_ID").ok())
        .filter(|id| !id.trim().is_empty());

    let mut page = EventsPage::new(Arc::new(auth), Arc::new(store), user_id);
    if let Some(timeout) = config.fetch_timeout() {
        page = page.with_fetch_timeout(timeout);
    }

    page.load().await;
    print!("{}", render::page(page.state()));

    let mut editor = DefaultEditor::new().context("starting line editor")?;
    loop {
        let line = match editor.readline("showcase> ") {
            Ok(line) => line,
            Err(ReadlineError::Interrupted | ReadlineError::Eof) => break,
            Err(e) => return Err(e.into()),
        };
        let command = line.trim();
        if command.is_empty() {
            continue;
        }
        if let Err(e) = editor.add_history_entry(command) {
            debug!(error = %e, "history entry not recorded");
        }

        match command {
            "events" | "list" => print!("{}", render::page(page.state())),
            "upgrade" => match page.upgrade() {
                Ok(outcome) => {
                    print!("{}", render::upgrade_outcome(outcome));
                    print!("{}", render::page(page.state()));
                }
                Err(e) => println!("{e}"),
            },
            "retry" => {
                page.retry().await;
                print!("{}", render::page(page.state()));
            }
            "tier" => match page.state() {
                PageState::Ready(listing) => {
                    println!("{}", render::tier_badge(listing.viewer().tier()))
                }
                PageState::SignedOut => println!("{}", ShowcaseError::Unauthenticated),
                _ => println!("{}", ShowcaseError::NotReady),
            },
            "tiers" => print!("{}", render::tier_overview()),
            "help" => print!("{HELP}"),
            "quit" | "exit" => break,
            other => println!("unknown command '{other}', try `help`"),
        }
    }

    Ok(())
}
