// ABOUTME: diary-cli - command-line front end for the nutrition diary library
// ABOUTME: Login, diary display, recent foods, search, and add/edit/delete of entries
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
//!
//! Usage:
//! ```bash
//! # Log in (client credentials come from YAZIO_CLIENT_ID / YAZIO_CLIENT_SECRET)
//! diary-cli login --email me@example.com
//!
//! # Show today's diary, or another day
//! diary-cli show
//! diary-cli show --date 2025-03-14
//!
//! # Foods logged in the last week, and a database search
//! diary-cli recent
//! diary-cli search "rye bread"
//!
//! # Log 3 slices of a product for breakfast, then fix it to 2 slices
//! diary-cli add --product 1a2b --meal breakfast --serving slice --quantity 3
//! diary-cli edit 7f9c... --product 1a2b --meal breakfast --serving slice --quantity 2
//! diary-cli delete 7f9c...
//! ```

mod commands;
mod display;

use anyhow::Result;
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use nutrition_diary::config::{GatewayConfig, SessionStore};
use nutrition_diary::errors::AppResult;
use nutrition_diary::logging::LoggingConfig;
use nutrition_diary::models::MealTime;
use nutrition_diary::session::DiarySession;

/// Public app credentials used when `YAZIO_CLIENT_ID` / `YAZIO_CLIENT_SECRET` are unset
const DEFAULT_CLIENT_ID: &str = "1_4hiybetvfksgw40o0sog4s884kwc840wwso8go4k8c04goo4c";
const DEFAULT_CLIENT_SECRET: &str = "6rok2m65xuskgkgogw40wkkk8sw0osg84s8cggsc4woos4s8o";

#[derive(Parser)]
#[command(
    name = "diary-cli",
    about = "Nutrition diary in the terminal",
    long_about = "Shows the food diary of a remote nutrition-tracking account and logs, edits, and deletes meals."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Log in and store the session
    Login {
        /// Account email
        #[arg(long)]
        email: String,

        /// Account password
        #[arg(long, env = "YAZIO_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Exchange the stored refresh token for a new access token
    Refresh,

    /// Forget the stored session
    Logout,

    /// Show the diary for a date (default: today)
    Show {
        /// Date as YYYY-MM-DD
        #[arg(long)]
        date: Option<NaiveDate>,
    },

    /// List foods logged in the last week
    Recent {
        /// Last day of the window as YYYY-MM-DD
        #[arg(long)]
        date: Option<NaiveDate>,
    },

    /// Search the food database
    Search {
        /// Search text
        query: String,
    },

    /// Log a product
    Add(EntryArgs),

    /// Replace an entry with a new one
    Edit {
        /// Consumed-item ID of the entry to replace
        consumed_id: String,

        #[command(flatten)]
        entry: EntryArgs,
    },

    /// Delete an entry
    Delete {
        /// Consumed-item ID
        consumed_id: String,

        /// Date to show afterwards
        #[arg(long)]
        date: Option<NaiveDate>,
    },
}

/// What to log
#[derive(Args)]
struct EntryArgs {
    /// Product ID
    #[arg(long)]
    product: String,

    /// breakfast, lunch, dinner or snack
    #[arg(long, value_parser = parse_meal)]
    meal: MealTime,

    /// Date as YYYY-MM-DD (default: today)
    #[arg(long)]
    date: Option<NaiveDate>,

    /// Amount in grams, used when no serving is given
    #[arg(long, default_value_t = 100.0)]
    grams: f64,

    /// Serving name, e.g. "slice"
    #[arg(long, requires = "quantity")]
    serving: Option<String>,

    /// Number of servings
    #[arg(long)]
    quantity: Option<f64>,
}

fn parse_meal(raw: &str) -> Result<MealTime, String> {
    MealTime::parse(raw).ok_or_else(|| format!("unknown meal '{raw}'"))
}

fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut logging = LoggingConfig::from_env();
    if cli.verbose {
        "debug".clone_into(&mut logging.level);
    }
    logging.init()?;

    let config =
        GatewayConfig::from_env()?.or_credentials(DEFAULT_CLIENT_ID, DEFAULT_CLIENT_SECRET);
    let store = SessionStore::default_location()?;
    let mut session = DiarySession::open(config, store)?;

    let outcome = run(cli.command, &mut session).await;
    if let Err(e) = &outcome {
        display::error_hint(e);
    }
    outcome.map_err(anyhow::Error::from)
}

async fn run(command: Command, session: &mut DiarySession) -> AppResult<()> {
    match command {
        Command::Login { email, password } => {
            commands::login(session, &email, &password).await
        }
        Command::Refresh => commands::refresh(session).await,
        Command::Logout => commands::logout(session).await,
        Command::Show { date } => commands::show(session, date.unwrap_or_else(today)).await,
        Command::Recent { date } => commands::recent(session, date.unwrap_or_else(today)).await,
        Command::Search { query } => commands::search(session, &query).await,
        Command::Add(entry) => commands::add(session, &entry).await,
        Command::Edit { consumed_id, entry } => {
            commands::edit(session, &consumed_id, &entry).await
        }
        Command::Delete { consumed_id, date } => {
            commands::delete(session, &consumed_id, date.unwrap_or_else(today)).await
        }
    }
}
