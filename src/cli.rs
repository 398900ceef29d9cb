//! Command-line surface of the `marquee` binary.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use dialoguer::{Input, Password};
use marquee_config::DatabaseConfig;
use marquee_core::hash_password;

use crate::db::init_db_pool;
use crate::modules::users::repository::PgUserStore;

#[derive(Parser)]
#[command(name = "marquee")]
#[command(about = "Marquee - token lifecycle service and admin tools", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the HTTP server
    Serve {
        #[arg(short, long, env = "PORT", default_value_t = 8080)]
        port: u16,
    },
    /// Create a user that can log in
    CreateUser {
        #[arg(short = 'f', long)]
        first_name: Option<String>,

        #[arg(short = 'l', long)]
        last_name: Option<String>,

        #[arg(short = 'e', long)]
        email: Option<String>,

        /// Prompted without echo if omitted
        #[arg(short = 'p', long)]
        password: Option<String>,
    },
    /// Print the bcrypt hash of a password
    HashPassword { password: String },
}

pub async fn create_user(
    first_name: Option<String>,
    last_name: Option<String>,
    email: Option<String>,
    password: Option<String>,
) -> Result<()> {
    let first_name = prompt_if_missing(first_name, "First name")?;
    let last_name = prompt_if_missing(last_name, "Last name")?;
    let email = prompt_if_missing(email, "Email address")?;
    let password = match password {
        Some(p) => p,
        None => Password::new()
            .with_prompt("Password")
            .with_confirmation("Confirm password", "Passwords don't match")
            .interact()
            .context("failed to read password")?,
    };

    let db_config = DatabaseConfig::from_env();
    let pool = init_db_pool(&db_config)
        .await
        .context("failed to connect to database")?;
    let store = PgUserStore::new(pool, db_config.query_timeout);

    let hash = hash_password(&password).map_err(|e| e.error)?;
    let user = store
        .create_user(&first_name, &last_name, &email, &hash)
        .await
        .map_err(|e| e.error)?;

    println!("✅ User created");
    println!("   ID: {}", user.id);
    println!("   Email: {}", user.email);
    println!("   Name: {} {}", user.first_name, user.last_name);
    Ok(())
}

pub fn print_password_hash(password: &str) -> Result<()> {
    let hash = hash_password(password).map_err(|e| e.error)?;
    println!("{hash}");
    Ok(())
}

fn prompt_if_missing(value: Option<String>, prompt: &str) -> Result<String> {
    match value {
        Some(v) => Ok(v),
        None => Input::new()
            .with_prompt(prompt)
            .interact_text()
            .with_context(|| format!("failed to read {}", prompt.to_lowercase())),
    }
}
