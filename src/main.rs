//! DigitalOcean droplet inventory
//!
//! Reads droplet and private image listings from the DigitalOcean API and
//! prints small lookup tables: a droplet ID by public address, private
//! addresses by name prefix, the full droplet inventory, public addresses,
//! private images, and droplets with attached volumes.

mod cli;
mod commands;
mod core;
mod extraction;
mod models;
mod presentation;

use crate::cli::Cli;
use crate::commands::{CommandError, run};
use crate::core::client::DigitalOceanClient;
use crate::core::config::{Config, api_token_from_env};
use crate::core::constants::{env, message};
use crate::core::logging::init_logging;
use crate::core::pagination::Paginator;
use clap::Parser;
use tracing::{debug, error};

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();

    // The token is checked before arguments are parsed or anything touches
    // the network
    let Some(api_token) = api_token_from_env() else {
        println!("Set {} before use:", env::API_TOKEN);
        println!("export {}=<token>", env::API_TOKEN);
        std::process::exit(1);
    };

    let cli = Cli::parse();

    let config = match Config::from_env(api_token) {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Configuration Error: {:#}", e);
            std::process::exit(1);
        }
    };

    init_logging(&config.log_level);

    let Some(mode) = cli.mode() else {
        println!("{}", message::USAGE_HINT);
        return;
    };
    debug!("Running {:?} over {} pages of {}", mode, cli.pages, config.base_url);

    let client = match DigitalOceanClient::new(&config) {
        Ok(client) => client,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };
    let paginator = Paginator::new(&config.base_url, config.per_page);

    match run(&client, &paginator, &mode, cli.pages).await {
        Ok(report) => print!("{}", presentation::render(&report)),
        Err(e @ CommandError::InvalidFilter { .. }) => println!("{}", e),
        Err(CommandError::Fetch(e)) => {
            error!("Aborting: {}", e);
            eprintln!("{}", e);
            std::process::exit(1);
        }
    }
}
