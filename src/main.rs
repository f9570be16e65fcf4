//! Parkscout - browse national park sites by state and find nearby places
//!
//! An interactive command-line tool that scrapes nps.gov for site listings
//! by state and enriches a chosen site with nearby-places data from the
//! MapQuest search API. Raw HTTP responses are cached in a JSON file so
//! repeat lookups never touch the network.

mod cache;
mod cli;
mod config;
mod data;
mod fetch;

use std::io::{self, Write};
use std::time::Duration;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use cache::CacheStore;
use cli::Cli;
use data::SiteRecord;
use fetch::Fetcher;

/// What the inner site-selection menu asked the outer loop to do
enum MenuOutcome {
    /// Return to the state prompt
    Back,
    /// Quit the program
    Quit,
}

/// Prints a prompt and reads one trimmed line; EOF behaves like "exit"
fn prompt(message: &str) -> io::Result<String> {
    print!("{} ", message);
    io::stdout().flush()?;
    let mut line = String::new();
    if io::stdin().read_line(&mut line)? == 0 {
        return Ok("exit".to_string());
    }
    Ok(line.trim().to_string())
}

/// Prints a title between two 50-dash bars, matching the listing format
fn print_header(title: &str) {
    let bar = "-".repeat(50);
    println!("{bar}");
    println!("{title}");
    println!("{bar}");
}

/// Capitalizes the first letter of each word, for display of state names
fn title_case(s: &str) -> String {
    s.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Prints the numbered site list for a state, 1-based
fn print_state_sites(state: &str, sites: &[SiteRecord]) {
    print_header(&format!("List of national sites in {}", title_case(state)));
    for (index, site) in sites.iter().enumerate() {
        println!("[{}] {}", index + 1, site.info());
    }
}

/// Runs the site-selection menu for one state's listing
///
/// Accepts a 1-based selection, "exit", or "back". Operation failures
/// (missing credential, network, malformed response) are reported and the
/// menu re-prompts; they never abort the process.
async fn site_menu(
    cli: &Cli,
    fetcher: &Fetcher,
    cache: &mut CacheStore,
    sites: &[SiteRecord],
) -> io::Result<MenuOutcome> {
    loop {
        let input = prompt("Choose the number for detail search or 'exit' or 'back':")?;
        match input.as_str() {
            "exit" => return Ok(MenuOutcome::Quit),
            "back" => return Ok(MenuOutcome::Back),
            _ => {}
        }

        let selection = match input.parse::<usize>() {
            Ok(n) if (1..=sites.len()).contains(&n) => n,
            Ok(_) => {
                println!("Index out of range. Please enter a new number");
                continue;
            }
            Err(_) => {
                println!("Error - enter a number, 'exit', or 'back'");
                continue;
            }
        };

        let site = &sites[selection - 1];
        let key = match config::api_key(cli.api_key.as_deref()) {
            Ok(key) => key,
            Err(err) => {
                println!("Error - {err}");
                continue;
            }
        };

        match data::nearby_places(fetcher, cache, &key, &site.zipcode).await {
            Ok(places) => {
                print_header(&format!("Places near {}", site.name));
                for place in &places {
                    println!("- {}", place.info());
                }
            }
            Err(err) => println!("Error - nearby search failed: {err}"),
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_target(false)
        .init();

    let cli = Cli::parse();

    let mut cache = match &cli.cache_file {
        Some(path) => CacheStore::open(path.clone()),
        None => CacheStore::open_default(),
    };
    let fetcher = Fetcher::new().with_delay(Duration::from_millis(cli.delay_ms));

    let states = data::build_state_index(&fetcher, &mut cache).await?;

    loop {
        let input =
            prompt("Enter a state name (e.g. Michigan, michigan), or 'exit' to quit:")?.to_lowercase();
        if input == "exit" {
            break;
        }

        let Some(state_url) = states.get(&input) else {
            println!("Error - enter a proper state name");
            continue;
        };

        let sites = match data::sites_for_state(&fetcher, &mut cache, state_url).await {
            Ok(sites) => sites,
            Err(err) => {
                println!("Error - could not load sites: {err}");
                continue;
            }
        };
        print_state_sites(&input, &sites);

        match site_menu(&cli, &fetcher, &mut cache, &sites).await? {
            MenuOutcome::Back => continue,
            MenuOutcome::Quit => break,
        }
    }

    println!("Bye!");
    Ok(())
}
