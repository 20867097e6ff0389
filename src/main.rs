use clap::Parser;
use std::env;
use std::error::Error;
use std::io::{self, Read};
use subnet_algebra::output::{print_networks, print_summary};
use subnet_algebra::{cidr_merge, parse_items, summary_rows};

/// Summarise IPv4/IPv6 networks, addresses and ranges into a minimal CIDR list
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Print the result as JSON
    #[arg(long)]
    json: bool,

    /// Report the unused blocks between the merged networks
    #[arg(long)]
    gaps: bool,

    /// CIDRs, addresses, `start-end` ranges or classful abbreviations; read from stdin when empty
    items: Vec<String>,
}

fn main() -> Result<(), Box<dyn Error>> {
    dotenv::dotenv().ok();
    let log_config =
        env::var("SUBNET_ALGEBRA_LOG_CONFIG").unwrap_or_else(|_| "log4rs.yml".to_string());
    if let Err(e) = log4rs::init_file(&log_config, Default::default()) {
        eprintln!("logging disabled, could not load {log_config}: {e}");
    }
    log::info!("#Start main()");

    let cli = Cli::parse();
    let mut items = cli.items;
    if items.is_empty() {
        let mut input = String::new();
        io::stdin().read_to_string(&mut input)?;
        items = input.split_whitespace().map(String::from).collect();
    }

    let nets = parse_items(&items)?;
    if cli.gaps {
        let rows = summary_rows(nets)?;
        if cli.json {
            println!("{}", serde_json::to_string_pretty(&rows)?);
        } else {
            print_summary(&rows);
        }
    } else {
        let merged = cidr_merge(nets)?;
        if cli.json {
            println!("{}", serde_json::to_string_pretty(&merged)?);
        } else {
            print_networks(&merged);
        }
    }

    log::info!("#End main()");
    Ok(())
}
