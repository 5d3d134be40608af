//! PCBook CLI Client
//!
//! Command-line interface for interacting with a catalog server.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use pcbook::client::LaptopClient;
use pcbook::sample::Generator;
use pcbook::{serializer, Filter, Memory, Result};
use tracing_subscriber::{fmt, EnvFilter};

/// PCBook CLI
#[derive(Parser, Debug)]
#[command(name = "pcbook-cli")]
#[command(about = "CLI for the PCBook laptop catalog")]
struct Args {
    /// Server address
    #[arg(short, long, default_value = "127.0.0.1:6565")]
    server: String,

    #[command(subcommand)]
    command: Commands,
}

/// Filter flags shared by search and delete-by-filter
#[derive(clap::Args, Debug)]
struct FilterArgs {
    /// Maximum price in USD (0 = no limit)
    #[arg(long, default_value = "0")]
    max_price: f64,

    /// Minimum number of CPU cores
    #[arg(long, default_value = "0")]
    min_cores: u32,

    /// Minimum CPU base clock in GHz
    #[arg(long, default_value = "0")]
    min_ghz: f64,

    /// Minimum RAM in GB
    #[arg(long, default_value = "0")]
    min_ram_gb: u64,
}

impl FilterArgs {
    fn to_filter(&self) -> Filter {
        Filter::builder()
            .max_price_usd(self.max_price)
            .min_cpu_cores(self.min_cores)
            .min_cpu_ghz(self.min_ghz)
            .min_ram(Memory::gigabytes(self.min_ram_gb))
            .build()
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Create random laptops
    Create {
        /// How many laptops to create
        #[arg(short, long, default_value = "1")]
        count: usize,
    },

    /// Show a laptop by ID
    Find {
        /// The laptop ID
        id: String,
    },

    /// Search laptops by filter
    Search {
        #[command(flatten)]
        filter: FilterArgs,
    },

    /// Delete a laptop by ID
    Delete {
        /// The laptop ID
        id: String,
    },

    /// Delete every laptop matching a filter
    DeleteByFilter {
        #[command(flatten)]
        filter: FilterArgs,
    },

    /// Delete several laptops by ID
    DeleteIds {
        /// The laptop IDs
        #[arg(required = true)]
        ids: Vec<String>,
    },

    /// Ping the server
    Ping,

    /// Convert a binary laptop file to JSON (no server needed)
    Convert {
        /// Binary input file
        binary: PathBuf,

        /// JSON output file
        json: PathBuf,
    },
}

fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt().with_env_filter(filter).with_target(false).init();

    let args = Args::parse();

    if let Err(e) = run(args) {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<()> {
    if let Commands::Convert { binary, json } = &args.command {
        let laptop = serializer::binary_to_json(binary, json)?;
        println!("wrote laptop {} to {}", laptop.id, json.display());
        return Ok(());
    }

    let mut client = LaptopClient::connect(args.server.as_str())?;

    match args.command {
        Commands::Create { count } => {
            let mut generator = Generator::new();
            for _ in 0..count {
                let id = client.create_laptop(&generator.new_laptop())?;
                println!("{}", id);
            }
        }
        Commands::Find { id } => match client.find_laptop(&id)? {
            Some(laptop) => println!("{:#?}", laptop),
            None => println!("not found"),
        },
        Commands::Search { filter } => {
            let found = client.search_laptop(&filter.to_filter(), |laptop| {
                let weight = laptop
                    .weight
                    .map(|w| format!("{:.2} kg", w.as_kg()))
                    .unwrap_or_else(|| "-".to_string());
                println!(
                    "{}  {} {}  ${:.2}  {} cores @ {:.2} GHz  {} {:?}  {}",
                    laptop.id,
                    laptop.brand,
                    laptop.name,
                    laptop.price_usd,
                    laptop.cpu.number_cores,
                    laptop.cpu.min_ghz,
                    laptop.ram.value,
                    laptop.ram.unit,
                    weight
                );
            })?;
            println!("{} found", found);
        }
        Commands::Delete { id } => {
            client.delete_laptop(&id)?;
            println!("deleted {}", id);
        }
        Commands::DeleteByFilter { filter } => {
            let deleted = client.delete_by_filter(&filter.to_filter())?;
            println!("deleted {}", deleted);
        }
        Commands::DeleteIds { ids } => {
            let deleted = client.delete_by_ids(&ids)?;
            println!("deleted {}", deleted);
        }
        Commands::Ping => {
            client.ping()?;
            println!("PONG");
        }
        Commands::Convert { .. } => {}
    }

    Ok(())
}
