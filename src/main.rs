use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use client_directory::config::{self, Config};
use client_directory::directory::{
    compute_stats, query_clients, Criteria, PersonTypeFilter, SortDirection, SortKey, Stats,
    StatusFilter,
};
use client_directory::geo::DistanceEstimator;
use client_directory::models::{format_address, is_eligible_for_distance, AddressFragment};
use client_directory::store::Directory;

#[derive(Parser)]
#[command(name = "client-directory", about = "Search clients and estimate property distances")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Filter, sort and page through clients
    Query(QueryArgs),
    /// Show counts over the whole directory
    Stats,
    /// Estimate the distance from an address to the reference point
    Distance(AddressArgs),
    /// List a client's properties
    Properties {
        client_id: i32,
        /// Recompute distances for properties with an eligible address
        #[arg(long)]
        refresh: bool,
    },
}

#[derive(Args)]
struct QueryArgs {
    #[arg(short, long, default_value = "")]
    term: String,
    #[arg(long, value_enum, default_value_t = PersonTypeFilter::All)]
    person_type: PersonTypeFilter,
    #[arg(long, value_enum, default_value_t = StatusFilter::All)]
    status: StatusFilter,
    #[arg(long, value_enum, default_value_t = SortKey::Name)]
    sort: SortKey,
    #[arg(long)]
    descending: bool,
    #[arg(short, long, default_value_t = 1)]
    page: usize,
    /// Defaults to DIRECTORY_PAGE_SIZE
    #[arg(long)]
    page_size: Option<usize>,
}

#[derive(Args)]
struct AddressArgs {
    #[arg(long)]
    street: Option<String>,
    #[arg(long)]
    number: Option<String>,
    #[arg(long)]
    municipality: Option<String>,
    #[arg(long)]
    region: Option<String>,
    #[arg(long)]
    postal_code: Option<String>,
}

impl From<AddressArgs> for AddressFragment {
    fn from(args: AddressArgs) -> Self {
        Self {
            street: args.street,
            number: args.number,
            municipality: args.municipality,
            region_code: args.region,
            postal_code: args.postal_code,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = config::init()?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match cli.command {
        Command::Query(args) => run_query(&config, args).await,
        Command::Stats => run_stats(&config).await,
        Command::Distance(args) => run_distance(&config, args.into()).await,
        Command::Properties { client_id, refresh } => {
            run_properties(&config, client_id, refresh).await
        }
    }
}

async fn run_query(config: &Config, args: QueryArgs) -> Result<()> {
    let directory = Directory::load(&config.data_file).await?;

    let criteria = Criteria {
        term: args.term,
        person_type: args.person_type,
        status: args.status,
        sort_key: args.sort,
        sort_direction: if args.descending {
            SortDirection::Descending
        } else {
            SortDirection::Ascending
        },
        page_number: args.page,
        page_size: args.page_size.unwrap_or(config.page_size),
    };

    let result = query_clients(directory.clients(), &criteria);

    for client in &result.page {
        let id = client.id.map(|id| id.to_string()).unwrap_or_else(|| "-".to_string());
        println!(
            "{:>5}  {:<40} {:<14} {:<12} {:<8} {}",
            id,
            client.legal_name,
            client.tax_id,
            format!("{:?}", client.person_type),
            client.status.as_str(),
            client.registered_on
        );
    }
    println!(
        "Page {} of {} ({} matching)",
        result.page_number,
        result.page_count(),
        result.total_matching
    );
    print_stats(&result.stats);

    Ok(())
}

async fn run_stats(config: &Config) -> Result<()> {
    let directory = Directory::load(&config.data_file).await?;
    print_stats(&compute_stats(directory.clients()));

    Ok(())
}

async fn run_distance(config: &Config, address: AddressFragment) -> Result<()> {
    if !is_eligible_for_distance(&address) {
        info!("municipality and region are required for a distance estimate");
    }

    let estimator = DistanceEstimator::new(&config.distance_settings());
    let km = estimator.estimate_distance(&address).await;
    println!("{}: {} km", format_address(&address), km);

    Ok(())
}

async fn run_properties(config: &Config, client_id: i32, refresh: bool) -> Result<()> {
    let directory = Directory::load(&config.data_file).await?;
    let client = directory.get_client(client_id)?;
    let estimator = DistanceEstimator::new(&config.distance_settings());

    println!("Properties of {}", client.legal_name);
    for property in directory.properties_for_client(client_id)? {
        let property = if refresh {
            estimator.refresh_property(property).await
        } else {
            property.clone()
        };
        println!(
            "  {:<30} {:<50} {:>6} km",
            property.name,
            format_address(&property.address()),
            property.distance_km
        );
    }

    Ok(())
}

fn print_stats(stats: &Stats) {
    println!(
        "Total: {}  Active: {}  Inactive: {}  Individuals: {}  Organizations: {}",
        stats.total, stats.active, stats.inactive, stats.individuals, stats.organizations
    );
}
