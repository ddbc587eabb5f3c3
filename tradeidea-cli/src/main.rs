//! Trade Idea CLI: generate trade-idea summaries and manage order/client records.
//!
//! Commands:
//! - `idea`: compute leverage and print the one-paragraph trade idea
//! - `structures`: list option structures with their inputs
//! - `pairs`: list supported currency pairs
//! - `orders add|list|delete`: order records
//! - `clients add|list|delete`: client records

mod logging;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing::debug;

use logging::{init_logging, LogFormat};
use tradeidea_core::{
    Action, AppConfig, CurrencyPair, OptionStructure, TradeDate, TradeIdeaError, TradeIdeaRequest,
    TradeIdeaResult,
};
use tradeidea_records::{ClientRecord, OrderRecord, RecordStore};

/// Exit status for inputs the formatter rejects.
const EXIT_INVALID_INPUT: i32 = 2;

#[derive(Parser)]
#[command(
    name = "tradeidea",
    about = "Trade Idea Generator: FX option structure summaries with implied leverage"
)]
struct Cli {
    /// Path to a TOML config file. Defaults to ./tradeidea.toml, then the user config dir.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Directory holding orders.csv and clients.csv (overrides config).
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Log output format (overrides config).
    #[arg(long, global = true, value_enum)]
    log_format: Option<LogFormat>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute leverage and print the trade idea.
    Idea {
        #[command(flatten)]
        idea: IdeaArgs,

        /// Print the result as JSON instead of plain text.
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// List option structures, their strike inputs, cost unit and barrier.
    Structures,
    /// List supported currency pairs.
    Pairs,
    /// Order records.
    Orders {
        #[command(subcommand)]
        action: OrderAction,
    },
    /// Client records.
    Clients {
        #[command(subcommand)]
        action: ClientAction,
    },
}

#[derive(Args)]
struct IdeaArgs {
    /// Currency pair, e.g. USDJPY.
    #[arg(long)]
    pair: CurrencyPair,

    /// Buy or Sell.
    #[arg(long)]
    action: Action,

    /// Date: YYYY-MM-DD or free text (e.g. 3M).
    #[arg(long)]
    date: TradeDate,

    /// Option structure, e.g. "call spread", put-spread-rki, digital.
    #[arg(long)]
    structure: OptionStructure,

    /// Strike levels in input order; the barrier level, if any, last.
    #[arg(long = "strike", required = true, num_args = 1.., allow_negative_numbers = true)]
    strikes: Vec<f64>,

    /// Cost, in % for digitals and bps otherwise.
    #[arg(long, allow_negative_numbers = true)]
    cost: f64,

    /// Net delta in %, for structures that quote one.
    #[arg(long, allow_negative_numbers = true)]
    net_delta: Option<f64>,
}

impl IdeaArgs {
    fn into_request(self) -> Result<TradeIdeaRequest, TradeIdeaError> {
        TradeIdeaRequest::new(
            self.pair,
            self.action,
            self.date,
            self.structure,
            self.strikes,
            self.cost,
            self.net_delta,
        )
    }
}

#[derive(Subcommand)]
enum OrderAction {
    /// Add an order. With --strike/--cost the description is the generated trade idea.
    Add {
        /// Unique order name.
        #[arg(long)]
        name: String,

        #[arg(long)]
        client: String,

        #[arg(long)]
        pair: CurrencyPair,

        #[arg(long)]
        action: Action,

        #[arg(long)]
        structure: OptionStructure,

        /// Date: YYYY-MM-DD or free text.
        #[arg(long)]
        date: TradeDate,

        #[arg(long)]
        notional: Option<f64>,

        /// Strike levels; generates the description together with --cost.
        #[arg(long = "strike", num_args = 1.., allow_negative_numbers = true)]
        strikes: Vec<f64>,

        #[arg(long, allow_negative_numbers = true)]
        cost: Option<f64>,

        #[arg(long, allow_negative_numbers = true)]
        net_delta: Option<f64>,

        /// Free-text description, used when no strikes are given.
        #[arg(long, conflicts_with = "strikes")]
        description: Option<String>,
    },
    /// List orders.
    List {
        /// Only orders for this client.
        #[arg(long)]
        client: Option<String>,

        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Delete an order by name.
    Delete { name: String },
}

#[derive(Subcommand)]
enum ClientAction {
    /// Add a client.
    Add {
        /// Unique client name.
        #[arg(long)]
        name: String,

        #[arg(long, default_value = "")]
        company: String,

        #[arg(long, default_value = "")]
        email: String,

        #[arg(long, default_value = "")]
        phone: String,
    },
    /// List clients.
    List {
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Delete a client by name.
    Delete { name: String },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = AppConfig::load(cli.config.as_deref())?;
    if let Some(dir) = cli.data_dir {
        config.records.dir = dir;
    }
    let log_format = match cli.log_format {
        Some(format) => format,
        None => config.logging.format.parse().map_err(anyhow::Error::msg)?,
    };
    init_logging(&config.logging.level, log_format)?;
    debug!(records_dir = %config.records.dir.display(), "configuration loaded");

    match cli.command {
        Commands::Idea { idea, json } => run_idea(idea, json, &config),
        Commands::Structures => {
            print_structures();
            Ok(())
        }
        Commands::Pairs => {
            for pair in CurrencyPair::all() {
                println!("{pair}");
            }
            Ok(())
        }
        Commands::Orders { action } => run_orders(action, &config),
        Commands::Clients { action } => run_clients(action, &config),
    }
}

/// Print a validation failure and exit with [`EXIT_INVALID_INPUT`].
fn reject(err: TradeIdeaError) -> ! {
    eprintln!("Invalid trade idea: {err}");
    std::process::exit(EXIT_INVALID_INPUT);
}

fn generate(request: &TradeIdeaRequest, config: &AppConfig) -> TradeIdeaResult {
    request
        .format_with(&config.display.date_format)
        .unwrap_or_else(|err| reject(err))
}

fn run_idea(args: IdeaArgs, json: bool, config: &AppConfig) -> Result<()> {
    let request = args.into_request().unwrap_or_else(|err| reject(err));
    let result = generate(&request, config);
    debug!(
        structure = %request.structure(),
        leverage = result.leverage,
        "trade idea generated"
    );

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        println!("{}", result.description);
    }
    Ok(())
}

fn print_structures() {
    println!(
        "{:<20} {:<20} {:<36} {:<6} {:<6} {:<7}",
        "Id", "Label", "Inputs", "Cost", "Delta", "Barrier"
    );
    println!("{}", "-".repeat(100));
    for st in OptionStructure::ALL {
        println!(
            "{:<20} {:<20} {:<36} {:<6} {:<6} {:<7}",
            st.id(),
            st.label(),
            st.input_labels().join(", "),
            st.cost_unit().label(),
            if st.has_net_delta() { "yes" } else { "no" },
            st.barrier_role().label().unwrap_or("-"),
        );
    }
}

fn open_store(config: &AppConfig) -> Result<RecordStore> {
    RecordStore::open(&config.records.dir).with_context(|| {
        format!("failed to open record store at {}", config.records.dir.display())
    })
}

fn run_orders(action: OrderAction, config: &AppConfig) -> Result<()> {
    let store = open_store(config)?;
    match action {
        OrderAction::Add {
            name,
            client,
            pair,
            action,
            structure,
            date,
            notional,
            strikes,
            cost,
            net_delta,
            description,
        } => {
            if notional.is_some_and(|n| !n.is_finite() || n < 0.0) {
                bail!("--notional must be a non-negative number");
            }
            let order = if strikes.is_empty() {
                if cost.is_some() || net_delta.is_some() {
                    bail!("--cost and --net-delta require --strike");
                }
                OrderRecord {
                    name,
                    client,
                    currency_pair: pair,
                    action,
                    structure,
                    notional,
                    date: date.render_with(&config.display.date_format)?,
                    description: description.unwrap_or_default(),
                }
            } else {
                let Some(cost) = cost else {
                    bail!("--strike requires --cost");
                };
                let request =
                    TradeIdeaRequest::new(pair, action, date, structure, strikes, cost, net_delta)
                        .unwrap_or_else(|err| reject(err));
                let idea = generate(&request, config);
                let mut order = OrderRecord::from_idea(name, client, notional, &request, &idea);
                order.date = request.date().render_with(&config.display.date_format)?;
                order
            };
            let key = order.name.clone();
            store.orders.append(order)?;
            println!("Added order: {key}");
        }
        OrderAction::List { client, json } => {
            let orders = match client {
                Some(client) => store.orders_for_client(&client)?,
                None => store.orders.list()?,
            };
            if json {
                println!("{}", serde_json::to_string_pretty(&orders)?);
            } else if orders.is_empty() {
                println!("No orders in {}", store.orders.path().display());
            } else {
                print_orders(&orders);
            }
        }
        OrderAction::Delete { name } => {
            if store.orders.delete(&name)? {
                println!("Deleted order: {name}");
            } else {
                bail!("no order named '{name}'");
            }
        }
    }
    Ok(())
}

fn print_orders(orders: &[OrderRecord]) {
    println!(
        "{:<16} {:<14} {:<7} {:<5} {:<20} {:>14} {:<12}",
        "Name", "Client", "Pair", "Side", "Structure", "Notional", "Date"
    );
    println!("{}", "-".repeat(94));
    for o in orders {
        let notional = o.notional.map(|n| format!("{n:.0}")).unwrap_or_else(|| "-".into());
        println!(
            "{:<16} {:<14} {:<7} {:<5} {:<20} {:>14} {:<12}",
            o.name,
            o.client,
            o.currency_pair,
            o.action,
            o.structure.label(),
            notional,
            o.date
        );
    }
}

fn run_clients(action: ClientAction, config: &AppConfig) -> Result<()> {
    let store = open_store(config)?;
    match action {
        ClientAction::Add { name, company, email, phone } => {
            let key = name.trim().to_string();
            store.clients.append(ClientRecord { name, company, email, phone })?;
            println!("Added client: {key}");
        }
        ClientAction::List { json } => {
            let clients = store.clients.list()?;
            if json {
                println!("{}", serde_json::to_string_pretty(&clients)?);
            } else if clients.is_empty() {
                println!("No clients in {}", store.clients.path().display());
            } else {
                println!("{:<20} {:<24} {:<30} {:<18}", "Name", "Company", "Email", "Phone");
                println!("{}", "-".repeat(95));
                for c in &clients {
                    println!("{:<20} {:<24} {:<30} {:<18}", c.name, c.company, c.email, c.phone);
                }
            }
        }
        ClientAction::Delete { name } => {
            if store.clients.delete(&name)? {
                println!("Deleted client: {name}");
            } else {
                bail!("no client named '{name}'");
            }
        }
    }
    Ok(())
}
