mod config;
mod generate;
mod output;
mod roster;

use clap::Parser;
use rand::{rngs::SmallRng, SeedableRng};
use speeddate_core::{EngineConfig, ParticipantRecord, Roster, SchedulingEngine};
use std::io::{self, IsTerminal, Read};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

pub fn bail(msg: impl std::fmt::Display) -> ! {
    eprintln!("Error: {msg}");
    std::process::exit(1);
}

#[derive(Parser)]
#[command(name = "speeddate", version, about = "Plan conflict-free speed dating rounds")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log scheduling attempts and decisions to stderr
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Build a schedule from a roster
    Schedule(ScheduleArgs),
    /// Write a random roster in the text format
    Generate(GenerateArgs),
    /// Create a default config file at ~/.config/speeddate/config.toml
    Init,
}

#[derive(Parser)]
struct ScheduleArgs {
    /// Roster file: one "Name woman man nonbinary dates_women dates_men" line
    /// per person, or a JSON array of records. Reads stdin when omitted.
    #[arg(long)]
    roster: Option<PathBuf>,

    /// Number of tables. Defaults to (and is capped at) half the roster.
    #[arg(long)]
    tables: Option<usize>,

    /// Output JSON instead of the text report
    #[arg(long)]
    json: bool,

    /// Show gender and dating preferences in the attendance list
    #[arg(long)]
    full: bool,

    /// Keep rounds in the order they were built instead of fullest first
    #[arg(long)]
    keep_round_order: bool,

    /// Write the report to this file instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,

    /// Path to config file (default: ~/.config/speeddate/config.toml)
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Parser)]
struct GenerateArgs {
    /// Number of participants
    #[arg(long)]
    count: usize,

    /// Seed for a reproducible roster
    #[arg(long)]
    seed: Option<u64>,

    /// Write the roster to this file instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,
}

fn main() {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    match cli.command {
        Commands::Schedule(args) => run_schedule(args),
        Commands::Generate(args) => run_generate(args),
        Commands::Init => {
            let path = config::create_default_config();
            println!("Created config at {}", path.display());
            println!("Edit it to set your default table count, output format, etc.");
        }
    }
}

/// Load records from --roster, the config's roster path, or stdin.
fn load_records(path: Option<&Path>) -> Vec<ParticipantRecord> {
    let content = match path {
        Some(path) => std::fs::read_to_string(path)
            .unwrap_or_else(|e| bail(format!("Failed to read roster {}: {e}", path.display()))),
        None => {
            let mut stdin = io::stdin();
            if stdin.is_terminal() {
                bail("No roster provided. Use --roster <file> or pipe a roster via stdin.");
            }
            let mut content = String::new();
            stdin
                .read_to_string(&mut content)
                .unwrap_or_else(|e| bail(format!("Failed to read roster from stdin: {e}")));
            content
        }
    };

    roster::parse_roster(&content).unwrap_or_else(|e| bail(format!("Invalid roster: {e}")))
}

fn write_output(path: Option<&Path>, text: &str) {
    match path {
        Some(path) => std::fs::write(path, text)
            .unwrap_or_else(|e| bail(format!("Failed to write {}: {e}", path.display()))),
        None => println!("{text}"),
    }
}

fn run_schedule(args: ScheduleArgs) {
    // Load config file, merge with CLI args (CLI wins)
    let config_path = args.config.clone().unwrap_or_else(config::config_path);
    let cfg = config::load_config(&config_path);

    let roster_path = args.roster.clone().or_else(|| cfg.roster.map(PathBuf::from));
    let records = load_records(roster_path.as_deref());
    let roster = Roster::new(&records).unwrap_or_else(|e| bail(format!("Invalid roster: {e}")));

    let requested_tables = args.tables.or(cfg.tables);
    let json = args.json || cfg.json.unwrap_or(false);
    let full_listing = args.full || cfg.full_listing.unwrap_or(false);
    let order_rounds_by_size = !args.keep_round_order && cfg.order_rounds_by_size.unwrap_or(true);

    let engine = SchedulingEngine::new(
        roster,
        EngineConfig {
            tables: requested_tables,
            order_rounds_by_size,
        },
    );

    if let Some(requested) = requested_tables {
        if requested > engine.effective_tables() {
            eprintln!(
                "Warning: {requested} tables requested but {} people fill at most {}. Using {}.",
                engine.roster().len(),
                engine.effective_tables(),
                engine.effective_tables(),
            );
        }
    }

    info!(
        participants = engine.roster().len(),
        valid_pairs = engine.valid_pair_count(),
        tables = engine.effective_tables(),
        "scheduling"
    );

    let options = engine
        .plan_table_options()
        .unwrap_or_else(|e| bail(format!("Scheduling failed: {e}")));

    info!(
        rounds = options.most_tables.schedule.round_count(),
        efficient_tables = options.most_efficient.tables,
        efficient_rounds = options.most_efficient.schedule.round_count(),
        "schedule ready"
    );

    let text = if json {
        output::render_json(engine.roster(), &options)
            .unwrap_or_else(|e| bail(format!("Failed to serialize schedule: {e}")))
    } else {
        output::render_report(engine.roster(), &options, full_listing)
    };
    write_output(args.output.as_deref(), &text);
}

fn run_generate(args: GenerateArgs) {
    let records = match args.seed {
        Some(seed) => generate::generate_roster(args.count, &mut SmallRng::seed_from_u64(seed)),
        None => generate::generate_roster(args.count, &mut rand::rng()),
    };

    let text: Vec<String> = records.iter().map(roster::format_line).collect();
    write_output(args.output.as_deref(), &text.join("\n"));
    info!(count = records.len(), "roster generated");
}
