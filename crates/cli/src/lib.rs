use anyhow::{anyhow, Context as AnyhowContext, Result};
use clap::{Args, Parser, Subcommand};
use config::{CliConfig, LookupPolicy};
use lumen_catalog::{decode_cu_values, encode_cu_values, CatalogSnapshot, ReflectanceTriple};
use lumen_lookup::{lookup_requested, room_cavity_ratio, RequestedReflectance};
use report::{CommandOutput, Response};
use serde_json::json;
use source::{load_catalog, CatalogSource};
use std::io;
use std::path::PathBuf;
use std::str::FromStr;

pub mod config;
mod report;
mod source;

fn print_stdout(text: &str) -> Result<()> {
    use std::io::Write;

    let mut stdout = io::stdout().lock();
    if let Err(err) = stdout
        .write_all(text.as_bytes())
        .and_then(|_| stdout.write_all(b"\n"))
        .and_then(|_| stdout.flush())
    {
        if err.kind() == io::ErrorKind::BrokenPipe {
            return Ok(());
        }
        return Err(err.into());
    }
    Ok(())
}

#[derive(Parser)]
#[command(name = "lumen")]
#[command(about = "Coefficient-of-utilization lookup for luminaire layouts", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Quiet mode: log only warnings/errors
    #[arg(long, global = true)]
    quiet: bool,

    /// Config file (overrides LUMEN_CONFIG and ./lumen.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a CU catalog file
    Validate(ValidateArgs),

    /// List the CU charts in a catalog
    Tables(TablesArgs),

    /// Look up the CU for a room's reflectances and cavity ratio
    Lookup(LookupArgs),

    /// Print a chart's CU values in their storage form
    Encode(EncodeArgs),

    /// Decode CU values from their storage form
    Decode(DecodeArgs),
}

#[derive(Args)]
struct CatalogArgs {
    /// CU catalog file (JSON)
    #[arg(long, conflicts_with = "bundled")]
    catalog: Option<PathBuf>,

    /// Catalog shipped with the binary (e.g. troffer-2x4)
    #[arg(long)]
    bundled: Option<String>,
}

#[derive(Args)]
struct ValidateArgs {
    /// CU catalog file to validate
    file: PathBuf,

    /// Output JSON
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
struct TablesArgs {
    #[command(flatten)]
    source: CatalogArgs,

    /// Output JSON
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
struct ReflectanceArgs {
    /// Ceiling cavity reflectance, percent
    #[arg(long)]
    ceiling: u8,

    /// Wall reflectance, percent
    #[arg(long)]
    wall: u8,

    /// Floor cavity reflectance, percent
    #[arg(long)]
    floor: u8,
}

#[derive(Args)]
struct LookupArgs {
    #[command(flatten)]
    source: CatalogArgs,

    #[command(flatten)]
    reflectance: ReflectanceArgs,

    /// Room cavity ratio
    #[arg(
        long,
        allow_negative_numbers = true,
        conflicts_with = "room",
        required_unless_present = "room"
    )]
    rcr: Option<f64>,

    /// Room as LENGTHxWIDTHxCAVITY_HEIGHT (same unit), e.g. 40x20x6
    #[arg(long)]
    room: Option<RoomDimensions>,

    /// Fail when the RCR lies outside the chart rows
    #[arg(long)]
    fail_on_extrapolation: bool,

    /// Fail when no chart matches the reflectances exactly
    #[arg(long)]
    fail_on_approximation: bool,

    /// Output JSON
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
struct EncodeArgs {
    #[command(flatten)]
    source: CatalogArgs,

    #[command(flatten)]
    reflectance: ReflectanceArgs,

    /// Output JSON
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
struct DecodeArgs {
    /// Encoded CU values, as printed by `encode`
    encoded: String,

    /// Output JSON
    #[arg(long)]
    json: bool,
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct RoomDimensions {
    length: f64,
    width: f64,
    cavity_height: f64,
}

impl FromStr for RoomDimensions {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(['x', 'X']).map(str::trim).collect();
        let [length, width, cavity_height] = parts.as_slice() else {
            return Err(format!(
                "expected LENGTHxWIDTHxCAVITY_HEIGHT, got '{s}'"
            ));
        };
        Ok(Self {
            length: parse_dimension("length", length)?,
            width: parse_dimension("width", width)?,
            cavity_height: parse_dimension("cavity height", cavity_height)?,
        })
    }
}

fn parse_dimension(name: &str, raw: &str) -> std::result::Result<f64, String> {
    raw.parse::<f64>()
        .map_err(|err| format!("invalid {name} '{raw}': {err}"))
}

pub async fn main_entry() -> Result<()> {
    let mut cli = Cli::parse();

    // Keep stdout clean for JSON parsing
    let json_output = match &cli.command {
        Commands::Validate(args) => args.json,
        Commands::Tables(args) => args.json,
        Commands::Lookup(args) => args.json,
        Commands::Encode(args) => args.json,
        Commands::Decode(args) => args.json,
    };
    if json_output {
        cli.quiet = true;
    }

    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if cli.quiet {
        builder.filter_level(log::LevelFilter::Warn);
    } else if cli.verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.target(env_logger::Target::Stderr).init();

    match run(cli).await {
        Ok(output) => emit(output, json_output),
        Err(err) if json_output => {
            print_stdout(&serde_json::to_string_pretty(&Response::error(format!(
                "{err:#}"
            )))?)?;
            std::process::exit(1);
        }
        Err(err) => Err(err),
    }
}

async fn run(cli: Cli) -> Result<CommandOutput> {
    let config = CliConfig::discover(cli.config.as_deref())?;
    let snapshot = CatalogSnapshot::new();

    match cli.command {
        Commands::Validate(args) => run_validate(args, &snapshot).await,
        Commands::Tables(args) => run_tables(args, &config, &snapshot).await,
        Commands::Lookup(args) => run_lookup(args, &config, &snapshot).await,
        Commands::Encode(args) => run_encode(args, &config, &snapshot).await,
        Commands::Decode(args) => run_decode(&args),
    }
}

fn emit(output: CommandOutput, json_output: bool) -> Result<()> {
    if json_output {
        let failed = output.failure.is_some();
        print_stdout(&serde_json::to_string_pretty(&output.into_response())?)?;
        if failed {
            std::process::exit(1);
        }
        return Ok(());
    }

    print_stdout(&output.text)?;
    if let Some(failure) = output.failure {
        eprintln!("Error: {failure}");
        std::process::exit(1);
    }
    Ok(())
}

async fn run_validate(args: ValidateArgs, snapshot: &CatalogSnapshot) -> Result<CommandOutput> {
    let source = CatalogSource::File(args.file);
    let catalog = load_catalog(&source, snapshot).await?;
    Ok(CommandOutput::ok(
        report::catalog_summary(&catalog),
        report::render_validation(&source.to_string(), &catalog),
    ))
}

async fn run_tables(
    args: TablesArgs,
    config: &CliConfig,
    snapshot: &CatalogSnapshot,
) -> Result<CommandOutput> {
    let source = CatalogSource::select(args.source.catalog, args.source.bundled, config);
    let catalog = load_catalog(&source, snapshot).await?;
    Ok(CommandOutput::ok(
        report::catalog_summary(&catalog),
        report::render_tables(&catalog),
    ))
}

async fn run_lookup(
    args: LookupArgs,
    config: &CliConfig,
    snapshot: &CatalogSnapshot,
) -> Result<CommandOutput> {
    let requested = RequestedReflectance::new(
        args.reflectance.ceiling,
        args.reflectance.wall,
        args.reflectance.floor,
    )?;
    let rcr = match (args.rcr, args.room) {
        (Some(rcr), _) => rcr,
        (None, Some(room)) => {
            let rcr = room_cavity_ratio(room.length, room.width, room.cavity_height)?;
            log::debug!("Room {room:?} has RCR {rcr:.3}");
            rcr
        }
        (None, None) => return Err(anyhow!("either --rcr or --room is required")),
    };
    let policy = LookupPolicy {
        fail_on_extrapolation: args.fail_on_extrapolation || config.lookup.fail_on_extrapolation,
        fail_on_approximation: args.fail_on_approximation || config.lookup.fail_on_approximation,
    };

    let source = CatalogSource::select(args.source.catalog, args.source.bundled, config);
    let catalog = load_catalog(&source, snapshot).await?;
    let result = lookup_requested(&catalog, requested, rcr)
        .with_context(|| format!("CU lookup failed for {requested} at RCR {rcr}"))?;

    let failure = if policy.fail_on_approximation && result.is_reflectance_approximated() {
        Some(format!(
            "no CU chart for {requested}; nearest is {}",
            result.table
        ))
    } else if policy.fail_on_extrapolation && result.is_extrapolated() {
        let (first, last) = catalog
            .get(&result.table)
            .map(|table| table.rcr_range())
            .unwrap_or_default();
        Some(format!(
            "RCR {rcr} is outside the chart rows {first}..={last}"
        ))
    } else {
        None
    };

    let mut data = serde_json::to_value(&result)?;
    data["flags"] = serde_json::to_value(result.flags())?;
    Ok(CommandOutput {
        data,
        text: report::render_lookup(&result),
        failure,
    })
}

async fn run_encode(
    args: EncodeArgs,
    config: &CliConfig,
    snapshot: &CatalogSnapshot,
) -> Result<CommandOutput> {
    let ReflectanceArgs {
        ceiling,
        wall,
        floor,
    } = args.reflectance;
    let triple = ReflectanceTriple::from_percents(ceiling.into(), wall.into(), floor.into())
        .ok_or_else(|| {
            anyhow!("{ceiling}/{wall}/{floor} is not a chart triple (use 0, 10, ..., 90)")
        })?;

    let source = CatalogSource::select(args.source.catalog, args.source.bundled, config);
    let catalog = load_catalog(&source, snapshot).await?;
    let table = catalog
        .get(&triple)
        .ok_or_else(|| anyhow!("No CU chart for {triple} in {source}"))?;
    let encoded = encode_cu_values(table.values())?;

    Ok(CommandOutput::ok(
        json!({ "table": triple, "encoded": encoded }),
        encoded,
    ))
}

fn run_decode(args: &DecodeArgs) -> Result<CommandOutput> {
    let values = decode_cu_values(&args.encoded).context("Failed to decode CU values")?;
    Ok(CommandOutput::ok(
        json!({ "values": values }),
        report::render_values(&values),
    ))
}
