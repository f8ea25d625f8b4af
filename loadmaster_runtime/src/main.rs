//! Loadmaster CLI
//!
//! Builds a load from command-line flags, prints the load sheet and
//! exits 0 when the load is within limits, 2 when it is not, 1 on error.

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{bail, Context, Result};
use chrono::Local;
use clap::{Parser, ValueEnum};
use loadmaster_engine::domain::{MassField, SeatType, PASSENGER_STATIONS};
use loadmaster_engine::events::LoadEdit;
use loadmaster_runtime::load_sheet::LoadSheet;
use loadmaster_runtime::plot::PlotModel;
use loadmaster_runtime::session::LoadSession;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Time shown on the sheet.
const SHEET_TIME_FORMAT: &str = "%d %b %Y | %H:%M";

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    /// Plain-text load sheet
    Text,
    /// Result, hash, load sheet and plot model as JSON
    Json,
}

#[derive(Parser)]
#[command(name = "loadmaster")]
#[command(about = "Weight & balance load sheet for G-CMCY (P2012 Traveller)", long_about = None)]
struct Args {
    /// Second pilot on board
    #[arg(long)]
    second_pilot: bool,

    /// Seat occupants in station order, comma separated: M, F, C or E
    #[arg(long, value_delimiter = ',')]
    seats: Vec<SeatType>,

    /// Forward baggage (kg)
    #[arg(long)]
    fwd: Option<String>,

    /// Aft baggage (kg)
    #[arg(long)]
    aft: Option<String>,

    /// TKS de-icing fluid (kg)
    #[arg(long)]
    tks: Option<String>,

    /// Ramp (take-off) fuel (kg)
    #[arg(long)]
    fuel: Option<String>,

    /// Planned trip burn (kg)
    #[arg(long)]
    burn: Option<String>,

    /// Commander name
    #[arg(long, default_value = "")]
    captain: String,

    /// Name of whoever prepared the sheet
    #[arg(long, default_value = "")]
    prepared_by: String,

    #[arg(long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Directory to write the JSON load sheet into
    #[arg(long)]
    export: Option<PathBuf>,
}

fn init_logging() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(io::stderr)
        .init();
}

fn main() -> ExitCode {
    init_logging();
    match run(Args::parse()) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(2),
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::from(1)
        }
    }
}

/// Returns whether the load is safe.
fn run(args: Args) -> Result<bool> {
    if args.seats.len() > PASSENGER_STATIONS {
        bail!(
            "--seats takes at most {} entries, got {}",
            PASSENGER_STATIONS,
            args.seats.len()
        );
    }

    let mut session = LoadSession::reference().context("certified aircraft profile rejected")?;

    if args.second_pilot {
        session.apply_edit(LoadEdit::SecondPilot { present: true })?;
    }
    for (station, &seat) in args.seats.iter().enumerate() {
        session.apply_edit(LoadEdit::Seat { station, seat })?;
    }
    let masses = [
        ("--fwd", MassField::ForwardBaggage, &args.fwd),
        ("--aft", MassField::AftBaggage, &args.aft),
        ("--tks", MassField::DeicingFluid, &args.tks),
        ("--fuel", MassField::RampFuel, &args.fuel),
        ("--burn", MassField::PlannedBurn, &args.burn),
    ];
    for (flag, field, raw) in masses {
        if let Some(raw) = raw {
            session
                .apply_edit(LoadEdit::mass(field, raw.as_str()))
                .with_context(|| format!("invalid {flag}"))?;
        }
    }

    let now = Local::now();
    session.set_timestamp(now.format(SHEET_TIME_FORMAT).to_string());
    session.set_captain(args.captain);
    session.set_prepared_by(args.prepared_by);

    let result = session.result();
    let profile = session.engine().profile();
    let sheet = LoadSheet::build(profile, result);

    match args.format {
        OutputFormat::Text => println!("{sheet}"),
        OutputFormat::Json => {
            let out = serde_json::json!({
                "hash": session.current_hash(),
                "result": result,
                "load_sheet": &sheet,
                "plot": PlotModel::build(profile, result),
            });
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
    }

    if let Some(dir) = &args.export {
        let path = sheet
            .export_to_dir(dir, now.naive_local())
            .with_context(|| format!("exporting load sheet to {}", dir.display()))?;
        eprintln!("Load sheet written to {}", path.display());
    }

    info!(safe = result.is_safe, edits = session.journal().len(), "done");
    Ok(result.is_safe)
}
