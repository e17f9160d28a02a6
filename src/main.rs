// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Command-line benchmark: build the index, run one skyline query, print statistics.

use clap::{Parser, ValueEnum};
use sdi_skyline::report::{Report, METHOD};
use sdi_skyline::{
    store, CapacityPolicy, DimensionSelection, SkylineConfig, SkylineEngine, Statistics,
};
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

#[derive(Parser)]
#[command(
    name = "sdi",
    about = "Compute the skyline of a tuple file with the SDI method",
    version
)]
struct Cli {
    /// Number of coordinates per tuple
    dimensionality: usize,

    /// Declared number of tuples
    cardinality: usize,

    /// Input file (reads STDIN when omitted)
    file: Option<PathBuf>,

    /// Accept more tuples than the declared cardinality
    #[arg(long)]
    grow: bool,

    /// Rule for choosing the next dimension to scan
    #[arg(long, value_enum, default_value_t = Selection::FewestSkyline)]
    selection: Selection,

    /// Print the stored tuples after loading
    #[arg(long)]
    dump: bool,

    /// Print the skyline keys after the query
    #[arg(long)]
    print_skyline: bool,

    /// Enable verbose output
    #[arg(long, short = 'v', conflicts_with = "quiet")]
    verbose: bool,

    /// Suppress log output
    #[arg(long, short = 'q', conflicts_with = "verbose")]
    quiet: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum Selection {
    FewestSkyline,
    Sequential,
    Reverse,
}

impl From<Selection> for DimensionSelection {
    fn from(selection: Selection) -> Self {
        match selection {
            Selection::FewestSkyline => DimensionSelection::FewestSkyline,
            Selection::Sequential => DimensionSelection::Sequential,
            Selection::Reverse => DimensionSelection::Reverse,
        }
    }
}

fn init_tracing(cli: &Cli) {
    let filter = if cli.quiet {
        tracing_subscriber::EnvFilter::new("off")
    } else if cli.verbose {
        tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into())
    } else {
        tracing_subscriber::EnvFilter::new("warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(io::stderr)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(&cli);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> sdi_skyline::Result<()> {
    let capacity = if cli.grow {
        CapacityPolicy::Grow
    } else {
        CapacityPolicy::Strict
    };
    let config = SkylineConfig::new(cli.cardinality, cli.dimensionality)
        .with_capacity_policy(capacity)
        .with_selection(cli.selection.into());

    let mut stats = Statistics::new();
    let mut engine = SkylineEngine::new(&config)?;

    let build = Instant::now();
    match &cli.file {
        Some(path) => {
            let reader = store::open(path)?;
            engine.build(reader, &mut stats)?;
        }
        None => engine.build(io::stdin().lock(), &mut stats)?,
    }
    let build = build.elapsed();

    let stdout = io::stdout();
    let mut out = stdout.lock();
    if cli.dump {
        engine.store().dump(&mut out)?;
    }

    let query = Instant::now();
    let skyline = engine.query(&mut stats)?.to_vec();
    let query = query.elapsed();

    if cli.print_skyline {
        for key in &skyline {
            writeln!(out, "{key}")?;
        }
    }

    let report = Report {
        method: METHOD,
        cardinality: cli.cardinality,
        dimensionality: cli.dimensionality,
        statistics: stats,
        build,
        query,
    };
    write!(out, "{report}")?;
    Ok(())
}
