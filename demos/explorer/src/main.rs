//! explorer — run one origin-destination flow query from the command line.
//!
//! Loads a zone GeoJSON file and a trip CSV, applies a query (from a JSON
//! file and/or flags), prints the drawn flows, and writes them with one of
//! the `od-output` backends.
//!
//! ```text
//! explorer --shapes zones.geojson --counts trips.csv --select A,B --out output/
//! ```
//!
//! Set `RUST_LOG=debug` to see dropped rows and every recomputation.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use log::info;

use od_core::{Hour, HourSet, ModeFilter};
use od_flow::{Channel, FilterSpec, FlowQuery};
use od_output::{CsvWriter, FlowOutputObserver, GeoJsonWriter, OutputWriter};
use od_session::{Explorer, ExplorerBuilder, FlowObserver};

// ── CLI ───────────────────────────────────────────────────────────────────────

#[derive(Parser)]
#[command(name = "explorer", about = "Aggregate and lay out origin-destination flows")]
struct Cli {
    /// Zone shapes (GeoJSON FeatureCollection with id, name, lat, lon)
    #[arg(long)]
    shapes: PathBuf,
    /// Trip table (CSV with StartId, EndId, Count, Start Hour, DistanceInKm, Mot)
    #[arg(long)]
    counts: PathBuf,
    /// JSON query file; flags below override its fields
    #[arg(long)]
    query: Option<PathBuf>,
    /// Comma-separated zone ids to select
    #[arg(long, value_delimiter = ',')]
    select: Vec<String>,
    /// Transport mode, or "all"
    #[arg(long)]
    mode: Option<String>,
    /// Comma-separated start hours (0-23) to include
    #[arg(long, value_delimiter = ',')]
    hours: Vec<u8>,
    /// Minimum aggregated count per drawn edge
    #[arg(long)]
    min_count: Option<f64>,
    /// Maximum drawn edges per channel
    #[arg(long)]
    max_edges: Option<usize>,
    /// Output directory; nothing is written if omitted
    #[arg(long)]
    out: Option<PathBuf>,
    /// Output backend
    #[arg(long, value_enum, default_value_t = Format::Csv)]
    format: Format,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum Format {
    Csv,
    Geojson,
    #[cfg(feature = "sqlite")]
    Sqlite,
}

// ── Query assembly ────────────────────────────────────────────────────────────

fn read_query(path: &Path) -> Result<FlowQuery> {
    let file = File::open(path).with_context(|| format!("opening query file {}", path.display()))?;
    let query = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("parsing query file {}", path.display()))?;
    Ok(query)
}

/// Start from the query file (or store defaults), then apply flags.
fn build_query(cli: &Cli, defaults: FilterSpec) -> Result<FlowQuery> {
    let mut query = match &cli.query {
        Some(path) => read_query(path)?,
        None => FlowQuery::new(Default::default(), defaults),
    };

    if !cli.select.is_empty() {
        query.selection = cli.select.iter().map(|s| s.trim()).collect();
    }
    if let Some(mode) = &cli.mode {
        query.filter.mode = ModeFilter::from(mode.as_str());
    }
    if !cli.hours.is_empty() {
        let hours = cli
            .hours
            .iter()
            .map(|&h| Hour::try_from(h))
            .collect::<Result<HourSet, _>>()?;
        query.filter.hours = hours;
    }
    if let Some(min_count) = cli.min_count {
        query.filter.min_count = min_count;
    }
    if let Some(max_edges) = cli.max_edges {
        query.filter.max_edges = max_edges;
    }
    Ok(query)
}

// ── Report ────────────────────────────────────────────────────────────────────

fn print_view<O: FlowObserver>(explorer: &Explorer<O>) {
    let view = explorer.view();
    println!("Selection: {}", explorer.selection_label());
    println!("Hours:     {}", explorer.hour_summary());
    println!(
        "Outbound {}  |  Inbound {}  |  Connected zones {}",
        view.summary.outbound_total, view.summary.inbound_total, view.summary.connected_zones
    );
    println!();

    for channel in [Channel::Outbound, Channel::Inbound] {
        let lines: Vec<_> = view.lines_in(channel).collect();
        if lines.is_empty() {
            continue;
        }
        println!("{:<10} {:<12} {:<12} {:>10} {:>7}", channel.as_str(), "From", "To", "Count", "Weight");
        println!("{}", "-".repeat(55));
        for line in lines {
            println!(
                "{:<10} {:<12} {:<12} {:>10} {:>7.2}",
                "",
                line.edge.start_id.as_str(),
                line.edge.end_id.as_str(),
                line.edge.count,
                line.weight,
            );
        }
        println!();
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn write_with<W: OutputWriter>(builder: ExplorerBuilder, writer: W) -> Result<()> {
    let explorer = builder.observer(FlowOutputObserver::new(writer)).build()?;
    print_view(&explorer);

    let mut obs = explorer.close();
    if let Some(e) = obs.take_error() {
        anyhow::bail!("output error: {e}");
    }
    info!("wrote {} render(s)", obs.renders());
    Ok(())
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let builder = ExplorerBuilder::load(&cli.shapes, &cli.counts)?;
    let query = build_query(&cli, FilterSpec::for_store(&builder.data().trips))?;
    let builder = builder.query(query);

    let Some(out) = &cli.out else {
        print_view(&builder.build()?);
        return Ok(());
    };

    std::fs::create_dir_all(out).with_context(|| format!("creating {}", out.display()))?;
    match cli.format {
        Format::Csv => write_with(builder, CsvWriter::new(out)?),
        Format::Geojson => write_with(builder, GeoJsonWriter::new(out)?),
        #[cfg(feature = "sqlite")]
        Format::Sqlite => write_with(builder, od_output::SqliteWriter::new(out)?),
    }
}
