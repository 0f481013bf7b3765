mod files;
mod reports;

use anyhow::{Context, Result, bail};
use clap::{Args as ClapArgs, Parser, Subcommand, ValueEnum};
use std::fs::File;
use std::io::{BufWriter, Write, stdout};
use std::path::PathBuf;

use files::{FileCatalogLoader, FileStateStorage};
use reports::{ChangeReport, Flips};
use sleepdex_core::{AcquiredFilter, Location, Rank, RowFilter, Tracker, TrackerConfig};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    /// Human-readable, colored text
    Console,
    /// Pretty-printed JSON
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum AcquiredArg {
    Any,
    Acquired,
    Missing,
}

impl From<AcquiredArg> for AcquiredFilter {
    fn from(arg: AcquiredArg) -> Self {
        match arg {
            AcquiredArg::Any => Self::Any,
            AcquiredArg::Acquired => Self::Acquired,
            AcquiredArg::Missing => Self::Missing,
        }
    }
}

#[derive(Debug, Clone, Default, ClapArgs)]
struct FilterArgs {
    /// Restrict to a field (slug such as `cyan`, or its display name)
    #[arg(long)]
    location: Option<Location>,

    /// Name substring; katakana and hiragana match each other
    #[arg(long)]
    name: Option<String>,

    /// Exact rarity label
    #[arg(long)]
    rarity: Option<String>,

    /// Exact style label
    #[arg(long)]
    style: Option<String>,

    /// Acquisition filter
    #[arg(long, value_enum)]
    acquired: Option<AcquiredArg>,
}

impl FilterArgs {
    fn row_filter(&self) -> RowFilter {
        RowFilter {
            name_query: self.name.clone().unwrap_or_default(),
            rarity: self.rarity.clone().unwrap_or_default(),
            style: self.style.clone().unwrap_or_default(),
            acquired: self.acquired.map_or(AcquiredFilter::Any, AcquiredFilter::from),
        }
    }

    fn is_unfiltered(&self) -> bool {
        self.location.is_none() && self.row_filter().is_empty()
    }
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Completion counts per style and field
    Summary,
    /// List records, optionally filtered
    List(FilterArgs),
    /// Missing records a field shows at or below a research rank
    Reverse {
        #[arg(long)]
        location: Location,
        #[arg(long)]
        rank: Rank,
    },
    /// Star-tier checklist grouped by name
    Rarity,
    /// Every selectable research rank in order
    Ranks,
    /// Flip the acquired flag of each id
    Toggle {
        #[arg(required = true)]
        ids: Vec<String>,
    },
    /// Mark ids, or every record passing the filters, as acquired
    Mark {
        ids: Vec<String>,
        #[command(flatten)]
        filter: FilterArgs,
        /// Allow marking the whole catalog when no ids or filters are given
        #[arg(long)]
        all: bool,
    },
    /// Mark ids, or every record passing the filters, as not acquired
    Unmark {
        ids: Vec<String>,
        #[command(flatten)]
        filter: FilterArgs,
        /// Allow clearing the whole catalog when no ids or filters are given
        #[arg(long)]
        all: bool,
    },
    /// Write the acquisition state as a backup document
    Export {
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Replace the acquisition state with a backup document
    Import { path: PathBuf },
}

#[derive(Debug, Parser)]
#[command(name = "sleepdex", version)]
#[command(about = "Checklist of collected sleep styles, from the terminal")]
struct Args {
    /// JSON file with `catalog_path` and `records_key` settings
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Catalog document [default: pokemonsleep_data.json]
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    /// Top-level key holding the record list [default: すべての寝顔一覧]
    #[arg(long, global = true)]
    records_key: Option<String>,

    /// Acquisition state file
    #[arg(long, global = true, default_value = "sleepdex-state.json")]
    state: PathBuf,

    /// Output report format
    #[arg(long, global = true, value_enum, default_value_t = ReportFormat::Console)]
    report: ReportFormat,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);
    run(&args)
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();
}

/// Settings file first, then command-line overrides.
fn resolve_config(args: &Args) -> Result<TrackerConfig> {
    let mut config = match &args.config {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            serde_json::from_str(&text)
                .with_context(|| format!("invalid settings in {}", path.display()))?
        }
        None => TrackerConfig::default(),
    };
    if let Some(catalog) = &args.catalog {
        config.catalog_path = catalog.display().to_string();
    }
    if let Some(key) = &args.records_key {
        config.records_key.clone_from(key);
    }
    Ok(config)
}

fn run(args: &Args) -> Result<()> {
    let config = resolve_config(args)?;
    let loader = FileCatalogLoader::new(&config.catalog_path).with_records_key(&config.records_key);
    let storage = FileStateStorage::new(&args.state);
    log::debug!("state file: {}", storage.path().display());
    let mut tracker = Tracker::open(&loader, storage)?;
    let mut out = OutputTarget::new(None)?;
    let json = args.report == ReportFormat::Json;

    match &args.command {
        Command::Summary => {
            let table = tracker.summary();
            if json {
                reports::summary_json(out.writer(), &table)?;
            } else {
                reports::summary_console(out.writer(), &table)?;
            }
        }
        Command::List(filter) => {
            let rows = tracker.visible_rows(filter.location, &filter.row_filter());
            if json {
                reports::rows_json(out.writer(), &rows, tracker.state())?;
            } else {
                reports::rows_console(out.writer(), &rows, tracker.state())?;
            }
        }
        Command::Reverse { location, rank } => {
            let rows = tracker.reverse_lookup(*location, *rank);
            if json {
                reports::rows_json(out.writer(), &rows, tracker.state())?;
            } else {
                reports::rows_console(out.writer(), &rows, tracker.state())?;
            }
        }
        Command::Rarity => {
            let groups = tracker.rarity_groups();
            if json {
                reports::rarity_json(out.writer(), &groups, tracker.state())?;
            } else {
                reports::rarity_console(out.writer(), &groups, tracker.state())?;
            }
        }
        Command::Ranks => {
            let ranks = Rank::all();
            if json {
                reports::ranks_json(out.writer(), &ranks)?;
            } else {
                reports::ranks_console(out.writer(), &ranks)?;
            }
        }
        Command::Toggle { ids } => {
            let flips = ids.iter().fold(Flips::default(), |mut flips, id| {
                if tracker.toggle(id) {
                    flips.on += 1;
                } else {
                    flips.off += 1;
                }
                flips
            });
            tracker.save().context("failed to save acquisition state")?;
            let change = ChangeReport {
                action: "toggled",
                requested: ids.len(),
                changed: flips.on + flips.off,
                acquired_total: tracker.state().len(),
                flips: Some(flips),
            };
            write_change(&mut out, json, &change)?;
        }
        Command::Mark { ids, filter, all } | Command::Unmark { ids, filter, all } => {
            let acquired = matches!(args.command, Command::Mark { .. });
            let targets = bulk_targets(&tracker, ids, filter, *all)?;
            let changed = if acquired {
                tracker.set_many(&targets)
            } else {
                tracker.clear_many(&targets)
            };
            tracker.save().context("failed to save acquisition state")?;
            let change = ChangeReport {
                action: if acquired { "marked" } else { "unmarked" },
                requested: targets.len(),
                changed,
                acquired_total: tracker.state().len(),
                flips: None,
            };
            write_change(&mut out, json, &change)?;
        }
        Command::Export { output } => {
            let mut target = OutputTarget::new(output.clone())?;
            writeln!(target.writer(), "{}", tracker.export())?;
            target.flush_inner()?;
        }
        Command::Import { path } => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            let count = tracker
                .import(&text)
                .with_context(|| format!("{} is not a valid backup", path.display()))?;
            tracker.save().context("failed to save acquisition state")?;
            let change = ChangeReport {
                action: "imported",
                requested: count,
                changed: count,
                acquired_total: tracker.state().len(),
                flips: None,
            };
            write_change(&mut out, json, &change)?;
        }
    }

    out.flush_inner()?;
    Ok(())
}

/// Explicit ids, or the records passing the filters; never both. An empty
/// filter only reaches the whole catalog with `--all`.
fn bulk_targets(
    tracker: &Tracker<FileStateStorage>,
    ids: &[String],
    filter: &FilterArgs,
    all: bool,
) -> Result<Vec<String>> {
    if !ids.is_empty() {
        if all || !filter.is_unfiltered() {
            bail!("pass either ids or filters (or --all), not both");
        }
        return Ok(ids.to_vec());
    }
    if filter.is_unfiltered() && !all {
        bail!("no ids or filters given; pass --all to act on every record");
    }
    Ok(tracker
        .visible_rows(filter.location, &filter.row_filter())
        .into_iter()
        .map(|record| record.id.clone())
        .collect())
}

fn write_change(out: &mut OutputTarget, json: bool, change: &ChangeReport) -> Result<()> {
    if json {
        reports::change_json(out.writer(), change)
    } else {
        reports::change_console(out.writer(), change)
    }
}

enum OutputTarget {
    Stdout(BufWriter<std::io::Stdout>),
    File(BufWriter<File>),
}

impl OutputTarget {
    fn new(path: Option<PathBuf>) -> Result<Self> {
        if let Some(path) = path {
            let file = File::create(&path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            Ok(Self::File(BufWriter::new(file)))
        } else {
            Ok(Self::Stdout(BufWriter::new(stdout())))
        }
    }

    fn writer(&mut self) -> &mut dyn Write {
        match self {
            Self::Stdout(w) => w,
            Self::File(w) => w,
        }
    }

    fn flush_inner(&mut self) -> std::io::Result<()> {
        match self {
            Self::Stdout(w) => w.flush(),
            Self::File(w) => w.flush(),
        }
    }
}
