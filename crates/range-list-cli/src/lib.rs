//! `range-list`: run a range list facet against files on disk.
//!
//! Settings are read as JSON (or JSON5), index rows and selection context as
//! JSON. Output goes to stdout; logs go to stderr.

#![forbid(unsafe_code)]

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use range_list_core::config::is_table_name;
use range_list_core::{
    BoundStyle, FacetSettings, FactRow, MergeMode, RangeListConfig, RangeListError,
    SelectionContext, SelectionToken,
};
use range_list_facet::{FacetTypeRegistry, FilterParams, LoadParams, RenderParams};
use tracing_subscriber::EnvFilter;

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("cannot read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("cannot parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error(transparent)]
    Facet(#[from] RangeListError),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type CliResult<T> = Result<T, CliError>;

#[derive(Parser, Debug)]
#[command(name = "range-list", version, about = "Numeric range list facet tools")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Index table name (overrides RANGE_LIST_INDEX_TABLE)
    #[arg(long, global = true)]
    pub table: Option<String>,

    /// Bound comparison style (overrides RANGE_LIST_BOUND_STYLE)
    #[arg(long, value_enum, global = true)]
    pub bound_style: Option<BoundStyleArg>,

    /// Keep one OR branch per checkbox token instead of merging
    #[arg(long, global = true)]
    pub no_reduce: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Resolve level boundaries and print the ranges as JSON
    Resolve {
        #[arg(long)]
        settings: PathBuf,
        /// Index rows to count (JSON array of `{facet_value, post_id}`)
        #[arg(long)]
        rows: Option<PathBuf>,
        /// Selection context restricting which posts count
        #[arg(long)]
        context: Option<PathBuf>,
    },
    /// Print the SQL that fetches this facet's index rows
    Query {
        #[arg(long)]
        settings: PathBuf,
        #[arg(long)]
        context: Option<PathBuf>,
    },
    /// Render the facet HTML
    Render {
        #[arg(long)]
        settings: PathBuf,
        #[arg(long)]
        rows: PathBuf,
        #[arg(long)]
        context: Option<PathBuf>,
        /// Selected token; repeat for several
        #[arg(long = "selected", value_name = "TOKEN", allow_hyphen_values = true)]
        selected: Vec<String>,
        /// Print HTML, selection labels and front-end settings as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print the post filter SQL for a selection
    Filter {
        #[arg(long)]
        settings: PathBuf,
        /// Selected token; repeat for several
        #[arg(long = "selected", value_name = "TOKEN", allow_hyphen_values = true)]
        selected: Vec<String>,
        #[arg(long)]
        json: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum BoundStyleArg {
    Inclusive,
    Exclusive,
}

impl From<BoundStyleArg> for BoundStyle {
    fn from(arg: BoundStyleArg) -> Self {
        match arg {
            BoundStyleArg::Inclusive => Self::Inclusive,
            BoundStyleArg::Exclusive => Self::Exclusive,
        }
    }
}

/// Notice printed by `filter` when the selection restricts nothing.
pub const NO_FILTER_NOTICE: &str = "-- no filter: selection is empty or unparseable";

pub fn run() -> i32 {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let stdout = io::stdout();
    let mut out = stdout.lock();
    match execute(cli, &mut out) {
        Ok(()) => 0,
        Err(err) => {
            eprintln!("error: {err}");
            1
        }
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

/// Process config from the environment with command-line overrides.
pub fn config_for(cli: &Cli) -> CliResult<RangeListConfig> {
    let mut config = RangeListConfig::from_env();
    if let Some(table) = &cli.table {
        if !is_table_name(table) {
            return Err(CliError::InvalidArgument(format!(
                "--table {table:?} is not a plain table name"
            )));
        }
        config = config.with_index_table(table.clone());
    }
    if let Some(style) = cli.bound_style {
        config = config.with_bound_style(style.into());
    }
    if cli.no_reduce {
        config = config.with_merge_mode(MergeMode::Passthrough);
    }
    Ok(config)
}

pub fn execute<W: Write>(cli: Cli, out: &mut W) -> CliResult<()> {
    let registry = FacetTypeRegistry::with_defaults(config_for(&cli)?);

    match cli.command {
        Commands::Resolve {
            settings,
            rows,
            context,
        } => {
            let settings = read_settings(&settings)?;
            let rows = rows.as_deref().map(read_rows).transpose()?.unwrap_or_default();
            let context = context.as_deref().map(read_context).transpose()?;
            let facet = registry.for_settings(&settings)?;
            let values = facet.load_values(&LoadParams {
                facet: &settings,
                rows: &rows,
                context: context.as_ref(),
            });
            serde_json::to_writer_pretty(&mut *out, &values)?;
            writeln!(out)?;
        }
        Commands::Query { settings, context } => {
            let settings = read_settings(&settings)?;
            let context = context.as_deref().map(read_context).transpose()?;
            let facet = registry.for_settings(&settings)?;
            writeln!(out, "{}", facet.values_query(&settings, context.as_ref()))?;
        }
        Commands::Render {
            settings,
            rows,
            context,
            selected,
            json,
        } => {
            let settings = read_settings(&settings)?;
            let rows = read_rows(&rows)?;
            let context = context.as_deref().map(read_context).transpose()?;
            let selected = tokens(selected);
            let facet = registry.for_settings(&settings)?;
            let values = facet.load_values(&LoadParams {
                facet: &settings,
                rows: &rows,
                context: context.as_ref(),
            });
            let params = RenderParams {
                facet: &settings,
                values: &values,
                selected_values: &selected,
            };
            let html = facet.render(&params)?;
            if json {
                let output = serde_json::json!({
                    "html": html,
                    "selections": facet.selection_choices(&params),
                    "settings_js": facet.settings_js(&settings),
                });
                serde_json::to_writer_pretty(&mut *out, &output)?;
                writeln!(out)?;
            } else {
                writeln!(out, "{html}")?;
            }
        }
        Commands::Filter {
            settings,
            selected,
            json,
        } => {
            let settings = read_settings(&settings)?;
            let selected = tokens(selected);
            let facet = registry.for_settings(&settings)?;
            let filter = facet.filter_posts(&FilterParams {
                facet: &settings,
                selected_values: &selected,
            });
            if json {
                serde_json::to_writer_pretty(&mut *out, &filter)?;
                writeln!(out)?;
            } else {
                match filter {
                    Some(filter) => writeln!(out, "{}", filter.sql)?,
                    None => writeln!(out, "{NO_FILTER_NOTICE}")?,
                }
            }
        }
    }
    Ok(())
}

fn tokens(raw: Vec<String>) -> Vec<SelectionToken> {
    raw.into_iter().map(SelectionToken::from).collect()
}

fn read_text(path: &Path) -> CliResult<String> {
    std::fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.to_path_buf(),
        source,
    })
}

fn read_settings(path: &Path) -> CliResult<FacetSettings> {
    let settings = FacetSettings::from_json(&read_text(path)?)?;
    tracing::debug!(
        facet = %settings.name,
        levels = settings.levels.len(),
        input_type = %settings.input_type,
        "loaded settings"
    );
    Ok(settings)
}

fn read_rows(path: &Path) -> CliResult<Vec<FactRow>> {
    serde_json::from_str(&read_text(path)?).map_err(|source| CliError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

fn read_context(path: &Path) -> CliResult<SelectionContext> {
    serde_json::from_str(&read_text(path)?).map_err(|source| CliError::Parse {
        path: path.to_path_buf(),
        source,
    })
}
