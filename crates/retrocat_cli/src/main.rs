//! retrocat: review board for retroactive funding applications.
//!
//! # Responsibility
//! - Load the record directory once per invocation.
//! - Apply at most one reviewer action and print the outcome.

mod display;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand, ValueEnum};
use log::info;
use retrocat_core::{
    default_log_level, init_logging, ApplicantType, Board, CategorizePolicy, LogTarget,
    RecordStore, StoreConfig, Taxonomy, DEFAULT_DATA_DIR,
};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "retrocat", version)]
#[command(about = "Sort retroactive funding applications into categories")]
struct Cli {
    /// Directory holding one `<applicantAddress>.json` file per application
    #[arg(long, global = true, default_value = DEFAULT_DATA_DIR)]
    data_dir: PathBuf,

    /// JSON file with `project` and `individual` label lists
    #[arg(long, global = true)]
    taxonomy: Option<PathBuf>,

    /// Keep an existing flag when a flagged application is categorized
    #[arg(long, global = true)]
    keep_flag_on_categorize: bool,

    /// trace|debug|info|warn|error
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Absolute directory for rolling log files (stderr when omitted)
    #[arg(long, global = true)]
    log_dir: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List the category labels for one applicant type
    Labels {
        #[arg(long = "type", value_enum, default_value_t = ViewType::Project)]
        view: ViewType,
    },
    #[command(flatten)]
    Review(ReviewCommand),
}

/// Commands that need the application directory loaded.
#[derive(Subcommand)]
enum ReviewCommand {
    /// Print the category columns for one applicant type
    Board {
        #[arg(long = "type", value_enum, default_value_t = ViewType::Project)]
        view: ViewType,
    },
    /// Show one application in detail
    Show { address: String },
    /// Move an application into a category
    Categorize { address: String, label: String },
    /// Move an application back to the uncategorized lane
    Uncategorize { address: String },
    /// Flag an application with a reason
    Flag { address: String, reason: String },
    /// Remove the flag from an application
    Unflag { address: String },
    /// Toggle PROJECT/INDIVIDUAL (clears the category)
    SwitchType { address: String },
}

#[derive(Clone, Copy, ValueEnum)]
enum ViewType {
    Project,
    Individual,
}

impl From<ViewType> for ApplicantType {
    fn from(value: ViewType) -> Self {
        match value {
            ViewType::Project => ApplicantType::Project,
            ViewType::Individual => ApplicantType::Individual,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    start_logging(&cli)?;

    let taxonomy = match &cli.taxonomy {
        Some(path) => Taxonomy::load(path)
            .with_context(|| format!("loading taxonomy {}", path.display()))?,
        None => Taxonomy::builtin(),
    };

    let command = match cli.command {
        Command::Labels { view } => {
            display::print_labels(&taxonomy, view.into());
            return Ok(());
        }
        Command::Review(command) => command,
    };

    let policy = if cli.keep_flag_on_categorize {
        CategorizePolicy::KeepFlag
    } else {
        CategorizePolicy::ClearFlag
    };
    let config = StoreConfig::new(cli.data_dir.clone()).with_policy(policy);
    let mut store = RecordStore::open(&config, taxonomy);
    let loaded = store
        .load()
        .with_context(|| format!("loading applications from {}", config.data_dir.display()))?;
    info!(
        "event=cli_start module=cli status=ok core_version={} records={}",
        retrocat_core::core_version(),
        loaded
    );

    match command {
        ReviewCommand::Board { view } => display::print_board(&Board::build(&store, view.into())),
        ReviewCommand::Show { address } => match store.get(&address) {
            Some(app) => display::print_application(app),
            None => bail!("application not found: {address}"),
        },
        ReviewCommand::Categorize { address, label } => {
            let app = store.set_category(&address, Some(&label))?;
            display::print_outcome("categorized", app);
        }
        ReviewCommand::Uncategorize { address } => {
            let app = store.set_category(&address, None)?;
            display::print_outcome("uncategorized", app);
        }
        ReviewCommand::Flag { address, reason } => {
            let app = store.flag(&address, reason)?;
            display::print_outcome("flagged", app);
        }
        ReviewCommand::Unflag { address } => {
            let app = store.unflag(&address)?;
            display::print_outcome("unflagged", app);
        }
        ReviewCommand::SwitchType { address } => {
            let app = store.switch_applicant_type(&address)?;
            display::print_outcome("switched", app);
        }
    }

    Ok(())
}

fn start_logging(cli: &Cli) -> anyhow::Result<()> {
    let (target, fallback_level) = match &cli.log_dir {
        Some(dir) => (
            LogTarget::directory(dir).map_err(anyhow::Error::msg)?,
            default_log_level(),
        ),
        None => (LogTarget::Stderr, "warn"),
    };
    let level = cli.log_level.as_deref().unwrap_or(fallback_level);
    init_logging(level, target).map_err(anyhow::Error::msg)
}
