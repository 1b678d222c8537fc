//! CLI argument definitions for logbook.

use clap::{Parser, Subcommand};
use clap_complete::Shell;

use logbook::record::{EquipmentType, RecordKind, RecordStatus, ReportType};

#[derive(Parser)]
#[command(name = "logbook")]
#[command(version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("GIT_SHA"), " ", env!("BUILD_DATE"), ")"))]
#[command(about = "Facility compliance logbook", long_about = None)]
#[command(
    after_help = "GETTING STARTED:\n    logbook init --site site-001     Create .logbook/ with a starter config\n    logbook --user ad-001 routes     Show the pages a user may open\n\n    Users and their roles are defined in .logbook/config.md."
)]
pub struct Cli {
    /// Acting user ID, looked up in the configured user table
    #[arg(long, global = true, env = "LOGBOOK_USER")]
    pub user: Option<String>,

    /// Emit JSON lines instead of text
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress all non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Enable debug logging on stderr (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize logbook in the current directory
    Init {
        /// Site ID records are logged against
        #[arg(long, default_value = "site-001")]
        site: String,
        /// Site display name
        #[arg(long)]
        name: Option<String>,
        /// Overwrite an existing .logbook/config.md
        #[arg(long)]
        force: bool,
    },
    /// Run a calculator without logging anything
    Calc {
        #[command(subcommand)]
        command: CalcCommands,
    },
    /// Log a new record as a draft
    Log {
        #[command(subcommand)]
        command: LogCommands,
    },
    /// Correct a draft's inputs and recompute its derived values
    Recompute(RecomputeArgs),
    /// Send a draft for review
    Submit {
        /// Record ID (full or partial)
        id: String,
    },
    /// Approve a pending record
    Approve {
        /// Record ID (full or partial)
        id: String,
        #[arg(long)]
        remarks: Option<String>,
    },
    /// Reject a pending record
    Reject {
        /// Record ID (full or partial)
        id: String,
        /// Why the record is rejected (required)
        #[arg(long)]
        remarks: String,
    },
    /// List records visible to the current user
    List {
        /// Filter by status (draft, pending, approved, rejected)
        #[arg(long)]
        status: Option<RecordStatus>,
        /// Filter by kind (utility, chemical, air, report)
        #[arg(long)]
        kind: Option<RecordKind>,
        /// Only reports of this type (utility, chemical, validation)
        #[arg(long)]
        report_type: Option<ReportType>,
        /// Case-insensitive match on record ID or title
        #[arg(long)]
        search: Option<String>,
    },
    /// Show one record in full
    Show {
        /// Record ID (full or partial)
        id: String,
    },
    /// Count records by status
    Summary,
    /// Show instrument calibration status
    Instruments,
    /// List configured users and active counts per role
    Users,
    /// List the pages the current user may open
    Routes,
    /// Generate shell completions
    Completion {
        /// Shell to generate completions for (bash, zsh, fish, powershell)
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Subcommand)]
pub enum CalcCommands {
    /// Stock chemical needed for a target solution
    Chemical {
        /// Chemical name or formula from the catalog
        #[arg(long, required_unless_present = "stock")]
        chemical: Option<String>,
        /// Stock concentration in percent, instead of a catalog chemical
        #[arg(long, conflicts_with = "chemical")]
        stock: Option<f64>,
        /// Target concentration in percent
        #[arg(long)]
        target: f64,
        /// Solution volume in liters
        #[arg(long)]
        volume: f64,
    },
    /// Air changes per hour for a cleanroom
    Air(AirArgs),
}

#[derive(clap::Args)]
pub struct AirArgs {
    /// Configured room name
    #[arg(long)]
    pub room: Option<String>,
    /// Grid velocity readings in ft/min, comma separated
    #[arg(long, value_delimiter = ',', num_args = 1.., required = true)]
    pub readings: Vec<f64>,
    /// ISO class (5-8), overrides the room's
    #[arg(long)]
    pub iso_class: Option<u8>,
    /// Room volume in ft³, overrides the room's
    #[arg(long)]
    pub volume: Option<f64>,
    /// Effective area of one filter in ft², overrides the room's
    #[arg(long)]
    pub filter_area: Option<f64>,
    /// Number of supply filters, overrides the room's
    #[arg(long)]
    pub filter_count: Option<u32>,
}

/// Options shared by every `log` subcommand
#[derive(clap::Args)]
pub struct LogOptions {
    /// Free-text notes
    #[arg(long, default_value = "")]
    pub notes: String,
    /// Send for review immediately
    #[arg(long)]
    pub submit: bool,
}

#[derive(Subcommand)]
pub enum LogCommands {
    /// Chiller, boiler or compressor readings
    Utility {
        #[arg(long = "type")]
        equipment_type: EquipmentType,
        /// Equipment ID, e.g. CH-001
        #[arg(long)]
        equipment: String,
        #[arg(long, allow_hyphen_values = true)]
        t1: f64,
        #[arg(long, allow_hyphen_values = true)]
        t2: f64,
        #[arg(long)]
        p1: f64,
        #[arg(long)]
        p2: f64,
        #[arg(long)]
        flow_rate: f64,
        #[command(flatten)]
        options: LogOptions,
    },
    /// Chemical solution preparation
    Chemical {
        /// Chemical name or formula from the catalog
        #[arg(long)]
        chemical: String,
        /// Preparation vessel, e.g. RE0001
        #[arg(long)]
        equipment: String,
        /// Target concentration in percent
        #[arg(long)]
        target: f64,
        /// Solution volume in liters
        #[arg(long)]
        volume: f64,
        #[command(flatten)]
        options: LogOptions,
    },
    /// Cleanroom airflow validation
    Air {
        #[command(flatten)]
        air: AirArgs,
        #[command(flatten)]
        options: LogOptions,
    },
    /// A compiled report for sign-off
    Report {
        #[arg(long = "type")]
        report_type: ReportType,
        #[arg(long)]
        title: String,
        #[command(flatten)]
        options: LogOptions,
    },
}

/// New inputs for a draft. Only fields matching the record's kind apply.
#[derive(clap::Args)]
pub struct RecomputeArgs {
    /// Record ID (full or partial)
    pub id: String,
    /// Target concentration (chemical)
    #[arg(long)]
    pub target: Option<f64>,
    /// Solution volume (chemical)
    #[arg(long)]
    pub volume: Option<f64>,
    /// Grid readings, comma separated (air)
    #[arg(long, value_delimiter = ',', num_args = 1..)]
    pub readings: Option<Vec<f64>>,
    /// Room volume (air)
    #[arg(long)]
    pub room_volume: Option<f64>,
    #[arg(long, allow_hyphen_values = true)]
    pub t1: Option<f64>,
    #[arg(long, allow_hyphen_values = true)]
    pub t2: Option<f64>,
    #[arg(long)]
    pub p1: Option<f64>,
    #[arg(long)]
    pub p2: Option<f64>,
    #[arg(long)]
    pub flow_rate: Option<f64>,
    /// Report title (report)
    #[arg(long)]
    pub title: Option<String>,
}
