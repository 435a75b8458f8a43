//! CLI argument definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::core::factory::{BusinessType, InvalidProductKind, InvalidUserKind};
use crate::core::fixtures::FixtureKind;

/// ERP test data toolkit - resolve fixtures, select credentials, synthesize
/// and validate records.
#[derive(Parser, Debug)]
#[command(name = "erpdata")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    // === Global flags ===
    /// Fixture directory (overrides TEST_DATA_DIR and the config file)
    #[arg(long, value_name = "DIR", global = true)]
    pub data_dir: Option<PathBuf>,

    /// Config file (overrides ERPDATA_CONFIG)
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value = "human", global = true)]
    pub format: OutputFormat,

    /// Shorthand for --format json
    #[arg(long, global = true)]
    pub json: bool,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pub pretty: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Log level
    #[arg(long, value_name = "LEVEL", global = true)]
    pub log_level: Option<String>,

    /// Emit JSONL logs to stderr
    #[arg(long, global = true)]
    pub json_output: bool,

    /// Verbose output (sets log level to debug)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

impl Cli {
    /// Resolve the effective output format.
    #[must_use]
    pub fn effective_format(&self) -> OutputFormat {
        if self.json {
            OutputFormat::Json
        } else {
            self.format
        }
    }
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Check environment variables and configuration
    #[command(subcommand)]
    Env(EnvCommand),

    /// Inspect fixture files
    #[command(subcommand)]
    Fixture(FixtureCommand),

    /// Show the credentials selected for a role (password masked)
    Credentials(CredentialsArgs),

    /// Generate synthetic records
    #[command(subcommand)]
    Generate(GenerateCommand),

    /// Validate records from a JSON file
    Validate(ValidateArgs),
}

/// `env` subcommands.
#[derive(Subcommand, Debug)]
pub enum EnvCommand {
    /// Report missing required variables and the resolved configuration
    Check {
        /// Also report placeholders in these fixtures that have no value
        #[arg(long, value_name = "NAME")]
        fixture: Vec<String>,
    },
}

/// `fixture` subcommands.
#[derive(Subcommand, Debug)]
pub enum FixtureCommand {
    /// Print a fixture after placeholder resolution
    Show {
        /// Logical fixture name (no extension)
        name: String,

        #[arg(long, value_enum, default_value = "json")]
        kind: KindArg,

        /// Worksheet to read (xlsx only; defaults to the first sheet)
        #[arg(long)]
        sheet: Option<String>,

        /// Print only this top-level key (json only)
        #[arg(long)]
        key: Option<String>,
    },

    /// List fixture names in the data directory
    List {
        /// Only list this kind
        #[arg(long, value_enum)]
        kind: Option<KindArg>,
    },
}

/// Arguments for the `credentials` command.
#[derive(Args, Debug)]
pub struct CredentialsArgs {
    /// Role name (admin, manager, regular, test)
    #[arg(default_value = "test")]
    pub role: String,
}

/// `generate` subcommands.
#[derive(Subcommand, Debug)]
pub enum GenerateCommand {
    /// Generate users with departments from the fixture catalog
    User(GenerateUserArgs),

    /// Generate products
    Product(GenerateProductArgs),

    /// Generate login data
    Login {
        /// Produce an invalid login instead of a valid one
        #[arg(long)]
        invalid: bool,
    },
}

/// Arguments for `generate user`.
#[derive(Args, Debug)]
pub struct GenerateUserArgs {
    #[arg(long, default_value = "1")]
    pub count: usize,

    /// Department; must be listed in the fixture catalog
    #[arg(long, conflicts_with = "overrides")]
    pub department: Option<String>,

    /// JSON object of field overrides, e.g. '{"status":"Inactive"}'
    #[arg(long, value_name = "JSON")]
    pub overrides: Option<String>,

    /// Generate a deliberately invalid user
    #[arg(long, value_enum, conflicts_with_all = ["department", "overrides"])]
    pub invalid: Option<InvalidUserArg>,

    /// Also write the records to <data-dir>/<NAME>.json
    #[arg(long, value_name = "NAME")]
    pub save: Option<String>,
}

/// Arguments for `generate product`.
#[derive(Args, Debug)]
pub struct GenerateProductArgs {
    #[arg(long, default_value = "1")]
    pub count: usize,

    /// Shape the product for a line of business
    #[arg(long, value_enum)]
    pub business: Option<BusinessArg>,

    /// JSON object of field overrides
    #[arg(long, value_name = "JSON", conflicts_with = "business")]
    pub overrides: Option<String>,

    /// Generate a deliberately invalid product
    #[arg(long, value_enum, conflicts_with_all = ["business", "overrides"])]
    pub invalid: Option<InvalidProductArg>,

    /// Generate the fixed set of edge-case products
    #[arg(long, conflicts_with_all = ["business", "overrides", "invalid"])]
    pub edge_cases: bool,

    /// Emit known products with product-list filters and expected hit counts
    #[arg(long, conflicts_with_all = ["business", "overrides", "invalid", "edge_cases", "save"])]
    pub filter_cases: bool,

    /// Also write the records to <data-dir>/<NAME>.json
    #[arg(long, value_name = "NAME")]
    pub save: Option<String>,
}

/// Arguments for the `validate` command.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Record type
    #[arg(value_enum)]
    pub record: RecordArg,

    /// JSON file holding one record or an array of records
    pub file: PathBuf,
}

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable colored output
    #[default]
    Human,
    /// JSON output
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum KindArg {
    Json,
    Csv,
    #[value(alias = "excel")]
    Xlsx,
}

impl From<KindArg> for FixtureKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Json => Self::Json,
            KindArg::Csv => Self::Csv,
            KindArg::Xlsx => Self::Xlsx,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RecordArg {
    User,
    Product,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum BusinessArg {
    Ded,
    Imo,
    Retail,
}

impl From<BusinessArg> for BusinessType {
    fn from(arg: BusinessArg) -> Self {
        match arg {
            BusinessArg::Ded => Self::Ded,
            BusinessArg::Imo => Self::Imo,
            BusinessArg::Retail => Self::Retail,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum InvalidUserArg {
    MissingRequired,
    InvalidEmail,
    PasswordMismatch,
}

impl From<InvalidUserArg> for InvalidUserKind {
    fn from(arg: InvalidUserArg) -> Self {
        match arg {
            InvalidUserArg::MissingRequired => Self::MissingRequired,
            InvalidUserArg::InvalidEmail => Self::InvalidEmail,
            InvalidUserArg::PasswordMismatch => Self::PasswordMismatch,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum InvalidProductArg {
    MissingName,
    InvalidCas,
    NegativeGravity,
    LongName,
    Markup,
}

impl From<InvalidProductArg> for InvalidProductKind {
    fn from(arg: InvalidProductArg) -> Self {
        match arg {
            InvalidProductArg::MissingName => Self::MissingName,
            InvalidProductArg::InvalidCas => Self::InvalidCas,
            InvalidProductArg::NegativeGravity => Self::NegativeGravity,
            InvalidProductArg::LongName => Self::LongName,
            InvalidProductArg::Markup => Self::MarkupInjection,
        }
    }
}
