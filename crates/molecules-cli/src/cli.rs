use clap::{Args, Parser, Subcommand, ValueEnum};
use molecules::core::elements::MassKind;
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    version,
    about = "molecules - empirical formula masses and amino acid residue lookups.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Path to a configuration file in TOML format.
    #[arg(short, long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Residue catalog to use instead of the built-in one (.toml or .csv).
    #[arg(long, global = true, value_name = "PATH")]
    pub catalog: Option<PathBuf>,

    /// Element mass table, overriding the config file.
    #[arg(short = 'm', long, global = true, value_enum, value_name = "TABLE")]
    pub mass_table: Option<MassTable>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compute the mass of an empirical formula (e.g. 'C(2)H(2)NO' or '-CO+H').
    Mass(MassArgs),
    /// Look up a single residue by code, abbreviation or name.
    Residue(ResidueArgs),
    /// List residues in catalog order.
    List(ListArgs),
    /// Compute residue and peptide masses of a one-letter sequence.
    Peptide(PeptideArgs),
}

#[derive(Args, Debug)]
pub struct MassArgs {
    /// The formula, in the signed grammar unless --simple is given.
    #[arg(required = true, allow_hyphen_values = true)]
    pub formula: String,

    /// Accept only the simple grammar (no '+' or '-' terms).
    #[arg(long)]
    pub simple: bool,
}

#[derive(Args, Debug)]
pub struct ResidueArgs {
    /// One-letter code, abbreviation or full name.
    #[arg(required = true)]
    pub query: String,

    /// Which attribute to match. By default a single character is a code,
    /// anything longer an abbreviation, then a full name.
    #[arg(long, value_enum)]
    pub by: Option<LookupKey>,
}

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Only list the common residues.
    #[arg(long)]
    pub common: bool,
}

#[derive(Args, Debug)]
pub struct PeptideArgs {
    /// Sequence of one-letter residue codes, e.g. PEPTIDE.
    #[arg(required = true)]
    pub sequence: String,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupKey {
    Letter,
    Abbr,
    Name,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MassTable {
    Monoisotopic,
    Average,
}

impl From<MassTable> for MassKind {
    fn from(table: MassTable) -> Self {
        match table {
            MassTable::Monoisotopic => MassKind::Monoisotopic,
            MassTable::Average => MassKind::Average,
        }
    }
}
