use std::path::PathBuf;

use clap::Parser;
use clap_complete::Shell;

use crate::client::output::outputs::Outputs;

// Common CLI options
#[derive(Parser)]
pub struct CommonOpts {
    /// Path to an inventory snapshot (JSON) that is queried
    #[arg(
        long,
        value_hint = clap::ValueHint::FilePath,
        global = true,
        env = "POOLQ_INVENTORY",
        help_heading("GLOBAL OPTIONS")
    )]
    pub inventory: Option<PathBuf>,

    /// Datacenter in which relative paths are resolved
    ///
    /// Can be omitted when the inventory contains a single datacenter.
    #[arg(
        long,
        global = true,
        env = "POOLQ_DATACENTER",
        help_heading("GLOBAL OPTIONS")
    )]
    pub datacenter: Option<String>,

    /// Path to a TOML configuration file
    #[arg(
        long,
        value_hint = clap::ValueHint::FilePath,
        global = true,
        env = "POOLQ_CONFIG",
        help_heading("GLOBAL OPTIONS"),
        hide_short_help(true)
    )]
    pub config: Option<PathBuf>,

    /// Sets output formatting
    #[arg(
        long,
        env = "POOLQ_OUTPUT_MODE",
        default_value_t = Outputs::CLI,
        value_enum,
        global = true,
        help_heading("GLOBAL OPTIONS"),
        hide_short_help(true)
    )]
    pub output_mode: Outputs,

    /// Enables more detailed log output
    #[arg(
        long,
        env = "POOLQ_DEBUG",
        global = true,
        help_heading("GLOBAL OPTIONS"),
        hide_short_help(true)
    )]
    pub debug: bool,
}

// Root CLI options
#[derive(Parser)]
#[command(
    author,
    about,
    version(crate::POOLQ_VERSION),
    disable_help_subcommand(true),
    help_expected(true)
)]
pub struct RootOptions {
    #[clap(flatten)]
    pub common: CommonOpts,

    #[clap(subcommand)]
    pub subcmd: SubCommand,
}

#[derive(Parser)]
pub enum SubCommand {
    /// Commands for resource pools
    Pool(PoolOpts),
    /// Generate shell completion script
    GenerateCompletion(GenerateCompletionOpts),
}

#[derive(Parser)]
pub struct PoolOpts {
    #[clap(subcommand)]
    pub subcmd: PoolCommand,
}

#[derive(Parser)]
pub enum PoolCommand {
    /// Display information about one or more resource pools
    ///
    /// A relative path is resolved in the `host` folder of the datacenter, e.g. `cluster/Resources`.
    /// An absolute path starts with `/`. Path elements may contain the wildcards `*`, `?` and `[...]`.
    /// Naming a cluster or a host selects its root resource pool.
    Info(PoolInfoOpts),
}

#[derive(Parser)]
pub struct PoolInfoOpts {
    /// Inventory path(s) of the resource pool(s)
    #[arg(value_name = "POOL")]
    pub pools: Vec<String>,
}

#[derive(Parser)]
pub struct GenerateCompletionOpts {
    /// Shell flavour for which the completion script should be generated
    #[arg(value_enum)]
    pub shell: Shell,
}
