use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use qwalk::{CoinKind, WalkConfig};
use std::path::PathBuf;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// One JSON frame per tick on stdout
    #[default]
    Json,
    /// Human readable summary after the last tick
    Summary,
}

#[derive(Debug, Parser)]
#[command(
    name = "qwalk",
    about = "Quantum walk on a line, next to a classical random walk",
    version,
    propagate_version = true,
    disable_help_subcommand = true
)]
pub struct QwalkCli {
    /// Global: path to config (TOML)
    #[arg(long = "config", value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    /// Global: more logging (-v info, -vv debug, -vvv trace)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub cmd: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run both walks for a number of ticks
    ///
    /// Examples:
    ///   qwalk run --ticks 100 --format summary
    ///   qwalk run --sites 201 --site 100 --up-re 1 --down-im 1 --coin hadamard
    Run(RunArgs),

    /// Print the resolved configuration as TOML
    Config(OverrideArgs),
}

#[derive(Debug, Args)]
pub struct RunArgs {
    /// Number of driver ticks to run
    #[arg(long, default_value_t = 50)]
    pub ticks: u64,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,

    /// Sleep the configured tick interval between ticks
    #[arg(long, action = ArgAction::SetTrue)]
    pub realtime: bool,

    /// Sample final walker positions with this seed
    #[arg(long, value_name = "SEED")]
    pub seed: Option<u64>,

    #[command(flatten)]
    pub overrides: OverrideArgs,
}

/// Command-line overrides layered over the configuration file.
#[derive(Debug, Args, Default)]
pub struct OverrideArgs {
    /// Number of lattice sites
    #[arg(long)]
    pub sites: Option<usize>,

    /// Starting site (defaults to the centre)
    #[arg(long)]
    pub site: Option<usize>,

    /// Re(ψ↑) of the initial spin
    #[arg(long, allow_negative_numbers = true)]
    pub up_re: Option<f64>,

    /// Im(ψ↑) of the initial spin
    #[arg(long, allow_negative_numbers = true)]
    pub up_im: Option<f64>,

    /// Re(ψ↓) of the initial spin
    #[arg(long, allow_negative_numbers = true)]
    pub down_re: Option<f64>,

    /// Im(ψ↓) of the initial spin
    #[arg(long, allow_negative_numbers = true)]
    pub down_im: Option<f64>,

    /// Coin: hadamard, x, y, z or identity
    #[arg(long, value_name = "COIN")]
    pub coin: Option<CoinKind>,

    /// Probability of a classical step forward
    #[arg(long, value_name = "P")]
    pub forward: Option<f64>,

    /// Walk steps per tick
    #[arg(long)]
    pub steps_per_tick: Option<u32>,

    /// Milliseconds between ticks with --realtime
    #[arg(long, value_name = "MS")]
    pub interval_ms: Option<u64>,
}

impl OverrideArgs {
    pub fn apply(&self, config: &mut WalkConfig) {
        if let Some(sites) = self.sites {
            config.sites = sites;
        }
        if let Some(site) = self.site {
            config.initial.site = Some(site);
        }
        if let Some(v) = self.up_re {
            config.initial.up[0] = v;
        }
        if let Some(v) = self.up_im {
            config.initial.up[1] = v;
        }
        if let Some(v) = self.down_re {
            config.initial.down[0] = v;
        }
        if let Some(v) = self.down_im {
            config.initial.down[1] = v;
        }
        if let Some(coin) = self.coin {
            config.coin = coin;
        }
        if let Some(p) = self.forward {
            config.forward_probability = p;
        }
        if let Some(n) = self.steps_per_tick {
            config.steps_per_tick = n;
        }
        if let Some(ms) = self.interval_ms {
            config.tick_interval_ms = ms;
        }
    }
}
