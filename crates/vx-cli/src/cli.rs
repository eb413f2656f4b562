use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};

pub const VX_HELP_TEMPLATE: &str =
    "{before-help}\nUsage:\n    {usage}\n\nGlobal options:\n{options}\n";

pub const VX_BEFORE_HELP: &str = concat!(
    "vx ",
    env!("CARGO_PKG_VERSION"),
    " – Virtualenv bootstrap & parallel script runner\n\n",
    "\x1b[1;36mCore workflow\x1b[0m\n",
    "  run              Provision the env, install missing imports, run targets in parallel.\n",
    "  sync             Provision the env and install missing imports only.\n\n",
    "\x1b[1;36mEssentials\x1b[0m\n",
    "  scan             Print the top-level modules the target scripts reference.\n",
    "  status           Report env existence, interpreter health, and installed count.\n",
);

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    propagate_version = false,
    disable_help_subcommand = true,
    before_help = VX_BEFORE_HELP,
    help_template = VX_HELP_TEMPLATE
)]
pub struct VxCli {
    #[arg(
        short,
        long,
        help = "Suppress human output (errors still print to stderr)",
        global = true
    )]
    pub quiet: bool,
    #[arg(short, long, action = ArgAction::Count, help = "Increase logging (-vv reaches trace)")]
    pub verbose: u8,
    #[arg(long, help = "Force trace logging regardless of -v/-q", global = true)]
    pub trace: bool,
    #[arg(
        long,
        help = "Emit {status,message,details} JSON envelopes",
        global = true
    )]
    pub json: bool,
    #[arg(long, help = "Disable colored human output", global = true)]
    pub no_color: bool,
    #[arg(
        long,
        value_name = "DIR",
        help = "Virtualenv directory (default: venv, or VX_ENV_DIR / vx.toml)",
        global = true
    )]
    pub env: Option<PathBuf>,
    #[command(subcommand)]
    pub command: CommandCli,
}

#[derive(Subcommand, Debug)]
pub enum CommandCli {
    #[command(
        about = "Provision the env, install missing imports, then run every target concurrently.",
        override_usage = "vx run [FILE ...]"
    )]
    Run(TargetArgs),
    #[command(
        about = "Provision the env and install missing imports without running anything.",
        override_usage = "vx sync [FILE ...]"
    )]
    Sync(TargetArgs),
    #[command(
        about = "Print the top-level modules referenced by the target scripts.",
        override_usage = "vx scan <FILE ...>"
    )]
    Scan(TargetArgs),
    #[command(about = "Report whether the env exists and what is installed (read-only).")]
    Status,
}

#[derive(Args, Debug)]
pub struct TargetArgs {
    #[arg(
        value_name = "FILE",
        help = "Target scripts (defaults to the vx.toml target list)"
    )]
    pub files: Vec<PathBuf>,
}
