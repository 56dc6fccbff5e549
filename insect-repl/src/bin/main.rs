//! The `insect` command

use std::io::{self, IsTerminal};

use clap::Parser;
use insect_core::Calculator;
use insect_repl::config::LOG_VAR;
use insect_repl::{classify, Repl, ReplConfig, ReplError, USAGE};
use tracing_subscriber::EnvFilter;

/// Usage is checked by hand, so clap only collects the positional arguments
#[derive(Parser)]
#[command(name = "insect", disable_help_flag = true, disable_version_flag = true)]
struct Cli {
    #[arg(allow_hyphen_values = true, trailing_var_arg = true)]
    args: Vec<String>,
}

fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_VAR).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();

    let mode = match classify(&cli.args, io::stdin().is_terminal()) {
        Ok(mode) => mode,
        Err(ReplError::Usage(_)) => {
            println!("{}", USAGE);
            std::process::exit(1);
        }
        Err(e) => return Err(e.into()),
    };

    let mut repl = Repl::new(ReplConfig::from_env(), Calculator::new());
    let code = repl.run(mode)?;
    std::process::exit(code);
}
