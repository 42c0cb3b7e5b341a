mod terminal;

use std::time::Duration;

use clap::Parser;
use preppr_common::config::Config;
use preppr_common::error::PrepError;
use preppr_core::provision::{self, Outcome};
use terminal::{print, prompt::TimedPrompt};
use tracing::{error, info, warn};

const PROMPT_WAIT: Duration = Duration::from_secs(10);

#[derive(Parser)]
#[command(name = "preppr")]
#[command(about = "Prepares a Linux host for the appliance installer.")]
#[command(version)]
pub struct CommandLine {}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    CommandLine::parse_args();
    terminal::logging::init();

    if !is_root::is_root() {
        error!("{}", PrepError::PermissionDenied);
        std::process::exit(1);
    }

    print::header("preparing host");

    let cfg = Config::default();
    let prompt = TimedPrompt::new(PROMPT_WAIT);

    match provision::provision(&cfg, &prompt).await {
        Ok(Outcome::Completed) => {
            print::end_of_program();
            info!("host prepared, appliance installer finished");
            Ok(())
        }
        Ok(Outcome::Declined) => {
            warn!("stopping at operator request");
            Ok(())
        }
        Err(err) => {
            error!("{err}");
            std::process::exit(1);
        }
    }
}
