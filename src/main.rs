use clap::Parser;
use opt_reminders::{cmd, settings::Settings, Result};
use std::{path::PathBuf, process};

#[derive(Debug, Parser)]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(name = env!("CARGO_BIN_NAME"))]
pub struct Cli {
    /// Command to run; the full daily batch when omitted
    #[command(subcommand)]
    cmd: Option<Cmd>,

    /// Configuration file to use
    #[arg(short = 'c', default_value = "settings.toml")]
    config: PathBuf,
}

#[derive(Debug, clap::Subcommand)]
pub enum Cmd {
    Run(cmd::run::Cmd),
    Remind(cmd::remind::Cmd),
    Report(cmd::report::Cmd),
    Sheets(cmd::sheets::Cmd),
    TestDates(cmd::test_dates::Cmd),
    Migrate(cmd::migrate::Cmd),
    Serve(cmd::serve::Cmd),
}

#[tokio::main]
async fn main() -> Result {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    if let Err(e) = run(cli).await {
        eprintln!("error: {e:?}");
        process::exit(1);
    }

    Ok(())
}

async fn run(cli: Cli) -> Result {
    let settings = Settings::new(&cli.config)?;

    tracing_subscriber::fmt()
        .with_env_filter(&settings.log)
        .init();

    match cli.cmd {
        None => cmd::run::Cmd {}.run(&settings).await,
        Some(Cmd::Run(cmd)) => cmd.run(&settings).await,
        Some(Cmd::Remind(cmd)) => cmd.run(&settings).await,
        Some(Cmd::Report(cmd)) => cmd.run(&settings).await,
        Some(Cmd::Sheets(cmd)) => cmd.run(&settings).await,
        Some(Cmd::TestDates(cmd)) => cmd.run(&settings).await,
        Some(Cmd::Migrate(cmd)) => cmd.run(&settings).await,
        Some(Cmd::Serve(cmd)) => cmd.run(&settings).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_invocation_parses_as_the_daily_batch() {
        let cli = Cli::try_parse_from(["opt-reminders"]).expect("parse");
        assert!(cli.cmd.is_none());
        assert_eq!(cli.config, PathBuf::from("settings.toml"));
    }

    #[test]
    fn subcommands_still_parse() {
        let cli = Cli::try_parse_from(["opt-reminders", "-c", "prod.toml", "remind"])
            .expect("parse");
        assert!(matches!(cli.cmd, Some(Cmd::Remind(_))));
        assert_eq!(cli.config, PathBuf::from("prod.toml"));
    }
}
