use chrono::Datelike;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod api;
mod form;
mod terminal;

use api::TriggerClient;
use form::{Form, Status};
use terminal::Terminal;

#[derive(Debug, Parser)]
#[command(name = "settle-client")]
#[command(about = "Pick a month and trigger its settlement webhook", version)]
struct Args {
    #[arg(long, default_value = "http://localhost:3000")]
    api_url: String,
    /// Month to submit (1-12); defaults to the current month.
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=12))]
    month: Option<u32>,
    /// Skip the confirmation prompt.
    #[arg(long, short = 'y')]
    yes: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .json()
        .init();

    let args = Args::parse();
    let today = chrono::Local::now();
    let mut form = Form::new(args.month.unwrap_or(today.month()), i64::from(today.year()))?;
    let client = TriggerClient::new(&args.api_url)?;
    info!(endpoint = client.endpoint(), "form client ready");

    let stdin = std::io::stdin();
    let mut terminal = Terminal::new(stdin.lock(), std::io::stdout());
    terminal.assume_yes = args.yes;
    terminal.once = args.yes && args.month.is_some();

    let status = terminal.run(&mut form, &client).await?;
    if status == Status::Error {
        anyhow::bail!("{}", form.message());
    }
    Ok(())
}
