use clap::{Parser, Subcommand};
use miette::{IntoDiagnostic, Result};
use serde_json::Value;
use std::fs::File;
use std::io::{self, IsTerminal};
use std::path::PathBuf;
use std::sync::Arc;
use stripe_bridge::application::bridge::StripeBridge;
use stripe_bridge::domain::ports::Verb;
use stripe_bridge::domain::wallet::ApplePayOptions;
use stripe_bridge::infrastructure::in_memory::ScriptedChannel;
use stripe_bridge::interfaces::csv::item_reader::ItemReader;
use stripe_bridge::interfaces::json::frame_writer::FrameWriter;
use stripe_bridge::interfaces::json::request_reader::RequestReader;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Runs payment bridge requests against a scripted native side and prints the
/// call frames they produce.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Publishable key, sent with `setPublishableKey` before anything else.
    #[arg(long, global = true, env = "STRIPE_PUBLISHABLE_KEY")]
    publishable_key: Option<String>,

    /// Native reply to queue, as VERB=JSON. Verbs without a reply fail.
    #[arg(long = "reply", global = true, value_name = "VERB=JSON", value_parser = parse_reply)]
    replies: Vec<(Verb, Value)>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run every request of a JSON-lines file
    Requests {
        /// Input requests file, one JSON object per line
        input: PathBuf,
    },
    /// Open an Apple Pay transaction for the line items of a CSV file
    ApplePay {
        /// Line items CSV file with `label,amount` columns
        items: PathBuf,
        #[arg(long)]
        merchant_id: String,
        #[arg(long)]
        country: String,
        #[arg(long)]
        currency: String,
        #[arg(long, default_value = "production")]
        mode: String,
        /// Finalize as processed; otherwise the transaction is rolled back
        #[arg(long)]
        processed: bool,
    },
}

fn parse_reply(raw: &str) -> std::result::Result<(Verb, Value), String> {
    let (verb, json) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected VERB=JSON, got `{raw}`"))?;
    let verb = verb.parse::<Verb>().map_err(|e| e.to_string())?;
    let value = serde_json::from_str(json).map_err(|e| e.to_string())?;
    Ok((verb, value))
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .init();

    let cli = Cli::parse();

    let channel = ScriptedChannel::new();
    for (verb, value) in cli.replies {
        channel.succeed(verb, value).await;
    }
    let bridge = StripeBridge::new(Arc::new(channel.clone()));

    if let Some(key) = cli.publishable_key
        && let Err(e) = bridge.set_publishable_key(&key).await
    {
        error!("Error setting publishable key: {}", e);
    }

    match cli.command {
        Command::Requests { input } => {
            let file = File::open(input).into_diagnostic()?;
            for request in RequestReader::new(file).requests() {
                match request {
                    Ok(request) => match request.execute(&bridge).await {
                        Ok(reply) => info!(%reply, "Request completed"),
                        Err(e) => error!("Error processing request: {}", e),
                    },
                    Err(e) => error!("Error reading request: {}", e),
                }
            }
        }
        Command::ApplePay {
            items,
            merchant_id,
            country,
            currency,
            mode,
            processed,
        } => {
            let file = File::open(items).into_diagnostic()?;
            let items = ItemReader::new(file)
                .items()
                .collect::<stripe_bridge::error::Result<Vec<_>>>()
                .into_diagnostic()?;
            let options = ApplePayOptions {
                merchant_id,
                country,
                currency,
                items,
                mode,
            };

            match bridge.pay_with_apple_pay(options).await {
                Ok(transaction) => {
                    info!(token = %transaction.token().id, "Apple Pay token received");
                    let state = transaction.finalize(processed).await;
                    info!(?state, "Apple Pay transaction finalized");
                }
                Err(e) => error!("Error opening Apple Pay transaction: {}", e),
            }
        }
    }

    let stdout = io::stdout();
    let mut writer = FrameWriter::new(stdout.lock());
    writer.write_frames(channel.calls().await).into_diagnostic()?;

    Ok(())
}
