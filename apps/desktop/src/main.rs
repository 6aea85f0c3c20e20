use anyhow::{bail, Result};
use clap::Parser;
use client_core::AdvisoryClient;

/// Headless advisory client: performs one round-trip and prints the result.
#[derive(Parser, Debug)]
struct Args {
    /// Server base URL; falls back to ADVISOR_SERVER_URL, then localhost.
    #[arg(long)]
    server_url: Option<String>,
    /// Crop to request an organic cultivation guide for.
    #[arg(long)]
    crop: Option<String>,
    /// Request a yield optimization guide instead of organic guidance.
    #[arg(long)]
    yield_optimization: bool,
    /// Disease name to request a solution for.
    #[arg(long)]
    disease: Option<String>,
    /// Free-form question for the advisor chat.
    #[arg(long)]
    ask: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt().init();
    let args = Args::parse();

    let server_url = args
        .server_url
        .or_else(|| std::env::var("ADVISOR_SERVER_URL").ok())
        .unwrap_or_else(|| "http://127.0.0.1:5000".to_string());
    let client = AdvisoryClient::new(server_url);

    if let Some(crop) = args.crop {
        let guide = if args.yield_optimization {
            client.yield_optimization(&crop).await?
        } else {
            client.organic_guidance(&crop).await?
        };
        println!("{guide}");
    } else if let Some(disease) = args.disease {
        println!("{}", client.disease_solution(&disease).await?);
    } else if let Some(question) = args.ask {
        println!("{}", client.advisor_chat(&question).await?);
    } else {
        bail!("nothing to request: pass --crop, --disease, or --ask");
    }

    Ok(())
}
