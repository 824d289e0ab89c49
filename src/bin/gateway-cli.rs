use clap::{Parser, Subcommand};
use reqwest::header::CONTENT_TYPE;
use serde_json::Value;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "gateway-cli")]
#[command(about = "Command-line client for the optimizer gateway", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:8080")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Send a JSON payload file to the optimize endpoint
    Optimize {
        /// File holding a JSON object
        file: PathBuf,
    },
    /// Dump the Prometheus metrics page
    Metrics {
        #[arg(long, default_value = "http://localhost:9090")]
        metrics_url: String,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();

    match cli.command {
        Commands::Optimize { file } => {
            let payload = std::fs::read(&file)?;
            // Fail locally rather than round-tripping an obvious mistake.
            serde_json::from_slice::<serde_json::Map<String, Value>>(&payload)?;

            let res = client
                .post(format!("{}/routes/optimize", cli.url.trim_end_matches('/')))
                .header(CONTENT_TYPE, "application/json")
                .body(payload)
                .send()
                .await?;
            print_response(res).await?;
        }
        Commands::Metrics { metrics_url } => {
            let res = client.get(metrics_url).send().await?;
            print_response(res).await?;
        }
    }

    Ok(())
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    let text = res.text().await?;

    if !status.is_success() {
        eprintln!("Error: gateway returned status {}", status);
        eprintln!("Response: {}", text);
        return Ok(());
    }

    match serde_json::from_str::<Value>(&text) {
        Ok(json) => println!("{}", serde_json::to_string_pretty(&json)?),
        Err(_) => println!("{}", text),
    }
    Ok(())
}
