use clap::{Parser, Subcommand};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use serde_json::{json, Value};

#[derive(Parser)]
#[command(name = "faucet-cli")]
#[command(about = "Client for the faucet service", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:8080")]
    url: String,

    /// Admin API key, needed for enable/disable.
    #[arg(short, long, default_value = "")]
    key: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List faucets and their state
    List,
    /// Send native funds
    Native {
        faucet: String,
        target: String,
        /// Amount in wei
        amount: String,
    },
    /// Send the faucet's token; amount is given in wei and scaled down
    Token {
        faucet: String,
        target: String,
        amount: String,
    },
    /// Open a faucet's gate
    Enable { faucet: String },
    /// Close a faucet's gate
    Disable { faucet: String },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();

    let mut headers = HeaderMap::new();
    if !cli.key.is_empty() {
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", cli.key))?,
        );
    }

    let res = match cli.command {
        Commands::List => client.get(format!("{}/v1/faucets", cli.url)).send().await?,
        Commands::Native {
            faucet,
            target,
            amount,
        } => {
            client
                .post(format!("{}/v1/faucets/{}/native", cli.url, faucet))
                .json(&json!({ "target": target, "amount": amount }))
                .send()
                .await?
        }
        Commands::Token {
            faucet,
            target,
            amount,
        } => {
            client
                .post(format!("{}/v1/faucets/{}/token", cli.url, faucet))
                .json(&json!({ "target": target, "amount": amount }))
                .send()
                .await?
        }
        Commands::Enable { faucet } => {
            client
                .post(format!("{}/admin/faucets/{}/enable", cli.url, faucet))
                .headers(headers)
                .send()
                .await?
        }
        Commands::Disable { faucet } => {
            client
                .post(format!("{}/admin/faucets/{}/disable", cli.url, faucet))
                .headers(headers)
                .send()
                .await?
        }
    };

    print_response(res).await
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    if !status.is_success() {
        eprintln!("Error: faucet service returned status {}", status);
        if let Ok(text) = res.text().await {
            eprintln!("Response: {}", text);
        }
        std::process::exit(1);
    }

    let json: Value = res.json().await?;
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}
