use clap::{Parser, Subcommand};
use reqwest::header::{HeaderValue, CONTENT_TYPE};
use serde_json::Value;

use captions_relay::routing::{find_route, ROUTES};

#[derive(Parser)]
#[command(name = "relay-cli")]
#[command(about = "Call the Captions relay from the terminal", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:5000")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List relayed routes
    Routes,
    /// POST a JSON body to a route
    Call {
        /// Route path, e.g. twin/list or /twin/list
        route: String,

        /// JSON body; omitted means no body
        #[arg(short, long)]
        body: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Routes => {
            for route in ROUTES {
                println!("{:<10} POST {}", route.family(), route.external);
            }
        }
        Commands::Call { route, body } => {
            let Some(binding) = find_route(&route) else {
                eprintln!("Error: unknown route '{}'; see `relay-cli routes`", route);
                std::process::exit(2);
            };

            let mut request = reqwest::Client::new()
                .post(format!("{}{}", cli.url.trim_end_matches('/'), binding.external));
            if let Some(body) = body {
                request = request
                    .header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
                    .body(body);
            }

            print_response(request.send().await?).await?;
        }
    }

    Ok(())
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    if !status.is_success() {
        eprintln!("Error: relay returned status {}", status);
    } else {
        eprintln!("Status: {}", status);
    }

    let text = res.text().await?;
    match serde_json::from_str::<Value>(&text) {
        Ok(json) => println!("{}", serde_json::to_string_pretty(&json)?),
        Err(_) => println!("{}", text),
    }
    Ok(())
}
