use clap::{Parser, Subcommand};
use serde_json::{json, Value};

#[derive(Parser)]
#[command(name = "users-cli")]
#[command(about = "Command-line client for the users API", long_about = None)]
struct Cli {
    #[arg(short, long, env = "USERS_API_URL", default_value = "http://localhost:8082")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a user and print its id
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long, allow_negative_numbers = true)]
        age: i64,
    },
    /// Show one user
    Get { id: String },
    /// List every user
    List,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();
    let base = cli.url.trim_end_matches('/');

    let res = match cli.command {
        Commands::Create { name, email, age } => {
            client
                .post(format!("{base}/api/users"))
                .json(&json!({ "name": name, "email": email, "age": age }))
                .send()
                .await?
        }
        Commands::Get { id } => client.get(format!("{base}/api/users/{id}")).send().await?,
        Commands::List => client.get(format!("{base}/api/users")).send().await?,
    };

    print_response(res).await
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    let text = res.text().await?;

    if !status.is_success() {
        eprintln!("Error: users API returned status {}", status);
        eprintln!("Response: {}", text);
        std::process::exit(1);
    }

    let json: Value = serde_json::from_str(&text)?;
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}
