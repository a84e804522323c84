//! Command-line access to the research tools.
//!
//! ```text
//! research-tools list
//! research-tools schema
//! research-tools call wikipedia --args '{"topic": "Ada Lovelace"}'
//! ```

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing::error;
use tracing_subscriber::EnvFilter;

use research_tools::{assemble_tools, ResearchToolsConfig};

#[derive(Debug, Parser)]
#[command(name = "research-tools")]
#[command(about = "Run web search, page fetch, Wikipedia and arXiv tools from the shell")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List the available tools in registry order
    List,

    /// Print the function-calling definitions of every tool as JSON
    Schema,

    /// Call one tool and print its JSON output
    Call {
        /// Tool name (see `list`)
        tool: String,

        /// Tool arguments as a JSON object
        #[arg(long, default_value = "{}")]
        args: String,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("research_tools=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let registry = assemble_tools(&ResearchToolsConfig::from_env());

    match args.command {
        Command::List => {
            for (name, description) in registry.get_descriptions() {
                println!("{:<14} {}", name, description);
            }
            ExitCode::SUCCESS
        }
        Command::Schema => {
            let definitions = serde_json::Value::Array(registry.definitions());
            println!("{:#}", definitions);
            ExitCode::SUCCESS
        }
        Command::Call { tool, args } => match registry.execute_json(&tool, &args).await {
            Ok(output) => {
                println!("{}", output.content);
                if output.success {
                    ExitCode::SUCCESS
                } else {
                    ExitCode::from(2)
                }
            }
            Err(e) => {
                error!("{}", e);
                ExitCode::FAILURE
            }
        },
    }
}
