use clap::{Parser, Subcommand};
use colored::*;
use std::path::PathBuf;
use std::process;

use calculator_cli::logging::init_logging;
use calculator_cli::{run_server, Config};
use calculator_core::{ArithmeticEvaluator, Evaluator};

#[derive(Parser)]
#[command(name = "calculator")]
#[command(about = "Calculator service - projects of arithmetic calculations over a REST API")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        #[arg(long, help = "Port to listen on (overrides CALCULATOR_PORT)")]
        port: Option<u16>,
        #[arg(long, help = "Address to bind (overrides CALCULATOR_HOST)")]
        host: Option<String>,
        #[arg(long, help = "SQLite database file (overrides CALCULATOR_DATABASE_PATH)")]
        database: Option<PathBuf>,
    },
    /// Evaluate a single expression and print the result
    Eval {
        /// Expression such as "(1 + 2) * 3"
        expression: String,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    match handle_command(cli.command).await {
        Ok(_) => {}
        Err(e) => {
            eprintln!("{} {:#}", "Error:".red().bold(), e);
            process::exit(1);
        }
    }
}

async fn handle_command(command: Commands) -> anyhow::Result<()> {
    match command {
        Commands::Serve {
            port,
            host,
            database,
        } => {
            dotenvy::dotenv().ok();
            init_logging();

            let config = Config::from_env()?.with_overrides(port, host.as_deref(), database)?;

            println!(
                "{} Starting calculator server on {}",
                "▶".green(),
                format!("http://{}", config.socket_addr()).cyan()
            );
            println!("  Database: {}", config.database_path.display());

            run_server(config).await
        }
        Commands::Eval { expression } => {
            let value = ArithmeticEvaluator.evaluate(&expression)?;
            println!("{} = {}", expression.bold(), value.to_string().green());
            Ok(())
        }
    }
}
