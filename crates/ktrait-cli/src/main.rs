//! ktrait CLI tool.

use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "ktrait")]
#[command(about = "Apply traits to integrations and build contexts", long_about = None)]
struct Cli {
    /// Operator trait configuration (KDL)
    #[arg(long, global = true, env = "KTRAIT_CONFIG")]
    config: Option<String>,

    /// Log output format
    #[arg(long, global = true, env = "KTRAIT_LOG_FORMAT", value_enum, default_value_t = LogFormat::Text)]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum LogFormat {
    Text,
    Json,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ResourceKind {
    Integration,
    Context,
}

#[derive(Subcommand)]
enum Commands {
    /// Run one trait pass over a resource and print the resulting environment
    Apply {
        /// Path to the resource (JSON)
        resource: String,
        /// Kind of resource in the file
        #[arg(long, value_enum, default_value_t = ResourceKind::Integration)]
        kind: ResourceKind,
    },
    /// Apply traits to a building context and run its build steps
    Build {
        /// Path to the build context (JSON)
        context: String,
    },
    /// Apply traits to a deploying integration and print its Deployment
    Deploy {
        /// Path to the integration (JSON)
        integration: String,
        /// Container image to run
        #[arg(long)]
        image: String,
        /// Target namespace
        #[arg(long, default_value = "default")]
        namespace: String,
    },
    /// Validate a trait configuration file
    Validate {
        /// Path to the configuration file
        #[arg(default_value = "traits.kdl")]
        path: String,
    },
}

fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    match format {
        LogFormat::Text => builder.init(),
        LogFormat::Json => builder.json().init(),
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_format);

    let config = commands::load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Apply { resource, kind } => {
            commands::apply(&config, &resource, kind)?;
        }
        Commands::Build { context } => {
            commands::build(&config, &context)?;
        }
        Commands::Deploy {
            integration,
            image,
            namespace,
        } => {
            commands::deploy(&config, &integration, &image, &namespace)?;
        }
        Commands::Validate { path } => {
            commands::validate(&path)?;
        }
    }

    Ok(())
}
