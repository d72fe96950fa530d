//! Application entry point: AI Doctor with Vision and Voice.
//!
//! # Startup sequence
//!
//! 1. Initialise logging.
//! 2. Parse the command line.
//! 3. Load [`AppConfig`] from disk (returns default on first run).
//! 4. Read [`Credentials`] from the environment (`.env` honoured) and warn
//!    about missing keys.
//! 5. Build the [`SessionOrchestrator`].
//! 6. Either serve the web page (default) or run a single consultation.

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use voice_of_the_doctor::{
    config::{AppConfig, AppPaths, Credentials},
    pipeline::SessionOrchestrator,
    playback, server,
};

#[derive(Parser)]
#[command(name = "doctor", about = "AI doctor with vision and voice")]
struct Cli {
    /// Settings file (defaults to the platform config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the web interface (default)
    Serve {
        /// Address to bind (overrides config)
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on (overrides config)
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Run one consultation from files and print the result
    Consult {
        /// Recorded question
        #[arg(short, long)]
        audio: Option<PathBuf>,

        /// Image to analyse
        #[arg(short, long)]
        image: Option<PathBuf>,

        /// Play the spoken reply after printing it
        #[arg(long)]
        play: bool,
    },
    /// Print the settings path and the effective configuration
    Config,
}

fn main() -> anyhow::Result<()> {
    // 1. Logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // 2. Command line
    let cli = Cli::parse();

    // 3. Configuration
    let settings_path = cli
        .config
        .clone()
        .unwrap_or_else(|| AppPaths::new().settings_file);
    let mut config = AppConfig::load_from(&settings_path).unwrap_or_else(|e| {
        log::warn!("Failed to load config ({e}); using defaults");
        AppConfig::default()
    });

    let command = cli.command.unwrap_or(Commands::Serve {
        host: None,
        port: None,
    });

    match command {
        Commands::Config => {
            println!("# {}", settings_path.display());
            print!("{}", toml::to_string_pretty(&config)?);
        }
        Commands::Serve { host, port } => {
            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(port) = port {
                config.server.port = port;
            }
            let (rt, orchestrator) = startup(&config)?;
            rt.block_on(server::start_server(&config.server, orchestrator))?;
        }
        Commands::Consult { audio, image, play } => {
            let (rt, orchestrator) = startup(&config)?;
            rt.block_on(async {
                let out = orchestrator
                    .process(audio.as_deref(), image.as_deref())
                    .await;

                println!("Your Question (Speech to Text):\n{}\n", out.transcript);
                println!("Doctor's Analysis:\n{}\n", out.analysis);
                match &out.audio {
                    Some(path) => println!("Doctor's Voice Response:\n{}", path.display()),
                    None => println!("Doctor's Voice Response:\n(none)"),
                }

                if let (true, Some(path)) = (play, &out.audio) {
                    if let Err(e) = playback::play(path).await {
                        log::warn!("An error occurred while trying to play the audio: {e}");
                    }
                }
            });
        }
    }

    Ok(())
}

/// Steps 4-5: credentials, orchestrator and the tokio runtime.
fn startup(
    config: &AppConfig,
) -> anyhow::Result<(tokio::runtime::Runtime, Arc<SessionOrchestrator>)> {
    let credentials = Credentials::from_env();
    credentials.report();

    let orchestrator = Arc::new(SessionOrchestrator::from_config(config, &credentials));

    let rt = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    Ok((rt, orchestrator))
}
