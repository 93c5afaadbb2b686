//! fwpub - firmware artifact publisher.
//!
//! Runs after the firmware build finishes:
//! - copies `firmware.bin` to `<release>/<project>-v<version>.bin`
//! - copies the first SPIFFS/LittleFS image to `<release>/<project>-fs-v<version>.bin`
//! - writes `<release>/version.json`

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use fwpub::commands;
use fwpub::config::{Overrides, PublishConfig, PublishMode};

#[derive(Parser)]
#[command(name = "fwpub")]
#[command(about = "Publish firmware build output as versioned release artifacts")]
#[command(
    after_help = "QUICK START:\n  fwpub publish --env esp32dev   Publish .pio/build/esp32dev\n  fwpub show config               Show resolved configuration\n  fwpub show manifest             Show firmware/version.json"
)]
struct Cli {
    /// Enable debug output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Copy build artifacts into the release directory and write the manifest
    Publish {
        #[command(flatten)]
        paths: PathArgs,

        /// Project name (default: [project] project_name in the project config)
        #[arg(long)]
        project_name: Option<String>,

        /// Version (default: [project] version in the project config, then "dev")
        #[arg(long = "version")]
        version: Option<String>,

        /// Missing firmware handling (default: strict)
        #[arg(long, value_enum)]
        mode: Option<PublishMode>,
    },

    /// Show information
    Show {
        #[command(subcommand)]
        what: ShowTarget,
    },
}

#[derive(Subcommand)]
enum ShowTarget {
    /// Show resolved configuration
    Config {
        #[command(flatten)]
        paths: PathArgs,
    },
    /// Show the manifest in the release directory
    Manifest {
        #[command(flatten)]
        paths: PathArgs,
    },
}

#[derive(Args, Clone, Default)]
struct PathArgs {
    /// Project directory (default: $PROJECT_DIR, then the current directory)
    #[arg(long)]
    project_dir: Option<PathBuf>,

    /// Build output directory (default: $BUILD_DIR, then <project>/.pio/build)
    #[arg(long)]
    build_dir: Option<PathBuf>,

    /// Target environment; artifacts are read from <build-dir>/<env>
    #[arg(short, long = "env")]
    env_name: Option<String>,

    /// Release directory (default: $RELEASE_DIR, then <project>/firmware)
    #[arg(long)]
    release_dir: Option<PathBuf>,

    /// Project configuration file (default: <project>/platformio.ini)
    #[arg(long = "config")]
    config_file: Option<PathBuf>,
}

impl PathArgs {
    fn into_overrides(self) -> Overrides {
        Overrides {
            project_dir: self.project_dir,
            build_dir: self.build_dir,
            env_name: self.env_name,
            release_dir: self.release_dir,
            config_file: self.config_file,
            ..Default::default()
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(if cli.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        })
        .with_target(false)
        .init();

    match cli.command {
        Commands::Publish {
            paths,
            project_name,
            version,
            mode,
        } => {
            let config = PublishConfig::load(Overrides {
                project_name,
                version,
                mode,
                ..paths.into_overrides()
            })?;
            commands::cmd_publish(&config)?;
        }

        Commands::Show { what } => {
            let (target, paths) = match what {
                ShowTarget::Config { paths } => (commands::show::ShowTarget::Config, paths),
                ShowTarget::Manifest { paths } => (commands::show::ShowTarget::Manifest, paths),
            };
            let config = PublishConfig::load(paths.into_overrides())?;
            commands::cmd_show(target, &config)?;
        }
    }

    Ok(())
}
