//! Command-line interface.
//!
//! - `pathway serve`: run the HTTP service
//! - `pathway convert <legacy.json> <out.pwm>`: rewrite a legacy artifact
//!   in the native format
//! - `pathway inspect <artifact>`: describe an artifact of either format

pub mod convert;
pub mod exit_code;
pub mod inspect;
pub mod serve;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Pathway - student outcome prediction service
#[derive(Debug, Parser)]
#[command(name = "pathway")]
#[command(version)]
#[command(about = "Predicts whether a student will drop out, remain enrolled, or graduate")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Config file (default: ./pathway.toml when present)
    #[arg(short, long, global = true, env = "PATHWAY_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Load the model and serve predictions over HTTP
    Serve(serve::ServeArgs),
    /// Decode a legacy artifact and write it in the native format
    Convert(convert::ConvertArgs),
    /// Print what an artifact contains and which strategy decodes it
    Inspect(inspect::InspectArgs),
}

/// Dispatch to the command and return the process exit code.
pub async fn run(cli: Cli) -> i32 {
    let config_path = cli.config.as_deref();
    match cli.command {
        Commands::Serve(args) => serve::run(args, config_path).await,
        Commands::Convert(args) => convert::run(args, config_path),
        Commands::Inspect(args) => inspect::run(args, config_path),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_serve_overrides() {
        let cli = Cli::try_parse_from([
            "pathway", "serve", "--port", "8080", "--model-dir", "/srv/models",
        ])
        .unwrap();
        let Commands::Serve(args) = cli.command else {
            panic!("expected serve");
        };
        let overrides = args.overrides();
        assert_eq!(overrides.port, Some(8080));
        assert_eq!(overrides.model_dir.as_deref(), Some("/srv/models"));
        assert!(overrides.host.is_none());
    }

    #[test]
    fn parses_convert_and_inspect() {
        let cli = Cli::try_parse_from(["pathway", "convert", "old.json", "new.pwm"]).unwrap();
        assert!(matches!(cli.command, Commands::Convert(_)));
        let cli = Cli::try_parse_from(["pathway", "--config", "p.toml", "inspect", "m.pwm"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("p.toml")));
        assert!(matches!(cli.command, Commands::Inspect(_)));
    }

    #[test]
    fn convert_requires_both_paths() {
        assert!(Cli::try_parse_from(["pathway", "convert", "old.json"]).is_err());
    }
}
