//! Command-line interface definitions using clap

use clap::Parser;

use crate::runtime::modes::Commands;

/// QRLinker - link-in-bio pages, stable QR codes and scan analytics
#[derive(Parser, Debug)]
#[command(name = "qrlinker")]
#[command(version)]
#[command(about = "Multi-tenant link-in-bio and QR redirect service", long_about = None)]
pub struct Cli {
    /// Path to config.toml (default: ./config.toml, optional)
    #[arg(long, short = 'c', global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_command_is_serve() {
        let cli = Cli::try_parse_from(["qrlinker"]).unwrap();
        assert!(cli.command.is_none());
        assert!(cli.config.is_none());
    }

    #[test]
    fn test_generate_config_args() {
        let cli =
            Cli::try_parse_from(["qrlinker", "-c", "prod.toml", "generate-config", "out.toml"])
                .unwrap();
        assert_eq!(cli.config.as_deref(), Some("prod.toml"));
        assert_eq!(
            cli.command,
            Some(Commands::GenerateConfig {
                output: Some("out.toml".to_string()),
                force: false,
            })
        );
    }
}
