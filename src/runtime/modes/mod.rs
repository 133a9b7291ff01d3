//! Mode routing
//!
//! - Server mode (HTTP server, default)
//! - Generate-config mode (prints or writes a sample config.toml)

pub mod server;

pub use server::run_server;

use anyhow::{Context, Result};
use clap::Subcommand;

use crate::config::StaticConfig;

/// Available commands
#[derive(Subcommand, Debug, PartialEq)]
pub enum Commands {
    /// Start the HTTP server (default)
    Serve,

    /// Write a sample configuration file
    GenerateConfig {
        /// Output file path (default: stdout)
        output: Option<String>,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

/// 生成示例配置
pub fn run_generate_config(output: Option<&str>, force: bool) -> Result<()> {
    let sample = StaticConfig::generate_sample_config();
    match output {
        None => {
            println!("{}", sample);
            Ok(())
        }
        Some(path) => {
            if std::path::Path::new(path).exists() && !force {
                anyhow::bail!("{} already exists, use --force to overwrite", path);
            }
            std::fs::write(path, sample).with_context(|| format!("Failed to write {}", path))?;
            println!("Sample configuration written to {}", path);
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_config_refuses_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let path = path.to_str().unwrap();

        run_generate_config(Some(path), false).unwrap();
        assert!(std::fs::read_to_string(path).unwrap().contains("[server]"));
        assert!(run_generate_config(Some(path), false).is_err());
        assert!(run_generate_config(Some(path), true).is_ok());
    }
}
