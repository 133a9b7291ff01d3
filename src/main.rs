use anyhow::Result;
use clap::Parser;

use qrlinker::cli::Cli;
use qrlinker::config::{get_config, init_config_from};
use qrlinker::errors::QrLinkerError;
use qrlinker::runtime::modes::{self, Commands};
use qrlinker::system::logging::init_logging;

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(Commands::GenerateConfig { output, force }) = &cli.command {
        return modes::run_generate_config(output.as_deref(), *force);
    }

    dotenvy::dotenv().ok();
    init_config_from(cli.config.as_deref());
    let config = get_config();

    // guard 需存活到进程结束
    let _log_guard = init_logging(&config.logging);

    let result = actix_web::rt::System::new().block_on(modes::run_server());
    if let Err(e) = &result
        && let Some(inner) = e.downcast_ref::<QrLinkerError>()
    {
        eprintln!("{}", inner.format_colored());
    }
    result
}
