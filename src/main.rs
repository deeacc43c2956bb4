use bioview::config::{get_config, init_config};
use bioview::system::logging::init_logging;

#[cfg(feature = "cli")]
use bioview::cli::{Cli, Commands};
#[cfg(feature = "cli")]
use clap::Parser;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    #[cfg(feature = "cli")]
    let cli = Cli::parse();

    // 加载静态配置（config.toml + BV__ 环境变量）
    init_config();
    let config = get_config();

    // 必须持有 guard，否则缓冲中的日志会丢失
    let _log_guard = init_logging(&config.logging)?;

    #[cfg(feature = "cli")]
    match cli.command {
        None | Some(Commands::Serve) => {}
        Some(cmd) => {
            if let Err(e) = bioview::runtime::modes::run_cli(cmd).await {
                eprintln!("{}", e.format_colored());
                std::process::exit(1);
            }
            return Ok(());
        }
    }

    #[cfg(feature = "server")]
    if let Err(e) = bioview::runtime::modes::run_server().await {
        tracing::error!("Server exited with error: {:#}", e);
        return Err(e);
    }

    Ok(())
}
