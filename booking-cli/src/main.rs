mod cli;
mod commands;
mod logger;
mod prompt;

use std::process::ExitCode;

use anyhow::Context;
use booking_client::{App, BookingApi, FileSessionStore, SessionManager};
use clap::Parser;
use cli::Cli;
use prompt::StdinConfirm;

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    // 1. .env 必须在解析参数前加载，clap 的 env 回退才能生效
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    // 2. 日志
    logger::init_logger_with_file(cli.log_level.as_deref(), cli.log_dir.as_deref());

    // 3. 配置与会话
    let config = cli.client_config();
    tracing::debug!(base_url = %config.base_url, "booking client starting");
    let session = SessionManager::restore(FileSessionStore::new(&config.session_file));
    let api = BookingApi::connect(&config, session).context("failed to build HTTP client")?;
    let mut app = App::new(api);

    // 4. 执行命令
    let ok = match commands::run(&mut app, cli.command, &StdinConfirm).await {
        Ok(ok) => ok,
        Err(e) => {
            app.report_unhandled(&format!("{:#}", e));
            if let Some(line) = app.global_status().line() {
                eprintln!("{}", line);
            }
            false
        }
    };

    Ok(if ok { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}
