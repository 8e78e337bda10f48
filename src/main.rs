//! Entry point for the `ts-catalog` command.

use std::path::Path;
use std::process::ExitCode;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use ts_catalog::cli::{
    self,
    Cli,
};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = match Cli::parse(std::env::args_os().skip(1).collect()) {
        Ok(cli) => cli,
        Err(e) => {
            print_error(&cli::usage_error(&e));
            return ExitCode::from(2);
        }
    };

    let _guard = init_tracing(cli.log_file.as_deref());

    let mut stdout = std::io::stdout().lock();
    match cli::run(cli.command, &mut stdout).await {
        Ok(outcome) => outcome.into(),
        Err(e) => {
            tracing::error!("{e}");
            print_error(&e.to_string());
            ExitCode::FAILURE
        }
    }
}

#[allow(clippy::print_stderr)] // ログ設定に関係なく利用者に表示する
fn print_error(message: &str) {
    eprintln!("error: {message}");
}

/// tracing を初期化する（`RUST_LOG` で上書き可能、デフォルトは warn）
///
/// ログファイルが指定された場合は non-blocking writer で書き込む。
/// 返り値のガードが drop されるまでログがフラッシュされる。
fn init_tracing(log_file: Option<&Path>) -> Option<WorkerGuard> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    let file = log_file.and_then(|path| {
        let name = path.file_name()?;
        let directory = path.parent().filter(|p| !p.as_os_str().is_empty()).unwrap_or(Path::new("."));
        Some(tracing_appender::rolling::never(directory, name))
    });

    match file {
        Some(appender) => {
            let (writer, guard) = tracing_appender::non_blocking(appender);
            builder.with_writer(writer).with_ansi(false).init();
            Some(guard)
        }
        None => {
            builder.with_writer(std::io::stderr).init();
            None
        }
    }
}
