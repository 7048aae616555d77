use tracing_appender::non_blocking::WorkerGuard;

use crate::config::AppConfig;

/// 初始化日志：开发环境输出文件与行号，其他环境输出 JSON
///
/// 返回的 guard 需要保持到进程结束，否则缓冲中的日志会丢失。
pub fn init_tracing(config: &AppConfig) -> WorkerGuard {
    let (writer, guard) = tracing_appender::non_blocking(std::io::stdout());
    let filter = tracing_subscriber::EnvFilter::new(&config.app.log_level);
    let format = tracing_subscriber::fmt::format()
        .with_level(true)
        .with_ansi(true);

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .event_format(format);

    if config.is_development() {
        builder.with_file(true).with_line_number(true).init();
    } else {
        builder.json().init();
    }

    guard
}
