use crate::error::InitProcessError;
use env_logger::{Builder, Target};
use log::LevelFilter;
use std::io::Write;

pub fn setup_logger(level: LevelFilter) -> Result<(), InitProcessError> {
    // 標準出力は検索結果のJSONに使うため、ログは標準エラーへ出す
    Builder::new()
        .filter_level(level)
        .format(|buf, record| {
            writeln!(
                buf,
                "{} [{}] {} - {}",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
                record.level(),
                record.target(),
                record.args()
            )
        })
        .target(Target::Stderr)
        .try_init()
        .map_err(|e| InitProcessError::LoggerError(e.to_string()))
}
