//! # 图标生成工具 — 命令入口
//!
//! 本文件仅负责日志初始化、使用默认配置运行生成器，以及终止状态。
//! 业务逻辑见 `lib.rs` 架构文档。

use std::process::ExitCode;

use icon_generator::error::AppError;
use icon_generator::icon_handler::{GeneratedIcon, IconConfig, IconGenerator};
use icon_generator::storage;

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("图标生成失败: {err}");
            ExitCode::FAILURE
        }
    }
}

/// 每写出一个图标输出一行，供使用者确认进度。
fn saved_line(icon: &GeneratedIcon) -> String {
    format!("Saved {}", icon.path.display())
}

fn run() -> Result<(), AppError> {
    let generator = IconGenerator::new(IconConfig::default())?;

    let report = generator.generate_with_hooks(|icon| println!("{}", saved_line(icon)))?;

    let info = storage::get_output_dir_info(&generator.config().output_dir)?;
    log::info!(
        "📦 输出目录 {} - 本次生成 {} 个，目录内共 {} 个 PNG，{:.1} KB",
        info.path,
        report.icons.len(),
        info.icon_count,
        info.total_size as f64 / 1024.0
    );

    Ok(())
}
