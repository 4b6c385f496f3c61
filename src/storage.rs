//! 输出目录信息模块
//!
//! # 设计思路
//!
//! 生成结束后汇总输出目录中的图标数量与占用大小，供入口层输出摘要日志。
//!
//! # 实现思路
//!
//! - 只统计 `.png` 普通文件，其他文件不计入。
//! - 目录不存在或不是目录时返回 `AppError::Storage`，不使用 `expect()` / `unwrap()`。

use std::fs;
use std::path::Path;

use crate::error::AppError;

/// 输出目录信息
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputDirInfo {
    pub path: String,
    pub total_size: u64,
    pub icon_count: u64,
}

/// 获取输出目录信息（路径 + PNG 占用大小 + PNG 文件数）
pub fn get_output_dir_info(dir: &Path) -> Result<OutputDirInfo, AppError> {
    if !dir.is_dir() {
        return Err(AppError::Storage(format!("'{}' 不是目录", dir.display())));
    }

    let mut total_size: u64 = 0;
    let mut icon_count: u64 = 0;

    for entry in fs::read_dir(dir)?.flatten() {
        let path = entry.path();
        let is_png = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("png"));
        if !is_png {
            continue;
        }

        if let Ok(metadata) = entry.metadata() {
            if metadata.is_file() {
                total_size += metadata.len();
                icon_count += 1;
            }
        }
    }

    Ok(OutputDirInfo {
        path: dir.to_string_lossy().to_string(),
        total_size,
        icon_count,
    })
}
