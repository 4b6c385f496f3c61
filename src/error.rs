//! 统一错误类型模块
//!
//! # 设计思路
//!
//! 定义入口层统一的 `AppError` 枚举，`main` 只需处理这一种错误，
//! 并把它作为终止时的诊断信息输出。
//!
//! # 实现思路
//!
//! - 使用 `thiserror` 派生可读错误消息。
//! - 为 `IconError` 与 `std::io::Error` 提供 `From` 转换，`?` 即可上转。

use crate::icon_handler::IconError;

/// 应用级统一错误类型
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// 图标生成流水线错误（加载 / 解码 / 缩放 / 写出）
    #[error("{0}")]
    Icon(#[from] IconError),

    /// 文件系统 I/O 错误
    #[error("文件系统错误: {0}")]
    Io(#[from] std::io::Error),

    /// 输出目录不可用
    #[error("输出目录不可用: {0}")]
    Storage(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn icon_error_message_is_passed_through() {
        let err: AppError = IconError::Decode("bad header".to_string()).into();

        assert_eq!(err.to_string(), "解码错误：bad header");
    }
}
