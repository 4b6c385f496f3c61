//! # 图标生成工具 — 库入口
//!
//! ## 架构总览
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │  main.rs   env_logger 初始化 · 默认配置 · "Saved <path>"  │
//! └───────┬──────────────────────────────────────────────────┘
//!         ↓ Result<(), AppError>
//! ┌───────┼──────────────────────────────────────────────────┐
//! │  ┌─ error ────────── AppError (入口层统一错误)            │
//! │  ├─ icon_handler ─── 加载 → RGBA → 裁剪 → 缩放 → PNG      │
//! │  └─ storage ──────── 输出目录摘要                         │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! ## 模块职责
//!
//! | 模块 | 职责 |
//! |------|------|
//! | [`error`] | 统一错误类型 `AppError`，入口层的返回类型 |
//! | [`icon_handler`] | 从单张源图裁掉透明边并生成多尺寸 PNG 图标 |
//! | [`storage`] | 输出目录中图标数量与占用大小的统计 |

pub mod error;
pub mod icon_handler;
pub mod storage;
