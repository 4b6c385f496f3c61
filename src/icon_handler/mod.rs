//! # 图标生成模块（icon_handler）
//!
//! ## 设计思路
//!
//! 该模块将“源图加载校验 → 解码归一化 → 包围盒裁剪 → Lanczos 缩放 → PNG 写出”
//! 按职责拆分为多个子模块，避免单文件膨胀与耦合。
//!
//! - `handler`：编排整条处理流水线
//! - `loader`：负责本地文件加载与体积、签名校验
//! - `pipeline`：负责解码、像素限制、包围盒、裁剪与缩放
//! - `png_writer`：负责输出目录准备与 PNG 写出
//! - `config/error/source`：配置、错误、中间数据模型
//!
//! ## 新同事快速上手
//!
//! ```text
//! main.rs（日志初始化 + 默认配置）
//!    ↓
//! handler.rs（统一编排 + 阶段耗时日志）
//!    ├─ png_writer.rs（创建输出目录）
//!    ├─ loader.rs（读取源图 + 体积/签名校验）
//!    ├─ pipeline.rs（解码 + 包围盒裁剪 + 缩放）
//!    └─ png_writer.rs（逐个写出 iconN.png）
//!    ↓
//! GenerationReport / IconError
//! ```

mod config;
mod error;
mod handler;
mod loader;
mod pipeline;
mod png_writer;
mod source;

pub use config::{IconConfig, DEFAULT_ICON_SIZES};
pub use error::IconError;
pub use handler::IconGenerator;
pub use pipeline::{compute_bounding_box, crop_to_content};
pub use source::{BoundingBox, GeneratedIcon, GenerationReport};
