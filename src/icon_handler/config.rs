//! # 配置模块
//!
//! ## 设计思路
//!
//! 将源图路径、输出目录、尺寸列表与资源上限集中到 `IconConfig`，
//! 取代进程级常量，保证运行时行为可观测、可调整、可测试。
//!
//! ## 实现思路
//!
//! - `Default` 提供与脚本行为一致的默认值（`icon.png` / `icons` / 7 个尺寸）。
//! - `validate` 在生成开始前拒绝非法尺寸，避免写到一半才失败。
//! - `output_path_for` 负责尺寸到文件名的唯一映射。

use std::collections::HashSet;
use std::path::PathBuf;

use super::IconError;

/// 默认生成的图标边长列表。
pub const DEFAULT_ICON_SIZES: [u32; 7] = [16, 24, 32, 48, 64, 128, 256];

/// 默认像素上限，与 PIL 的解压炸弹阈值一致（约 1.79 亿像素）。
pub const MAX_DECODED_PIXELS: u64 = 178_956_970;

/// 图标生成配置。
///
/// 字段覆盖了输入、输出、尺寸列表与解码/缩放阶段的资源限制。
#[derive(Debug, Clone)]
pub struct IconConfig {
    /// 源图路径。
    pub source_path: PathBuf,
    /// 输出目录，不存在时自动创建（含父目录）。
    pub output_dir: PathBuf,
    /// 目标边长列表，按顺序生成。
    pub sizes: Vec<u32>,
    /// 读取源图时允许的最大文件体积（字节）。
    pub max_file_size: u64,
    /// 解码后的像素上限（`width * height`）。
    pub max_decoded_pixels: u64,
    /// 解码阶段允许的预计内存上限（按 RGBA 估算，字节）。
    pub max_decoded_bytes: u64,
    /// 是否优先使用 `fast_image_resize`，关闭时直接走 `image::imageops`。
    pub fast_resize: bool,
}

impl Default for IconConfig {
    fn default() -> Self {
        Self {
            source_path: PathBuf::from("icon.png"),
            output_dir: PathBuf::from("icons"),
            sizes: DEFAULT_ICON_SIZES.to_vec(),
            max_file_size: 1024 * 1024 * 1024,
            max_decoded_pixels: MAX_DECODED_PIXELS,
            max_decoded_bytes: MAX_DECODED_PIXELS * 4,
            fast_resize: true,
        }
    }
}

impl IconConfig {
    /// 以默认尺寸与限制构造，仅替换输入/输出路径。
    ///
    /// # 示例
    /// ```rust
    /// use icon_generator::icon_handler::IconConfig;
    ///
    /// let config = IconConfig::for_paths("assets/logo.png", "build/icons");
    /// assert_eq!(config.sizes.len(), 7);
    /// ```
    pub fn for_paths(source_path: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            source_path: source_path.into(),
            output_dir: output_dir.into(),
            ..Self::default()
        }
    }

    /// 校验尺寸列表。
    ///
    /// 空列表合法（不产生任何文件）；0 与重复值被拒绝。
    ///
    /// 内存保护：单个图标的 RGBA 缓冲（`size * size * 4`）不得超过 `max_decoded_bytes`。
    pub fn validate(&self) -> Result<(), IconError> {
        let mut seen = HashSet::with_capacity(self.sizes.len());

        for &size in &self.sizes {
            if size == 0 {
                return Err(IconError::InvalidConfig("图标尺寸必须为正整数".to_string()));
            }
            let icon_bytes = (size as u64) * (size as u64) * 4;
            if icon_bytes > self.max_decoded_bytes {
                return Err(IconError::ResourceLimit(format!(
                    "图标尺寸过大：{}（RGBA 缓冲 {:.2} MB，限制：{:.2} MB）",
                    size,
                    icon_bytes as f64 / 1024.0 / 1024.0,
                    self.max_decoded_bytes as f64 / 1024.0 / 1024.0
                )));
            }
            if !seen.insert(size) {
                return Err(IconError::InvalidConfig(format!(
                    "图标尺寸重复：{}（同一尺寸会覆盖同一个输出文件）",
                    size
                )));
            }
        }

        Ok(())
    }

    /// 尺寸对应的输出路径：`<output_dir>/icon<size>.png`。
    ///
    /// # 示例
    /// ```rust
    /// use icon_generator::icon_handler::IconConfig;
    ///
    /// let config = IconConfig::default();
    /// assert!(config.output_path_for(48).ends_with("icon48.png"));
    /// ```
    pub fn output_path_for(&self, size: u32) -> PathBuf {
        self.output_dir.join(format!("icon{}.png", size))
    }
}
