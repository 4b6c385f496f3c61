//! # 数据模型
//!
//! ## 设计思路
//!
//! 将“流水线中间结果”和“最终产物”解耦：
//! - `SourceImage` 表示已解码、已归一化为 RGBA 的源图
//! - `BoundingBox` 表示非透明内容的最小包围盒
//! - `GeneratedIcon` / `GenerationReport` 表示落盘结果

use std::path::PathBuf;

use image::RgbaImage;

/// 加载阶段输出：原始字节与来源标识。
pub(crate) struct RawImageData {
    /// 原始图片字节。
    pub(crate) bytes: Vec<u8>,
    /// 来源提示（用于日志与诊断）。
    pub(crate) source_hint: String,
}

/// 解码阶段输出：归一化后的 RGBA 源图，生成过程中只读。
pub(crate) struct SourceImage {
    pub(crate) pixels: RgbaImage,
    pub(crate) source_hint: String,
}

impl SourceImage {
    pub(crate) fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub(crate) fn height(&self) -> u32 {
        self.pixels.height()
    }
}

/// 非透明像素的最小包围盒。
///
/// `right` / `bottom` 为开区间边界，因此宽高可直接相减得到。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundingBox {
    pub left: u32,
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
}

impl BoundingBox {
    pub fn width(&self) -> u32 {
        self.right - self.left
    }

    pub fn height(&self) -> u32 {
        self.bottom - self.top
    }
}

/// 单个已写入磁盘的图标。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedIcon {
    /// 目标边长（像素）。
    pub size: u32,
    /// 输出文件路径。
    pub path: PathBuf,
    /// 写入的 PNG 字节数。
    pub bytes_written: usize,
}

/// 一次完整生成的结果汇总。
#[derive(Debug, Clone)]
pub struct GenerationReport {
    pub source_width: u32,
    pub source_height: u32,
    /// 为 `None` 时表示源图完全透明，未做裁剪。
    pub bounding_box: Option<BoundingBox>,
    /// 按尺寸列表顺序排列。
    pub icons: Vec<GeneratedIcon>,
}
