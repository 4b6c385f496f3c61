//! # PNG 写出模块
//!
//! ## 设计思路
//!
//! 先在内存中完成 PNG 编码，再一次性写入目标路径：
//! 编码失败时不会在磁盘上留下半截文件，已存在的同名文件被直接覆盖。

use image::{ImageFormat, RgbaImage};
use std::io::Cursor;
use std::path::Path;

use super::{IconError, IconGenerator};

impl IconGenerator {
    /// 确保输出目录存在（含父目录），重复调用不会报错。
    pub(super) fn prepare_output_dir(dir: &Path) -> Result<(), IconError> {
        if dir.is_dir() {
            return Ok(());
        }

        std::fs::create_dir_all(dir).map_err(|e| {
            IconError::FileSystem(format!("创建输出目录 '{}' 失败：{}", dir.display(), e))
        })?;

        log::info!("📂 已创建输出目录: {}", dir.display());
        Ok(())
    }

    /// 编码为 PNG 并写入 `path`，返回写入的字节数。
    pub(super) fn write_png(image: &RgbaImage, path: &Path) -> Result<usize, IconError> {
        let mut buf = Cursor::new(Vec::new());
        image
            .write_to(&mut buf, ImageFormat::Png)
            .map_err(|e| IconError::Encode(format!("PNG 编码失败：{}", e)))?;

        let bytes = buf.into_inner();
        std::fs::write(path, &bytes).map_err(|e| {
            IconError::FileSystem(format!("写入图标 '{}' 失败：{}", path.display(), e))
        })?;

        Ok(bytes.len())
    }
}
