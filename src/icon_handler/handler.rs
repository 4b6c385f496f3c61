//! # 核心编排模块
//!
//! ## 设计思路
//!
//! `IconGenerator` 只负责流程编排与配置持有，不直接与终端输出绑定。
//! 处理链路固定为：
//! 1. 确保输出目录存在
//! 2. 加载源图原始字节
//! 3. 解码并归一化为 RGBA
//! 4. 计算包围盒并裁剪
//! 5. 按尺寸列表逐个缩放、写出、回调
//!
//! ## 实现思路
//!
//! - 配置在构造时校验一次，之后只读。
//! - 裁剪结果只以 `&RgbaImage` 借给每次缩放，循环内不做任何修改。
//! - 记录 `load/decode/crop/resize/write/total` 阶段耗时，便于性能诊断。
//! - 任一步失败立即返回，已写出的文件保留在磁盘上。

use std::time::{Duration, Instant};

use super::pipeline::{compute_bounding_box, crop_to_content};
use super::source::{GeneratedIcon, GenerationReport};
use super::{IconConfig, IconError};

/// 图标生成器。
pub struct IconGenerator {
    config: IconConfig,
}

impl IconGenerator {
    /// 根据配置创建生成器，非法尺寸在此处即被拒绝。
    ///
    /// # 示例
    /// ```rust
    /// use icon_generator::icon_handler::{IconConfig, IconGenerator};
    ///
    /// let generator = IconGenerator::new(IconConfig::default())?;
    /// assert_eq!(generator.config().sizes.len(), 7);
    /// # Ok::<(), icon_generator::icon_handler::IconError>(())
    /// ```
    pub fn new(config: IconConfig) -> Result<Self, IconError> {
        config.validate()?;

        if config.sizes.is_empty() {
            log::warn!("⚠️ 尺寸列表为空，本次不会生成任何图标");
        }

        Ok(Self { config })
    }

    pub fn config(&self) -> &IconConfig {
        &self.config
    }

    /// 生成全部图标。
    pub fn generate(&self) -> Result<GenerationReport, IconError> {
        self.generate_with_hooks(|_| {})
    }

    /// 生成全部图标，每写出一个文件调用一次 `on_saved`。
    ///
    /// # 示例
    /// ```rust,no_run
    /// use icon_generator::icon_handler::{IconConfig, IconGenerator};
    ///
    /// let generator = IconGenerator::new(IconConfig::for_paths("icon.png", "icons"))?;
    /// generator.generate_with_hooks(|icon| println!("Saved {}", icon.path.display()))?;
    /// # Ok::<(), icon_generator::icon_handler::IconError>(())
    /// ```
    pub fn generate_with_hooks<F>(&self, mut on_saved: F) -> Result<GenerationReport, IconError>
    where
        F: FnMut(&GeneratedIcon),
    {
        let config = &self.config;
        let total_start = Instant::now();

        Self::prepare_output_dir(&config.output_dir)?;

        let load_start = Instant::now();
        let raw = self.load_from_file(&config.source_path, config)?;
        let load_elapsed = load_start.elapsed();

        let decode_start = Instant::now();
        let source = self.decode_to_rgba(raw, config)?;
        let decode_elapsed = decode_start.elapsed();
        let (source_width, source_height) = (source.width(), source.height());
        log::debug!(
            "🎨 源图已归一化为 RGBA8 - 来源: {} 尺寸: {}x{}",
            source.source_hint,
            source_width,
            source_height
        );

        let crop_start = Instant::now();
        let bounding_box = compute_bounding_box(&source.pixels);
        match bounding_box {
            Some(b) => log::info!(
                "✂️ 内容包围盒: ({}, {}, {}, {}) -> {}x{}",
                b.left,
                b.top,
                b.right,
                b.bottom,
                b.width(),
                b.height()
            ),
            None => log::info!("✂️ 源图完全透明，跳过裁剪"),
        }
        let cropped = crop_to_content(source.pixels, bounding_box);
        let crop_elapsed = crop_start.elapsed();

        let mut icons = Vec::with_capacity(config.sizes.len());
        let mut resize_elapsed = Duration::ZERO;
        let mut write_elapsed = Duration::ZERO;

        for &size in &config.sizes {
            let resize_start = Instant::now();
            let resized = self.resize_square(&cropped, size, config);
            resize_elapsed += resize_start.elapsed();

            let path = config.output_path_for(size);
            let write_start = Instant::now();
            let bytes_written = Self::write_png(&resized, &path)?;
            write_elapsed += write_start.elapsed();

            log::debug!("🖼️ 已写出 {}x{} -> {} ({} 字节)", size, size, path.display(), bytes_written);

            let icon = GeneratedIcon {
                size,
                path,
                bytes_written,
            };
            on_saved(&icon);
            icons.push(icon);
        }

        log::info!(
            "✅ 图标生成完成 - 数量={} load={}ms decode={}ms crop={}ms resize={}ms write={}ms total={}ms",
            icons.len(),
            load_elapsed.as_millis(),
            decode_elapsed.as_millis(),
            crop_elapsed.as_millis(),
            resize_elapsed.as_millis(),
            write_elapsed.as_millis(),
            total_start.elapsed().as_millis()
        );

        Ok(GenerationReport {
            source_width,
            source_height,
            bounding_box,
            icons,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageBuffer, Rgba, RgbaImage};
    use std::path::{Path, PathBuf};
    use std::time::{SystemTime, UNIX_EPOCH};

    fn unique_temp_dir() -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock error")
            .as_nanos();
        let dir = std::env::temp_dir().join(format!("icon-generator-handler-{nanos}"));
        std::fs::create_dir_all(&dir).expect("create temp dir");
        dir
    }

    fn write_source(dir: &Path, image: &RgbaImage) -> PathBuf {
        let path = dir.join("icon.png");
        image.save(&path).expect("save source image");
        path
    }

    #[test]
    fn new_rejects_invalid_sizes() {
        let mut config = IconConfig::default();
        config.sizes = vec![0];

        assert!(matches!(IconGenerator::new(config), Err(IconError::InvalidConfig(_))));
    }

    #[test]
    fn generate_reports_icons_in_size_order() {
        let dir = unique_temp_dir();
        let source = ImageBuffer::from_pixel(40, 20, Rgba([255, 128, 0, 255]));
        let source_path = write_source(&dir, &source);
        let mut config = IconConfig::for_paths(source_path, dir.join("icons"));
        config.sizes = vec![48, 16, 24];
        let generator = IconGenerator::new(config).expect("generator init failed");

        let mut seen = Vec::new();
        let report = generator
            .generate_with_hooks(|icon| seen.push((icon.size, icon.path.clone())))
            .expect("generate should succeed");

        let icons_dir = dir.join("icons");
        assert_eq!(
            seen,
            vec![
                (48, icons_dir.join("icon48.png")),
                (16, icons_dir.join("icon16.png")),
                (24, icons_dir.join("icon24.png")),
            ]
        );
        assert_eq!(report.icons.iter().map(|i| i.size).collect::<Vec<_>>(), vec![48, 16, 24]);
        assert_eq!((report.source_width, report.source_height), (40, 20));
        assert!(report.icons.iter().all(|i| i.path.exists() && i.bytes_written > 0));
        let _ = std::fs::remove_dir_all(dir);
    }

    #[test]
    fn generate_with_empty_size_list_writes_nothing() {
        let dir = unique_temp_dir();
        let source_path = write_source(&dir, &RgbaImage::from_pixel(8, 8, Rgba([0, 0, 0, 255])));
        let output_dir = dir.join("icons");
        let mut config = IconConfig::for_paths(source_path, &output_dir);
        config.sizes.clear();
        let generator = IconGenerator::new(config).expect("generator init failed");

        let report = generator.generate().expect("generate should succeed");

        assert!(report.icons.is_empty());
        assert!(output_dir.is_dir());
        assert_eq!(std::fs::read_dir(&output_dir).expect("read dir").count(), 0);
        let _ = std::fs::remove_dir_all(dir);
    }

    #[test]
    fn generate_keeps_earlier_icons_when_a_later_write_fails() {
        let dir = unique_temp_dir();
        let source_path = write_source(&dir, &RgbaImage::from_pixel(8, 8, Rgba([0, 0, 0, 255])));
        let output_dir = dir.join("icons");
        std::fs::create_dir_all(output_dir.join("icon32.png")).expect("block icon32 path");
        let mut config = IconConfig::for_paths(source_path, &output_dir);
        config.sizes = vec![16, 32, 64];
        let generator = IconGenerator::new(config).expect("generator init failed");

        let result = generator.generate();

        assert!(matches!(result, Err(IconError::FileSystem(_))));
        assert!(output_dir.join("icon16.png").is_file());
        assert!(!output_dir.join("icon64.png").exists());
        let _ = std::fs::remove_dir_all(dir);
    }
}
