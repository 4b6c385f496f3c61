//! # 解码与变换流水线模块
//!
//! ## 设计思路
//!
//! 将“字节 → RGBA → 包围盒裁剪 → 正方形缩放”集中管理，并在解码前做资源上限控制。
//! 优先做尺寸检查，再进行完整解码，降低超大输入触发高内存开销的风险。
//!
//! ## 实现思路
//!
//! 1. 猜测格式并读取 header 尺寸
//! 2. 按像素 / 内存上限快速拒绝
//! 3. 完整解码并统一转换为 RGBA8
//! 4. 计算 alpha 非零像素的包围盒，无内容时保留原图
//! 5. Lanczos3 缩放：优先 `fast_image_resize`，失败回退 `image::imageops`

use fast_image_resize as fr;
use image::imageops::{self, FilterType};
use image::{GenericImageView, RgbaImage};
use std::io::Cursor;

use super::source::{BoundingBox, RawImageData, SourceImage};
use super::{IconConfig, IconError, IconGenerator};

/// 计算所有 alpha 非零像素的最小包围盒。
///
/// 图像完全透明时返回 `None`。
///
/// # 示例
/// ```rust
/// use icon_generator::icon_handler::{compute_bounding_box, BoundingBox};
/// use image::{Rgba, RgbaImage};
///
/// let mut img = RgbaImage::new(8, 8);
/// img.put_pixel(2, 3, Rgba([255, 0, 0, 255]));
/// img.put_pixel(5, 6, Rgba([0, 0, 255, 1]));
///
/// assert_eq!(
///     compute_bounding_box(&img),
///     Some(BoundingBox { left: 2, top: 3, right: 6, bottom: 7 })
/// );
/// assert_eq!(compute_bounding_box(&RgbaImage::new(4, 4)), None);
/// ```
pub fn compute_bounding_box(image: &RgbaImage) -> Option<BoundingBox> {
    let mut bounds: Option<BoundingBox> = None;

    for (x, y, pixel) in image.enumerate_pixels() {
        if pixel[3] == 0 {
            continue;
        }

        match bounds.as_mut() {
            Some(b) => {
                b.left = b.left.min(x);
                b.top = b.top.min(y);
                b.right = b.right.max(x + 1);
                b.bottom = b.bottom.max(y + 1);
            }
            None => {
                bounds = Some(BoundingBox {
                    left: x,
                    top: y,
                    right: x + 1,
                    bottom: y + 1,
                });
            }
        }
    }

    bounds
}

/// 按包围盒裁剪；`None` 或包围盒覆盖整图时原样返回。
pub fn crop_to_content(image: RgbaImage, bounds: Option<BoundingBox>) -> RgbaImage {
    let Some(b) = bounds else {
        return image;
    };

    if b.left == 0 && b.top == 0 && b.right == image.width() && b.bottom == image.height() {
        return image;
    }

    imageops::crop_imm(&image, b.left, b.top, b.width(), b.height()).to_image()
}

impl IconGenerator {
    /// 将原始字节解码为 RGBA 源图。
    pub(crate) fn decode_to_rgba(
        &self,
        raw: RawImageData,
        config: &IconConfig,
    ) -> Result<SourceImage, IconError> {
        let (header_width, header_height) = Self::inspect_dimensions_from_memory(&raw.bytes)?;
        self.validate_pixel_limits(config, header_width, header_height)?;
        self.validate_decoded_memory_limits(config, header_width, header_height)?;

        // 上限已由 IconConfig 校验，不再叠加 image 自带的 512 MiB 分配限制
        let mut reader = image::ImageReader::new(Cursor::new(raw.bytes.as_slice()))
            .with_guessed_format()
            .map_err(|e| IconError::InvalidFormat(format!("无法识别图片格式：{}", e)))?;
        reader.no_limits();
        let decoded = reader
            .decode()
            .map_err(|e| IconError::Decode(format!("图片解码失败：{}", e)))?;

        let (width, height) = decoded.dimensions();
        self.validate_pixel_limits(config, width, height)?;
        self.validate_decoded_memory_limits(config, width, height)?;

        let color = decoded.color();
        let pixels = decoded.into_rgba8();

        log::info!(
            "✅ 源图解码成功 - 来源: {} 尺寸: {}x{} 原始色彩: {:?}",
            raw.source_hint,
            width,
            height,
            color
        );

        Ok(SourceImage {
            pixels,
            source_hint: raw.source_hint,
        })
    }

    /// 仅通过内存中的图片头信息读取宽高。
    ///
    /// 用于在完整解码前做像素限制检查。
    fn inspect_dimensions_from_memory(bytes: &[u8]) -> Result<(u32, u32), IconError> {
        let reader = image::ImageReader::new(Cursor::new(bytes))
            .with_guessed_format()
            .map_err(|e| IconError::InvalidFormat(format!("无法识别图片格式：{}", e)))?;

        reader
            .into_dimensions()
            .map_err(|e| IconError::InvalidFormat(format!("无法读取图片尺寸：{}", e)))
    }

    /// 校验像素数量是否超过配置上限。
    fn validate_pixel_limits(
        &self,
        config: &IconConfig,
        width: u32,
        height: u32,
    ) -> Result<(), IconError> {
        let pixels = (width as u64)
            .checked_mul(height as u64)
            .ok_or_else(|| IconError::ResourceLimit("图片像素数溢出".to_string()))?;

        if pixels > config.max_decoded_pixels {
            return Err(IconError::ResourceLimit(format!(
                "图片像素过大：{} 像素（限制：{} 像素）",
                pixels, config.max_decoded_pixels
            )));
        }

        Ok(())
    }

    fn validate_decoded_memory_limits(
        &self,
        config: &IconConfig,
        width: u32,
        height: u32,
    ) -> Result<(), IconError> {
        let estimated = (width as u64)
            .checked_mul(height as u64)
            .and_then(|pixels| pixels.checked_mul(4))
            .ok_or_else(|| IconError::ResourceLimit("图片解码内存估算溢出".to_string()))?;

        if estimated > config.max_decoded_bytes {
            return Err(IconError::ResourceLimit(format!(
                "图片解码预计内存过大：{:.2} MB（限制：{:.2} MB）",
                estimated as f64 / 1024.0 / 1024.0,
                config.max_decoded_bytes as f64 / 1024.0 / 1024.0
            )));
        }

        Ok(())
    }

    /// 将裁剪后的图像缩放为 `size x size`。
    ///
    /// 两条路径都使用 Lanczos3，回退路径只在 `fast_image_resize` 出错时启用。
    pub(crate) fn resize_square(&self, cropped: &RgbaImage, size: u32, config: &IconConfig) -> RgbaImage {
        if !config.fast_resize {
            return imageops::resize(cropped, size, size, FilterType::Lanczos3);
        }

        match Self::resize_with_fast_image_resize(cropped, size, size) {
            Ok(resized) => resized,
            Err(err) => {
                log::warn!(
                    "⚠️ fast_image_resize 缩放失败，回退 image::imageops::resize：{}",
                    err
                );
                imageops::resize(cropped, size, size, FilterType::Lanczos3)
            }
        }
    }

    fn resize_with_fast_image_resize(
        image: &RgbaImage,
        target_width: u32,
        target_height: u32,
    ) -> Result<RgbaImage, IconError> {
        let (src_width, src_height) = image.dimensions();

        let src_image = fr::images::ImageRef::new(
            src_width,
            src_height,
            image.as_raw(),
            fr::PixelType::U8x4,
        )
        .map_err(|e| IconError::Resize(format!("构建源图像缓冲失败：{}", e)))?;

        let mut dst_image = fr::images::Image::new(target_width, target_height, fr::PixelType::U8x4);

        // U8x4 默认先预乘 alpha 再卷积，透明边缘不会带出黑边
        let mut resizer = fr::Resizer::new();
        let options = fr::ResizeOptions::new()
            .resize_alg(fr::ResizeAlg::Convolution(fr::FilterType::Lanczos3));

        resizer
            .resize(&src_image, &mut dst_image, Some(&options))
            .map_err(|e| IconError::Resize(format!("fast_image_resize 执行失败：{}", e)))?;

        RgbaImage::from_raw(target_width, target_height, dst_image.into_vec())
            .ok_or_else(|| IconError::Resize("fast_image_resize 输出缓冲长度异常".to_string()))
    }
}
