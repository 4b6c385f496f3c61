//! # 加载与校验模块
//!
//! ## 设计思路
//!
//! 在“尽可能早”的阶段执行输入校验：存在性 → 体积 → 签名，
//! 目标是尽快失败，避免为无效输入分配解码内存。
//!
//! ## 实现思路
//!
//! - 文件：存在性 + metadata 体积限制 + 读取。
//! - 源图缺失或不可读与损坏同属解码失败，统一返回 `IconError::Decode`。
//! - `std::fs::read` 内部打开并关闭句柄，任意返回路径上都不会泄漏文件句柄。
//! - 签名识别交给 `image::guess_format`，不额外引入格式判断逻辑。

use std::path::Path;

use super::source::RawImageData;
use super::{IconConfig, IconError, IconGenerator};

impl IconGenerator {
    /// 从本地路径加载源图原始字节。
    pub(super) fn load_from_file(
        &self,
        path: &Path,
        config: &IconConfig,
    ) -> Result<RawImageData, IconError> {
        log::info!("📁 开始读取源图 - 路径: {}", path.display());

        if !path.exists() {
            return Err(IconError::Decode(format!("源图不存在：{}", path.display())));
        }

        let metadata = std::fs::metadata(path)
            .map_err(|e| IconError::Decode(format!("无法读取源图文件信息：{}", e)))?;

        if !metadata.is_file() {
            return Err(IconError::Decode(format!("源图路径不是文件：{}", path.display())));
        }

        if metadata.len() > config.max_file_size {
            return Err(IconError::ResourceLimit(format!(
                "文件过大：{:.2} MB（限制：{:.2} MB）",
                metadata.len() as f64 / 1024.0 / 1024.0,
                config.max_file_size as f64 / 1024.0 / 1024.0
            )));
        }

        let bytes = std::fs::read(path)
            .map_err(|e| IconError::Decode(format!("无法读取源图文件：{}", e)))?;
        Self::validate_image_signature(&bytes)?;

        Ok(RawImageData {
            bytes,
            source_hint: path.display().to_string(),
        })
    }

    /// 通过文件签名（magic bytes）校验输入是否为可识别的图片。
    fn validate_image_signature(bytes: &[u8]) -> Result<(), IconError> {
        if bytes.is_empty() {
            return Err(IconError::InvalidFormat("图片内容为空".to_string()));
        }

        image::guess_format(bytes)
            .map(|_| ())
            .map_err(|e| IconError::InvalidFormat(format!("无法识别图片类型：{}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn unique_temp_dir() -> std::path::PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock error")
            .as_nanos();
        let dir = std::env::temp_dir().join(format!("icon-generator-loader-{nanos}"));
        std::fs::create_dir_all(&dir).expect("create temp dir");
        dir
    }

    #[test]
    fn load_from_file_rejects_missing_source() {
        let generator = IconGenerator::new(IconConfig::default()).expect("generator init failed");
        let config = IconConfig::default();
        let dir = unique_temp_dir();

        let result = generator.load_from_file(&dir.join("missing.png"), &config);

        assert!(matches!(result, Err(IconError::Decode(_))));
        let _ = std::fs::remove_dir_all(dir);
    }

    #[test]
    fn load_from_file_rejects_directory_as_source() {
        let generator = IconGenerator::new(IconConfig::default()).expect("generator init failed");
        let config = IconConfig::default();
        let dir = unique_temp_dir();

        let result = generator.load_from_file(&dir, &config);

        assert!(matches!(result, Err(IconError::Decode(_))));
        let _ = std::fs::remove_dir_all(dir);
    }

    #[test]
    fn load_from_file_rejects_non_image_payload() {
        let generator = IconGenerator::new(IconConfig::default()).expect("generator init failed");
        let config = IconConfig::default();
        let dir = unique_temp_dir();
        let path = dir.join("icon.png");
        std::fs::write(&path, b"<html><body>not an image</body></html>").expect("write file");

        let result = generator.load_from_file(&path, &config);

        assert!(matches!(result, Err(IconError::InvalidFormat(_))));
        let _ = std::fs::remove_dir_all(dir);
    }

    #[test]
    fn load_from_file_enforces_size_limit() {
        let generator = IconGenerator::new(IconConfig::default()).expect("generator init failed");
        let mut config = IconConfig::default();
        config.max_file_size = 8;
        let dir = unique_temp_dir();
        let path = dir.join("icon.png");
        std::fs::write(&path, vec![0_u8; 64]).expect("write file");

        let result = generator.load_from_file(&path, &config);

        assert!(matches!(result, Err(IconError::ResourceLimit(_))));
        let _ = std::fs::remove_dir_all(dir);
    }

    #[test]
    fn signature_check_recognizes_png_header() {
        let png_signature = [137_u8, 80, 78, 71, 13, 10, 26, 10, 0, 0, 0, 13];

        assert!(IconGenerator::validate_image_signature(&png_signature).is_ok());
        assert!(matches!(
            IconGenerator::validate_image_signature(&[]),
            Err(IconError::InvalidFormat(_))
        ));
    }
}
