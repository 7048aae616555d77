//! 详情链接与二维码生成
//!
//! 详情页只通过 `<base>/?id=<id>` 定位。二维码每次调用都重新生成，不做缓存。

use image::{ImageFormat, Rgb, RgbImage};
use qrcode::types::QrError;
use qrcode::{Color, EcLevel, QrCode, Version};
use std::io::Cursor;

use crate::config::AppConfig;
use crate::errors::Result;

const BLACK: Rgb<u8> = Rgb([0, 0, 0]);
const WHITE: Rgb<u8> = Rgb([255, 255, 255]);

/// 二维码生成参数
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QrSettings {
    /// 配置的详情页基础地址
    pub base_url: Option<String>,
    /// 首选符号版本，数据放不下时自动增大
    pub version: i16,
    /// 每个模块的像素边长
    pub box_size: u32,
    /// 四周空白模块数
    pub border: u32,
}

impl Default for QrSettings {
    fn default() -> Self {
        Self {
            base_url: None,
            version: 2,
            box_size: 8,
            border: 2,
        }
    }
}

impl QrSettings {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            base_url: config.configured_base_url().map(str::to_string),
            version: config.qr.version,
            box_size: config.qr.box_size,
            border: config.qr.border,
        }
    }

    /// 选择基础地址：配置值 > 调用方提供的值 > 由请求推断的值
    pub fn pick_base_url(&self, provided: Option<&str>, fallback: &str) -> String {
        self.base_url
            .as_deref()
            .or(provided.map(str::trim).filter(|s| !s.is_empty()))
            .unwrap_or(fallback)
            .to_string()
    }
}

/// 构建详情页地址
pub fn build_detail_url(base: &str, id: &str) -> String {
    format!("{}/?id={}", base.trim_end_matches('/'), id)
}

/// 二维码下载文件名
pub fn qr_file_name(id: &str) -> String {
    format!("qr_{id}.png")
}

fn encode(data: &str, version: i16) -> Result<QrCode> {
    match QrCode::with_version(data.as_bytes(), Version::Normal(version), EcLevel::M) {
        Ok(code) => Ok(code),
        // 指定版本容量不足时退回到能容纳数据的最小版本
        Err(QrError::DataTooLong) | Err(QrError::InvalidVersion) => {
            Ok(QrCode::with_error_correction_level(data.as_bytes(), EcLevel::M)?)
        }
        Err(e) => Err(e.into()),
    }
}

/// 将地址编码为白底黑色二维码图像
pub fn make_qr_image(url: &str, settings: &QrSettings) -> Result<RgbImage> {
    let code = encode(url, settings.version)?;
    let width = code.width() as u32;
    let box_size = settings.box_size.max(1);
    let border = settings.border;
    let side = (width + 2 * border) * box_size;

    let mut img = RgbImage::from_pixel(side, side, WHITE);
    for (idx, color) in code.to_colors().into_iter().enumerate() {
        if color != Color::Dark {
            continue;
        }
        let idx = idx as u32;
        let left = (idx % width + border) * box_size;
        let top = (idx / width + border) * box_size;
        for dy in 0..box_size {
            for dx in 0..box_size {
                img.put_pixel(left + dx, top + dy, BLACK);
            }
        }
    }

    Ok(img)
}

/// 序列化为 PNG
pub fn to_png_bytes(img: &RgbImage) -> Result<Vec<u8>> {
    let mut buf = Cursor::new(Vec::new());
    img.write_to(&mut buf, ImageFormat::Png)?;
    Ok(buf.into_inner())
}
