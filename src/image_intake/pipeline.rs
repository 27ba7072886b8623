//! # 解码、绘制与编码流水线模块
//!
//! ## 设计思路
//!
//! 将“字节 → 图像 → 缩放 → 有损编码”的过程集中管理，并在关键节点增加资源上限控制。
//! 优先读取 header 尺寸，再进行完整解码，降低恶意输入触发高内存开销的风险。
//!
//! ## 实现思路
//!
//! 1. 嗅探实际类型，与声明的 MIME 比对（不一致仅记录日志）
//! 2. 读取 header 尺寸，按像素上限快速拒绝
//! 3. 完整解码
//! 4. 按缩放尺寸绘制（`fast_image_resize`，失败回退 `image::resize_exact`）
//! 5. 按配置格式编码为 Base64 Data URI

use base64::{Engine as _, engine::general_purpose};
use fast_image_resize as fr;
use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, GenericImageView, ImageBuffer, ImageFormat, Rgba};
use std::io::Cursor;

use super::source::{DecodedImage, Dimensions, EncodedAsset, RawAsset, ScaledDimensions};
use super::{ImageError, IntakeConfig, OutputFormat};

/// 解码原始字节。
pub(crate) fn decode(asset: &RawAsset, config: &IntakeConfig) -> Result<DecodedImage, ImageError> {
    check_declared_type(asset)?;

    let (header_width, header_height) = inspect_dimensions(&asset.bytes)?;
    validate_pixel_limits(config, header_width, header_height)?;

    let image = image::load_from_memory(&asset.bytes)
        .map_err(|e| ImageError::Decode(format!("图片解码失败：{}", e)))?;

    let (width, height) = image.dimensions();
    validate_pixel_limits(config, width, height)?;

    log::debug!(
        "🖼️ 图片解码成功 - 声明类型: {} 尺寸: {}x{}",
        asset.mime_type,
        width,
        height
    );

    Ok(DecodedImage {
        image,
        dimensions: Dimensions { width, height },
    })
}

/// 嗅探实际内容类型。
///
/// 明显不是图片的负载直接按解码错误处理；声明类型不符只告警。
fn check_declared_type(asset: &RawAsset) -> Result<(), ImageError> {
    let Some(kind) = infer::get(&asset.bytes) else {
        // 无法识别的格式交给解码器判断
        return Ok(());
    };

    if kind.matcher_type() != infer::MatcherType::Image {
        return Err(ImageError::Decode(format!(
            "内容不是图片：{}（声明：{}）",
            kind.mime_type(),
            asset.mime_type
        )));
    }

    if !asset.mime_type.trim().eq_ignore_ascii_case(kind.mime_type()) {
        log::warn!(
            "⚠️ 声明的图片类型与实际内容不符 - 声明: {} 实际: {}",
            asset.mime_type,
            kind.mime_type()
        );
    }

    Ok(())
}

/// 仅通过图片头信息读取宽高。
fn inspect_dimensions(bytes: &[u8]) -> Result<(u32, u32), ImageError> {
    let reader = image::ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| ImageError::Decode(format!("无法识别图片格式：{}", e)))?;

    reader
        .into_dimensions()
        .map_err(|e| ImageError::Decode(format!("无法读取图片尺寸：{}", e)))
}

fn validate_pixel_limits(config: &IntakeConfig, width: u32, height: u32) -> Result<(), ImageError> {
    let pixels = (width as u64)
        .checked_mul(height as u64)
        .ok_or_else(|| ImageError::ResourceLimit("图片像素数溢出".to_string()))?;

    if pixels > config.max_decoded_pixels {
        return Err(ImageError::ResourceLimit(format!(
            "图片像素过大：{} 像素（限制：{} 像素）",
            pixels, config.max_decoded_pixels
        )));
    }

    Ok(())
}

/// 绘制面在分配前校验：窄图放大后同样受像素上限与编码器边长约束。
fn validate_surface(config: &IntakeConfig, width: u32, height: u32) -> Result<(), ImageError> {
    let max_side = config.output_format.max_side();
    if width > max_side || height > max_side {
        return Err(ImageError::InvalidDimensions { width, height });
    }

    validate_pixel_limits(config, width, height)
}

/// 将解码结果绘制到缩放尺寸的绘制面上。
pub(crate) fn draw(
    decoded: DecodedImage,
    scaled: &ScaledDimensions,
    config: &IntakeConfig,
) -> Result<DynamicImage, ImageError> {
    let (target_width, target_height) = scaled.surface()?;
    validate_surface(config, target_width, target_height)?;
    let filter = config.resize_filter.to_filter_type();

    log::debug!(
        "🧩 缩放：{}x{} -> {}x{}（filter={:?}）",
        decoded.dimensions.width,
        decoded.dimensions.height,
        target_width,
        target_height,
        filter
    );

    match resize_with_fast_image_resize(&decoded.image, target_width, target_height, filter) {
        Ok(resized) => Ok(resized),
        Err(err) => {
            log::warn!("⚠️ fast_image_resize 缩放失败，回退 image::resize_exact：{}", err);
            Ok(decoded.image.resize_exact(target_width, target_height, filter))
        }
    }
}

fn resize_with_fast_image_resize(
    image: &DynamicImage,
    target_width: u32,
    target_height: u32,
    filter: image::imageops::FilterType,
) -> Result<DynamicImage, ImageError> {
    let src = image.to_rgba8();
    let (src_width, src_height) = src.dimensions();

    let src_image =
        fr::images::Image::from_vec_u8(src_width, src_height, src.into_raw(), fr::PixelType::U8x4)
            .map_err(|e| ImageError::Decode(format!("构建源图像缓冲失败：{}", e)))?;

    let mut dst_image = fr::images::Image::new(target_width, target_height, fr::PixelType::U8x4);

    let mut resizer = fr::Resizer::new();
    let options =
        fr::ResizeOptions::new().resize_alg(fr::ResizeAlg::Convolution(to_fast_filter(filter)));

    resizer
        .resize(&src_image, &mut dst_image, Some(&options))
        .map_err(|e| ImageError::Decode(format!("fast_image_resize 执行失败：{}", e)))?;

    let rgba = ImageBuffer::<Rgba<u8>, Vec<u8>>::from_raw(
        target_width,
        target_height,
        dst_image.into_vec(),
    )
    .ok_or_else(|| ImageError::Decode("fast_image_resize 输出缓冲长度异常".to_string()))?;

    Ok(DynamicImage::ImageRgba8(rgba))
}

fn to_fast_filter(filter: image::imageops::FilterType) -> fr::FilterType {
    match filter {
        image::imageops::FilterType::Nearest => fr::FilterType::Box,
        image::imageops::FilterType::Triangle => fr::FilterType::Bilinear,
        image::imageops::FilterType::CatmullRom => fr::FilterType::CatmullRom,
        image::imageops::FilterType::Gaussian => fr::FilterType::Mitchell,
        image::imageops::FilterType::Lanczos3 => fr::FilterType::Lanczos3,
    }
}

/// 按配置格式编码为 Data URI。
pub(crate) fn encode(image: &DynamicImage, format: OutputFormat) -> Result<EncodedAsset, ImageError> {
    let mut buffer = Cursor::new(Vec::new());

    match format {
        OutputFormat::Jpeg { quality } => {
            // JPEG 不支持透明通道，先压平为 RGB
            let rgb = image.to_rgb8();
            JpegEncoder::new_with_quality(&mut buffer, quality)
                .encode_image(&rgb)
                .map_err(|e| ImageError::Encode(format!("JPEG 编码失败：{}", e)))?;
        }
        OutputFormat::Png => {
            image
                .write_to(&mut buffer, ImageFormat::Png)
                .map_err(|e| ImageError::Encode(format!("PNG 编码失败：{}", e)))?;
        }
    }

    let bytes = buffer.into_inner();
    let payload = general_purpose::STANDARD.encode(&bytes);

    log::debug!("🗜️ 编码完成 - 格式: {} 字节: {}", format.media_type(), bytes.len());

    Ok(EncodedAsset::from_payload(format.media_type(), &payload))
}
