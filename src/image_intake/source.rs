//! # 数据源与中间模型
//!
//! ## 设计思路
//!
//! 将“外部输入”和“流水线中间结果”解耦：
//! - `RawAsset` 表示宿主交来的原始字节与声明的 MIME
//! - `Dimensions` / `ScaledDimensions` 表示解码尺寸与缩放目标
//! - `EncodedAsset` 表示重新编码后的 Data URI
//! - `SizeVerdict` 表示最终的接收/拒绝结论
//!
//! 这些对象都只在单次调用内存在，不做持久化。

use image::DynamicImage;
use serde::Serialize;

use super::ImageError;
use super::estimate;

/// 宿主交来的原始图片。
#[derive(Debug, Clone)]
pub struct RawAsset {
    /// 原始图片字节。
    pub bytes: Vec<u8>,
    /// 宿主声明的 MIME 类型（可能与实际内容不符）。
    pub mime_type: String,
}

impl RawAsset {
    pub fn new(bytes: Vec<u8>, mime_type: impl Into<String>) -> Self {
        Self {
            bytes,
            mime_type: mime_type.into(),
        }
    }
}

/// 解码后的原始尺寸。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

/// 按固定目标宽度等比缩放后的尺寸。
///
/// `height` 保留浮点精度；绘制面使用截断后的整数高度。
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScaledDimensions {
    pub width: u32,
    pub height: f64,
    pub scale_factor: f64,
}

impl ScaledDimensions {
    /// 计算缩放尺寸：`{target, height * (target / width)}`。
    ///
    /// 不对窄图做特殊处理，300 宽的图片同样按 2.0 放大。
    pub fn compute(original: Dimensions, target_width: u32) -> Result<Self, ImageError> {
        if original.width == 0 || original.height == 0 || target_width == 0 {
            return Err(ImageError::InvalidDimensions {
                width: original.width,
                height: original.height,
            });
        }

        let scale_factor = target_width as f64 / original.width as f64;
        Ok(Self {
            width: target_width,
            height: original.height as f64 * scale_factor,
            scale_factor,
        })
    }

    /// 绘制面尺寸（整数像素）。
    pub fn surface(&self) -> Result<(u32, u32), ImageError> {
        let height = self.height.trunc();
        if height < 1.0 || height > u32::MAX as f64 {
            return Err(ImageError::InvalidDimensions {
                width: self.width,
                height: height.max(0.0) as u32,
            });
        }
        Ok((self.width, height as u32))
    }
}

/// 已解码的图片及其尺寸。
pub(crate) struct DecodedImage {
    pub(crate) image: DynamicImage,
    pub(crate) dimensions: Dimensions,
}

/// 重新编码后的图片（Data URI 形式）。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EncodedAsset {
    data_uri: String,
}

impl EncodedAsset {
    pub(crate) fn from_payload(media_type: &str, base64_payload: &str) -> Self {
        Self {
            data_uri: format!("data:{};base64,{}", media_type, base64_payload),
        }
    }

    /// 完整 Data URI，可直接作为图片地址交给编辑器。
    pub fn data_uri(&self) -> &str {
        &self.data_uri
    }

    pub fn into_data_uri(self) -> String {
        self.data_uri
    }

    /// 估算的字节体积。
    pub fn estimated_size(&self) -> f64 {
        estimate::estimate_data_uri_bytes(&self.data_uri)
    }
}

/// 拒绝原因。
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum RejectReason {
    Oversized { estimated: f64, ceiling: u64 },
}

/// 接收结论。
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "verdict", rename_all = "snake_case")]
pub enum SizeVerdict {
    Accepted { asset: EncodedAsset },
    Rejected { reason: RejectReason },
}

impl SizeVerdict {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted { .. })
    }

    /// 转换为 `Result`，拒绝映射为 `ImageError::Oversized`。
    pub fn into_result(self) -> Result<EncodedAsset, ImageError> {
        match self {
            Self::Accepted { asset } => Ok(asset),
            Self::Rejected {
                reason: RejectReason::Oversized { estimated, ceiling },
            } => Err(ImageError::Oversized { estimated, ceiling }),
        }
    }
}
