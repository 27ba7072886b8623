//! # 配置模块
//!
//! ## 设计思路
//!
//! 将所有“可调策略”集中到 `IntakeConfig`。目标宽度与体积上限属于固定策略，
//! 上限是针对估算公式标定过的，不随档位变化；
//! 档位（quality / balanced / speed）只影响输出质量与缩放滤镜。
//!
//! ## 实现思路
//!
//! - `Default` 提供生产可用的平衡配置。
//! - `IntakeProfile` 负责档位字符串解析与反向输出。
//! - `apply_profile` 将档位转换为具体参数，`infer_profile` 从参数反推档位。
//! - 全部字段可通过 JSON 配置文件覆盖（`#[serde(default)]`）。

use image::imageops::FilterType;
use serde::{Deserialize, Serialize};

use super::ImageError;

/// 默认目标宽度（逻辑像素）。
pub const DEFAULT_TARGET_WIDTH: u32 = 600;

/// 默认编码体积上限（字节，按估算值比较）。
pub const DEFAULT_MAX_ENCODED_BYTES: u64 = 5 * 1000 * 1000;

/// 缩放滤镜（可序列化的 `FilterType` 映射）。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResizeFilter {
    Nearest,
    Triangle,
    CatmullRom,
    Gaussian,
    Lanczos3,
}

impl ResizeFilter {
    pub(crate) fn to_filter_type(self) -> FilterType {
        match self {
            Self::Nearest => FilterType::Nearest,
            Self::Triangle => FilterType::Triangle,
            Self::CatmullRom => FilterType::CatmullRom,
            Self::Gaussian => FilterType::Gaussian,
            Self::Lanczos3 => FilterType::Lanczos3,
        }
    }
}

/// 输出栅格格式。
///
/// 默认是有损 JPEG：目的是约束体积，而不是保真。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum OutputFormat {
    Jpeg { quality: u8 },
    Png,
}

impl OutputFormat {
    /// Data URI 中使用的媒体类型。
    pub fn media_type(self) -> &'static str {
        match self {
            Self::Jpeg { .. } => "image/jpeg",
            Self::Png => "image/png",
        }
    }

    /// 编码器支持的单边最大像素数。
    pub fn max_side(self) -> u32 {
        match self {
            Self::Jpeg { .. } => u16::MAX as u32,
            Self::Png => u32::MAX,
        }
    }
}

/// 图片接收配置。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IntakeConfig {
    /// 缩放目标宽度；所有图片（包括更窄的图片）都按该宽度缩放。
    pub target_width: u32,
    /// 估算编码体积上限（字节），等于上限视为通过。
    pub max_encoded_bytes: u64,
    /// 输出格式与质量。
    pub output_format: OutputFormat,
    /// 缩放滤镜策略。
    pub resize_filter: ResizeFilter,
    /// 解码后的像素上限（`width * height`）。
    pub max_decoded_pixels: u64,
}

impl Default for IntakeConfig {
    fn default() -> Self {
        Self {
            target_width: DEFAULT_TARGET_WIDTH,
            max_encoded_bytes: DEFAULT_MAX_ENCODED_BYTES,
            output_format: OutputFormat::Jpeg { quality: 75 },
            resize_filter: ResizeFilter::Triangle,
            max_decoded_pixels: 40_000_000,
        }
    }
}

impl IntakeConfig {
    /// 校验配置取值范围。
    pub fn validate(&self) -> Result<(), ImageError> {
        if self.target_width == 0 {
            return Err(ImageError::InvalidConfig("target_width 不能为 0".to_string()));
        }
        if self.max_encoded_bytes == 0 {
            return Err(ImageError::InvalidConfig("max_encoded_bytes 不能为 0".to_string()));
        }
        if let OutputFormat::Jpeg { quality } = self.output_format {
            if !(1..=100).contains(&quality) {
                return Err(ImageError::InvalidConfig(format!(
                    "JPEG 质量必须在 1~100 之间（当前：{}）",
                    quality
                )));
            }
        }
        if self.max_decoded_pixels == 0 {
            return Err(ImageError::InvalidConfig("max_decoded_pixels 不能为 0".to_string()));
        }
        Ok(())
    }

    /// 基于当前参数反推档位。
    pub(crate) fn infer_profile(&self) -> IntakeProfile {
        match self.output_format {
            OutputFormat::Png => IntakeProfile::Quality,
            OutputFormat::Jpeg { quality } if quality >= 90 => IntakeProfile::Quality,
            OutputFormat::Jpeg { quality } if quality <= 55 => IntakeProfile::Speed,
            OutputFormat::Jpeg { .. } => IntakeProfile::Balanced,
        }
    }

    /// 应用指定档位到实际参数。
    pub(crate) fn apply_profile(&mut self, profile: IntakeProfile) {
        match profile {
            IntakeProfile::Quality => {
                self.output_format = OutputFormat::Jpeg { quality: 92 };
                self.resize_filter = ResizeFilter::CatmullRom;
            }
            IntakeProfile::Balanced => {
                self.output_format = OutputFormat::Jpeg { quality: 75 };
                self.resize_filter = ResizeFilter::Triangle;
            }
            IntakeProfile::Speed => {
                self.output_format = OutputFormat::Jpeg { quality: 50 };
                self.resize_filter = ResizeFilter::Nearest;
            }
        }
    }
}

/// 图片接收档位（面向产品语义）。
///
/// - `Quality`：尽量保真
/// - `Balanced`：质量与体积平衡
/// - `Speed`：优先速度与体积
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntakeProfile {
    Quality,
    Balanced,
    Speed,
}

impl IntakeProfile {
    /// 从外部字符串解析档位。
    ///
    /// # 示例
    /// ```rust
    /// use comment_editor::image_intake::IntakeProfile;
    ///
    /// let p = IntakeProfile::parse("balanced")?;
    /// assert_eq!(p.as_str(), "balanced");
    /// # Ok::<(), comment_editor::image_intake::ImageError>(())
    /// ```
    pub fn parse(profile: &str) -> Result<Self, ImageError> {
        match profile.trim().to_lowercase().as_str() {
            "quality" => Ok(Self::Quality),
            "balanced" => Ok(Self::Balanced),
            "speed" => Ok(Self::Speed),
            other => Err(ImageError::InvalidConfig(format!(
                "未知档位：{}（可选：quality / balanced / speed）",
                other
            ))),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Quality => "quality",
            Self::Balanced => "balanced",
            Self::Speed => "speed",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid_and_balanced() {
        let config = IntakeConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.target_width, 600);
        assert_eq!(config.max_encoded_bytes, 5_000_000);
        assert_eq!(config.infer_profile(), IntakeProfile::Balanced);
    }

    #[test]
    fn profile_round_trips_through_config() {
        for profile in [IntakeProfile::Quality, IntakeProfile::Balanced, IntakeProfile::Speed] {
            let mut config = IntakeConfig::default();
            config.apply_profile(profile);
            assert_eq!(config.infer_profile(), profile);
            assert_eq!(config.target_width, DEFAULT_TARGET_WIDTH);
        }
    }

    #[test]
    fn validate_rejects_out_of_range_quality() {
        let mut config = IntakeConfig::default();
        config.output_format = OutputFormat::Jpeg { quality: 0 };
        assert!(matches!(config.validate(), Err(ImageError::InvalidConfig(_))));
    }

    #[test]
    fn unknown_profile_is_rejected() {
        assert!(IntakeProfile::parse("ultra").is_err());
        assert_eq!(IntakeProfile::parse(" Speed ").unwrap(), IntakeProfile::Speed);
    }

    #[test]
    fn config_deserializes_with_partial_fields() {
        let config: IntakeConfig =
            serde_json::from_str(r#"{"output_format":{"kind":"png"},"resize_filter":"lanczos3"}"#)
                .expect("partial config should parse");
        assert_eq!(config.output_format, OutputFormat::Png);
        assert_eq!(config.resize_filter, ResizeFilter::Lanczos3);
        assert_eq!(config.target_width, 600);
    }
}
