//! # 错误模型模块
//!
//! ## 设计思路
//!
//! 使用单一错误枚举承载图片接收链路中的所有错误来源，避免字符串拼接式错误处理。
//! 通过 `thiserror` 保持人类可读错误，同时让调用侧可按分支匹配。
//!
//! 除 `Oversized` 外均为“终止型”错误：本次插入直接放弃，不做重试。

/// 图片接收统一错误类型。
///
/// 该类型会在会话层被上转为 `AppError`，并以用户提示的形式呈现。
#[derive(Debug, thiserror::Error)]
pub enum ImageError {
    #[error("解码错误：{0}")]
    Decode(String),

    #[error("尺寸无效：{width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("编码错误：{0}")]
    Encode(String),

    #[error("图片过大：预计 {estimated:.0} 字节（上限：{ceiling} 字节）")]
    Oversized { estimated: f64, ceiling: u64 },

    #[error("配置错误：{0}")]
    InvalidConfig(String),

    #[error("资源限制：{0}")]
    ResourceLimit(String),
}

impl ImageError {
    /// 稳定错误码，供前端与日志检索使用。
    pub fn code(&self) -> &'static str {
        match self {
            Self::Decode(_) => "IMAGE_DECODE",
            Self::InvalidDimensions { .. } => "IMAGE_INVALID_DIMENSIONS",
            Self::Encode(_) => "IMAGE_ENCODE",
            Self::Oversized { .. } => "IMAGE_OVERSIZED",
            Self::InvalidConfig(_) => "IMAGE_INVALID_CONFIG",
            Self::ResourceLimit(_) => "IMAGE_RESOURCE_LIMIT",
        }
    }
}
