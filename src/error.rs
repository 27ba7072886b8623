//! 统一错误类型模块
//!
//! # 设计思路
//!
//! 定义全局统一的 `AppError` 枚举，汇总图片接收、粘贴清理、配置加载与会话生命周期的错误，
//! 替代分散的 `.map_err(|e| e.to_string())` 模式。
//!
//! # 实现思路
//!
//! - 使用 `thiserror` 派生可读错误消息。
//! - 为 `ImageError` / `PasteError` 提供 `From` 转换，无需手动 map。
//! - 实现 `Serialize` 将错误序列化为字符串，便于交给前端宿主展示。

use serde::Serialize;

use crate::image_intake::ImageError;
use crate::paste::PasteError;

/// 应用级统一错误类型
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// 图片接收流水线错误（解码 / 尺寸 / 编码 / 超限）
    #[error("{0}")]
    Image(#[from] ImageError),

    /// 剪贴板读取错误
    #[error("{0}")]
    Paste(#[from] PasteError),

    /// 文件系统 I/O 错误
    #[error("文件系统错误: {0}")]
    Io(#[from] std::io::Error),

    /// JSON 序列化错误
    #[error("JSON 序列化错误: {0}")]
    Json(#[from] serde_json::Error),

    /// 配置文件无效
    #[error("配置错误: {0}")]
    Config(String),

    /// 会话已关闭，结果被丢弃
    #[error("编辑会话已关闭")]
    SessionClosed,
}

impl AppError {
    /// 稳定错误码。
    pub fn code(&self) -> &'static str {
        match self {
            Self::Image(e) => e.code(),
            Self::Paste(e) => e.code(),
            Self::Io(_) => "IO",
            Self::Json(_) => "JSON",
            Self::Config(_) => "CONFIG",
            Self::SessionClosed => "SESSION_CLOSED",
        }
    }
}

/// 宿主前端要求返回值实现 `Serialize`。
/// 将错误序列化为人类可读的字符串。
impl Serialize for AppError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}
