//! # 粘贴链路错误模型
//!
//! 剪贴板读取失败（权限、平台异常、超时）均可由用户重试，不影响编辑会话。

#[derive(Debug, thiserror::Error)]
pub enum PasteError {
    #[error("剪贴板读取失败：{0}")]
    ClipboardAccess(String),

    #[error("剪贴板读取超时（{0}ms）")]
    Timeout(u64),

    #[error("剪贴板为空")]
    Empty,
}

impl PasteError {
    /// 稳定错误码，供前端与日志检索使用。
    pub fn code(&self) -> &'static str {
        match self {
            Self::ClipboardAccess(_) => "CLIPBOARD_ACCESS",
            Self::Timeout(_) => "CLIPBOARD_TIMEOUT",
            Self::Empty => "CLIPBOARD_EMPTY",
        }
    }
}
