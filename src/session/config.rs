//! # 会话配置
//!
//! `SessionConfig` 控制被动粘贴检测的行为与剪贴板读取超时；
//! `NoticeMessages` 保存面向用户的提示文案（默认使用产品的挪威语文案）。

use serde::{Deserialize, Serialize};

/// 编辑器工具栏“从 Word 粘贴”按钮触发的自定义动作名。
pub const WORD_PASTE_ACTION: &str = "wordPasteButton";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// 文档变更时检测到文字处理器内容后，是否把清理结果写回文档。
    ///
    /// 默认只提示不回写。
    pub auto_correct_on_change: bool,
    /// 回写前是否再剥离全部标记（仅在 `auto_correct_on_change` 开启时生效）。
    pub strip_markup_on_change: bool,
    /// 剪贴板读取超时（毫秒）。
    pub clipboard_read_timeout_ms: u64,
    /// 触发“从 Word 粘贴”的自定义动作名。
    pub word_paste_action: String,
    /// 创建会话时写入编辑器的初始内容。
    pub initial_value: Option<String>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            auto_correct_on_change: false,
            strip_markup_on_change: false,
            clipboard_read_timeout_ms: 5_000,
            word_paste_action: WORD_PASTE_ACTION.to_string(),
            initial_value: None,
        }
    }
}

/// 用户提示文案。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NoticeMessages {
    pub word_content_adjusted: String,
    pub image_too_large: String,
    pub image_unreadable: String,
    pub clipboard_unavailable: String,
}

impl Default for NoticeMessages {
    fn default() -> Self {
        Self {
            word_content_adjusted: "Du limte inn fra Word. Vi skal ha fikset på det.".to_string(),
            image_too_large: "Bildet er for stort, bruk et mindre bilde".to_string(),
            image_unreadable: "Kunne ikke lese bildet, prøv et annet bilde".to_string(),
            clipboard_unavailable: "Fikk ikke tilgang til utklippstavlen, prøv igjen".to_string(),
        }
    }
}
