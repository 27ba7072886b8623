//! # 粘贴内容清理
//!
//! ## 设计思路
//!
//! 清理结果是否“被修改”通过比较输入与输出字符串得出，而不是由清理步骤自行上报。
//! 调用方据此决定是否提示用户、是否回写文档。
//!
//! - 声明为 HTML 的富文本负载：执行文字处理器清理
//! - 其他内容类型的富文本：原样通过
//! - 纯文本负载：原样通过
//! - 文档变更（on-change）：对编辑器导出的文本执行清理，与导出文本比较

use serde::Serialize;

use super::word_filter::clean;
use super::detection::is_word_content;

/// 富文本负载默认声明的内容类型。
pub const HTML_CONTENT_TYPE: &str = "text/html";

/// 剪贴板负载。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClipboardPayload {
    PlainText(String),
    /// 富文本标记及其声明的内容类型（如 `text/html`）。
    MarkedUp { markup: String, content_type: String },
}

/// 内容来源。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentOrigin {
    PlainText,
    Markup,
    WordProcessor,
}

impl ClipboardPayload {
    pub fn html(markup: impl Into<String>) -> Self {
        Self::MarkedUp {
            markup: markup.into(),
            content_type: HTML_CONTENT_TYPE.to_string(),
        }
    }

    /// 原始文本（比较基准）。
    pub fn raw_text(&self) -> &str {
        match self {
            Self::PlainText(text) => text,
            Self::MarkedUp { markup, .. } => markup,
        }
    }

    pub fn is_marked_up(&self) -> bool {
        matches!(self, Self::MarkedUp { .. })
    }

    /// 是否声明为 HTML（忽略参数与大小写，如 `text/html; charset=utf-8`）。
    pub fn declares_html(&self) -> bool {
        match self {
            Self::PlainText(_) => false,
            Self::MarkedUp { content_type, .. } => content_type
                .split(';')
                .next()
                .is_some_and(|essence| essence.trim().eq_ignore_ascii_case(HTML_CONTENT_TYPE)),
        }
    }

    /// 判断负载来源。
    pub fn origin(&self) -> ContentOrigin {
        match self {
            Self::PlainText(_) => ContentOrigin::PlainText,
            Self::MarkedUp { markup, .. } if self.declares_html() && is_word_content(markup) => {
                ContentOrigin::WordProcessor
            }
            Self::MarkedUp { .. } => ContentOrigin::Markup,
        }
    }
}

/// 清理结果。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SanitizedContent {
    pub text: String,
    pub was_modified: bool,
}

impl SanitizedContent {
    /// 以逐字符比较确定是否被修改。
    pub fn compare(cleaned: String, source_of_truth: &str) -> Self {
        let was_modified = cleaned != source_of_truth;
        Self {
            text: cleaned,
            was_modified,
        }
    }
}

/// 清理剪贴板负载，以负载原文作为比较基准。
///
/// 只有声明为 HTML 的富文本会进入清理；其他内容类型原样通过。
pub fn sanitize(payload: &ClipboardPayload) -> SanitizedContent {
    let cleaned = match payload {
        ClipboardPayload::MarkedUp { markup, .. } if payload.declares_html() => clean(markup),
        other => other.raw_text().to_string(),
    };

    let result = SanitizedContent::compare(cleaned, payload.raw_text());
    if result.was_modified {
        log::debug!("🧹 剪贴板内容已清理（来源：{:?}）", payload.origin());
    }
    result
}

/// 清理编辑器导出的文本，以导出文本作为比较基准。
pub fn sanitize_document_text(exported: &str) -> SanitizedContent {
    SanitizedContent::compare(clean(exported), exported)
}
