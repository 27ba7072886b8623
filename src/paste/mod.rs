//! # 粘贴清理模块（paste）
//!
//! ## 设计思路
//!
//! 从文字处理器粘贴的内容会带入大量私有标记，导致编辑器丢内容或报错。
//! 本模块负责：读取剪贴板 → 识别来源 → 清理私有标记 → 报告内容是否被修改。
//!
//! - `detection`：文字处理器来源特征识别
//! - `word_filter`：有序清理规则（列表转换、条件注释、样式、命名空间标签）
//! - `sanitizer`：负载模型与“是否修改”的比较
//! - `clipboard`：剪贴板数据源抽象与系统实现
//!
//! 是否提示用户、是否回写文档由会话层（`session`）根据配置决定。

pub mod clipboard;
pub mod detection;
mod error;
mod sanitizer;
mod word_filter;

pub use clipboard::{ClipboardContents, ClipboardSource, SystemClipboard, read_payload};
pub use detection::is_word_content;
pub use error::PasteError;
pub use sanitizer::{
    ClipboardPayload, ContentOrigin, HTML_CONTENT_TYPE, SanitizedContent, sanitize,
    sanitize_document_text,
};
pub use word_filter::clean;
