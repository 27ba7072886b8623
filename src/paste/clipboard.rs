//! # 剪贴板读取模块
//!
//! ## 设计思路
//!
//! 剪贴板读取是异步、可能被平台拒绝的操作，通过 `ClipboardSource` trait 抽象，
//! 测试可注入内存实现，生产使用基于 `arboard` 的系统实现。
//!
//! ## 实现思路
//!
//! - 系统剪贴板访问放在阻塞线程执行，避免阻塞事件循环。
//! - 同时读取 HTML 与纯文本；优先使用 HTML。
//! - 读取整体受超时约束，超时映射为 `PasteError::Timeout`。

use std::time::Duration;

use async_trait::async_trait;

use super::PasteError;
use super::sanitizer::ClipboardPayload;

/// 一次剪贴板读取得到的全部表示形式。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClipboardContents {
    pub plain_text: Option<String>,
    pub html: Option<String>,
}

impl ClipboardContents {
    /// 转换为负载：有 HTML 时优先使用 HTML，否则使用纯文本。
    pub fn into_payload(self) -> Result<ClipboardPayload, PasteError> {
        match (self.html, self.plain_text) {
            (Some(html), _) if !html.is_empty() => Ok(ClipboardPayload::html(html)),
            (_, Some(text)) => Ok(ClipboardPayload::PlainText(text)),
            _ => Err(PasteError::Empty),
        }
    }
}

/// 剪贴板数据源。
#[async_trait]
pub trait ClipboardSource: Send + Sync {
    async fn read(&self) -> Result<ClipboardContents, PasteError>;
}

/// 基于 `arboard` 的系统剪贴板。
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClipboard;

impl SystemClipboard {
    fn read_blocking() -> Result<ClipboardContents, PasteError> {
        let mut clipboard = arboard::Clipboard::new()
            .map_err(|e| PasteError::ClipboardAccess(format!("打开剪贴板失败：{}", e)))?;

        let html = clipboard.get().html();
        let plain_text = clipboard.get_text();
        merge_reads(html, plain_text)
    }
}

/// 合并两次读取结果：HTML 可用时，纯文本读取失败只降级为 `None`。
fn merge_reads(
    html: Result<String, arboard::Error>,
    plain_text: Result<String, arboard::Error>,
) -> Result<ClipboardContents, PasteError> {
    let html = match html {
        Ok(html) => Some(html),
        Err(arboard::Error::ContentNotAvailable) => None,
        Err(e) => {
            log::warn!("⚠️ 读取剪贴板 HTML 失败，回退纯文本：{}", e);
            None
        }
    };

    let plain_text = match plain_text {
        Ok(text) => Some(text),
        Err(arboard::Error::ContentNotAvailable) => None,
        Err(e) if html.is_some() => {
            log::warn!("⚠️ 读取剪贴板文本失败，仅使用 HTML：{}", e);
            None
        }
        Err(e) => return Err(PasteError::ClipboardAccess(format!("读取剪贴板文本失败：{}", e))),
    };

    Ok(ClipboardContents { plain_text, html })
}

#[async_trait]
impl ClipboardSource for SystemClipboard {
    async fn read(&self) -> Result<ClipboardContents, PasteError> {
        tokio::task::spawn_blocking(Self::read_blocking)
            .await
            .map_err(|e| PasteError::ClipboardAccess(format!("线程执行失败：{}", e)))?
    }
}

/// 在超时约束下读取剪贴板并转换为负载。
pub async fn read_payload(
    source: &dyn ClipboardSource,
    timeout_ms: u64,
) -> Result<ClipboardPayload, PasteError> {
    let contents = tokio::time::timeout(Duration::from_millis(timeout_ms), source.read())
        .await
        .map_err(|_| PasteError::Timeout(timeout_ms))??;

    let payload = contents.into_payload()?;
    log::debug!(
        "📋 读取剪贴板 - 类型: {} 长度: {}",
        if payload.is_marked_up() { "html" } else { "text" },
        payload.raw_text().len()
    );
    Ok(payload)
}
