//! # 编辑会话
//!
//! ## 设计思路
//!
//! `EditingSession` 是一次评论编辑的显式生命周期对象：
//! 持有编辑器宿主、提示通道、剪贴板与保存回调，把宿主事件分派给各条流水线。
//!
//! - 文档变更 → 文字处理器检测（默认只提示，按配置回写）
//! - “从 Word 粘贴”动作 → 读取剪贴板 → 清理 → 插入/追加
//! - 图片插入请求 → 图片接收流水线 → `resolve`
//! - 保存 → 剥离标记 → `save_comment`
//!
//! ## 实现思路
//!
//! - 句柄可廉价克隆（`Arc` 内部状态），进行中的异步操作持有克隆。
//! - `destroy` 只翻转共享的 `open` 标志；每个挂起点之后都会检查该标志，
//!   会话关闭后到达的结果直接丢弃，不再写入文档。

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use serde::Serialize;

use super::host::{CommentSink, EditStatus, EditorHost, Notice, NoticeKind, Notifier};
use super::{NoticeMessages, SessionConfig};
use crate::error::AppError;
use crate::image_intake::{EncodedAsset, ImageIntake, RawAsset, SizeVerdict};
use crate::paste::{
    ClipboardPayload, ClipboardSource, PasteError, SanitizedContent, read_payload, sanitize,
    sanitize_document_text,
};
use crate::settings::EditorConfig;
use crate::strip::strip;

static NEXT_SESSION_ID: AtomicU64 = AtomicU64::new(1);

/// 会话依赖的外部协作方。
#[derive(Clone)]
pub struct SessionParts {
    pub host: Arc<dyn EditorHost>,
    pub notifier: Arc<dyn Notifier>,
    pub clipboard: Arc<dyn ClipboardSource>,
    pub sink: Arc<dyn CommentSink>,
}

/// 图片插入请求的处理结果。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ImageOutcome {
    /// 已通过 `resolve` 交给编辑器。
    Inserted,
    /// 体积超限，已提示用户。
    Rejected,
    /// 会话已在处理期间关闭，结果被丢弃。
    Discarded,
}

struct SessionInner {
    id: u64,
    config: SessionConfig,
    messages: NoticeMessages,
    parts: SessionParts,
    intake: ImageIntake,
    open: AtomicBool,
}

/// 编辑会话句柄。
#[derive(Clone)]
pub struct EditingSession {
    inner: Arc<SessionInner>,
}

impl EditingSession {
    /// 创建会话，并按配置写入初始内容。
    pub fn create(config: &EditorConfig, parts: SessionParts) -> Result<Self, AppError> {
        config.validate()?;
        let intake = ImageIntake::new(config.intake.clone())?;
        Ok(Self::with_intake(config, parts, intake))
    }

    /// 使用共享的图片处理器创建会话（多个会话共用同一档位配置）。
    pub fn with_intake(config: &EditorConfig, parts: SessionParts, intake: ImageIntake) -> Self {
        let id = NEXT_SESSION_ID.fetch_add(1, Ordering::Relaxed);

        if let Some(initial) = config.session.initial_value.as_deref() {
            parts.host.set_current_text(initial);
        }

        log::info!("📝 编辑会话已创建 - id={}", id);

        Self {
            inner: Arc::new(SessionInner {
                id,
                config: config.session.clone(),
                messages: config.messages.clone(),
                parts,
                intake,
                open: AtomicBool::new(true),
            }),
        }
    }

    pub fn id(&self) -> u64 {
        self.inner.id
    }

    pub fn is_open(&self) -> bool {
        self.inner.open.load(Ordering::SeqCst)
    }

    pub fn intake(&self) -> &ImageIntake {
        &self.inner.intake
    }

    /// 关闭会话并卸载编辑器控件。
    ///
    /// 进行中的操作在下一个检查点发现会话已关闭后放弃写入。
    pub fn destroy(self) {
        if self.inner.open.swap(false, Ordering::SeqCst) {
            self.inner.parts.host.detach();
            log::info!("🗑️ 编辑会话已销毁 - id={}", self.inner.id);
        }
    }

    fn ensure_open(&self) -> Result<(), AppError> {
        if self.is_open() {
            Ok(())
        } else {
            Err(AppError::SessionClosed)
        }
    }

    fn notify(&self, kind: NoticeKind) {
        let messages = &self.inner.messages;
        let message = match kind {
            NoticeKind::WordContentAdjusted => &messages.word_content_adjusted,
            NoticeKind::ImageTooLarge => &messages.image_too_large,
            NoticeKind::ImageUnreadable => &messages.image_unreadable,
            NoticeKind::ClipboardUnavailable => &messages.clipboard_unavailable,
        };
        self.inner.parts.notifier.notify(&Notice {
            kind,
            message: message.clone(),
        });
    }

    /// 文档内容变更。
    ///
    /// 检测到文字处理器内容时提示用户；仅在 `auto_correct_on_change` 开启时回写清理结果。
    pub fn on_content_changed(&self) -> Result<SanitizedContent, AppError> {
        self.ensure_open()?;
        let host = &self.inner.parts.host;
        let exported = host.get_current_text();
        let result = sanitize_document_text(&exported);

        if !result.was_modified {
            return Ok(result);
        }

        self.notify(NoticeKind::WordContentAdjusted);

        if self.inner.config.auto_correct_on_change {
            let replacement = if self.inner.config.strip_markup_on_change {
                strip(&result.text)
            } else {
                result.text.clone()
            };
            log::debug!("✍️ 回写清理后的文档内容 - session={}", self.inner.id);
            host.set_current_text(&replacement);
        } else {
            log::debug!("🔕 检测到文字处理器内容，仅提示不回写 - session={}", self.inner.id);
        }

        Ok(result)
    }

    /// 工具栏自定义动作。未知动作忽略并返回 `None`。
    pub async fn on_custom_action(&self, name: &str) -> Result<Option<SanitizedContent>, AppError> {
        if name != self.inner.config.word_paste_action {
            log::debug!("忽略未知自定义动作: {}", name);
            return Ok(None);
        }
        self.paste_from_word().await.map(Some)
    }

    /// “从 Word 粘贴”：读取剪贴板（优先 HTML），清理后追加到文档。
    ///
    /// 不与文档旧内容比较；是否提示取决于清理结果与剪贴板原文是否不同。
    pub async fn paste_from_word(&self) -> Result<SanitizedContent, AppError> {
        self.ensure_open()?;

        let timeout_ms = self.inner.config.clipboard_read_timeout_ms;
        let payload = match read_payload(self.inner.parts.clipboard.as_ref(), timeout_ms).await {
            Ok(payload) => payload,
            Err(PasteError::Empty) => {
                log::debug!("📋 剪贴板为空，跳过粘贴");
                return Ok(SanitizedContent::compare(String::new(), ""));
            }
            Err(err) => {
                log::warn!("⚠️ 读取剪贴板失败 - session={}：{}", self.inner.id, err);
                if self.is_open() {
                    self.notify(NoticeKind::ClipboardUnavailable);
                }
                return Err(err.into());
            }
        };

        self.ensure_open()?;

        let result = sanitize(&payload);
        if result.was_modified {
            self.notify(NoticeKind::WordContentAdjusted);
        }

        let host = &self.inner.parts.host;
        match payload {
            ClipboardPayload::PlainText(_) => host.insert_text(&result.text),
            ClipboardPayload::MarkedUp { .. } => host.append_markup(&result.text),
        }

        Ok(result)
    }

    /// 图片插入请求。
    ///
    /// 通过时以 `resolve(Some(asset))` 交回编辑器；超限或失败时提示用户并 `resolve(None)`；
    /// 会话在处理期间关闭时不调用 `resolve`。
    pub async fn on_image_insertion_requested<F>(
        &self,
        asset: RawAsset,
        resolve: F,
    ) -> Result<ImageOutcome, AppError>
    where
        F: FnOnce(Option<EncodedAsset>) + Send,
    {
        self.ensure_open()?;

        let result = self.inner.intake.intake(asset).await;

        if !self.is_open() {
            log::debug!("⏭️ 会话已关闭，丢弃图片处理结果 - session={}", self.inner.id);
            return Ok(ImageOutcome::Discarded);
        }

        match result {
            Ok(SizeVerdict::Accepted { asset }) => {
                resolve(Some(asset));
                Ok(ImageOutcome::Inserted)
            }
            Ok(SizeVerdict::Rejected { .. }) => {
                self.notify(NoticeKind::ImageTooLarge);
                resolve(None);
                Ok(ImageOutcome::Rejected)
            }
            Err(err) => {
                log::warn!("⚠️ 图片处理失败 - session={}：{}", self.inner.id, err);
                self.notify(NoticeKind::ImageUnreadable);
                resolve(None);
                Err(err.into())
            }
        }
    }

    /// 保存：剥离全部标记后交给 `save_comment`，返回保存的纯文本。
    pub fn save(&self) -> Result<String, AppError> {
        self.ensure_open()?;
        let plain = strip(&self.inner.parts.host.get_current_text());
        self.inner.parts.sink.save_comment(&plain);
        log::info!("💾 评论已保存 - session={} 长度={}", self.inner.id, plain.len());
        Ok(plain)
    }

    /// 取消编辑；保存进行中时不可取消。
    pub fn cancel(&self, status: EditStatus) -> bool {
        if status.active {
            log::debug!("保存进行中，忽略取消 - session={}", self.inner.id);
            return false;
        }
        self.inner.parts.sink.cancel_edit_comment();
        true
    }
}
