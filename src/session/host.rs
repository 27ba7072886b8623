//! # 宿主协作接口
//!
//! ## 设计思路
//!
//! 富文本编辑器控件、用户提示与保存/取消回调都属于外部协作方，
//! 这里只定义会话需要的最小契约，便于测试注入内存实现。
//!
//! 宿主在单个事件循环上串行派发事件，方法均以 `&self` 调用；
//! 需要可变状态的实现自行使用内部可变性。

use serde::Serialize;

/// 编辑器控件。
pub trait EditorHost: Send + Sync {
    /// 导出文档当前文本（markdown）。
    fn get_current_text(&self) -> String;

    /// 替换文档内容；宿主随后会派发变更事件。
    fn set_current_text(&self, text: &str);

    /// 在光标处插入纯文本。
    fn insert_text(&self, text: &str);

    /// 在文档末尾追加富文本标记。
    fn append_markup(&self, markup: &str);

    /// 会话销毁时卸载控件。
    fn detach(&self) {}
}

/// 提示类型。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeKind {
    WordContentAdjusted,
    ImageTooLarge,
    ImageUnreadable,
    ClipboardUnavailable,
}

/// 面向用户的提示。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

/// 用户提示通道。
pub trait Notifier: Send + Sync {
    fn notify(&self, notice: &Notice);
}

/// 保存/取消回调。
pub trait CommentSink: Send + Sync {
    fn save_comment(&self, plain_text: &str);
    fn cancel_edit_comment(&self);
}

/// 评论编辑状态；保存进行中时取消按钮不可用。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EditStatus {
    pub active: bool,
}
