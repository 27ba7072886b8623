//! # 编辑会话模块（session）
//!
//! ## 设计思路
//!
//! 把一次评论编辑建模为显式的会话对象，取代隐式的组件生命周期：
//! 创建时挂载编辑器控件并写入初始内容，销毁时卸载控件，
//! 会话期间把宿主事件分派到图片接收与粘贴清理流水线。
//!
//! - `config`：会话行为配置与提示文案
//! - `host`：编辑器控件、提示通道与保存回调的协作接口
//! - `editing`：`EditingSession` 事件分派
//! - `mount`：幂等挂载/卸载
//!
//! ## 事件流
//!
//! ```text
//! 宿主事件
//!    ├─ 内容变更      → on_content_changed  → 提示（可选回写）
//!    ├─ 自定义动作    → on_custom_action    → 剪贴板 → 清理 → 插入/追加
//!    ├─ 图片插入请求  → on_image_insertion_requested → ImageIntake → resolve
//!    ├─ 保存          → save   → strip → save_comment
//!    └─ 取消          → cancel → cancel_edit_comment
//! ```

mod config;
mod editing;
mod host;
mod mount;

pub use config::{NoticeMessages, SessionConfig, WORD_PASTE_ACTION};
pub use editing::{EditingSession, ImageOutcome, SessionParts};
pub use host::{CommentSink, EditStatus, EditorHost, Notice, NoticeKind, Notifier};
pub use mount::EditorMount;
