//! # 评论编辑器核心：库入口
//!
//! ## 架构总览
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │            编辑器宿主 (富文本控件 + 提示 + 保存)          │
//! │   EditorHost ── Notifier ── ClipboardSource ── CommentSink│
//! └───────┬──────────────────────────────────────────────────┘
//!         ↕ 宿主事件 / 回调 (Result<T, AppError>)
//! ┌───────┼──────────────────────────────────────────────────┐
//! │       ↕            核心 (Rust)                            │
//! │                                                          │
//! │  ┌─ session ──── EditingSession / EditorMount            │
//! │  │                                                       │
//! │  ├─ image_intake   解码·缩放·编码·体积判定                │
//! │  ├─ paste          剪贴板读取·来源识别·文字处理器清理     │
//! │  ├─ strip          保存前剥离全部标记                     │
//! │  ├─ settings       JSON 配置加载                          │
//! │  └─ error          AppError (统一错误类型)                │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! ## 模块职责
//!
//! | 模块 | 职责 |
//! |------|------|
//! | [`error`] | 统一错误类型 `AppError` |
//! | [`image_intake`] | 图片缩放到固定宽度、有损编码为 Data URI、超限拒绝 |
//! | [`paste`] | 剪贴板抽象、文字处理器内容识别与清理 |
//! | [`session`] | 编辑会话生命周期与宿主事件分派 |
//! | [`settings`] | 配置文件解析与默认值 |
//! | [`strip`] | 标记剥离为纯文本 |

pub mod error;
pub mod image_intake;
pub mod paste;
pub mod session;
pub mod settings;
pub mod strip;
