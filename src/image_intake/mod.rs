//! # 图片接收模块（image_intake）
//!
//! ## 设计思路
//!
//! 编辑器粘贴/拖入图片时，宿主把原始字节交给本模块。模块负责：
//! 解码 → 按固定宽度（600）等比缩放 → 有损编码为 Data URI → 估算体积 → 给出结论。
//! 成品 PDF 中不需要原始尺寸的大图，超过体积上限的图片直接拒绝。
//!
//! - `handler`：编排整条处理流水线（异步，按顺序挂起）
//! - `pipeline`：负责解码、绘制（缩放）与编码
//! - `estimate`：Base64 体积估算与上限判定
//! - `config/error/source`：配置、错误、中间数据模型
//!
//! ## 调用链
//!
//! ```text
//! EditingSession::on_image_insertion_requested
//!    ↓
//! handler.rs（配置快照 + 阶段耗时日志）
//!    ├─ pipeline::decode（spawn_blocking）
//!    ├─ ScaledDimensions::compute
//!    ├─ pipeline::draw + pipeline::encode（spawn_blocking）
//!    └─ estimate::judge
//!    ↓
//! SizeVerdict（Accepted / Rejected）
//! ```

mod config;
mod error;
pub mod estimate;
mod handler;
mod pipeline;
mod source;

pub use config::{
    DEFAULT_MAX_ENCODED_BYTES, DEFAULT_TARGET_WIDTH, IntakeConfig, IntakeProfile, OutputFormat,
    ResizeFilter,
};
pub use error::ImageError;
pub use handler::ImageIntake;
pub use source::{Dimensions, EncodedAsset, RawAsset, RejectReason, ScaledDimensions, SizeVerdict};
