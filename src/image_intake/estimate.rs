//! # 体积估算与判定
//!
//! ## 设计思路
//!
//! 体积不通过解码 Base64 精确计算，而是按“每 4 个字符对应 3 个字节”的膨胀比
//! 配合经验系数估算。上限（5MB）是针对该估算值标定的，
//! 因此系数必须原样保留，不能替换为理论值 0.75。
//!
//! 估算时扣除的前缀长度固定为 `data:image/png;base64,` 的长度，与实际媒体类型无关。

use super::source::{EncodedAsset, RejectReason, SizeVerdict};

/// Base64 膨胀与压缩率的经验合成系数。
pub const BASE64_SIZE_COEFFICIENT: f64 = 0.5624896334383812;

/// 估算时扣除的固定前缀。
pub const MEDIA_MARKER: &str = "data:image/png;base64,";

/// 按 Base64 负载长度估算字节体积。
///
/// 公式：`4 * ceil(L / 3) * BASE64_SIZE_COEFFICIENT`。
pub fn estimate_payload_bytes(payload_len: usize) -> f64 {
    let groups = payload_len.div_ceil(3);
    4.0 * groups as f64 * BASE64_SIZE_COEFFICIENT
}

/// 对完整 Data URI 估算字节体积。
pub fn estimate_data_uri_bytes(data_uri: &str) -> f64 {
    estimate_payload_bytes(data_uri.len().saturating_sub(MEDIA_MARKER.len()))
}

/// 以估算值对编码结果做最终判定；等于上限视为通过。
pub fn judge(asset: EncodedAsset, estimated: f64, ceiling: u64) -> SizeVerdict {
    if estimated > ceiling as f64 {
        log::warn!(
            "🚫 图片超过体积上限 - 预计 {:.1}KB（上限 {}KB）",
            estimated / 1000.0,
            ceiling / 1000
        );
        return SizeVerdict::Rejected {
            reason: RejectReason::Oversized { estimated, ceiling },
        };
    }

    log::debug!("📦 图片体积预计 {:.1}KB，通过", estimated / 1000.0);
    SizeVerdict::Accepted { asset }
}
