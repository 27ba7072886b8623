//! # 核心编排模块
//!
//! ## 设计思路
//!
//! `ImageIntake` 只负责流程编排与配置管理，不直接与编辑器宿主绑定。
//! 处理链路固定为：
//! 1. 读取配置快照
//! 2. 解码（阻塞线程）
//! 3. 计算缩放尺寸
//! 4. 绘制并编码（阻塞线程）
//! 5. 估算体积并给出结论
//!
//! ## 实现思路
//!
//! - 配置通过 `Arc<RwLock<IntakeConfig>>` 支持运行时切换档位。
//! - 单次请求内使用“同一配置快照”，避免处理中途配置漂移。
//! - CPU 密集阶段放到 `spawn_blocking`，避免阻塞宿主事件循环。
//! - 记录 `decode/scale/encode/total` 阶段耗时，便于性能诊断。

use std::sync::{Arc, RwLock};
use std::time::Instant;

use super::source::{RawAsset, ScaledDimensions, SizeVerdict};
use super::{ImageError, IntakeConfig, IntakeProfile, estimate, pipeline};

/// 图片接收处理器。
///
/// 克隆开销很小，多个会话可以共享同一份配置。
#[derive(Clone)]
pub struct ImageIntake {
    config: Arc<RwLock<IntakeConfig>>,
}

impl ImageIntake {
    /// 根据初始配置创建处理器。
    ///
    /// # 示例
    /// ```rust
    /// use comment_editor::image_intake::{ImageIntake, IntakeConfig};
    ///
    /// let intake = ImageIntake::new(IntakeConfig::default())?;
    /// # Ok::<(), comment_editor::image_intake::ImageError>(())
    /// ```
    pub fn new(config: IntakeConfig) -> Result<Self, ImageError> {
        config.validate()?;
        Ok(Self {
            config: Arc::new(RwLock::new(config)),
        })
    }

    /// 获取配置快照。
    pub fn config_snapshot(&self) -> Result<IntakeConfig, ImageError> {
        self.config
            .read()
            .map(|cfg| cfg.clone())
            .map_err(|_| ImageError::ResourceLimit("配置读取锁已中毒".to_string()))
    }

    /// 设置档位。
    pub fn set_profile(&self, profile: IntakeProfile) -> Result<(), ImageError> {
        let mut config = self
            .config
            .write()
            .map_err(|_| ImageError::ResourceLimit("配置写入锁已中毒".to_string()))?;
        config.apply_profile(profile);

        log::info!(
            "⚙️ 已切换图片档位：{:?}（format={:?}, filter={:?}）",
            profile,
            config.output_format,
            config.resize_filter
        );

        Ok(())
    }

    /// 获取当前生效档位。
    pub fn profile(&self) -> Result<IntakeProfile, ImageError> {
        let config = self
            .config
            .read()
            .map_err(|_| ImageError::ResourceLimit("配置读取锁已中毒".to_string()))?;
        Ok(config.infer_profile())
    }

    /// 处理主入口：解码 → 计算缩放 → 绘制 → 编码 → 体积判定。
    ///
    /// 解码、尺寸、编码失败以 `Err` 返回；体积超限以 `SizeVerdict::Rejected` 返回。
    ///
    /// # 示例
    /// ```rust,no_run
    /// use comment_editor::image_intake::{ImageIntake, IntakeConfig, RawAsset};
    ///
    /// # async fn demo(bytes: Vec<u8>) -> Result<(), comment_editor::image_intake::ImageError> {
    /// let intake = ImageIntake::new(IntakeConfig::default())?;
    /// let verdict = intake.intake(RawAsset::new(bytes, "image/png")).await?;
    /// println!("accepted = {}", verdict.is_accepted());
    /// # Ok(())
    /// # }
    /// ```
    pub async fn intake(&self, asset: RawAsset) -> Result<SizeVerdict, ImageError> {
        let config = self.config_snapshot()?;
        let total_start = Instant::now();

        let decode_start = Instant::now();
        let decode_config = config.clone();
        let decoded = tokio::task::spawn_blocking(move || pipeline::decode(&asset, &decode_config))
            .await
            .map_err(|e| ImageError::Decode(format!("线程执行失败：{}", e)))??;
        let decode_elapsed = decode_start.elapsed();

        let scaled = ScaledDimensions::compute(decoded.dimensions, config.target_width)?;

        let encode_start = Instant::now();
        let draw_config = config.clone();
        let encoded = tokio::task::spawn_blocking(move || {
            let drawn = pipeline::draw(decoded, &scaled, &draw_config)?;
            pipeline::encode(&drawn, draw_config.output_format)
        })
        .await
        .map_err(|e| ImageError::Encode(format!("线程执行失败：{}", e)))??;
        let encode_elapsed = encode_start.elapsed();

        let estimated = encoded.estimated_size();
        let verdict = estimate::judge(encoded, estimated, config.max_encoded_bytes);

        log::info!(
            "✅ 图片接收完成 - 缩放比例={:.3} 预计体积={:.1}KB 结论={} decode={}ms encode={}ms total={}ms",
            scaled.scale_factor,
            estimated / 1000.0,
            if verdict.is_accepted() { "accepted" } else { "rejected" },
            decode_elapsed.as_millis(),
            encode_elapsed.as_millis(),
            total_start.elapsed().as_millis()
        );

        Ok(verdict)
    }
}
