//! 配置加载模块
//!
//! 编辑器的全部可调项集中在 `EditorConfig`，从 JSON 文件加载；
//! 文件不存在时使用默认值，缺失字段同样回落到默认值。

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::image_intake::IntakeConfig;
use crate::session::{NoticeMessages, SessionConfig};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    pub intake: IntakeConfig,
    pub session: SessionConfig,
    pub messages: NoticeMessages,
}

impl EditorConfig {
    pub fn validate(&self) -> Result<(), AppError> {
        self.intake
            .validate()
            .map_err(|e| AppError::Config(e.to_string()))?;
        if self.session.clipboard_read_timeout_ms == 0 {
            return Err(AppError::Config("clipboard_read_timeout_ms 不能为 0".to_string()));
        }
        if self.session.word_paste_action.trim().is_empty() {
            return Err(AppError::Config("word_paste_action 不能为空".to_string()));
        }
        Ok(())
    }
}

/// 解析 JSON 配置文本。
pub fn parse_config(content: &str) -> Result<EditorConfig, AppError> {
    let config = serde_json::from_str::<EditorConfig>(content)
        .map_err(|e| AppError::Config(format!("解析配置文件失败: {}", e)))?;
    config.validate()?;
    Ok(config)
}

/// 从文件加载配置；文件不存在时返回默认配置。
pub fn load_config(path: &Path) -> Result<EditorConfig, AppError> {
    if !path.exists() {
        log::debug!("⚙️ 配置文件不存在，使用默认配置: {}", path.display());
        return Ok(EditorConfig::default());
    }

    let content = fs::read_to_string(path)?;
    let config = parse_config(&content)?;
    log::info!("⚙️ 已加载配置: {}", path.display());
    Ok(config)
}
