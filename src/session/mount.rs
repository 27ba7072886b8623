//! 编辑器挂载点
//!
//! 一个挂载点至多持有一个打开的会话；重复挂载复用已有会话，
//! 卸载（或挂载点被丢弃）时销毁会话。

use super::editing::{EditingSession, SessionParts};
use crate::error::AppError;
use crate::settings::EditorConfig;

pub struct EditorMount {
    config: EditorConfig,
    session: Option<EditingSession>,
}

impl EditorMount {
    pub fn new(config: EditorConfig) -> Self {
        Self {
            config,
            session: None,
        }
    }

    /// 挂载编辑器。已有打开的会话时直接返回，不会再次调用 `make_parts`。
    pub fn mount_with<F>(&mut self, make_parts: F) -> Result<EditingSession, AppError>
    where
        F: FnOnce() -> SessionParts,
    {
        if let Some(existing) = self.session.as_ref().filter(|s| s.is_open()) {
            log::debug!("编辑器已挂载，跳过重复创建 - session={}", existing.id());
            return Ok(existing.clone());
        }

        let session = EditingSession::create(&self.config, make_parts())?;
        self.session = Some(session.clone());
        Ok(session)
    }

    pub fn is_mounted(&self) -> bool {
        self.session.as_ref().is_some_and(EditingSession::is_open)
    }

    /// 卸载并销毁当前会话；没有会话时返回 `false`。
    pub fn unmount(&mut self) -> bool {
        match self.session.take() {
            Some(session) => {
                session.destroy();
                true
            }
            None => false,
        }
    }
}

impl Drop for EditorMount {
    fn drop(&mut self) {
        self.unmount();
    }
}
