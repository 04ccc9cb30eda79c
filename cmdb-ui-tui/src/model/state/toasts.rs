//! 提示消息队列
//!
//! 实现 cmdb-ui-core 的 Notifier trait；控制器的成功/失败提示都进入这里，
//! 主循环每一轮调用 `prune` 清理过期消息。

use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use cmdb_ui_core::types::Severity;
use cmdb_ui_core::Notifier;

/// 同时显示的最大条数
const MAX_TOASTS: usize = 4;

/// 一条提示消息
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub severity: Severity,
    pub message: String,
    pub expires_at: Instant,
}

/// 提示消息队列
pub struct ToastQueue {
    toasts: Mutex<VecDeque<Toast>>,
    ttl: Duration,
}

impl ToastQueue {
    pub fn new(ttl: Duration) -> Self {
        Self {
            toasts: Mutex::new(VecDeque::new()),
            ttl,
        }
    }

    /// 当前显示的消息（旧的在前）
    pub fn active(&self) -> Vec<Toast> {
        self.lock().iter().cloned().collect()
    }

    /// 移除过期消息，返回是否有变化
    pub fn prune(&self, now: Instant) -> bool {
        let mut toasts = self.lock();
        let before = toasts.len();
        toasts.retain(|t| t.expires_at > now);
        toasts.len() != before
    }

    fn lock(&self) -> MutexGuard<'_, VecDeque<Toast>> {
        self.toasts.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Notifier for ToastQueue {
    fn display(&self, severity: Severity, message: &str) {
        log::debug!("Toast [{}] {message}", severity.label());
        let mut toasts = self.lock();
        if toasts.len() == MAX_TOASTS {
            toasts.pop_front();
        }
        toasts.push_back(Toast {
            severity,
            message: message.to_string(),
            expires_at: Instant::now() + self.ttl,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toasts_expire_after_ttl() {
        let queue = ToastQueue::new(Duration::from_secs(4));
        queue.display(Severity::Success, "Asset saved");
        assert_eq!(queue.active().len(), 1);

        assert!(!queue.prune(Instant::now()));
        assert!(queue.prune(Instant::now() + Duration::from_secs(5)));
        assert!(queue.active().is_empty());
    }

    #[test]
    fn oldest_toast_is_dropped_when_full() {
        let queue = ToastQueue::new(Duration::from_secs(4));
        for i in 0..=MAX_TOASTS {
            queue.display(Severity::Info, &format!("message {i}"));
        }
        let active = queue.active();
        assert_eq!(active.len(), MAX_TOASTS);
        assert_eq!(active[0].message, "message 1");
    }
}
