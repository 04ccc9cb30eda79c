//! 页面状态模块
//!
//! 资产页面状态与提示消息队列

mod assets;
mod toasts;

pub use assets::AssetsState;
pub use toasts::{Toast, ToastQueue};
