//! 资产数据模型
//!
//! 对应 CMDB 后端的 Asset 资源（只保留终端页面用到的字段）

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 资产
///
/// 引用字段（站点、类型、状态）保存显示名称
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Asset {
    pub id: String,
    pub name: String,
    pub tag: String,
    pub serial_number: String,
    pub model: String,
    pub asset_type: String,
    pub site: String,
    pub ip_address: String,
    pub status: String,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Asset {
    /// 表格中使用的简短标签
    pub fn label(&self) -> &str {
        if self.name.is_empty() {
            &self.id
        } else {
            &self.name
        }
    }
}

/// 全局搜索匹配的字段
pub const SEARCHABLE_FIELDS: [&str; 6] = [
    "name",
    "tag",
    "serial_number",
    "model",
    "site",
    "ip_address",
];

/// 状态筛选循环使用的值
pub const ASSET_STATUSES: [&str; 3] = ["Active", "Maintenance", "Decommissioned"];
