//! 资产数据访问 trait

use std::collections::BTreeMap;

use async_trait::async_trait;
use cmdb_ui_core::types::BulkDeleteResponse;
use cmdb_ui_core::CoreResult;

use crate::model::domain::{Asset, AssetForm};

/// 资产后端
///
/// 平台实现：
/// - `HttpAssetBackend`: CMDB REST API (`/assets`)
/// - `InMemoryAssetBackend`: 未配置 API 地址时使用的演示数据
#[async_trait]
pub trait AssetBackend: Send + Sync {
    /// 后端名称（显示在标题栏）
    fn name(&self) -> &'static str;

    /// 获取资产列表
    ///
    /// `params` 来自 `FilterEngine::get_api_params`，后端可以忽略不支持的参数
    async fn list(&self, params: &BTreeMap<String, String>) -> CoreResult<Vec<Asset>>;

    async fn create(&self, form: AssetForm) -> CoreResult<Asset>;

    async fn update(&self, id: &str, form: AssetForm) -> CoreResult<Asset>;

    async fn delete(&self, id: &str) -> CoreResult<()>;

    async fn bulk_delete(&self, ids: &[String]) -> CoreResult<BulkDeleteResponse>;
}
