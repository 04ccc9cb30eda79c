//! 内存资产后端
//!
//! 未配置 API 地址时使用，带演示数据；校验行为与服务端一致（返回字段级错误）

use std::collections::BTreeMap;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use cmdb_ui_core::types::{BulkDeleteResponse, BulkFailure, FieldErrors};
use cmdb_ui_core::{CoreError, CoreResult};
use tokio::sync::RwLock;

use super::AssetBackend;
use crate::model::domain::{Asset, AssetForm};

/// 基于内存的资产后端
pub struct InMemoryAssetBackend {
    assets: RwLock<Vec<Asset>>,
    /// 模拟网络延迟
    latency: Duration,
}

impl InMemoryAssetBackend {
    pub fn new(assets: Vec<Asset>) -> Self {
        Self {
            assets: RwLock::new(assets),
            latency: Duration::ZERO,
        }
    }

    /// 带演示数据的后端
    pub fn with_demo_data() -> Self {
        Self::new(demo_assets())
    }

    #[must_use]
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    async fn simulate_latency(&self) {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
    }

    /// 服务端校验：必填字段与标签唯一
    fn validate(assets: &[Asset], form: &AssetForm, own_id: Option<&str>) -> CoreResult<()> {
        let mut errors = FieldErrors::new();
        if form.name.trim().is_empty() {
            errors.insert("name".to_string(), "field required".to_string());
        }
        if form.site.trim().is_empty() {
            errors.insert("site".to_string(), "field required".to_string());
        }
        let tag = form.tag.trim();
        if !tag.is_empty()
            && assets
                .iter()
                .any(|a| a.tag.eq_ignore_ascii_case(tag) && Some(a.id.as_str()) != own_id)
        {
            errors.insert("tag".to_string(), "tag already in use".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(CoreError::Validation(errors))
        }
    }
}

fn apply_form(asset: &mut Asset, form: AssetForm) {
    asset.name = form.name.trim().to_string();
    asset.tag = form.tag.trim().to_string();
    asset.serial_number = form.serial_number.trim().to_string();
    asset.model = form.model.trim().to_string();
    asset.asset_type = form.asset_type.trim().to_string();
    asset.site = form.site.trim().to_string();
    asset.ip_address = form.ip_address.trim().to_string();
    asset.status = form.status.trim().to_string();
    asset.updated_at = Some(Utc::now());
}

#[async_trait]
impl AssetBackend for InMemoryAssetBackend {
    fn name(&self) -> &'static str {
        "demo data"
    }

    async fn list(&self, params: &BTreeMap<String, String>) -> CoreResult<Vec<Asset>> {
        self.simulate_latency().await;
        log::debug!("Listing demo assets (params: {params:?})");
        Ok(self.assets.read().await.clone())
    }

    async fn create(&self, form: AssetForm) -> CoreResult<Asset> {
        self.simulate_latency().await;
        let mut assets = self.assets.write().await;
        Self::validate(&assets, &form, None)?;

        let mut asset = Asset {
            id: uuid::Uuid::new_v4().to_string(),
            ..Asset::default()
        };
        apply_form(&mut asset, form);
        assets.push(asset.clone());
        log::info!("Created asset {} ({})", asset.name, asset.id);
        Ok(asset)
    }

    async fn update(&self, id: &str, form: AssetForm) -> CoreResult<Asset> {
        self.simulate_latency().await;
        let mut assets = self.assets.write().await;
        Self::validate(&assets, &form, Some(id))?;

        let asset = assets
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or_else(|| CoreError::NotFound(format!("Asset {id} not found")))?;
        apply_form(asset, form);
        log::info!("Updated asset {} ({id})", asset.name);
        Ok(asset.clone())
    }

    async fn delete(&self, id: &str) -> CoreResult<()> {
        self.simulate_latency().await;
        let mut assets = self.assets.write().await;
        let before = assets.len();
        assets.retain(|a| a.id != id);
        if assets.len() == before {
            return Err(CoreError::NotFound(format!("Asset {id} not found")));
        }
        log::info!("Deleted asset {id}");
        Ok(())
    }

    async fn bulk_delete(&self, ids: &[String]) -> CoreResult<BulkDeleteResponse> {
        self.simulate_latency().await;
        let mut assets = self.assets.write().await;
        let mut response = BulkDeleteResponse::default();

        for id in ids {
            if let Some(pos) = assets.iter().position(|a| &a.id == id) {
                assets.remove(pos);
                response.deleted.push(id.clone());
            } else {
                response.errors.push(BulkFailure {
                    id: id.clone(),
                    error: "Asset not found or already in the trash".to_string(),
                });
            }
        }
        log::info!(
            "Bulk delete: {} deleted, {} failed",
            response.deleted.len(),
            response.errors.len()
        );
        Ok(response)
    }
}

/// 演示数据
fn demo_assets() -> Vec<Asset> {
    let rows = [
        ("PLC Line 1", "PLC-001", "SN-7731", "S7-1500", "PLC", "Plant A", "10.0.1.10", "Active"),
        ("PLC Line 2", "PLC-002", "SN-7732", "S7-1500", "PLC", "Plant A", "10.0.1.11", "Active"),
        ("HMI Packaging", "HMI-010", "HM-2210", "TP1200", "HMI", "Plant A", "10.0.2.20", "Maintenance"),
        ("Core Switch", "SW-001", "CS-9001", "IE-4000", "Switch", "Plant B", "10.0.0.1", "Active"),
        ("Historian", "SRV-005", "HS-1200", "PowerEdge R650", "Server", "Datacenter", "10.10.0.5", "Active"),
        ("Legacy RTU", "RTU-003", "RT-0042", "SCADAPack 32", "RTU", "Plant B", "", "Decommissioned"),
    ];

    rows.iter()
        .enumerate()
        .map(
            |(i, (name, tag, serial, model, asset_type, site, ip, status))| Asset {
                id: format!("demo-{}", i + 1),
                name: (*name).to_string(),
                tag: (*tag).to_string(),
                serial_number: (*serial).to_string(),
                model: (*model).to_string(),
                asset_type: (*asset_type).to_string(),
                site: (*site).to_string(),
                ip_address: (*ip).to_string(),
                status: (*status).to_string(),
                updated_at: None,
            },
        )
        .collect()
}
