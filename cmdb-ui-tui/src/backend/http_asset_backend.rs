//! CMDB REST 资产后端
//!
//! 服务端以 id 引用站点、类型和状态，读取时带回嵌套对象。
//! 本后端在列表时记录 名称 -> id 的映射，提交时按名称换回 id；
//! 未知名称原样作为 id 发送，由服务端校验。
//!
//! 列表按 `skip`/`limit` 分页取全量。筛选参数换成服务端的名字，
//! 状态和站点按已记录的 id 发送；尚未见过的名称不发给服务端，
//! 只在客户端过滤。

use std::collections::{BTreeMap, HashMap};
use std::future::Future;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use cmdb_ui_core::http::ApiClient;
use cmdb_ui_core::types::{BulkDeleteResponse, FieldErrors};
use cmdb_ui_core::{CoreError, CoreResult};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use super::AssetBackend;
use crate::model::domain::{Asset, AssetForm};

const RESOURCE: &str = "assets";

/// 每页条数，与服务端默认 limit 一致
const PAGE_SIZE: usize = 100;

/// 分页上限，防止服务端忽略 skip 时无限循环
const MAX_PAGES: usize = 1000;

/// 服务端原样接受的筛选参数
const PASSTHROUGH_PARAMS: &[&str] = &["business_criticality", "risk_score_min", "risk_score_max"];

/// 嵌套引用对象（site / asset_type / status）
#[derive(Debug, Clone, Deserialize)]
struct WireReference {
    id: String,
    name: String,
}

#[derive(Debug, Clone, Deserialize)]
struct WireInterface {
    #[serde(default)]
    ip_address: Option<String>,
}

/// 服务端返回的资产
#[derive(Debug, Clone, Deserialize)]
struct WireAsset {
    id: String,
    name: String,
    #[serde(default)]
    tag: Option<String>,
    #[serde(default)]
    serial_number: Option<String>,
    #[serde(default)]
    model: Option<String>,
    #[serde(default)]
    site_id: Option<String>,
    #[serde(default)]
    asset_type_id: Option<String>,
    #[serde(default)]
    status_id: Option<String>,
    #[serde(default)]
    site: Option<WireReference>,
    #[serde(default)]
    asset_type: Option<WireReference>,
    #[serde(default)]
    status: Option<WireReference>,
    #[serde(default)]
    interfaces: Option<Vec<WireInterface>>,
    #[serde(default)]
    updated_at: Option<DateTime<Utc>>,
}

/// 提交给服务端的资产
#[derive(Debug, Serialize)]
struct AssetPayload {
    name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    tag: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    serial_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    model: Option<String>,
    site_id: Option<String>,
    asset_type_id: Option<String>,
    status_id: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    interfaces: Vec<InterfacePayload>,
}

#[derive(Debug, Serialize)]
struct InterfacePayload {
    name: String,
    ip_address: String,
}

/// 引用类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum ReferenceKind {
    Site,
    AssetType,
    Status,
}

fn non_empty(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

/// 引用显示名称，缺失时退回 id
fn reference_name(reference: Option<&WireReference>, id: Option<&String>) -> String {
    reference
        .map(|r| r.name.clone())
        .or_else(|| id.cloned())
        .unwrap_or_default()
}

impl From<WireAsset> for Asset {
    fn from(wire: WireAsset) -> Self {
        let ip_address = wire
            .interfaces
            .as_deref()
            .unwrap_or_default()
            .iter()
            .find_map(|i| i.ip_address.clone())
            .unwrap_or_default();

        Self {
            site: reference_name(wire.site.as_ref(), wire.site_id.as_ref()),
            asset_type: reference_name(wire.asset_type.as_ref(), wire.asset_type_id.as_ref()),
            status: reference_name(wire.status.as_ref(), wire.status_id.as_ref()),
            id: wire.id,
            name: wire.name,
            tag: wire.tag.unwrap_or_default(),
            serial_number: wire.serial_number.unwrap_or_default(),
            model: wire.model.unwrap_or_default(),
            ip_address,
            updated_at: wire.updated_at,
        }
    }
}

/// 服务端字段名 -> 表单字段名
fn remap_field(field: &str) -> String {
    match field {
        "site_id" => "site".to_string(),
        "asset_type_id" => "asset_type".to_string(),
        "status_id" => "status".to_string(),
        f if f.starts_with("interfaces") && f.ends_with("ip_address") => "ip_address".to_string(),
        f => f.to_string(),
    }
}

fn remap_errors(err: CoreError) -> CoreError {
    match err {
        CoreError::Validation(errors) => CoreError::Validation(
            errors
                .into_iter()
                .map(|(field, message)| (remap_field(&field), message))
                .collect::<FieldErrors>(),
        ),
        other => other,
    }
}

/// 逐页拉取，直到某页不足 `page_size` 条
async fn collect_pages<T, F, Fut>(page_size: usize, mut fetch: F) -> CoreResult<Vec<T>>
where
    F: FnMut(usize) -> Fut,
    Fut: Future<Output = CoreResult<Vec<T>>>,
{
    let mut items = Vec::new();
    for _ in 0..MAX_PAGES {
        let page = fetch(items.len()).await?;
        let last = page.len() < page_size;
        items.extend(page);
        if last {
            return Ok(items);
        }
    }
    log::warn!("Stopped paging after {MAX_PAGES} pages ({} items)", items.len());
    Ok(items)
}

/// 基于 CMDB REST API 的资产后端
pub struct HttpAssetBackend {
    client: ApiClient,
    references: RwLock<HashMap<(ReferenceKind, String), String>>,
}

impl HttpAssetBackend {
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            references: RwLock::new(HashMap::new()),
        }
    }

    async fn remember_references(&self, wire: &[WireAsset]) {
        let mut references = self.references.write().await;
        for asset in wire {
            let pairs = [
                (ReferenceKind::Site, &asset.site),
                (ReferenceKind::AssetType, &asset.asset_type),
                (ReferenceKind::Status, &asset.status),
            ];
            for (kind, reference) in pairs {
                if let Some(r) = reference {
                    references.insert((kind, r.name.to_lowercase()), r.id.clone());
                }
            }
        }
    }

    async fn resolve(&self, kind: ReferenceKind, name: &str) -> Option<String> {
        let name = non_empty(name)?;
        let references = self.references.read().await;
        Some(
            references
                .get(&(kind, name.to_lowercase()))
                .cloned()
                .unwrap_or(name),
        )
    }

    /// 仅查已记录的 id，不退回名称
    async fn known_id(&self, kind: ReferenceKind, name: &str) -> Option<String> {
        let references = self.references.read().await;
        references.get(&(kind, name.trim().to_lowercase())).cloned()
    }

    /// 筛选参数 -> 服务端查询参数
    async fn server_query(&self, params: &BTreeMap<String, String>) -> BTreeMap<String, String> {
        let mut query = BTreeMap::new();
        for (key, value) in params {
            let mapped = match key.as_str() {
                "search" => Some(("global_search", value.clone())),
                "status" => self
                    .known_id(ReferenceKind::Status, value)
                    .await
                    .map(|id| ("status_id", id)),
                "site" => self
                    .known_id(ReferenceKind::Site, value)
                    .await
                    .map(|id| ("site_id", id)),
                k if PASSTHROUGH_PARAMS.contains(&k) => Some((k, value.clone())),
                _ => None,
            };
            match mapped {
                Some((name, value)) => {
                    query.insert(name.to_string(), value);
                }
                None => log::debug!("Filtering '{key}' on the client only"),
            }
        }
        query
    }

    async fn payload(&self, form: AssetForm) -> AssetPayload {
        AssetPayload {
            site_id: self.resolve(ReferenceKind::Site, &form.site).await,
            asset_type_id: self.resolve(ReferenceKind::AssetType, &form.asset_type).await,
            status_id: self.resolve(ReferenceKind::Status, &form.status).await,
            interfaces: non_empty(&form.ip_address)
                .map(|ip_address| InterfacePayload {
                    name: "eth0".to_string(),
                    ip_address,
                })
                .into_iter()
                .collect(),
            name: form.name.trim().to_string(),
            tag: non_empty(&form.tag),
            serial_number: non_empty(&form.serial_number),
            model: non_empty(&form.model),
        }
    }
}

#[async_trait]
impl AssetBackend for HttpAssetBackend {
    fn name(&self) -> &'static str {
        "CMDB API"
    }

    async fn list(&self, params: &BTreeMap<String, String>) -> CoreResult<Vec<Asset>> {
        let query = self.server_query(params).await;
        let wire: Vec<WireAsset> = collect_pages(PAGE_SIZE, |skip| {
            let mut page = query.clone();
            page.insert("skip".to_string(), skip.to_string());
            page.insert("limit".to_string(), PAGE_SIZE.to_string());
            async move { self.client.list(RESOURCE, &page).await }
        })
        .await?;
        self.remember_references(&wire).await;
        Ok(wire.into_iter().map(Asset::from).collect())
    }

    async fn create(&self, form: AssetForm) -> CoreResult<Asset> {
        let payload = self.payload(form).await;
        let wire: WireAsset = self
            .client
            .create(RESOURCE, &payload)
            .await
            .map_err(remap_errors)?;
        Ok(wire.into())
    }

    async fn update(&self, id: &str, form: AssetForm) -> CoreResult<Asset> {
        let payload = self.payload(form).await;
        let wire: WireAsset = self
            .client
            .update(RESOURCE, id, &payload)
            .await
            .map_err(remap_errors)?;
        Ok(wire.into())
    }

    async fn delete(&self, id: &str) -> CoreResult<()> {
        self.client.delete(RESOURCE, id).await
    }

    async fn bulk_delete(&self, ids: &[String]) -> CoreResult<BulkDeleteResponse> {
        self.client.bulk_delete(RESOURCE, ids).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cmdb_ui_core::http::DEFAULT_TIMEOUT;

    fn backend() -> HttpAssetBackend {
        HttpAssetBackend::new(ApiClient::new("http://localhost:8000/api/v1", DEFAULT_TIMEOUT).unwrap())
    }

    fn wire(json: &str) -> WireAsset {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn nested_references_become_names() {
        let asset = Asset::from(wire(
            r#"{
                "id": "a1", "name": "PLC Line 1", "tag": "PLC-001",
                "site_id": "s1", "site": {"id": "s1", "name": "Plant A"},
                "asset_type_id": "t9",
                "interfaces": [{"ip_address": null}, {"ip_address": "10.0.1.10"}]
            }"#,
        ));
        assert_eq!(asset.site, "Plant A");
        assert_eq!(asset.asset_type, "t9");
        assert_eq!(asset.status, "");
        assert_eq!(asset.ip_address, "10.0.1.10");
        assert_eq!(asset.serial_number, "");
    }

    #[test]
    fn server_field_names_map_back_to_form_fields() {
        let mut errors = FieldErrors::new();
        errors.insert("site_id".to_string(), "field required".to_string());
        errors.insert("interfaces.0.ip_address".to_string(), "invalid ip address".to_string());

        let remapped = remap_errors(CoreError::Validation(errors));
        let fields = remapped.field_errors().unwrap();
        assert!(fields.contains_key("site"));
        assert!(fields.contains_key("ip_address"));
    }

    #[tokio::test]
    async fn known_names_resolve_to_ids() {
        let backend = backend();
        backend
            .remember_references(&[wire(
                r#"{"id": "a1", "name": "x", "site": {"id": "s1", "name": "Plant A"}}"#,
            )])
            .await;

        let payload = backend
            .payload(AssetForm {
                name: " PLC ".to_string(),
                site: "plant a".to_string(),
                asset_type: "PLC".to_string(),
                ..AssetForm::default()
            })
            .await;

        assert_eq!(payload.name, "PLC");
        assert_eq!(payload.site_id.as_deref(), Some("s1"));
        assert_eq!(payload.asset_type_id.as_deref(), Some("PLC"));
        assert_eq!(payload.status_id, None);
        assert!(payload.interfaces.is_empty());
    }

    #[tokio::test]
    async fn filters_use_server_parameter_names() {
        let backend = backend();
        backend
            .remember_references(&[wire(
                r#"{"id": "a1", "name": "x",
                    "status": {"id": "st-3", "name": "Active"},
                    "site": {"id": "s1", "name": "Plant A"}}"#,
            )])
            .await;

        let params: BTreeMap<String, String> = [
            ("search", "plc"),
            ("status", "active"),
            ("site", "Plant B"),
            ("risk_score_min", "5"),
            ("sort_by", "name"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

        let query = backend.server_query(&params).await;
        let pairs: Vec<_> = query.iter().map(|(k, v)| (k.as_str(), v.as_str())).collect();
        assert_eq!(
            pairs,
            vec![
                ("global_search", "plc"),
                ("risk_score_min", "5"),
                ("status_id", "st-3"),
            ]
        );
    }

    #[tokio::test]
    async fn paging_continues_until_a_short_page() {
        let rows: Vec<usize> = (0..250).collect();
        let mut offsets = Vec::new();
        let all = collect_pages(100, |skip| {
            offsets.push(skip);
            let page = rows[skip.min(rows.len())..(skip + 100).min(rows.len())].to_vec();
            async move { Ok(page) }
        })
        .await
        .unwrap();

        assert_eq!(all, rows);
        assert_eq!(offsets, vec![0, 100, 200]);
    }

    #[tokio::test]
    async fn exact_multiple_of_the_page_size_ends_on_an_empty_page() {
        let mut calls = 0;
        let all = collect_pages(2, |skip| {
            calls += 1;
            let page = if skip < 4 { vec![skip, skip + 1] } else { Vec::new() };
            async move { Ok(page) }
        })
        .await
        .unwrap();

        assert_eq!(all, vec![0, 1, 2, 3]);
        assert_eq!(calls, 3);
    }

    #[tokio::test]
    async fn page_failure_aborts_the_listing() {
        let result: CoreResult<Vec<u8>> = collect_pages(1, |skip| async move {
            match skip {
                0 => Ok(vec![1]),
                _ => Err(CoreError::Network("connection reset".to_string())),
            }
        })
        .await;
        assert!(matches!(result, Err(CoreError::Network(_))));
    }
}
