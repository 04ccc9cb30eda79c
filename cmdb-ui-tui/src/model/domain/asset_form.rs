//! 资产表单
//!
//! 表单值全部以字符串保存，提交时由后端转换

use std::net::Ipv4Addr;

use cmdb_ui_core::types::FieldErrors;
use serde::Serialize;

use super::Asset;

/// 资产表单的值
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct AssetForm {
    pub name: String,
    pub tag: String,
    pub serial_number: String,
    pub model: String,
    pub asset_type: String,
    pub site: String,
    pub ip_address: String,
    pub status: String,
}

impl AssetForm {
    /// 新建资产时的默认值
    pub fn new_asset() -> Self {
        Self {
            status: "Active".to_string(),
            ..Self::default()
        }
    }

    pub fn value(&self, field: FormField) -> &str {
        match field {
            FormField::Name => &self.name,
            FormField::Tag => &self.tag,
            FormField::SerialNumber => &self.serial_number,
            FormField::Model => &self.model,
            FormField::AssetType => &self.asset_type,
            FormField::Site => &self.site,
            FormField::IpAddress => &self.ip_address,
            FormField::Status => &self.status,
        }
    }

    pub fn value_mut(&mut self, field: FormField) -> &mut String {
        match field {
            FormField::Name => &mut self.name,
            FormField::Tag => &mut self.tag,
            FormField::SerialNumber => &mut self.serial_number,
            FormField::Model => &mut self.model,
            FormField::AssetType => &mut self.asset_type,
            FormField::Site => &mut self.site,
            FormField::IpAddress => &mut self.ip_address,
            FormField::Status => &mut self.status,
        }
    }
}

impl From<&Asset> for AssetForm {
    fn from(asset: &Asset) -> Self {
        Self {
            name: asset.name.clone(),
            tag: asset.tag.clone(),
            serial_number: asset.serial_number.clone(),
            model: asset.model.clone(),
            asset_type: asset.asset_type.clone(),
            site: asset.site.clone(),
            ip_address: asset.ip_address.clone(),
            status: asset.status.clone(),
        }
    }
}

/// 表单字段（按显示顺序）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Name,
    Tag,
    SerialNumber,
    Model,
    AssetType,
    Site,
    IpAddress,
    Status,
}

impl FormField {
    pub const ALL: [Self; 8] = [
        Self::Name,
        Self::Tag,
        Self::SerialNumber,
        Self::Model,
        Self::AssetType,
        Self::Site,
        Self::IpAddress,
        Self::Status,
    ];

    /// 错误映射使用的字段键（与服务端字段名一致）
    pub fn key(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Tag => "tag",
            Self::SerialNumber => "serial_number",
            Self::Model => "model",
            Self::AssetType => "asset_type",
            Self::Site => "site",
            Self::IpAddress => "ip_address",
            Self::Status => "status",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Name => "Name",
            Self::Tag => "Tag",
            Self::SerialNumber => "Serial number",
            Self::Model => "Model",
            Self::AssetType => "Asset type",
            Self::Site => "Site",
            Self::IpAddress => "IP address",
            Self::Status => "Status",
        }
    }

    pub fn is_required(self) -> bool {
        matches!(self, Self::Name | Self::AssetType | Self::Site)
    }

    pub fn at(index: usize) -> Self {
        Self::ALL[index % Self::ALL.len()]
    }

    pub fn index_of(key: &str) -> Option<usize> {
        Self::ALL.iter().position(|f| f.key() == key)
    }
}

/// 客户端校验：必填字段与 IPv4 格式
pub fn validate_asset_form(form: &AssetForm) -> FieldErrors {
    let mut errors = FieldErrors::new();

    for field in FormField::ALL {
        if field.is_required() && form.value(field).trim().is_empty() {
            errors.insert(field.key().to_string(), "required".to_string());
        }
    }

    let ip = form.ip_address.trim();
    if !ip.is_empty() && ip.parse::<Ipv4Addr>().is_err() {
        errors.insert(
            FormField::IpAddress.key().to_string(),
            "must be an IPv4 address".to_string(),
        );
    }

    errors
}
