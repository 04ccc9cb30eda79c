//!
//! src/model/domain/mod.rs
//! 领域模型
//!
//!     asset.rs        资产（表格的行）
//!     asset_form.rs   资产表单的值、字段顺序与客户端校验
//!

mod asset;
mod asset_form;

pub use asset::{Asset, ASSET_STATUSES, SEARCHABLE_FIELDS};
pub use asset_form::{validate_asset_form, AssetForm, FormField};
