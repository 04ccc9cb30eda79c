//! 类型定义模块

mod dialog;
mod filter;
mod form;
mod notification;
mod response;

pub use dialog::DialogMode;
pub use filter::{FilterCriterion, FilterState, SortOrder, SortSpec};
pub use form::FieldErrors;
pub use notification::Severity;
pub use response::{BulkDeleteRequest, BulkDeleteResponse, BulkFailure};
