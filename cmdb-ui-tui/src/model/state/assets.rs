//! 资产页面状态
//!
//! 由 cmdb-ui-core 的控制器组合而成：
//! RequestRunner 负责加载，FilterEngine 负责筛选，
//! DialogController + FormController 负责新建/编辑/查看，
//! ConfirmationGate 负责删除确认。

use std::collections::BTreeSet;

use cmdb_ui_core::controllers::{
    ConfirmationGate, DialogController, FilterEngine, FormController, RequestRunner,
};
use cmdb_ui_core::UiContext;

use crate::model::domain::{validate_asset_form, Asset, AssetForm, FormField, SEARCHABLE_FIELDS};

/// 搜索输入状态
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchState {
    /// 正在输入的内容
    pub draft: String,
    /// 开始输入前生效的搜索，Esc 时保持不变
    pub previous: String,
}

/// 资产页面状态
pub struct AssetsState {
    /// 资产列表加载
    pub runner: RequestRunner<Vec<Asset>>,
    /// 筛选、搜索和排序
    pub filters: FilterEngine,
    /// 表单弹窗
    pub dialog: DialogController<Asset>,
    pub form: FormController<AssetForm>,
    /// 表单中获得焦点的字段索引
    pub form_focus: usize,
    /// 删除确认
    pub confirm: ConfirmationGate<Asset>,
    /// 当前选中的行（在可见行中的索引）
    pub selected: usize,
    /// 批量操作标记的资产 id
    pub marked: BTreeSet<String>,
    /// 搜索栏处于输入状态时为 Some
    pub search: Option<SearchState>,
}

impl AssetsState {
    pub fn new(ctx: &UiContext, filters: FilterEngine) -> Self {
        Self {
            runner: ctx.request_runner(),
            filters,
            dialog: ctx.dialog(),
            form: ctx
                .form(AssetForm::new_asset())
                .with_validator(validate_asset_form),
            form_focus: 0,
            confirm: ctx.confirmation_gate(),
            selected: 0,
            marked: BTreeSet::new(),
            search: None,
        }
    }

    /// 筛选后的可见行
    pub fn visible(&self) -> Vec<Asset> {
        let data = self.runner.data().unwrap_or_default();
        self.filters.filter_data(&data, &SEARCHABLE_FIELDS)
    }

    /// 当前选中的资产
    pub fn current(&self) -> Option<Asset> {
        self.visible().into_iter().nth(self.selected)
    }

    /// 选择上一项
    pub fn select_previous(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    /// 选择下一项
    pub fn select_next(&mut self) {
        let len = self.visible().len();
        if len > 0 && self.selected < len - 1 {
            self.selected += 1;
        }
    }

    /// 选择第一项
    pub fn select_first(&mut self) {
        self.selected = 0;
    }

    /// 选择最后一项
    pub fn select_last(&mut self) {
        self.selected = self.visible().len().saturating_sub(1);
    }

    /// 数据或筛选变化后，保证选中项仍在范围内
    pub fn clamp_selection(&mut self) {
        let len = self.visible().len();
        if self.selected >= len {
            self.selected = len.saturating_sub(1);
        }
    }

    /// 标记/取消标记当前行
    pub fn toggle_mark(&mut self) {
        let Some(asset) = self.current() else {
            return;
        };
        if !self.marked.remove(&asset.id) {
            self.marked.insert(asset.id);
        }
    }

    pub fn is_marked(&self, id: &str) -> bool {
        self.marked.contains(id)
    }

    /// 已标记的资产（按列表顺序）
    pub fn marked_assets(&self) -> Vec<Asset> {
        self.runner
            .data()
            .unwrap_or_default()
            .into_iter()
            .filter(|a| self.marked.contains(&a.id))
            .collect()
    }

    /// 列表重新加载后调用：丢弃已不存在的标记并修正选中项
    pub fn on_loaded(&mut self) {
        if let Some(data) = self.runner.data() {
            self.marked
                .retain(|id| data.iter().any(|asset| &asset.id == id));
        }
        self.clamp_selection();
    }

    /// 获得焦点的表单字段
    pub fn focused_field(&self) -> FormField {
        FormField::at(self.form_focus)
    }

    pub fn focus_next_field(&mut self) {
        self.form_focus = (self.form_focus + 1) % FormField::ALL.len();
    }

    pub fn focus_prev_field(&mut self) {
        let len = FormField::ALL.len();
        self.form_focus = (self.form_focus + len - 1) % len;
    }

    /// 开始输入搜索，以当前搜索内容作为初始值
    pub fn start_search(&mut self) {
        let current = self.filters.global_search().to_string();
        self.search = Some(SearchState {
            draft: current.clone(),
            previous: current,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::create_test_context;

    fn asset(id: &str, name: &str) -> Asset {
        Asset {
            id: id.to_string(),
            name: name.to_string(),
            ..Asset::default()
        }
    }

    async fn loaded_state(assets: Vec<Asset>) -> AssetsState {
        let (ctx, _, _) = create_test_context();
        let state = AssetsState::new(&ctx, FilterEngine::new());
        state
            .runner
            .execute(|| async { Ok(assets) }, Default::default())
            .await;
        state
    }

    #[tokio::test]
    async fn selection_stays_within_visible_rows() {
        let mut state = loaded_state(vec![asset("1", "a"), asset("2", "b")]).await;

        state.select_previous();
        assert_eq!(state.selected, 0);
        state.select_last();
        state.select_next();
        assert_eq!(state.selected, 1);

        state.filters.set_global_search("a").await.unwrap();
        state.clamp_selection();
        assert_eq!(state.selected, 0);
        assert_eq!(state.current().map(|a| a.id), Some("1".to_string()));
    }

    #[tokio::test]
    async fn marks_of_removed_rows_are_dropped_on_reload() {
        let mut state = loaded_state(vec![asset("1", "a"), asset("2", "b")]).await;
        state.toggle_mark();
        state.select_next();
        state.toggle_mark();
        assert_eq!(state.marked_assets().len(), 2);

        state
            .runner
            .execute(|| async { Ok(vec![asset("2", "b")]) }, Default::default())
            .await;
        state.on_loaded();

        assert!(!state.is_marked("1"));
        assert!(state.is_marked("2"));
        assert_eq!(state.selected, 0);
    }

    #[test]
    fn field_focus_wraps_both_ways() {
        let (ctx, _, _) = create_test_context();
        let mut state = AssetsState::new(&ctx, FilterEngine::new());

        state.focus_prev_field();
        assert_eq!(state.focused_field(), FormField::Status);
        state.focus_next_field();
        assert_eq!(state.focused_field(), FormField::Name);
    }
}
