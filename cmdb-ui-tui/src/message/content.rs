//! 内容面板消息
//!
//! 资产列表中的操作：选择、增删改查、筛选和排序

/// 内容面板消息
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentMessage {
    // ========== 列表导航 ==========
    /// 选择上一项
    SelectPrevious,
    /// 选择下一项
    SelectNext,
    /// 跳转到第一项
    SelectFirst,
    /// 跳转到最后一项
    SelectLast,
    /// 标记/取消标记当前行（批量操作）
    ToggleMark,

    // ========== CRUD 操作 ==========
    /// 添加新资产
    Add,
    /// 编辑当前选中项
    Edit,
    /// 只读查看当前选中项
    View,
    /// 删除当前选中项
    Delete,
    /// 删除所有已标记的行
    BulkDelete,
    /// 重新加载
    Refresh,

    // ========== 筛选 ==========
    /// 进入搜索输入
    StartSearch,
    /// 切换状态筛选
    CycleStatusFilter,
    /// 切换排序
    CycleSort,
    /// 清除全部筛选条件
    ClearFilters,
}
