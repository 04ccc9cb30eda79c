//! 后台任务完成处理

use cmdb_ui_core::SubmitOutcome;

use super::spawn_load;
use crate::message::TaskMessage;
use crate::model::domain::FormField;
use crate::model::App;

/// 处理后台任务结果
pub fn update(app: &mut App, msg: TaskMessage) {
    match msg {
        TaskMessage::Loaded => app.assets.on_loaded(),

        TaskMessage::Submitted(SubmitOutcome::Succeeded) => {
            app.assets.dialog.close();
            spawn_load(app);
        }
        TaskMessage::Submitted(SubmitOutcome::Invalid) => {
            // 焦点移到第一个出错的字段（按表单顺序）
            let errors = app.assets.form.errors();
            if let Some(index) = FormField::ALL
                .iter()
                .position(|field| errors.contains_key(field.key()))
            {
                app.assets.form_focus = index;
            }
        }
        // 失败已由控制器提示
        TaskMessage::Submitted(SubmitOutcome::Failed | SubmitOutcome::Busy) => {}

        TaskMessage::Deleted(true) => {
            app.assets.marked.clear();
            spawn_load(app);
        }
        // 失败也可能已删除部分行，重新加载；已不存在的标记由 on_loaded 清理
        TaskMessage::Deleted(false) => spawn_load(app),
    }
}
