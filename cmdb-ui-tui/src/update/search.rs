//! 搜索输入更新逻辑

use super::report_persistence;
use crate::message::SearchMessage;
use crate::model::App;

/// 处理搜索栏消息
pub async fn update(app: &mut App, msg: SearchMessage) {
    let Some(search) = app.assets.search.as_mut() else {
        return;
    };

    match msg {
        SearchMessage::Input(c) => search.draft.push(c),
        SearchMessage::Backspace => {
            search.draft.pop();
        }
        SearchMessage::Cancel => {
            app.assets.search = None;
        }
        SearchMessage::Apply => {
            let draft = search.draft.trim().to_string();
            app.assets.search = None;
            let result = app.assets.filters.set_global_search(draft).await;
            report_persistence(app, result);
            app.assets.select_first();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::{AppMessage, ContentMessage};
    use crate::test_utils::create_test_app;
    use crate::update::update as dispatch;

    #[tokio::test]
    async fn applied_search_narrows_the_table() {
        let mut t = create_test_app().await;
        dispatch(&mut t.app, AppMessage::Content(ContentMessage::Refresh)).await;
        let msg = t.next_message().await;
        dispatch(&mut t.app, msg).await;

        dispatch(&mut t.app, AppMessage::Content(ContentMessage::StartSearch)).await;
        for c in "plc ".chars() {
            dispatch(&mut t.app, AppMessage::Search(SearchMessage::Input(c))).await;
        }
        // 输入期间不影响列表
        assert_eq!(t.app.assets.visible().len(), 6);

        dispatch(&mut t.app, AppMessage::Search(SearchMessage::Apply)).await;
        assert!(t.app.assets.search.is_none());
        assert_eq!(t.app.assets.filters.global_search(), "plc");
        assert_eq!(t.app.assets.visible().len(), 2);
    }

    #[test]
    fn cancel_keeps_the_previous_search() {
        tokio_test::block_on(async {
            let mut t = create_test_app().await;
            t.app.assets.filters.set_global_search("plant").await.unwrap();

            dispatch(&mut t.app, AppMessage::Content(ContentMessage::StartSearch)).await;
            assert_eq!(t.app.assets.search.as_ref().unwrap().draft, "plant");
            dispatch(&mut t.app, AppMessage::Search(SearchMessage::Backspace)).await;
            dispatch(&mut t.app, AppMessage::Search(SearchMessage::Cancel)).await;

            assert!(t.app.assets.search.is_none());
            assert_eq!(t.app.assets.filters.global_search(), "plant");
        });
    }
}
