use crate::{
    api::{ApiClient, ApiError, GroupMessage},
    pages::chat::room::{ChatRoom, ChatSnapshot},
};
use leptos::*;
use std::rc::Rc;

#[derive(Clone, Copy)]
pub struct ChatViewModel {
    pub group_id: i64,
    pub snapshot: RwSignal<ChatSnapshot>,
    pub draft: RwSignal<String>,
    pub send_error: RwSignal<Option<ApiError>>,
    pub send_action: Action<String, Result<GroupMessage, ApiError>>,
}

impl ChatViewModel {
    /// Sends the current draft; the draft is cleared once the server accepts it.
    pub fn submit(&self) {
        if self.send_action.pending().get_untracked() {
            return;
        }
        self.send_error.set(None);
        self.send_action.dispatch(self.draft.get_untracked());
    }
}

fn apply_send_result(
    result: Option<Result<GroupMessage, ApiError>>,
    draft: RwSignal<String>,
    send_error: RwSignal<Option<ApiError>>,
) {
    match result {
        Some(Ok(_)) => draft.set(String::new()),
        Some(Err(err)) => send_error.set(Some(err)),
        None => {}
    }
}

/// Starts polling for `group_id` and stops when the owning view is disposed.
pub fn use_chat_view_model(group_id: i64) -> ChatViewModel {
    let api = use_context::<ApiClient>().expect("ApiClient should be provided");
    let room = Rc::new(ChatRoom::new(api, group_id));

    let snapshot = create_rw_signal(room.snapshot());
    room.subscribe(move |next| {
        let _ = snapshot.try_set(next.clone());
    });
    room.mount();

    let stored_room = store_value(room.clone());
    let send_action = create_action(move |text: &String| {
        let room = stored_room.get_value();
        let text = text.clone();
        async move { room.send(&text).await }
    });

    let draft = create_rw_signal(String::new());
    let send_error = create_rw_signal(None::<ApiError>);
    create_effect(move |_| apply_send_result(send_action.value().get(), draft, send_error));

    on_cleanup(move || room.unmount());

    ChatViewModel {
        group_id,
        snapshot,
        draft,
        send_error,
        send_action,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn send_result_clears_draft_or_records_error() {
        let runtime = create_runtime();
        {
            let draft = create_rw_signal("hello".to_string());
            let send_error = create_rw_signal(None::<ApiError>);

            apply_send_result(
                Some(Err(ApiError::validation("Message cannot be empty"))),
                draft,
                send_error,
            );
            assert_eq!(draft.get(), "hello");
            assert!(send_error.get().is_some());

            let echo = GroupMessage {
                id: 1,
                group: 3,
                sender: 2,
                sender_username: "learner".into(),
                message: "hello".into(),
                created_at: None,
                message_type: "text".into(),
            };
            apply_send_result(Some(Ok(echo)), draft, send_error);
            assert!(draft.get().is_empty());
        }
        runtime.dispose();
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::api::test_support::mock::*;
    use serde_json::json;
    use std::time::Duration;
    use tokio::task::LocalSet;

    #[tokio::test(start_paused = true)]
    async fn polling_stops_when_the_view_is_disposed() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(GET).path("/api/study-groups/3/messages/");
            then.status(200).json_body(json!([{
                "id": 1,
                "group": 3,
                "sender": 1,
                "sender_username": "alice",
                "message": "welcome"
            }]));
        });

        LocalSet::new()
            .run_until(async {
                let runtime = create_runtime();
                provide_context(ApiClient::new_with_base_url(server.url("/api")));
                let vm = use_chat_view_model(3);

                tokio::time::sleep(Duration::from_millis(10)).await;
                assert_eq!(vm.snapshot.get_untracked().entries.len(), 1);
                assert!(!vm.snapshot.get_untracked().loading);

                runtime.dispose();
                tokio::time::sleep(Duration::from_secs(60)).await;
                assert_eq!(server.hits(GET, "/api/study-groups/3/messages/"), 1);
            })
            .await;
    }
}
