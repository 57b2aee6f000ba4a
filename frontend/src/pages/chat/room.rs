use log::{debug, warn};
use std::{cell::RefCell, rc::Rc, time::Duration};
use uuid::Uuid;

use crate::{
    api::{ApiClient, ApiError, GroupMessage},
    config,
    utils::{poll::PollHandle, time::now_utc, ViewScope},
};

pub const MAX_MESSAGE_CHARS: usize = 500;

#[derive(Debug, Clone, PartialEq)]
pub struct ChatEntry {
    pub message: GroupMessage,
    /// Set while the message only exists locally.
    pub pending_id: Option<Uuid>,
}

impl ChatEntry {
    pub fn is_pending(&self) -> bool {
        self.pending_id.is_some()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChatSnapshot {
    pub entries: Vec<ChatEntry>,
    pub loading: bool,
    pub error: Option<ApiError>,
}

#[derive(Default)]
struct RoomState {
    messages: Vec<GroupMessage>,
    pending: Vec<(Uuid, GroupMessage)>,
    loaded: bool,
    error: Option<ApiError>,
}

impl RoomState {
    fn snapshot(&self) -> ChatSnapshot {
        let confirmed = self.messages.iter().map(|message| ChatEntry {
            message: message.clone(),
            pending_id: None,
        });
        let pending = self.pending.iter().map(|(id, message)| ChatEntry {
            message: message.clone(),
            pending_id: Some(*id),
        });
        ChatSnapshot {
            entries: confirmed.chain(pending).collect(),
            loading: !self.loaded,
            error: self.error.clone(),
        }
    }
}

type Listener = Rc<dyn Fn(&ChatSnapshot)>;

#[derive(Default)]
struct Shared {
    state: RefCell<RoomState>,
    listeners: RefCell<Vec<Listener>>,
}

impl Shared {
    fn update(&self, f: impl FnOnce(&mut RoomState)) {
        let snapshot = {
            let mut state = self.state.borrow_mut();
            f(&mut state);
            state.snapshot()
        };
        let listeners: Vec<Listener> = self.listeners.borrow().clone();
        for listener in listeners {
            listener(&snapshot);
        }
    }

    fn apply_poll(&self, result: Result<Vec<GroupMessage>, ApiError>) {
        self.update(|state| {
            state.loaded = true;
            match result {
                Ok(messages) => {
                    state.messages = messages;
                    state.error = None;
                }
                Err(err) => {
                    warn!("Failed to fetch chat messages: {}", err);
                    state.error = Some(err);
                }
            }
        });
    }
}

/// Message list of one study group, kept fresh by polling while mounted.
pub struct ChatRoom {
    api: ApiClient,
    group_id: i64,
    interval: Duration,
    shared: Rc<Shared>,
    scope: RefCell<ViewScope>,
    poller: RefCell<Option<PollHandle>>,
}

impl ChatRoom {
    pub fn new(api: ApiClient, group_id: i64) -> Self {
        Self::with_interval(api, group_id, config::chat_poll_interval())
    }

    pub fn with_interval(api: ApiClient, group_id: i64, interval: Duration) -> Self {
        let scope = ViewScope::new();
        scope.deactivate();
        Self {
            api,
            group_id,
            interval,
            shared: Rc::new(Shared::default()),
            scope: RefCell::new(scope),
            poller: RefCell::new(None),
        }
    }

    pub fn group_id(&self) -> i64 {
        self.group_id
    }

    pub fn snapshot(&self) -> ChatSnapshot {
        self.shared.state.borrow().snapshot()
    }

    pub fn subscribe(&self, listener: impl Fn(&ChatSnapshot) + 'static) {
        self.shared.listeners.borrow_mut().push(Rc::new(listener));
    }

    pub fn is_mounted(&self) -> bool {
        self.poller.borrow().is_some()
    }

    /// Fetches now and then every interval until `unmount`.
    pub fn mount(&self) {
        if self.is_mounted() {
            return;
        }
        let scope = ViewScope::new();
        *self.scope.borrow_mut() = scope.clone();

        let api = self.api.clone();
        let shared = self.shared.clone();
        let group_id = self.group_id;
        let handle = PollHandle::start(self.interval, move || {
            let api = api.clone();
            let shared = shared.clone();
            let scope = scope.clone();
            async move {
                if let Some(result) = scope.run(api.group_messages(group_id)).await {
                    shared.apply_poll(result);
                }
            }
        });
        debug!("Chat for group {} mounted", self.group_id);
        *self.poller.borrow_mut() = Some(handle);
    }

    pub fn unmount(&self) {
        self.scope.borrow().deactivate();
        if self.poller.borrow_mut().take().is_some() {
            debug!("Chat for group {} unmounted", self.group_id);
        }
    }

    /// Posts `text`, showing it immediately as pending.
    pub async fn send(&self, text: &str) -> Result<GroupMessage, ApiError> {
        let text = validate_message(text)?;
        let pending_id = Uuid::new_v4();
        let optimistic = self.optimistic_message(&text);
        self.shared
            .update(|state| state.pending.push((pending_id, optimistic)));

        let result = self.api.send_group_message(self.group_id, &text).await;
        self.shared.update(|state| {
            state.pending.retain(|(id, _)| *id != pending_id);
            if let Ok(echo) = &result {
                if !state.messages.iter().any(|m| m.id == echo.id) {
                    state.messages.push(echo.clone());
                }
            }
        });
        if let Err(err) = &result {
            warn!("Failed to send chat message: {}", err);
        }
        result
    }

    fn optimistic_message(&self, text: &str) -> GroupMessage {
        let sender = self.api.current_user();
        GroupMessage {
            id: 0,
            group: self.group_id,
            sender: sender.as_ref().map(|u| u.id).unwrap_or_default(),
            sender_username: sender.map(|u| u.username).unwrap_or_default(),
            message: text.to_string(),
            created_at: Some(now_utc()),
            message_type: "text".into(),
        }
    }
}

impl Drop for ChatRoom {
    fn drop(&mut self) {
        self.unmount();
    }
}

/// Trimmed message text, or why it cannot be sent.
pub fn validate_message(text: &str) -> Result<String, ApiError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(ApiError::validation("Message cannot be empty"));
    }
    if trimmed.chars().count() > MAX_MESSAGE_CHARS {
        return Err(ApiError::validation(format!(
            "Message must be at most {} characters",
            MAX_MESSAGE_CHARS
        )));
    }
    Ok(trimmed.to_string())
}
