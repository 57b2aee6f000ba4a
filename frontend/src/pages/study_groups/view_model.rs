use crate::{
    api::{ApiClient, ApiError, MessageResponse, StudyGroup},
    pages::study_groups::{
        repository::{self, GroupsOverview},
        utils::{GroupForm, GroupsTab},
    },
    state::auth::use_auth,
    utils::MessageState,
};
use leptos::*;

/// Group whose chat panel is open.
#[derive(Debug, Clone, PartialEq)]
pub struct OpenChat {
    pub group_id: i64,
    pub name: String,
}

#[derive(Clone, Copy)]
pub struct StudyGroupsViewModel {
    pub tab: RwSignal<GroupsTab>,
    pub groups_resource: Resource<u32, Result<GroupsOverview, ApiError>>,
    pub user_id: Signal<Option<i64>>,
    pub form: RwSignal<GroupForm>,
    pub create_action: Action<GroupForm, Result<StudyGroup, ApiError>>,
    pub join_action: Action<StudyGroup, Result<MessageResponse, ApiError>>,
    pub leave_action: Action<i64, Result<MessageResponse, ApiError>>,
    pub open_chat: RwSignal<Option<OpenChat>>,
    pub message: RwSignal<MessageState>,
    reload: RwSignal<u32>,
}

impl StudyGroupsViewModel {
    pub fn reload(&self) {
        self.reload.update(|value| *value = value.wrapping_add(1));
    }

    /// Closes the group's chat before leaving so polling stops with it.
    pub fn leave(&self, group_id: i64) {
        self.open_chat.update(|open| {
            if open.as_ref().is_some_and(|chat| chat.group_id == group_id) {
                *open = None;
            }
        });
        self.leave_action.dispatch(group_id);
    }

    pub fn toggle_chat(&self, group: &StudyGroup) {
        self.open_chat.update(|open| {
            *open = match open {
                Some(current) if current.group_id == group.id => None,
                _ => Some(OpenChat {
                    group_id: group.id,
                    name: group.name.clone(),
                }),
            }
        });
    }
}

fn apply_create_result(
    result: Option<Result<StudyGroup, ApiError>>,
    form: RwSignal<GroupForm>,
    tab: RwSignal<GroupsTab>,
    message: RwSignal<MessageState>,
    reload: RwSignal<u32>,
) {
    match result {
        Some(Ok(group)) => {
            message.update(|msg| msg.set_success(format!("Study group \"{}\" created", group.name)));
            form.set(GroupForm::default());
            tab.set(GroupsTab::Mine);
            reload.update(|value| *value = value.wrapping_add(1));
        }
        Some(Err(err)) => message.update(|msg| msg.set_error(err)),
        None => {}
    }
}

fn apply_membership_result(
    result: Option<Result<MessageResponse, ApiError>>,
    fallback: &str,
    message: RwSignal<MessageState>,
    reload: RwSignal<u32>,
) {
    match result {
        Some(Ok(response)) => {
            let text = response.message.unwrap_or_else(|| fallback.to_string());
            message.update(|msg| msg.set_success(text));
            reload.update(|value| *value = value.wrapping_add(1));
        }
        Some(Err(err)) => message.update(|msg| msg.set_error(err)),
        None => {}
    }
}

pub fn use_study_groups_view_model() -> StudyGroupsViewModel {
    let api = use_context::<ApiClient>().expect("ApiClient should be provided");
    let (auth, _) = use_auth();
    let user_id = Signal::derive(move || auth.get().user.map(|user| user.id));
    let tab = create_rw_signal(GroupsTab::default());
    let form = create_rw_signal(GroupForm::default());
    let open_chat = create_rw_signal(None::<OpenChat>);
    let message = create_rw_signal(MessageState::default());
    let reload = create_rw_signal(0u32);

    let api_clone = api.clone();
    let groups_resource = create_resource(
        move || reload.get(),
        move |_| {
            let api = api_clone.clone();
            async move { repository::fetch_groups(&api).await }
        },
    );

    let api_clone = api.clone();
    let create_group_action = create_action(move |form: &GroupForm| {
        let api = api_clone.clone();
        let form = form.clone();
        async move { repository::create_group(&api, &form).await }
    });

    let api_clone = api.clone();
    let join_action = create_action(move |group: &StudyGroup| {
        let api = api_clone.clone();
        let group = group.clone();
        async move { repository::join_group(&api, &group).await }
    });

    let leave_action = create_action(move |group_id: &i64| {
        let api = api.clone();
        let group_id = *group_id;
        async move { repository::leave_group(&api, group_id).await }
    });

    create_effect(move |_| {
        apply_create_result(create_group_action.value().get(), form, tab, message, reload)
    });
    create_effect(move |_| {
        apply_membership_result(
            join_action.value().get(),
            "Successfully joined group",
            message,
            reload,
        )
    });
    create_effect(move |_| {
        apply_membership_result(
            leave_action.value().get(),
            "Left group successfully",
            message,
            reload,
        )
    });

    StudyGroupsViewModel {
        tab,
        groups_resource,
        user_id,
        form,
        create_action: create_group_action,
        join_action,
        leave_action,
        open_chat,
        message,
        reload,
    }
}
