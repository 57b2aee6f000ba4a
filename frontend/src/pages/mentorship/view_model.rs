use crate::{
    api::{ApiClient, ApiError, Mentorship},
    pages::mentorship::{
        repository,
        utils::{MatchOutcome, MentorshipSplit, MentorshipTab},
    },
    state::auth::use_auth,
    utils::MessageState,
};
use leptos::*;

#[derive(Clone, Copy)]
pub struct MentorshipViewModel {
    pub tab: RwSignal<MentorshipTab>,
    pub mentorships_resource: Resource<u32, Result<Vec<Mentorship>, ApiError>>,
    pub split: Signal<MentorshipSplit>,
    pub user_id: Signal<Option<i64>>,
    pub match_action: Action<(), Result<MatchOutcome, ApiError>>,
    pub match_outcome: RwSignal<Option<MatchOutcome>>,
    pub request_action: Action<i64, Result<Mentorship, ApiError>>,
    pub complete_action: Action<i64, Result<Mentorship, ApiError>>,
    pub message: RwSignal<MessageState>,
    reload: RwSignal<u32>,
}

impl MentorshipViewModel {
    pub fn reload(&self) {
        self.reload.update(|value| *value = value.wrapping_add(1));
    }
}

fn apply_match_result(
    result: Option<Result<MatchOutcome, ApiError>>,
    match_outcome: RwSignal<Option<MatchOutcome>>,
    message: RwSignal<MessageState>,
    reload: RwSignal<u32>,
) {
    match result {
        Some(Ok(outcome)) => {
            message.update(|msg| msg.clear());
            if matches!(outcome, MatchOutcome::Matched(_)) {
                reload.update(|value| *value = value.wrapping_add(1));
            }
            match_outcome.set(Some(outcome));
        }
        Some(Err(err)) => message.update(|msg| msg.set_error(err)),
        None => {}
    }
}

fn apply_mentorship_result(
    result: Option<Result<Mentorship, ApiError>>,
    success: &str,
    message: RwSignal<MessageState>,
    reload: RwSignal<u32>,
) {
    if let Some(result) = result {
        message.update(|msg| msg.apply(&result, success));
        if result.is_ok() {
            reload.update(|value| *value = value.wrapping_add(1));
        }
    }
}

pub fn use_mentorship_view_model() -> MentorshipViewModel {
    let api = use_context::<ApiClient>().expect("ApiClient should be provided");
    let (auth, _) = use_auth();
    let reload = create_rw_signal(0u32);
    let message = create_rw_signal(MessageState::default());
    let match_outcome = create_rw_signal(None::<MatchOutcome>);
    let user_id = Signal::derive(move || auth.get().user.map(|user| user.id));

    let api_clone = api.clone();
    let mentorships_resource = create_resource(
        move || reload.get(),
        move |_| {
            let api = api_clone.clone();
            async move { repository::fetch_mentorships(&api).await }
        },
    );

    let split = Signal::derive(move || {
        match (user_id.get(), mentorships_resource.get()) {
            (Some(id), Some(Ok(all))) => MentorshipSplit::new(&all, id),
            _ => MentorshipSplit::default(),
        }
    });

    let api_clone = api.clone();
    let match_action = create_action(move |_: &()| {
        let api = api_clone.clone();
        async move { repository::find_mentor(&api).await }
    });

    let api_clone = api.clone();
    let request_action = create_action(move |mentor_id: &i64| {
        let api = api_clone.clone();
        let mentor_id = *mentor_id;
        async move { repository::request_mentor(&api, mentor_id).await }
    });

    let complete_action = create_action(move |mentorship_id: &i64| {
        let api = api.clone();
        let mentorship_id = *mentorship_id;
        async move { repository::complete_session(&api, mentorship_id).await }
    });

    create_effect(move |_| {
        apply_match_result(match_action.value().get(), match_outcome, message, reload)
    });
    create_effect(move |_| {
        apply_mentorship_result(
            request_action.value().get(),
            "Mentorship requested",
            message,
            reload,
        )
    });
    create_effect(move |_| {
        apply_mentorship_result(
            complete_action.value().get(),
            "Session marked as completed",
            message,
            reload,
        )
    });

    MentorshipViewModel {
        tab: create_rw_signal(MentorshipTab::default()),
        mentorships_resource,
        split,
        user_id,
        match_action,
        match_outcome,
        request_action,
        complete_action,
        message,
        reload,
    }
}
