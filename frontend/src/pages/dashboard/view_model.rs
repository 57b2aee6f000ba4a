use crate::{
    api::{ApiClient, ApiError, Enrollment},
    pages::dashboard::repository::{self, DashboardOverview},
    utils::MessageState,
};
use leptos::*;

#[derive(Clone, Copy)]
pub struct DashboardViewModel {
    pub overview_resource: Resource<u32, Result<DashboardOverview, ApiError>>,
    pub progress_action: Action<Enrollment, Result<Enrollment, ApiError>>,
    pub message: RwSignal<MessageState>,
    pub reload: RwSignal<u32>,
}

fn apply_progress_result(
    result: Option<Result<Enrollment, ApiError>>,
    message: RwSignal<MessageState>,
    reload: RwSignal<u32>,
) {
    if let Some(result) = result {
        match result {
            Ok(enrollment) => {
                message.update(|msg| {
                    msg.set_success(format!(
                        "{} is now {}% complete",
                        enrollment.course_title, enrollment.progress
                    ))
                });
                reload.update(|value| *value = value.wrapping_add(1));
            }
            Err(err) => message.update(|msg| msg.set_error(err)),
        }
    }
}

pub fn use_dashboard_view_model() -> DashboardViewModel {
    let api = use_context::<ApiClient>().expect("ApiClient should be provided");
    let reload = create_rw_signal(0u32);
    let message = create_rw_signal(MessageState::default());

    let api_clone = api.clone();
    let overview_resource = create_resource(
        move || reload.get(),
        move |_| {
            let api = api_clone.clone();
            async move { repository::fetch_overview(&api).await }
        },
    );

    let progress_action = create_action(move |enrollment: &Enrollment| {
        let api = api.clone();
        let enrollment = enrollment.clone();
        async move { repository::advance_progress(&api, &enrollment).await }
    });
    create_effect(move |_| apply_progress_result(progress_action.value().get(), message, reload));

    DashboardViewModel {
        overview_resource,
        progress_action,
        message,
        reload,
    }
}
