use crate::{
    api::{ApiClient, ApiError, Course, CourseQuery, MessageResponse},
    pages::courses::{
        repository::{self, CourseDetail},
        utils::CourseFilter,
    },
    utils::{LoadState, MessageState},
};
use leptos::*;

#[derive(Clone, Copy)]
pub struct CoursesViewModel {
    pub filter: RwSignal<CourseFilter>,
    pub courses_resource: Resource<(CourseQuery, u32), Result<Vec<Course>, ApiError>>,
    pub enroll_action: Action<i64, Result<MessageResponse, ApiError>>,
    pub message: RwSignal<MessageState>,
    reload: RwSignal<u32>,
}

impl CoursesViewModel {
    /// Server results narrowed again by the current filter.
    pub fn visible_courses(&self) -> LoadState<Vec<Course>> {
        let filter = self.filter.get();
        match self.courses_resource.get() {
            None => LoadState::Loading,
            Some(result) => LoadState::from_list(result.map(|courses| filter.apply(&courses))),
        }
    }

    pub fn clear_filters(&self) {
        self.filter.set(CourseFilter::default());
    }

    pub fn reload(&self) {
        self.reload.update(|value| *value = value.wrapping_add(1));
    }
}

pub(crate) fn apply_enroll_result(
    result: Option<Result<MessageResponse, ApiError>>,
    message: RwSignal<MessageState>,
    reload: RwSignal<u32>,
) {
    if let Some(result) = result {
        match result {
            Ok(response) => {
                let text = response
                    .message
                    .unwrap_or_else(|| "Successfully enrolled in course".into());
                message.update(|msg| msg.set_success(text));
                reload.update(|value| *value = value.wrapping_add(1));
            }
            Err(err) => message.update(|msg| msg.set_error(err)),
        }
    }
}

pub fn use_courses_view_model() -> CoursesViewModel {
    let api = use_context::<ApiClient>().expect("ApiClient should be provided");
    let filter = create_rw_signal(CourseFilter::default());
    let reload = create_rw_signal(0u32);
    let message = create_rw_signal(MessageState::default());

    let api_clone = api.clone();
    let courses_resource = create_resource(
        move || (filter.get().to_query(), reload.get()),
        move |(query, _)| {
            let api = api_clone.clone();
            async move { repository::fetch_courses(&api, &query).await }
        },
    );

    let enroll_action = create_action(move |course_id: &i64| {
        let api = api.clone();
        let course_id = *course_id;
        async move { repository::enroll(&api, course_id).await }
    });
    create_effect(move |_| apply_enroll_result(enroll_action.value().get(), message, reload));

    CoursesViewModel {
        filter,
        courses_resource,
        enroll_action,
        message,
        reload,
    }
}

#[derive(Clone, Copy)]
pub struct CourseDetailViewModel {
    pub detail_resource: Resource<(i64, u32), Result<CourseDetail, ApiError>>,
    pub enroll_action: Action<i64, Result<MessageResponse, ApiError>>,
    pub message: RwSignal<MessageState>,
}

pub fn use_course_detail_view_model(course_id: Signal<Option<i64>>) -> CourseDetailViewModel {
    let api = use_context::<ApiClient>().expect("ApiClient should be provided");
    let reload = create_rw_signal(0u32);
    let message = create_rw_signal(MessageState::default());

    let api_clone = api.clone();
    let detail_resource = create_resource(
        move || (course_id.get().unwrap_or_default(), reload.get()),
        move |(id, _)| {
            let api = api_clone.clone();
            async move {
                if id <= 0 {
                    return Err(ApiError::validation("Course not found"));
                }
                repository::fetch_course_detail(&api, id).await
            }
        },
    );

    let enroll_action = create_action(move |course_id: &i64| {
        let api = api.clone();
        let course_id = *course_id;
        async move { repository::enroll(&api, course_id).await }
    });
    create_effect(move |_| apply_enroll_result(enroll_action.value().get(), message, reload));

    CourseDetailViewModel {
        detail_resource,
        enroll_action,
        message,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enroll_result_sets_message_and_reloads() {
        let runtime = create_runtime();
        let message = create_rw_signal(MessageState::default());
        let reload = create_rw_signal(0u32);

        apply_enroll_result(Some(Ok(MessageResponse::default())), message, reload);
        assert_eq!(
            message.get().success.as_deref(),
            Some("Successfully enrolled in course")
        );
        assert_eq!(reload.get(), 1);

        apply_enroll_result(
            Some(Err(ApiError::server(400, "Already enrolled in this course"))),
            message,
            reload,
        );
        assert_eq!(
            message.get().error.map(|e| e.to_string()),
            Some("Already enrolled in this course".into())
        );
        assert_eq!(reload.get(), 1);
        runtime.dispose();
    }
}
