use crate::{
    api::{ApiClient, ApiError, Course},
    pages::admin::{
        repository::{self, AdminOverview},
        utils::{AdminTab, BulkAction, CourseEditor, CourseForm, CourseSelection},
    },
    utils::MessageState,
};
use leptos::*;

#[derive(Clone, Copy)]
pub struct AdminViewModel {
    pub tab: RwSignal<AdminTab>,
    pub overview_resource: Resource<u32, Result<AdminOverview, ApiError>>,
    pub selection: RwSignal<CourseSelection>,
    pub pending_bulk: RwSignal<Option<BulkAction>>,
    pub editor: RwSignal<Option<CourseEditor>>,
    pub save_action: Action<(Option<i64>, CourseForm), Result<Course, ApiError>>,
    pub toggle_action: Action<(i64, bool), Result<bool, ApiError>>,
    pub delete_action: Action<i64, Result<(), ApiError>>,
    pub bulk_action: Action<(BulkAction, Vec<i64>), Result<usize, ApiError>>,
    pub message: RwSignal<MessageState>,
    reload: RwSignal<u32>,
}

impl AdminViewModel {
    pub fn reload(&self) {
        self.reload.update(|value| *value = value.wrapping_add(1));
    }

    pub fn courses(&self) -> Vec<Course> {
        match self.overview_resource.get() {
            Some(Ok(overview)) => overview.courses,
            _ => Vec::new(),
        }
    }

    pub fn save(&self) {
        if let Some(editor) = self.editor.get_untracked() {
            self.save_action.dispatch((editor.course_id, editor.form));
        }
    }

    pub fn run_bulk(&self) {
        let Some(action) = self.pending_bulk.get_untracked() else {
            self.message
                .update(|msg| msg.set_error(ApiError::validation("Please choose a bulk action.")));
            return;
        };
        let ids = self.selection.get_untracked().ids();
        self.bulk_action.dispatch((action, ids));
    }
}

fn bump(reload: RwSignal<u32>) {
    reload.update(|value| *value = value.wrapping_add(1));
}

fn apply_save_result(
    result: Option<Result<Course, ApiError>>,
    was_update: bool,
    editor: RwSignal<Option<CourseEditor>>,
    message: RwSignal<MessageState>,
    reload: RwSignal<u32>,
) {
    match result {
        Some(Ok(_)) => {
            let text = if was_update {
                "Course updated successfully!"
            } else {
                "Course created successfully!"
            };
            message.update(|msg| msg.set_success(text));
            editor.set(None);
            bump(reload);
        }
        // The editor stays open and shows the error itself.
        Some(Err(_)) | None => {}
    }
}

fn apply_toggle_result(
    result: Option<Result<bool, ApiError>>,
    message: RwSignal<MessageState>,
    reload: RwSignal<u32>,
) {
    match result {
        Some(Ok(active)) => {
            let state = if active { "activated" } else { "deactivated" };
            message.update(|msg| msg.set_success(format!("Course {} successfully!", state)));
            bump(reload);
        }
        Some(Err(err)) => message.update(|msg| msg.set_error(err)),
        None => {}
    }
}

fn apply_bulk_result(
    result: Option<Result<usize, ApiError>>,
    action: Option<BulkAction>,
    selection: RwSignal<CourseSelection>,
    pending_bulk: RwSignal<Option<BulkAction>>,
    message: RwSignal<MessageState>,
    reload: RwSignal<u32>,
) {
    match result {
        Some(Ok(count)) => {
            if let Some(action) = action {
                message.update(|msg| msg.set_success(action.summary(count)));
            }
            selection.update(CourseSelection::clear);
            pending_bulk.set(None);
            bump(reload);
        }
        Some(Err(err)) => message.update(|msg| msg.set_error(err)),
        None => {}
    }
}

pub fn use_admin_view_model() -> AdminViewModel {
    let api = use_context::<ApiClient>().expect("ApiClient should be provided");
    let reload = create_rw_signal(0u32);
    let message = create_rw_signal(MessageState::default());
    let selection = create_rw_signal(CourseSelection::default());
    let pending_bulk = create_rw_signal(None::<BulkAction>);
    let editor = create_rw_signal(None::<CourseEditor>);

    let api_clone = api.clone();
    let overview_resource = create_resource(
        move || reload.get(),
        move |_| {
            let api = api_clone.clone();
            async move { repository::fetch_overview(&api).await }
        },
    );

    let api_clone = api.clone();
    let save_action = create_action(move |(course_id, form): &(Option<i64>, CourseForm)| {
        let api = api_clone.clone();
        let course_id = *course_id;
        let form = form.clone();
        async move { repository::save_course(&api, course_id, &form).await }
    });

    let api_clone = api.clone();
    let toggle_action = create_action(move |(course_id, active): &(i64, bool)| {
        let api = api_clone.clone();
        let (course_id, active) = (*course_id, *active);
        async move { repository::toggle_course(&api, course_id, active).await }
    });

    let api_clone = api.clone();
    let delete_action = create_action(move |course_id: &i64| {
        let api = api_clone.clone();
        let course_id = *course_id;
        async move { repository::delete_course(&api, course_id).await }
    });

    let bulk_action = create_action(move |(action, ids): &(BulkAction, Vec<i64>)| {
        let api = api.clone();
        let action = *action;
        let ids = ids.clone();
        async move { repository::bulk_update(&api, action, &ids).await }
    });

    create_effect(move |_| {
        let was_update = editor
            .get_untracked()
            .is_some_and(|editor| editor.course_id.is_some());
        apply_save_result(save_action.value().get(), was_update, editor, message, reload)
    });
    create_effect(move |_| apply_toggle_result(toggle_action.value().get(), message, reload));
    create_effect(move |_| {
        if let Some(result) = delete_action.value().get() {
            message.update(|msg| msg.apply(&result, "Course deleted successfully!"));
            if result.is_ok() {
                bump(reload);
            }
        }
    });
    create_effect(move |_| {
        apply_bulk_result(
            bulk_action.value().get(),
            pending_bulk.get_untracked(),
            selection,
            pending_bulk,
            message,
            reload,
        )
    });

    AdminViewModel {
        tab: create_rw_signal(AdminTab::default()),
        overview_resource,
        selection,
        pending_bulk,
        editor,
        save_action,
        toggle_action,
        delete_action,
        bulk_action,
        message,
        reload,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pages::courses::utils::course;

    #[test]
    fn save_result_closes_editor_on_success() {
        let runtime = create_runtime();
        let editor = create_rw_signal(Some(CourseEditor::create()));
        let message = create_rw_signal(MessageState::default());
        let reload = create_rw_signal(0u32);

        apply_save_result(
            Some(Err(ApiError::server(400, "Bad request"))),
            false,
            editor,
            message,
            reload,
        );
        assert!(editor.get().is_some());
        assert_eq!(reload.get(), 0);

        apply_save_result(
            Some(Ok(course(1, "Python", "coding", "beginner"))),
            true,
            editor,
            message,
            reload,
        );
        assert!(editor.get().is_none());
        assert_eq!(message.get().success.as_deref(), Some("Course updated successfully!"));
        assert_eq!(reload.get(), 1);
        runtime.dispose();
    }

    #[test]
    fn toggle_result_reports_new_state() {
        let runtime = create_runtime();
        let message = create_rw_signal(MessageState::default());
        let reload = create_rw_signal(0u32);

        apply_toggle_result(Some(Ok(false)), message, reload);
        assert_eq!(
            message.get().success.as_deref(),
            Some("Course deactivated successfully!")
        );
        assert_eq!(reload.get(), 1);
        runtime.dispose();
    }

    #[test]
    fn bulk_result_clears_selection() {
        let runtime = create_runtime();
        let mut initial = CourseSelection::default();
        initial.toggle(1);
        initial.toggle(2);
        let selection = create_rw_signal(initial);
        let pending_bulk = create_rw_signal(Some(BulkAction::Delete));
        let message = create_rw_signal(MessageState::default());
        let reload = create_rw_signal(0u32);

        apply_bulk_result(
            Some(Err(ApiError::validation("Please select courses to perform bulk action."))),
            Some(BulkAction::Delete),
            selection,
            pending_bulk,
            message,
            reload,
        );
        assert_eq!(selection.get().len(), 2);

        apply_bulk_result(
            Some(Ok(2)),
            Some(BulkAction::Delete),
            selection,
            pending_bulk,
            message,
            reload,
        );
        assert!(selection.get().is_empty());
        assert_eq!(pending_bulk.get(), None);
        assert_eq!(
            message.get().success.as_deref(),
            Some("2 courses deleted successfully!")
        );
        assert_eq!(reload.get(), 1);
        runtime.dispose();
    }
}
