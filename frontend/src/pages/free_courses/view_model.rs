use crate::{
    api::{ApiClient, ApiError, FreeCourse},
    pages::free_courses::{
        repository,
        utils::{providers, FreeCourseFilter},
    },
    utils::LoadState,
};
use leptos::*;

#[derive(Clone, Copy)]
pub struct FreeCoursesViewModel {
    pub filter: RwSignal<FreeCourseFilter>,
    pub courses_resource: Resource<u32, Result<Vec<FreeCourse>, ApiError>>,
    pub reload: RwSignal<u32>,
}

impl FreeCoursesViewModel {
    pub fn visible_courses(&self) -> LoadState<Vec<FreeCourse>> {
        let filter = self.filter.get();
        match self.courses_resource.get() {
            None => LoadState::Loading,
            Some(result) => LoadState::from_list(result.map(|courses| filter.apply(&courses))),
        }
    }

    pub fn providers(&self) -> Vec<String> {
        self.courses_resource
            .get()
            .and_then(Result::ok)
            .map(|courses| providers(&courses))
            .unwrap_or_default()
    }
}

pub fn use_free_courses_view_model() -> FreeCoursesViewModel {
    let api = use_context::<ApiClient>().expect("ApiClient should be provided");
    let reload = create_rw_signal(0u32);
    let courses_resource = create_resource(
        move || reload.get(),
        move |_| {
            let api = api.clone();
            async move { repository::fetch_free_courses(&api).await }
        },
    );

    FreeCoursesViewModel {
        filter: create_rw_signal(FreeCourseFilter::default()),
        courses_resource,
        reload,
    }
}
