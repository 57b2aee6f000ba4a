use crate::{
    api::{ApiClient, ApiError, Course, PublicStats},
    pages::home::repository,
};
use leptos::*;

#[derive(Clone, Copy)]
pub struct HomeViewModel {
    pub stats_resource: Resource<u32, Result<PublicStats, ApiError>>,
    pub featured_resource: Resource<u32, Result<Vec<Course>, ApiError>>,
    pub reload: RwSignal<u32>,
}

pub fn use_home_view_model() -> HomeViewModel {
    let api = use_context::<ApiClient>().expect("ApiClient should be provided");
    let reload = create_rw_signal(0u32);

    let api_clone = api.clone();
    let stats_resource = create_resource(
        move || reload.get(),
        move |_| {
            let api = api_clone.clone();
            async move { repository::fetch_stats(&api).await }
        },
    );

    let featured_resource = create_resource(
        move || reload.get(),
        move |_| {
            let api = api.clone();
            async move { repository::fetch_featured_courses(&api).await }
        },
    );

    HomeViewModel {
        stats_resource,
        featured_resource,
        reload,
    }
}
