use crate::api::{ApiClient, ApiError, FreeCourse};

pub async fn fetch_free_courses(api: &ApiClient) -> Result<Vec<FreeCourse>, ApiError> {
    api.free_courses().await
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::api::test_support::mock::*;
    use serde_json::json;

    #[tokio::test]
    async fn unwraps_paginated_results() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(GET).path("/api/free-courses/");
            then.status(200).json_body(json!({
                "count": 1,
                "results": [{
                    "id": "cs50",
                    "title": "CS50",
                    "provider": "edX",
                    "rating": "4.9"
                }]
            }));
        });
        let api = ApiClient::new_with_base_url(server.url("/api"));

        let courses = fetch_free_courses(&api).await.unwrap();

        assert_eq!(courses.len(), 1);
        assert_eq!(courses[0].rating, 4.9);
    }
}
