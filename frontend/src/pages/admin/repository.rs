use crate::{
    api::{ApiClient, ApiError, Course, CourseQuery, PublicStats, UserResponse},
    pages::admin::utils::{BulkAction, CourseForm},
};
use futures::future::join_all;
use log::{error, info};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AdminOverview {
    pub courses: Vec<Course>,
    pub users: Vec<UserResponse>,
    pub stats: PublicStats,
}

/// Courses, users and platform stats, requested together.
pub async fn fetch_overview(api: &ApiClient) -> Result<AdminOverview, ApiError> {
    let query = CourseQuery::default();
    let (courses, users, stats) = futures::join!(
        api.list_courses(&query),
        api.list_users(),
        api.public_stats()
    );
    Ok(AdminOverview {
        courses: courses?,
        users: users?,
        stats: stats?,
    })
}

/// Creates a course when `course_id` is `None`, otherwise replaces it.
pub async fn save_course(
    api: &ApiClient,
    course_id: Option<i64>,
    form: &CourseForm,
) -> Result<Course, ApiError> {
    let payload = form.validate()?;
    match course_id {
        Some(id) => api.update_course(id, &payload).await,
        None => api.create_course(&payload).await,
    }
}

/// Flips the active flag and returns the new value.
pub async fn toggle_course(api: &ApiClient, course_id: i64, currently_active: bool) -> Result<bool, ApiError> {
    let active = !currently_active;
    api.set_course_active(course_id, active).await?;
    Ok(active)
}

pub async fn delete_course(api: &ApiClient, course_id: i64) -> Result<(), ApiError> {
    api.delete_course(course_id).await
}

/// Applies `action` to every id concurrently. Fails if any request fails.
pub async fn bulk_update(api: &ApiClient, action: BulkAction, course_ids: &[i64]) -> Result<usize, ApiError> {
    if course_ids.is_empty() {
        return Err(ApiError::validation(
            "Please select courses to perform bulk action.",
        ));
    }
    let results = join_all(course_ids.iter().map(|&id| async move {
        match action {
            BulkAction::Activate => api.set_course_active(id, true).await,
            BulkAction::Deactivate => api.set_course_active(id, false).await,
            BulkAction::Delete => api.delete_course(id).await,
        }
    }))
    .await;

    if let Some(err) = results.into_iter().find_map(Result::err) {
        error!("Bulk {} failed: {}", action.as_str(), err);
        return Err(err);
    }
    info!("Bulk {} applied to {} courses", action.as_str(), course_ids.len());
    Ok(course_ids.len())
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::api::test_support::mock::*;
    use serde_json::json;

    async fn admin_client(server: &MockServer) -> ApiClient {
        server
            .signed_in_client(json!({ "id": 1, "username": "admin", "role": "admin" }))
            .await
    }

    #[tokio::test]
    async fn overview_combines_three_requests() {
        let server = MockServer::start_async().await;
        let api = admin_client(&server).await;
        server.mock(|when, then| {
            when.method(GET).path("/api/courses/");
            then.status(200).json_body(json!({ "results": [{ "id": 1, "title": "Python" }] }));
        });
        server.mock(|when, then| {
            when.method(GET).path("/api/users/");
            then.status(200).json_body(json!([{ "id": 2, "username": "learner" }]));
        });
        server.mock(|when, then| {
            when.method(GET).path("/api/public-stats/");
            then.status(200).json_body(json!({ "total_users": 12, "total_courses": 1 }));
        });

        let overview = fetch_overview(&api).await.unwrap();

        assert_eq!(overview.courses.len(), 1);
        assert_eq!(overview.users[0].username, "learner");
        assert_eq!(overview.stats.total_users, 12);
    }

    #[tokio::test]
    async fn overview_fails_when_any_part_fails() {
        let server = MockServer::start_async().await;
        let api = admin_client(&server).await;
        server.mock(|when, then| {
            when.method(GET).path("/api/courses/");
            then.status(200).json_body(json!([]));
        });
        server.mock(|when, then| {
            when.method(GET).path("/api/users/");
            then.status(403).json_body(json!({ "detail": "Forbidden" }));
        });
        server.mock(|when, then| {
            when.method(GET).path("/api/public-stats/");
            then.status(200).json_body(json!({}));
        });

        let err = fetch_overview(&api).await.unwrap_err();
        assert_eq!(err.status(), Some(403));
    }

    #[tokio::test]
    async fn save_creates_or_updates() {
        let server = MockServer::start_async().await;
        let api = admin_client(&server).await;
        server.mock(|when, then| {
            when.method(POST).path("/api/courses/");
            then.status(201).json_body(json!({ "id": 8, "title": "Solar" }));
        });
        server.mock(|when, then| {
            when.method(PUT).path("/api/courses/8/");
            then.status(200).json_body(json!({ "id": 8, "title": "Solar II" }));
        });
        let form = CourseForm {
            title: "Solar".into(),
            ..Default::default()
        };

        let created = save_course(&api, None, &form).await.unwrap();
        assert_eq!(created.id, 8);
        let sent = server.last_request(POST, "/api/courses/").unwrap().body.unwrap();
        assert_eq!(sent["title"], "Solar");
        assert_eq!(sent["duration"], 10);

        let updated = save_course(&api, Some(8), &form).await.unwrap();
        assert_eq!(updated.title, "Solar II");
    }

    #[tokio::test]
    async fn invalid_course_form_is_not_sent() {
        let server = MockServer::start_async().await;
        let api = admin_client(&server).await;

        let err = save_course(&api, None, &CourseForm::default()).await.unwrap_err();

        assert_eq!(err.code(), "VALIDATION_ERROR");
        assert_eq!(server.hits(POST, "/api/courses/"), 0);
    }

    #[tokio::test]
    async fn toggle_sends_inverted_flag() {
        let server = MockServer::start_async().await;
        let api = admin_client(&server).await;
        server.mock(|when, then| {
            when.method(PATCH).path("/api/courses/3/");
            then.status(200).json_body(json!({ "id": 3, "is_active": false }));
        });

        let active = toggle_course(&api, 3, true).await.unwrap();

        assert!(!active);
        let sent = server.last_request(PATCH, "/api/courses/3/").unwrap();
        assert_eq!(sent.body, Some(json!({ "is_active": false })));
    }

    #[tokio::test]
    async fn empty_bulk_selection_is_rejected() {
        let server = MockServer::start_async().await;
        let api = admin_client(&server).await;
        let before = server.requests().len();

        let err = bulk_update(&api, BulkAction::Delete, &[]).await.unwrap_err();

        assert_eq!(err.to_string(), "Please select courses to perform bulk action.");
        assert_eq!(server.requests().len(), before);
    }

    #[tokio::test]
    async fn bulk_actions_hit_every_course() {
        let server = MockServer::start_async().await;
        let api = admin_client(&server).await;
        for id in [1, 2, 3] {
            server.mock(move |when, then| {
                when.method(PATCH).path(&format!("/api/courses/{}/", id));
                then.status(200).json_body(json!({ "id": id }));
            });
            server.mock(move |when, then| {
                when.method(DELETE).path(&format!("/api/courses/{}/", id));
                then.status(204);
            });
        }

        let count = bulk_update(&api, BulkAction::Activate, &[1, 2, 3]).await.unwrap();
        assert_eq!(count, 3);
        for id in [1, 2, 3] {
            let sent = server
                .last_request(PATCH, &format!("/api/courses/{}/", id))
                .unwrap();
            assert_eq!(sent.body, Some(json!({ "is_active": true })));
        }

        bulk_update(&api, BulkAction::Delete, &[2, 3]).await.unwrap();
        assert_eq!(server.hits(DELETE, "/api/courses/1/"), 0);
        assert_eq!(server.hits(DELETE, "/api/courses/2/"), 1);
        assert_eq!(server.hits(DELETE, "/api/courses/3/"), 1);
    }

    #[tokio::test]
    async fn bulk_failure_is_reported() {
        let server = MockServer::start_async().await;
        let api = admin_client(&server).await;
        server.mock(|when, then| {
            when.method(PATCH).path("/api/courses/1/");
            then.status(200).json_body(json!({ "id": 1 }));
        });
        server.mock(|when, then| {
            when.method(PATCH).path("/api/courses/2/");
            then.status(404).json_body(json!({ "detail": "Not found." }));
        });

        let err = bulk_update(&api, BulkAction::Deactivate, &[1, 2]).await.unwrap_err();
        assert_eq!(err.to_string(), "Not found.");
    }
}
