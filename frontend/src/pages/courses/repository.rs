use crate::api::{ApiClient, ApiError, Course, CourseQuery, Enrollment, MessageResponse};
use log::warn;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourseDetail {
    pub course: Course,
    /// Only looked up for signed-in users enrolled in the course.
    pub enrollment: Option<Enrollment>,
}

pub async fn fetch_courses(api: &ApiClient, query: &CourseQuery) -> Result<Vec<Course>, ApiError> {
    api.list_courses(query).await
}

pub async fn fetch_course_detail(api: &ApiClient, course_id: i64) -> Result<CourseDetail, ApiError> {
    let course = api.get_course(course_id).await?;
    let enrollment = if api.is_authenticated() && course.is_enrolled {
        match api.course_enrollment(course_id).await {
            Ok(enrollment) => enrollment,
            Err(err) => {
                warn!("Failed to fetch enrollment for course {}: {}", course_id, err);
                None
            }
        }
    } else {
        None
    };
    Ok(CourseDetail { course, enrollment })
}

pub async fn enroll(api: &ApiClient, course_id: i64) -> Result<MessageResponse, ApiError> {
    if !api.is_authenticated() {
        return Err(ApiError::validation("Please log in to enroll in courses."));
    }
    api.enroll_course(course_id).await
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::api::test_support::mock::*;
    use serde_json::json;

    async fn signed_in(server: &MockServer) -> ApiClient {
        server
            .signed_in_client(json!({ "id": 2, "username": "learner" }))
            .await
    }

    #[tokio::test]
    async fn anonymous_detail_skips_enrollment_lookup() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(GET).path("/api/courses/4/");
            then.status(200)
                .json_body(json!({ "id": 4, "title": "Web Design", "is_enrolled": true }));
        });
        let api = ApiClient::new_with_base_url(server.url("/api"));

        let detail = fetch_course_detail(&api, 4).await.unwrap();

        assert_eq!(detail.course.title, "Web Design");
        assert!(detail.enrollment.is_none());
        assert_eq!(server.hits(GET, "/api/enrollments/"), 0);
    }

    #[tokio::test]
    async fn enrolled_detail_includes_progress() {
        let server = MockServer::start_async().await;
        let api = signed_in(&server).await;
        server.mock(|when, then| {
            when.method(GET).path("/api/courses/4/");
            then.status(200)
                .json_body(json!({ "id": 4, "title": "Web Design", "is_enrolled": true }));
        });
        server.mock(|when, then| {
            when.method(GET).path("/api/enrollments/").query_param("course", "4");
            then.status(200)
                .json_body(json!([{ "id": 11, "course": 4, "progress": 60 }]));
        });

        let detail = fetch_course_detail(&api, 4).await.unwrap();

        assert_eq!(detail.enrollment.map(|e| e.progress), Some(60));
    }

    #[tokio::test]
    async fn enrollment_failure_does_not_hide_the_course() {
        let server = MockServer::start_async().await;
        let api = signed_in(&server).await;
        server.mock(|when, then| {
            when.method(GET).path("/api/courses/4/");
            then.status(200)
                .json_body(json!({ "id": 4, "title": "Web Design", "is_enrolled": true }));
        });
        server.mock(|when, then| {
            when.method(GET).path("/api/enrollments/");
            then.status(500).json_body(json!({ "detail": "boom" }));
        });

        let detail = fetch_course_detail(&api, 4).await.unwrap();
        assert!(detail.enrollment.is_none());
    }

    #[tokio::test]
    async fn enrolling_requires_a_session() {
        let server = MockServer::start_async().await;
        let api = ApiClient::new_with_base_url(server.url("/api"));

        let err = enroll(&api, 4).await.unwrap_err();

        assert_eq!(err.code(), "VALIDATION_ERROR");
        assert!(server.requests().is_empty());
    }

    #[tokio::test]
    async fn enrolling_posts_to_course() {
        let server = MockServer::start_async().await;
        let api = signed_in(&server).await;
        server.mock(|when, then| {
            when.method(POST).path("/api/courses/4/enroll/").bearer("a1");
            then.status(201)
                .json_body(json!({ "message": "Successfully enrolled in course" }));
        });

        let response = enroll(&api, 4).await.unwrap();
        assert_eq!(
            response.message.as_deref(),
            Some("Successfully enrolled in course")
        );
    }
}
