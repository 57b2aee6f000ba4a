use crate::{
    api::{ApiClient, ApiError, Timeframe},
    pages::leaderboard::utils::{rank_users, RankedEntry},
};

pub async fn fetch_leaderboard(
    api: &ApiClient,
    timeframe: Timeframe,
) -> Result<Vec<RankedEntry>, ApiError> {
    Ok(rank_users(api.leaderboard(timeframe).await?))
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::api::test_support::mock::*;
    use serde_json::json;

    #[tokio::test]
    async fn passes_timeframe_and_ranks_result() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(GET)
                .path("/api/leaderboard/")
                .query_param("timeframe", "week");
            then.status(200).json_body(json!([
                { "id": 1, "username": "ada", "points": 90 },
                { "id": 2, "username": "bo", "points": 410 }
            ]));
        });
        let api = ApiClient::new_with_base_url(server.url("/api"));

        let entries = fetch_leaderboard(&api, Timeframe::Week).await.unwrap();

        assert_eq!(entries[0].user.username, "bo");
        assert_eq!(entries[0].level, 5);
        assert_eq!(entries[1].rank, 2);
    }
}
