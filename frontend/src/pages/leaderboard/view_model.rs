use crate::{
    api::{ApiClient, ApiError, Timeframe},
    pages::leaderboard::{
        repository,
        utils::{position_of, RankedEntry},
    },
    state::auth::use_auth,
};
use leptos::*;

#[derive(Clone, Copy)]
pub struct LeaderboardViewModel {
    pub timeframe: RwSignal<Timeframe>,
    pub entries_resource: Resource<Timeframe, Result<Vec<RankedEntry>, ApiError>>,
    /// Rank of the signed-in user in the current list.
    pub my_position: Signal<Option<usize>>,
}

pub fn use_leaderboard_view_model() -> LeaderboardViewModel {
    let api = use_context::<ApiClient>().expect("ApiClient should be provided");
    let (auth, _) = use_auth();
    let timeframe = create_rw_signal(Timeframe::All);

    let entries_resource = create_resource(
        move || timeframe.get(),
        move |timeframe| {
            let api = api.clone();
            async move { repository::fetch_leaderboard(&api, timeframe).await }
        },
    );

    let my_position = Signal::derive(move || {
        let user_id = auth.get().user.map(|user| user.id)?;
        entries_resource
            .get()
            .and_then(Result::ok)
            .and_then(|entries| position_of(&entries, user_id))
    });

    LeaderboardViewModel {
        timeframe,
        entries_resource,
        my_position,
    }
}
