use crate::{api::ApiClient, state::auth::AuthProvider};
use leptos::*;

/// Provides the one `ApiClient`, and with it the one session, for every
/// view mounted below. View hooks expect to find it in context.
#[component]
pub fn AppRoot(children: Children) -> impl IntoView {
    provide_context(ApiClient::new());
    view! { <AuthProvider>{children()}</AuthProvider> }
}
