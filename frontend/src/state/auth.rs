use crate::{
    api::{ApiClient, ApiError, LoginRequest, RegisterOutcome, RegisterRequest, UserResponse},
    session::SessionEvent,
};
use leptos::*;

type AuthContext = (ReadSignal<AuthState>, WriteSignal<AuthState>);

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AuthState {
    pub user: Option<UserResponse>,
    pub is_authenticated: bool,
    pub loading: bool,
    /// Set when the session ended because the refresh protocol failed.
    pub expired: bool,
}

impl AuthState {
    pub fn apply(&mut self, event: &SessionEvent) {
        match event {
            SessionEvent::SignedIn(user) => {
                self.user = user.clone();
                self.is_authenticated = true;
                self.expired = false;
            }
            SessionEvent::Refreshed => {
                self.is_authenticated = true;
            }
            SessionEvent::SignedOut { expired } => {
                self.user = None;
                self.is_authenticated = false;
                self.expired = *expired;
            }
        }
        self.loading = false;
    }

    pub fn is_admin(&self) -> bool {
        self.user.as_ref().is_some_and(UserResponse::is_admin)
    }
}

/// Mirrors every session transition into `set_auth_state`.
pub fn sync_with_session(api: &ApiClient, set_auth_state: WriteSignal<AuthState>) {
    let session = api.session();
    set_auth_state.update(|state| {
        state.is_authenticated = session.is_authenticated();
        state.user = session.current_user();
    });
    session.subscribe(move |event| set_auth_state.update(|state| state.apply(event)));
}

fn create_auth_context(api: ApiClient) -> AuthContext {
    let (auth_state, set_auth_state) = create_signal(AuthState::default());
    sync_with_session(&api, set_auth_state);

    if api.is_authenticated() && api.current_user().is_none() {
        set_auth_state.update(|state| state.loading = true);
        spawn_local(async move {
            if let Err(err) = api.session().restore().await {
                log::warn!("Session restore failed: {}", err);
            }
            set_auth_state.update(|state| state.loading = false);
        });
    }

    (auth_state, set_auth_state)
}

#[component]
pub fn AuthProvider(children: Children) -> impl IntoView {
    let api = use_context::<ApiClient>().unwrap_or_else(|| {
        let api = ApiClient::new();
        provide_context(api.clone());
        api
    });
    let ctx = create_auth_context(api);
    provide_context::<AuthContext>(ctx);
    view! { <>{children()}</> }
}

pub fn use_auth() -> AuthContext {
    use_context::<AuthContext>().unwrap_or_else(|| create_signal(AuthState::default()))
}

pub async fn login_request(
    request: LoginRequest,
    api: &ApiClient,
    set_auth_state: WriteSignal<AuthState>,
) -> Result<(), ApiError> {
    set_auth_state.update(|state| state.loading = true);
    let result = api.login(request).await;
    set_auth_state.update(|state| state.loading = false);
    result
}

pub async fn register_request(
    request: RegisterRequest,
    api: &ApiClient,
    set_auth_state: WriteSignal<AuthState>,
) -> Result<RegisterOutcome, ApiError> {
    set_auth_state.update(|state| state.loading = true);
    let result = api.register(request).await;
    set_auth_state.update(|state| state.loading = false);
    result
}

pub fn use_login_action() -> Action<LoginRequest, Result<(), ApiError>> {
    let (_auth, set_auth) = use_auth();
    let api = use_context::<ApiClient>().expect("ApiClient should be provided");

    create_action(move |request: &LoginRequest| {
        let payload = request.clone();
        let api = api.clone();
        async move { login_request(payload, &api, set_auth).await }
    })
}

pub fn use_register_action() -> Action<RegisterRequest, Result<RegisterOutcome, ApiError>> {
    let (_auth, set_auth) = use_auth();
    let api = use_context::<ApiClient>().expect("ApiClient should be provided");

    create_action(move |request: &RegisterRequest| {
        let payload = request.clone();
        let api = api.clone();
        async move { register_request(payload, &api, set_auth).await }
    })
}

/// Logout is local; the returned callback clears the session immediately.
pub fn use_logout() -> impl Fn() + Clone + 'static {
    let api = use_context::<ApiClient>().expect("ApiClient should be provided");
    move || api.logout()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::helpers::regular_user;
    use leptos::create_runtime;

    fn with_runtime<T>(test: impl FnOnce() -> T) -> T {
        let runtime = create_runtime();
        let result = test();
        runtime.dispose();
        result
    }

    #[test]
    fn use_auth_returns_default_without_context() {
        with_runtime(|| {
            let (state, _set_state) = use_auth();
            let snapshot = state.get();
            assert!(!snapshot.is_authenticated);
            assert!(snapshot.user.is_none());
        });
    }

    #[test]
    fn session_events_drive_auth_state() {
        let mut state = AuthState {
            loading: true,
            ..Default::default()
        };
        state.apply(&SessionEvent::SignedIn(Some(regular_user())));
        assert!(state.is_authenticated);
        assert!(!state.loading);
        assert_eq!(state.user.as_ref().map(|u| u.id), Some(2));

        state.apply(&SessionEvent::SignedOut { expired: true });
        assert!(!state.is_authenticated);
        assert!(state.user.is_none());
        assert!(state.expired);
    }
}
