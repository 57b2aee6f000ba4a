use crate::{
    api::{ApiError, LoginRequest},
    pages::login::utils::{navigate, validate_credentials, AFTER_LOGIN_ROUTE},
    state::auth,
};
use leptos::*;

#[derive(Clone, Copy)]
pub struct LoginViewModel {
    pub username: RwSignal<String>,
    pub password: RwSignal<String>,
    pub error: RwSignal<Option<ApiError>>,
    pub login_action: Action<LoginRequest, Result<(), ApiError>>,
}

impl LoginViewModel {
    pub fn submit(&self) {
        if self.login_action.pending().get_untracked() {
            return;
        }
        match validate_credentials(&self.username.get_untracked(), &self.password.get_untracked()) {
            Ok(request) => {
                self.error.set(None);
                self.login_action.dispatch(request);
            }
            Err(err) => self.error.set(Some(err)),
        }
    }
}

fn apply_login_result(
    result: Option<Result<(), ApiError>>,
    password: RwSignal<String>,
    error: RwSignal<Option<ApiError>>,
) -> bool {
    match result {
        Some(Ok(())) => {
            error.set(None);
            password.set(String::new());
            true
        }
        Some(Err(err)) => {
            error.set(Some(err));
            false
        }
        None => false,
    }
}

pub fn use_login_view_model() -> LoginViewModel {
    let username = create_rw_signal(String::new());
    let password = create_rw_signal(String::new());
    let error = create_rw_signal(None::<ApiError>);
    let login_action = auth::use_login_action();

    create_effect(move |_| {
        if apply_login_result(login_action.value().get(), password, error) {
            navigate(AFTER_LOGIN_ROUTE);
        }
    });

    LoginViewModel {
        username,
        password,
        error,
        login_action,
    }
}
