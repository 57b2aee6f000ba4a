use crate::{
    api::{ApiError, RegisterOutcome, RegisterRequest},
    pages::{
        login::utils::{navigate, AFTER_LOGIN_ROUTE},
        register::utils::RegisterForm,
    },
    state::auth,
};
use leptos::*;

#[derive(Clone, Copy)]
pub struct RegisterViewModel {
    pub form: RwSignal<RegisterForm>,
    pub error: RwSignal<Option<ApiError>>,
    pub register_action: Action<RegisterRequest, Result<RegisterOutcome, ApiError>>,
}

impl RegisterViewModel {
    pub fn submit(&self) {
        if self.register_action.pending().get_untracked() {
            return;
        }
        match self.form.get_untracked().to_request() {
            Ok(request) => {
                self.error.set(None);
                self.register_action.dispatch(request);
            }
            Err(err) => self.error.set(Some(err)),
        }
    }
}

/// Where to go once registration finishes, if anywhere.
fn next_route(result: &Option<Result<RegisterOutcome, ApiError>>) -> Option<&'static str> {
    match result {
        Some(Ok(RegisterOutcome::SignedIn)) => Some(AFTER_LOGIN_ROUTE),
        Some(Ok(RegisterOutcome::LoginRequired)) => Some("/login"),
        _ => None,
    }
}

pub fn use_register_view_model() -> RegisterViewModel {
    let form = create_rw_signal(RegisterForm::default());
    let error = create_rw_signal(None::<ApiError>);
    let register_action = auth::use_register_action();

    create_effect(move |_| {
        let result = register_action.value().get();
        if let Some(Err(err)) = &result {
            error.set(Some(err.clone()));
        }
        if let Some(route) = next_route(&result) {
            navigate(route);
        }
    });

    RegisterViewModel {
        form,
        error,
        register_action,
    }
}


#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::test_support::{
        helpers::{provide_api, provide_auth},
        ssr::with_runtime,
    };

    #[test]
    fn mismatched_passwords_never_dispatch() {
        with_runtime(|| {
            provide_auth(None);
            provide_api();
            let vm = use_register_view_model();
            vm.form.set(RegisterForm {
                username: "amina".into(),
                email: "amina@example.com".into(),
                password: "one".into(),
                password_confirm: "two".into(),
                ..Default::default()
            });
            vm.submit();
            assert_eq!(
                vm.error.get().map(|e| e.to_string()),
                Some("Passwords do not match".into())
            );
            assert!(vm.register_action.input().get().is_none());
        });
    }
}
