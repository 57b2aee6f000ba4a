pub mod repository;
pub mod utils;
pub mod view_model;

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::view_model::use_free_courses_view_model;
    use crate::test_support::{helpers::provide_api, ssr::with_suppressed_resources};
    use crate::utils::LoadState;

    #[test]
    fn nothing_is_visible_before_load() {
        with_suppressed_resources(|| {
            provide_api();
            let vm = use_free_courses_view_model();
            assert_eq!(vm.visible_courses(), LoadState::Loading);
            assert!(vm.providers().is_empty());
        });
    }
}
