use super::{
    client::{ApiClient, ApiRequest, ME_PATH},
    types::{LoginRequest, RegisterOutcome, RegisterRequest, UserResponse},
    ApiError,
};

impl ApiClient {
    pub async fn login(&self, request: LoginRequest) -> Result<(), ApiError> {
        self.session().login(&request).await
    }

    pub async fn register(&self, request: RegisterRequest) -> Result<RegisterOutcome, ApiError> {
        self.session().register(&request).await
    }

    pub fn logout(&self) {
        self.session().logout();
    }

    pub async fn get_me(&self) -> Result<UserResponse, ApiError> {
        self.fetch(ApiRequest::get(ME_PATH)).await
    }

    /// Identity cached by the session; no request is made.
    pub fn current_user(&self) -> Option<UserResponse> {
        self.session().current_user()
    }

    pub fn is_authenticated(&self) -> bool {
        self.session().is_authenticated()
    }
}
