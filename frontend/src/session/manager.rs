use futures::lock::Mutex;
use log::{debug, info, warn};
use reqwest::StatusCode;
use std::{
    cell::{Cell, RefCell},
    fmt,
    rc::Rc,
};

use crate::{
    api::{
        client::{ApiRequest, ApiResponse, HttpTransport, LOGIN_PATH, ME_PATH, REFRESH_PATH, REGISTER_PATH},
        ApiError, LoginRequest, LoginResponse, RefreshRequest, RefreshResponse, RegisterOutcome,
        RegisterRequest, RegisterResponse, UserResponse,
    },
    utils::storage::{TokenStorage, ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY},
};

/// The credential pair backing an authenticated client.
#[derive(Clone, PartialEq, Eq)]
pub struct Session {
    pub access_token: String,
    pub refresh_token: Option<String>,
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("access_token", &"<redacted>")
            .field("has_refresh_token", &self.refresh_token.is_some())
            .finish()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    Unauthenticated,
    Authenticated,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    SignedIn(Option<UserResponse>),
    Refreshed,
    SignedOut { expired: bool },
}

type Listener = Rc<dyn Fn(&SessionEvent)>;

#[derive(Default)]
struct SessionState {
    session: Option<Session>,
    identity: Option<UserResponse>,
}

/// Owns the token lifecycle of the single logical session of this client.
///
/// Every mutation of the session bumps `generation`. A request that fails
/// with 401 remembers the generation it was sent under; once it holds the
/// refresh gate it only refreshes if nobody else changed the session in the
/// meantime, so one wave of concurrent 401s produces at most one
/// refresh/logout cycle.
pub struct SessionManager {
    transport: HttpTransport,
    storage: Rc<dyn TokenStorage>,
    state: RefCell<SessionState>,
    generation: Cell<u64>,
    /// Changes only when a session is installed or cleared; refreshes keep it.
    epoch: Cell<u64>,
    refresh_gate: Mutex<()>,
    listeners: RefCell<Vec<Listener>>,
}

impl SessionManager {
    /// Picks up tokens left in `storage` by a previous visit.
    pub fn new(transport: HttpTransport, storage: Rc<dyn TokenStorage>) -> Self {
        let session = storage.get(ACCESS_TOKEN_KEY).map(|access_token| Session {
            access_token,
            refresh_token: storage.get(REFRESH_TOKEN_KEY),
        });
        if session.is_some() {
            debug!("Restored stored session tokens");
        }
        Self {
            transport,
            storage,
            state: RefCell::new(SessionState {
                session,
                identity: None,
            }),
            generation: Cell::new(0),
            epoch: Cell::new(0),
            refresh_gate: Mutex::new(()),
            listeners: RefCell::new(Vec::new()),
        }
    }

    pub fn status(&self) -> SessionStatus {
        if self.state.borrow().session.is_some() {
            SessionStatus::Authenticated
        } else {
            SessionStatus::Unauthenticated
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.status() == SessionStatus::Authenticated
    }

    pub fn current_user(&self) -> Option<UserResponse> {
        self.state.borrow().identity.clone()
    }

    pub fn access_token(&self) -> Option<String> {
        self.state
            .borrow()
            .session
            .as_ref()
            .map(|s| s.access_token.clone())
    }

    pub fn session(&self) -> Option<Session> {
        self.state.borrow().session.clone()
    }

    pub fn subscribe(&self, listener: impl Fn(&SessionEvent) + 'static) {
        self.listeners.borrow_mut().push(Rc::new(listener));
    }

    pub async fn login(&self, request: &LoginRequest) -> Result<(), ApiError> {
        let response = self
            .transport
            .send(&ApiRequest::post(LOGIN_PATH).json(request)?, None)
            .await?;

        if !response.is_success() {
            let status = response.status;
            warn!("Login rejected for {} ({})", request.username, status);
            return Err(credential_error(response, "Login failed"));
        }

        let payload: LoginResponse = response.json()?;
        info!("Signed in as {}", request.username);
        self.establish(payload.access, Some(payload.refresh), payload.user)
            .await
    }

    pub async fn register(&self, profile: &RegisterRequest) -> Result<RegisterOutcome, ApiError> {
        validate_registration(profile)?;

        let response = self
            .transport
            .send(&ApiRequest::post(REGISTER_PATH).json(profile)?, None)
            .await?;
        if !response.is_success() {
            warn!("Registration rejected for {} ({})", profile.username, response.status);
            let status = response.status.as_u16();
            let details = response.payload();
            let message = response
                .error_message()
                .unwrap_or_else(|| "Registration failed".to_string());
            return Err(ApiError::Server {
                status,
                message,
                details,
            });
        }

        let payload: RegisterResponse = response.json()?;
        match (payload.access, payload.refresh) {
            (Some(access), Some(refresh)) => {
                info!("Registered and signed in as {}", profile.username);
                self.establish(access, Some(refresh), payload.user).await?;
                Ok(RegisterOutcome::SignedIn)
            }
            _ => {
                info!("Registered {}; login required", profile.username);
                Ok(RegisterOutcome::LoginRequired)
            }
        }
    }

    /// Clears tokens and identity. Safe to call in any state.
    pub fn logout(&self) {
        self.clear(false);
    }

    /// Exchanges the refresh token for a new access token.
    pub async fn refresh(&self) -> Result<String, ApiError> {
        let _gate = self.refresh_gate.lock().await;
        self.refresh_locked().await
    }

    /// Sends `request` with the current access token, recovering once from a
    /// 401 through the refresh protocol.
    pub async fn authorized_request(
        &self,
        mut request: ApiRequest,
    ) -> Result<ApiResponse, ApiError> {
        let observed = self.generation.get();
        let token = self.access_token();
        let response = self.transport.send(&request, token.as_deref()).await?;

        if response.status != StatusCode::UNAUTHORIZED || request.retried || request.is_refresh() {
            return Ok(response);
        }

        request.retried = true;
        self.recover(observed).await?;
        let token = self.access_token();
        self.transport.send(&request, token.as_deref()).await
    }

    /// Loads the identity for tokens found in storage at start-up.
    pub async fn restore(&self) -> Result<(), ApiError> {
        if !self.is_authenticated() || self.current_user().is_some() {
            return Ok(());
        }
        let epoch = self.epoch.get();
        match self.fetch_identity().await {
            Ok(_) if self.epoch.get() != epoch => {
                debug!("Discarding restored identity for a replaced session");
                Ok(())
            }
            Ok(user) => {
                self.state.borrow_mut().identity = Some(user.clone());
                self.emit(&SessionEvent::SignedIn(Some(user)));
                Ok(())
            }
            Err(ApiError::SessionExpired) => Err(ApiError::SessionExpired),
            Err(err) => {
                // Keep the tokens; the backend may just be unreachable.
                warn!("Failed to restore identity: {}", err);
                Err(err)
            }
        }
    }

    async fn recover(&self, observed: u64) -> Result<(), ApiError> {
        let _gate = self.refresh_gate.lock().await;
        if self.generation.get() != observed {
            debug!("Session changed while waiting for the refresh gate");
            return if self.is_authenticated() {
                Ok(())
            } else {
                Err(ApiError::SessionExpired)
            };
        }
        self.refresh_locked().await.map(|_| ())
    }

    async fn refresh_locked(&self) -> Result<String, ApiError> {
        let observed = self.generation.get();
        let refresh_token = self
            .state
            .borrow()
            .session
            .as_ref()
            .and_then(|s| s.refresh_token.clone());
        let Some(refresh_token) = refresh_token else {
            warn!("No refresh token available");
            self.clear(true);
            return Err(ApiError::SessionExpired);
        };

        let request = ApiRequest::post(REFRESH_PATH).json(&RefreshRequest {
            refresh: refresh_token,
        })?;
        let response = self.transport.send(&request, None).await?;

        if self.generation.get() != observed {
            debug!("Discarding refresh result for a replaced session");
            return self.access_token().ok_or(ApiError::SessionExpired);
        }
        if !response.is_success() {
            warn!("Refresh token rejected ({})", response.status);
            self.clear(true);
            return Err(ApiError::SessionExpired);
        }
        let payload: RefreshResponse = match response.json() {
            Ok(payload) => payload,
            Err(err) => {
                warn!("Unusable refresh response: {}", err);
                self.clear(true);
                return Err(ApiError::SessionExpired);
            }
        };

        self.storage.set(ACCESS_TOKEN_KEY, &payload.access);
        if let Some(rotated) = &payload.refresh {
            self.storage.set(REFRESH_TOKEN_KEY, rotated);
        }
        {
            let mut state = self.state.borrow_mut();
            if let Some(session) = state.session.as_mut() {
                session.access_token = payload.access.clone();
                if payload.refresh.is_some() {
                    session.refresh_token = payload.refresh.clone();
                }
            }
        }
        self.bump();
        info!("Access token refreshed");
        self.emit(&SessionEvent::Refreshed);
        Ok(payload.access)
    }

    /// Installs a fresh session and publishes its identity. Fails with
    /// `SessionExpired` when the session did not survive the identity fetch.
    async fn establish(
        &self,
        access: String,
        refresh: Option<String>,
        inline: Option<UserResponse>,
    ) -> Result<(), ApiError> {
        self.storage.set(ACCESS_TOKEN_KEY, &access);
        match &refresh {
            Some(token) => self.storage.set(REFRESH_TOKEN_KEY, token),
            None => self.storage.remove(REFRESH_TOKEN_KEY),
        }
        {
            let mut state = self.state.borrow_mut();
            state.session = Some(Session {
                access_token: access,
                refresh_token: refresh,
            });
            state.identity = None;
        }
        self.bump();
        let epoch = self.next_epoch();

        let identity = match self.fetch_identity().await {
            Ok(user) => Some(user),
            Err(err) => {
                warn!("Failed to fetch identity: {}", err);
                inline
            }
        };
        if self.epoch.get() != epoch {
            debug!("Discarding identity for a replaced session");
            return if self.is_authenticated() {
                Ok(())
            } else {
                Err(ApiError::SessionExpired)
            };
        }
        self.state.borrow_mut().identity = identity.clone();
        self.emit(&SessionEvent::SignedIn(identity));
        Ok(())
    }

    async fn fetch_identity(&self) -> Result<UserResponse, ApiError> {
        self.authorized_request(ApiRequest::get(ME_PATH))
            .await?
            .into_result()
    }

    fn clear(&self, expired: bool) {
        self.storage.remove(ACCESS_TOKEN_KEY);
        self.storage.remove(REFRESH_TOKEN_KEY);
        let had_state = {
            let mut state = self.state.borrow_mut();
            let had_state = state.session.is_some() || state.identity.is_some();
            state.session = None;
            state.identity = None;
            had_state
        };
        if had_state {
            self.bump();
            self.next_epoch();
            if expired {
                info!("Session expired; signed out");
            } else {
                info!("Signed out");
            }
            self.emit(&SessionEvent::SignedOut { expired });
        }
    }

    fn bump(&self) {
        self.generation.set(self.generation.get().wrapping_add(1));
    }

    fn next_epoch(&self) -> u64 {
        let epoch = self.epoch.get().wrapping_add(1);
        self.epoch.set(epoch);
        epoch
    }

    fn emit(&self, event: &SessionEvent) {
        let listeners: Vec<Listener> = self.listeners.borrow().clone();
        for listener in listeners {
            listener(event);
        }
    }
}

impl fmt::Debug for SessionManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionManager")
            .field("status", &self.status())
            .field("generation", &self.generation.get())
            .finish()
    }
}

/// Bad credentials and malformed logins come back as 400/401.
fn credential_error(response: ApiResponse, fallback: &str) -> ApiError {
    match response.status {
        StatusCode::BAD_REQUEST | StatusCode::UNAUTHORIZED => ApiError::Authentication(
            response
                .error_message()
                .unwrap_or_else(|| fallback.to_string()),
        ),
        _ => response.into_error(),
    }
}

pub fn validate_registration(profile: &RegisterRequest) -> Result<(), ApiError> {
    if profile.password_confirm.is_empty() {
        return Err(ApiError::validation(
            "password_confirm: This field is required.",
        ));
    }
    if profile.password != profile.password_confirm {
        return Err(ApiError::validation("Passwords do not match"));
    }
    Ok(())
}
