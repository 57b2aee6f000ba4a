#[cfg(test)]
pub mod mock {
    use crate::api::client::{register_mock, MockRequest, MockResponse, TestResponder};
    use crate::api::ApiError;
    use reqwest::Method;
    use serde_json::Value;
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    pub const GET: Method = Method::GET;
    pub const POST: Method = Method::POST;
    pub const PUT: Method = Method::PUT;
    pub const PATCH: Method = Method::PATCH;
    pub const DELETE: Method = Method::DELETE;

    /// In-process stand-in for the REST API. Routes are matched newest first;
    /// every request that reaches the server is recorded.
    #[derive(Clone)]
    pub struct MockServer {
        inner: Rc<RefCell<Inner>>,
        base: String,
    }

    #[derive(Default)]
    struct Inner {
        routes: Vec<Route>,
        received: Vec<MockRequest>,
    }

    struct Route {
        method: Method,
        path: String,
        authorization: Option<Option<String>>,
        query: Vec<(String, String)>,
        remaining: Option<usize>,
        outcome: Outcome,
    }

    #[derive(Clone)]
    enum Outcome {
        Respond(MockResponse),
        NetworkError,
    }

    impl Route {
        fn matches(&self, request: &MockRequest) -> bool {
            if self.method != request.method || self.path != request.path {
                return false;
            }
            if self.remaining == Some(0) {
                return false;
            }
            if let Some(expected) = &self.authorization {
                if *expected != request.authorization {
                    return false;
                }
            }
            self.query.iter().all(|pair| request.query.contains(pair))
        }
    }

    impl MockServer {
        pub async fn start_async() -> Self {
            Self::start()
        }

        pub fn start() -> Self {
            static NEXT_ID: AtomicUsize = AtomicUsize::new(1);
            let id = NEXT_ID.fetch_add(1, Ordering::Relaxed);
            Self {
                inner: Rc::new(RefCell::new(Inner::default())),
                base: format!("http://mock-{}", id),
            }
        }

        pub fn url(&self, path: &str) -> String {
            let base_url = format!("{}{}", self.base, path);
            register_mock(base_url.clone(), Rc::new(self.clone()));
            base_url
        }

        pub fn mock<F>(&self, f: F)
        where
            F: FnOnce(&mut When, &mut Then),
        {
            let mut when = When::default();
            let mut then = Then::default();
            f(&mut when, &mut then);

            let method = when.method.clone().expect("mock requires method");
            let path = when.path.clone().expect("mock requires path");
            let outcome = if then.network_error {
                Outcome::NetworkError
            } else {
                Outcome::Respond(MockResponse::json(
                    then.status.unwrap_or(200),
                    then.body.unwrap_or_else(|| serde_json::json!({})),
                ))
            };

            self.inner.borrow_mut().routes.push(Route {
                method,
                path,
                authorization: when.authorization,
                query: when.query,
                remaining: when.times,
                outcome,
            });
        }

        /// Every request received so far, oldest first.
        pub fn requests(&self) -> Vec<MockRequest> {
            self.inner.borrow().received.clone()
        }

        pub fn hits(&self, method: Method, path: &str) -> usize {
            self.inner
                .borrow()
                .received
                .iter()
                .filter(|request| request.method == method && request.path == path)
                .count()
        }

        pub fn last_request(&self, method: Method, path: &str) -> Option<MockRequest> {
            self.inner
                .borrow()
                .received
                .iter()
                .rev()
                .find(|request| request.method == method && request.path == path)
                .cloned()
        }
    }

    impl TestResponder for MockServer {
        fn respond(&self, request: &MockRequest) -> Result<MockResponse, ApiError> {
            let mut inner = self.inner.borrow_mut();
            inner.received.push(request.clone());

            let route = inner
                .routes
                .iter_mut()
                .rev()
                .find(|route| route.matches(request));
            let Some(route) = route else {
                return Ok(MockResponse::json(
                    404,
                    serde_json::json!({
                        "detail": format!("No mock for {} {}", request.method, request.path)
                    }),
                ));
            };
            if let Some(remaining) = route.remaining.as_mut() {
                *remaining -= 1;
            }
            match route.outcome.clone() {
                Outcome::Respond(response) => Ok(response),
                Outcome::NetworkError => Err(ApiError::network("Request failed: connection refused")),
            }
        }
    }

    #[derive(Default)]
    pub struct When {
        method: Option<Method>,
        path: Option<String>,
        authorization: Option<Option<String>>,
        query: Vec<(String, String)>,
        times: Option<usize>,
    }

    impl When {
        pub fn method(&mut self, method: Method) -> &mut Self {
            self.method = Some(method);
            self
        }

        pub fn path(&mut self, path: &str) -> &mut Self {
            self.path = Some(path.to_string());
            self
        }

        pub fn bearer(&mut self, token: &str) -> &mut Self {
            self.authorization = Some(Some(format!("Bearer {}", token)));
            self
        }

        pub fn without_auth(&mut self) -> &mut Self {
            self.authorization = Some(None);
            self
        }

        pub fn query_param(&mut self, key: &str, value: &str) -> &mut Self {
            self.query.push((key.to_string(), value.to_string()));
            self
        }

        /// Stop matching after `n` hits.
        pub fn times(&mut self, n: usize) -> &mut Self {
            self.times = Some(n);
            self
        }
    }

    #[derive(Default)]
    pub struct Then {
        status: Option<u16>,
        body: Option<Value>,
        network_error: bool,
    }

    impl Then {
        pub fn status(&mut self, status: u16) -> &mut Self {
            self.status = Some(status);
            self
        }

        pub fn json_body(&mut self, body: Value) -> &mut Self {
            self.body = Some(body);
            self
        }

        pub fn network_error(&mut self) -> &mut Self {
            self.network_error = true;
            self
        }
    }

    impl MockServer {
        /// Client signed in as `user` with access token `a1` and refresh token `r1`.
        pub async fn signed_in_client(&self, user: Value) -> crate::api::ApiClient {
            let username = user["username"].as_str().unwrap_or("learner").to_string();
            let login_user = user.clone();
            self.mock(move |when, then| {
                when.method(POST).path("/api/users/login/");
                then.status(200).json_body(serde_json::json!({
                    "access": "a1",
                    "refresh": "r1",
                    "user": login_user
                }));
            });
            self.mock(move |when, then| {
                when.method(GET).path("/api/users/me/");
                then.status(200).json_body(user);
            });
            let api = crate::api::ApiClient::new_with_base_url(self.url("/api"));
            api.login(crate::api::LoginRequest {
                username,
                password: "secret".into(),
            })
            .await
            .expect("mock login");
            api
        }
    }
}
