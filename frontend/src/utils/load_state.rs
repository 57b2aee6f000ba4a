use crate::api::ApiError;

/// What a view shows for one remote resource.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadState<T> {
    Loading,
    Empty,
    Failed(ApiError),
    Ready(T),
}

impl<T> LoadState<T> {
    pub fn from_result(result: Result<T, ApiError>) -> Self {
        match result {
            Ok(value) => Self::Ready(value),
            Err(err) => Self::Failed(err),
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn ready(&self) -> Option<&T> {
        match self {
            Self::Ready(value) => Some(value),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&ApiError> {
        match self {
            Self::Failed(err) => Some(err),
            _ => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> LoadState<U> {
        match self {
            Self::Loading => LoadState::Loading,
            Self::Empty => LoadState::Empty,
            Self::Failed(err) => LoadState::Failed(err),
            Self::Ready(value) => LoadState::Ready(f(value)),
        }
    }
}

impl<T> Default for LoadState<T> {
    fn default() -> Self {
        Self::Loading
    }
}

impl<T> LoadState<Vec<T>> {
    /// An empty list is `Empty` rather than `Ready(vec![])`.
    pub fn from_list(result: Result<Vec<T>, ApiError>) -> Self {
        match result {
            Ok(items) if items.is_empty() => Self::Empty,
            other => Self::from_result(other),
        }
    }
}
