//! Loading/ready/error state for one logical query.

use std::fmt::Display;

/// State of a single query held by a view
#[derive(Debug, Clone, PartialEq)]
pub enum FetchState<T> {
    Loading,
    Ready(T),
    Error(String),
}

impl<T> Default for FetchState<T> {
    fn default() -> Self {
        FetchState::Loading
    }
}

impl<T> FetchState<T> {
    /// Reset to `Loading` ahead of a new request
    pub fn begin(&mut self) {
        *self = FetchState::Loading;
    }

    /// Settle the current request
    pub fn settle<E: Display>(&mut self, result: Result<T, E>) {
        *self = match result {
            Ok(data) => FetchState::Ready(data),
            Err(e) => FetchState::Error(e.to_string()),
        };
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, FetchState::Loading)
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            FetchState::Ready(data) => Some(data),
            _ => None,
        }
    }

    pub fn data_mut(&mut self) -> Option<&mut T> {
        match self {
            FetchState::Ready(data) => Some(data),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            FetchState::Error(message) => Some(message),
            _ => None,
        }
    }
}

impl<T, E: Display> From<Result<T, E>> for FetchState<T> {
    fn from(result: Result<T, E>) -> Self {
        let mut state = FetchState::Loading;
        state.settle(result);
        state
    }
}
