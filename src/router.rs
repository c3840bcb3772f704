//! Router
//!
//! Pure mapping from the recorded classification to the handler that runs
//! next. Never consults a provider and never fails.

use crate::models::Category;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Name of exactly one handler to invoke
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Route {
    Department(Category),
    /// Supportive responder used when no classification is available
    Fallback,
}

impl Route {
    pub fn handler_name(&self) -> &'static str {
        match self {
            Route::Department(category) => category.as_str(),
            Route::Fallback => "support",
        }
    }

    /// Every route the router can produce
    pub fn all() -> impl Iterator<Item = Route> {
        Category::ALL
            .into_iter()
            .map(Route::Department)
            .chain(std::iter::once(Route::Fallback))
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.handler_name())
    }
}

pub struct Router;

impl Router {
    /// Select the handler for `last_category`.
    ///
    /// Absent or unrecognized labels go to [`Route::Fallback`].
    pub fn route(last_category: Option<&str>) -> Route {
        match last_category.map(str::parse::<Category>) {
            Some(Ok(category)) => Route::Department(category),
            Some(Err(_)) | None => Route::Fallback,
        }
    }
}
