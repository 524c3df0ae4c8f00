//! Category and status filters

use crate::error::Error;
use crate::types::{Category, Issue, Status};
use std::fmt;
use std::str::FromStr;

/// Either every value or one specific value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Filter<T> {
    /// No filtering on this dimension
    #[default]
    All,
    /// Only this value
    Only(T),
}

impl<T> Filter<T> {
    /// The specific value, if any
    pub const fn value(&self) -> Option<&T> {
        match self {
            Self::All => None,
            Self::Only(v) => Some(v),
        }
    }

    /// Whether `candidate` passes this filter
    pub fn matches<U>(&self, candidate: &U) -> bool
    where
        U: PartialEq<T>,
    {
        self.value().is_none_or(|v| candidate == v)
    }
}

impl<T: fmt::Display> fmt::Display for Filter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("all"),
            Self::Only(v) => v.fmt(f),
        }
    }
}

impl<T: FromStr<Err = Error>> FromStr for Filter<T> {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            Ok(Self::All)
        } else {
            s.parse().map(Self::Only)
        }
    }
}

/// Filters applied to the issue list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct IssueFilter {
    /// Category filter
    pub category: Filter<Category>,
    /// Status filter
    pub status: Filter<Status>,
}

impl IssueFilter {
    /// Query parameters for `GET /issues`; `All` filters are left out
    pub fn query_pairs(&self) -> Vec<(&'static str, &'static str)> {
        let mut params = Vec::new();
        if let Filter::Only(category) = self.category {
            params.push(("category", category.as_str()));
        }
        if let Filter::Only(status) = self.status {
            params.push(("status", status.as_str()));
        }
        params
    }

    /// Whether an issue passes both filters
    pub fn matches(&self, issue: &Issue) -> bool {
        self.category.matches(&issue.category) && self.status.matches(&issue.status)
    }
}
