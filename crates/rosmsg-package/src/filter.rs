//! Package name filters.
//!
//! A filter term is an exact name, `prefix*` or `*suffix`. Terms are
//! OR-combined.

use crate::package::PackageInfo;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One filter term.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FilterTerm {
    Exact(String),
    Prefix(String),
    Suffix(String),
}

impl FilterTerm {
    pub fn parse(term: &str) -> Self {
        if let Some(suffix) = term.strip_prefix('*') {
            FilterTerm::Suffix(suffix.to_string())
        } else if let Some(prefix) = term.strip_suffix('*') {
            FilterTerm::Prefix(prefix.to_string())
        } else {
            FilterTerm::Exact(term.to_string())
        }
    }

    pub fn matches(&self, name: &str) -> bool {
        match self {
            FilterTerm::Exact(exact) => name == exact,
            FilterTerm::Prefix(prefix) => name.starts_with(prefix.as_str()),
            FilterTerm::Suffix(suffix) => name.ends_with(suffix.as_str()),
        }
    }
}

impl fmt::Display for FilterTerm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterTerm::Exact(exact) => write!(f, "{exact}"),
            FilterTerm::Prefix(prefix) => write!(f, "{prefix}*"),
            FilterTerm::Suffix(suffix) => write!(f, "*{suffix}"),
        }
    }
}

/// Selects which packages are mandatory for a build.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageFilter {
    terms: Vec<FilterTerm>,
}

impl PackageFilter {
    pub fn new<I, S>(terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            terms: terms
                .into_iter()
                .map(|t| t.as_ref().trim().to_string())
                .filter(|t| !t.is_empty())
                .map(|t| FilterTerm::parse(&t))
                .collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn terms(&self) -> &[FilterTerm] {
        &self.terms
    }

    /// Exact names, which must exist among the discovered packages.
    pub fn exact_names(&self) -> impl Iterator<Item = &str> {
        self.terms.iter().filter_map(|t| match t {
            FilterTerm::Exact(name) => Some(name.as_str()),
            _ => None,
        })
    }

    /// Check if any term matches `name`. An empty filter matches nothing.
    pub fn matches(&self, name: &str) -> bool {
        self.terms.iter().any(|t| t.matches(name))
    }

    /// Return a copy of `packages` where matching packages are mandatory and
    /// all others optional. An empty filter returns the packages unchanged.
    pub fn reclassify(&self, packages: &[PackageInfo]) -> Vec<PackageInfo> {
        if self.is_empty() {
            return packages.to_vec();
        }

        packages
            .iter()
            .map(|package| {
                let is_optional = !self.matches(&package.name);
                package.clone().with_optional(is_optional)
            })
            .collect()
    }
}

impl fmt::Display for PackageFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, term) in self.terms.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{term}")?;
        }
        Ok(())
    }
}
