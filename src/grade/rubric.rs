#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use std::collections::HashSet;

use serde::Serialize;

use crate::constants::DEFAULT_REQUIRED_CLASSES;

/// Reasons a class list cannot be used as a rubric.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum RubricError {
    /// No class names were given.
    #[error("The list of required classes is empty.")]
    Empty,
    /// A class name is blank or contains whitespace.
    #[error("`{0}` is not a valid class name.")]
    InvalidName(String),
    /// A class name appears more than once.
    #[error("`{0}` is listed more than once.")]
    Duplicate(String),
}

/// Ordered, duplicate-free list of class names a submission must use.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RequiredClasses(Vec<String>);

impl RequiredClasses {
    /// Validates and wraps a list of class names, keeping their order.
    pub fn new<I, S>(names: I) -> Result<Self, RubricError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: Vec<String> = names.into_iter().map(Into::into).collect();
        if names.is_empty() {
            return Err(RubricError::Empty);
        }

        let mut seen = HashSet::with_capacity(names.len());
        for name in &names {
            if name.is_empty() || name.chars().any(char::is_whitespace) {
                return Err(RubricError::InvalidName(name.clone()));
            }
            if !seen.insert(name.as_str()) {
                return Err(RubricError::Duplicate(name.clone()));
            }
        }

        Ok(Self(names))
    }

    /// Class names in rubric order.
    pub fn names(&self) -> &[String] {
        &self.0
    }

    /// Number of required classes; never zero.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false, a rubric cannot be empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over the class names in rubric order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl Default for RequiredClasses {
    fn default() -> Self {
        Self(DEFAULT_REQUIRED_CLASSES.iter().map(|c| c.to_string()).collect())
    }
}
