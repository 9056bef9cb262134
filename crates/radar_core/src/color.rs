use std::collections::BTreeMap;

use serde::Deserialize;

/// A colour as written in the configuration: either a literal CSS colour or
/// a `var(--name)` reference resolved against the active theme.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColorValue {
    Literal(String),
    Themed(String),
}

impl ColorValue {
    pub fn parse(value: &str) -> Self {
        let trimmed = value.trim();
        trimmed
            .strip_prefix("var(")
            .and_then(|rest| rest.strip_suffix(')'))
            .map(str::trim)
            .filter(|name| name.starts_with("--") && name.len() > 2)
            .map_or_else(
                || Self::Literal(trimmed.to_string()),
                |name| Self::Themed(name.to_string()),
            )
    }

    /// Resolves the colour, returning `None` when a themed variable is not
    /// defined by `theme`.
    pub fn resolve(&self, theme: &dyn ThemeResolver) -> Option<String> {
        match self {
            Self::Literal(value) => Some(value.clone()),
            Self::Themed(name) => theme
                .lookup(name)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty()),
        }
    }
}

/// Looks up theme variables such as `--radar-adopt`.
pub trait ThemeResolver {
    fn lookup(&self, variable: &str) -> Option<String>;
}

/// A fixed set of theme variables, used when rendering outside a browser.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct StaticTheme {
    variables: BTreeMap<String, String>,
}

impl StaticTheme {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, variable: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(variable, value);
        self
    }

    pub fn insert(&mut self, variable: impl Into<String>, value: impl Into<String>) {
        let variable = variable.into();
        let key = if variable.starts_with("--") {
            variable
        } else {
            format!("--{variable}")
        };
        self.variables.insert(key, value.into());
    }

    /// Layers `other` on top of `self`; variables in `other` win.
    pub fn merge(&mut self, other: &Self) {
        for (variable, value) in &other.variables {
            self.variables.insert(variable.clone(), value.clone());
        }
    }

    pub fn len(&self) -> usize {
        self.variables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }
}

impl ThemeResolver for StaticTheme {
    fn lookup(&self, variable: &str) -> Option<String> {
        self.variables.get(variable).cloned()
    }
}

impl<T: ThemeResolver + ?Sized> ThemeResolver for &T {
    fn lookup(&self, variable: &str) -> Option<String> {
        (**self).lookup(variable)
    }
}
