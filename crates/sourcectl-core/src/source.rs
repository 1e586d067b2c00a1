use serde::{Deserialize, Serialize};

/// A package repository registered with the package manager.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Source {
    /// Name the source was registered under.
    pub name: String,

    /// Locator of the source, usually a URL.
    pub url: String,
}

impl Source {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
        }
    }
}
