// Copyright (c) 2026 Graphcore Ltd. All rights reserved.

//! Hierarchical content names.

use std::fmt;

/// A name made of components, written `/a/b/c`.
///
/// Empty components are ignored so `/a//b/` and `/a/b` are the same name.
/// The name with no components is rendered as `/` and is a prefix of every
/// name.
#[derive(Clone, Debug, Default, Eq, Hash, PartialEq, PartialOrd, Ord)]
pub struct Name {
    components: Vec<String>,
}

impl Name {
    #[must_use]
    pub fn root() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn components(&self) -> &[String] {
        &self.components
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.components.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Returns a new name with `component` added at the end.
    #[must_use]
    pub fn child(&self, component: &str) -> Self {
        let mut components = self.components.clone();
        components.extend(split(component));
        Self { components }
    }

    #[must_use]
    pub fn is_prefix_of(&self, other: &Name) -> bool {
        other.components.starts_with(&self.components)
    }
}

fn split(s: &str) -> impl Iterator<Item = String> + '_ {
    s.split('/')
        .filter(|c| !c.is_empty())
        .map(ToString::to_string)
}

impl From<&str> for Name {
    fn from(s: &str) -> Self {
        Self {
            components: split(s).collect(),
        }
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.components.is_empty() {
            return write!(f, "/");
        }
        for component in &self.components {
            write!(f, "/{component}")?;
        }
        Ok(())
    }
}
