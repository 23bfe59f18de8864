//! Host environment snapshot
//!
//! The launcher reads a handful of host variables exactly once, at start-up.
//! Everything downstream (mount rendering, plan output) works off this
//! snapshot so the values used are the values seen at invocation time.

use std::collections::BTreeMap;
use std::ffi::{OsStr, OsString};

/// Captured values of the host variables the launcher cares about.
/// A variable that was unset is recorded as `None`, never defaulted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HostEnv {
    vars: BTreeMap<String, Option<OsString>>,
}

impl HostEnv {
    /// Snapshot the named variables from the current process environment.
    pub fn capture<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let vars = names
            .into_iter()
            .map(|name| {
                let name = name.as_ref().to_string();
                let value = std::env::var_os(&name);
                (name, value)
            })
            .collect();
        Self { vars }
    }

    /// Build a snapshot from explicit values; `None` marks an unset variable.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, Option<V>)>,
        K: Into<String>,
        V: Into<OsString>,
    {
        let vars = pairs
            .into_iter()
            .map(|(k, v)| (k.into(), v.map(Into::into)))
            .collect();
        Self { vars }
    }

    /// Value of a variable, if it was set on the host.
    pub fn get(&self, name: &str) -> Option<&OsStr> {
        self.vars.get(name).and_then(|v| v.as_deref())
    }

    /// Names of captured variables that were unset on the host.
    pub fn unset(&self) -> impl Iterator<Item = &str> {
        self.vars
            .iter()
            .filter(|(_, v)| v.is_none())
            .map(|(k, _)| k.as_str())
    }
}
