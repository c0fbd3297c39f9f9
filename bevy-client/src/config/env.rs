use std::collections::HashMap;
use std::ffi::OsString;

use super::Settings;

/// Snapshot of every configuration value the process can see, taken once at
/// startup. Later layers win: settings files, then process environment, then
/// explicit overrides (CLI flags).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Environment {
    values: HashMap<String, String>,
}

impl Environment {
    pub fn capture<I, K, V>(settings: &Settings, overrides: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self::layered(settings, std::env::vars_os(), overrides)
    }

    /// Process variables that are not valid UTF-8 cannot name or hold a
    /// configuration value and are skipped.
    fn layered<P, I, K, V>(settings: &Settings, process: P, overrides: I) -> Self
    where
        P: IntoIterator<Item = (OsString, OsString)>,
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut values: HashMap<String, String> = settings.values.clone().into_iter().collect();
        values.extend(
            process
                .into_iter()
                .filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?))),
        );
        values.extend(overrides.into_iter().map(|(k, v)| (k.into(), v.into())));
        Self { values }
    }

    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            values: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }
}
