//! Snapshot of the invoking process environment.

use std::collections::BTreeMap;

/// The environment the tool was started with.
///
/// Captured once at startup so the builder never reads process-global state
/// mid-run, and so tests can supply a synthetic environment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AmbientEnv {
  vars: BTreeMap<String, String>,
}

impl AmbientEnv {
  /// Capture the current process environment. Variables that aren't valid
  /// UTF-8 are skipped.
  pub fn capture() -> Self {
    Self {
      vars: std::env::vars_os()
        .filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?)))
        .collect(),
    }
  }

  pub fn get(&self, key: &str) -> Option<&str> {
    let exact = self.vars.get(key).map(String::as_str);

    // Windows variable names are case-insensitive (`LOCALAPPDATA` vs `LocalAppData`).
    #[cfg(windows)]
    {
      exact.or_else(|| {
        self
          .vars
          .iter()
          .find(|(k, _)| k.eq_ignore_ascii_case(key))
          .map(|(_, v)| v.as_str())
      })
    }

    #[cfg(not(windows))]
    {
      exact
    }
  }

  /// The value of `key`, treating an empty value the same as an unset one.
  pub fn non_empty(&self, key: &str) -> Option<&str> {
    self.get(key).filter(|v| !v.is_empty())
  }
}

impl<K, V> FromIterator<(K, V)> for AmbientEnv
where
  K: Into<String>,
  V: Into<String>,
{
  fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
    Self {
      vars: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
    }
  }
}
