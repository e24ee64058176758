// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Dotted-path lookups into tracker JSON (e.g. "fields.creator.name") with typed, non-panicking reads
// role: extension/serde_json
// outputs: JsonFetch trait; JsonFetched handle read via to / to_or_default
// invariants: No panics; missing, null or mistyped values read as None (or T::default)
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use serde::de::DeserializeOwned;

/// A value located by [`JsonFetch::fetch`], possibly absent.
pub struct JsonFetched<'a>(Option<&'a serde_json::Value>);

impl JsonFetched<'_> {
  /// Deserialize the located value. Absent, null and mistyped values give `None`.
  pub fn to<T: DeserializeOwned>(&self) -> Option<T> {
    let value = self.0.filter(|v| !v.is_null())?;
    serde::Deserialize::deserialize(value).ok()
  }

  pub fn to_or_default<T: DeserializeOwned + Default>(&self) -> T {
    self.to().unwrap_or_default()
  }
}

/// Walk object keys separated by `.`; every segment must name an object member.
pub trait JsonFetch {
  fn fetch(&self, path: &str) -> JsonFetched<'_>;
}

impl JsonFetch for serde_json::Value {
  fn fetch(&self, path: &str) -> JsonFetched<'_> {
    JsonFetched(path.split('.').try_fold(self, |cur, key| cur.get(key)))
  }
}
