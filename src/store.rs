use indexmap::IndexMap;

use crate::error::ReportError;
use crate::model::{Counter, DetailRecord, UserStat};

/// Per-user counters and detail logs for one run.
///
/// Users keep the order they were seeded (or tracked) in. Entries are never
/// removed and detail logs are append-only.
#[derive(Debug, Clone, Default)]
pub struct AggregationStore {
  users: IndexMap<String, UserStat>,
}

impl AggregationStore {
  pub fn initialize<S: AsRef<str>>(users: &[S]) -> Self {
    let mut store = Self::default();
    for user in users {
      store.track(user.as_ref());
    }
    store
  }

  pub fn contains(&self, user: &str) -> bool {
    self.users.contains_key(user)
  }

  /// Seed `user` if absent; existing state is left untouched.
  pub fn track(&mut self, user: &str) {
    self.users.entry(user.to_string()).or_default();
  }

  #[cfg(test)]
  pub fn get(&self, user: &str) -> Option<&UserStat> {
    self.users.get(user)
  }

  pub fn iter(&self) -> impl Iterator<Item = (&String, &UserStat)> {
    self.users.iter()
  }

  pub fn len(&self) -> usize {
    self.users.len()
  }

  fn stat_mut(&mut self, user: &str) -> Result<&mut UserStat, ReportError> {
    self
      .users
      .get_mut(user)
      .ok_or_else(|| ReportError::UnknownUser(user.to_string()))
  }

  pub fn record_detail(&mut self, user: &str, detail: DetailRecord) -> Result<(), ReportError> {
    self.stat_mut(user)?.detail.push(detail);
    Ok(())
  }

  pub fn apply_counter_delta(&mut self, user: &str, counter: Counter, delta: u32) -> Result<(), ReportError> {
    *self.stat_mut(user)?.counter_mut(counter) += delta;
    Ok(())
  }

  pub fn add_closed_points(&mut self, user: &str, points: f64) -> Result<(), ReportError> {
    self.stat_mut(user)?.closed_points += points;
    Ok(())
  }

  /// Append `detail` and bump `counter` together; neither happens for an unknown user.
  pub fn record(&mut self, user: &str, detail: DetailRecord, counter: Counter) -> Result<(), ReportError> {
    if !self.contains(user) {
      return Err(ReportError::UnknownUser(user.to_string()));
    }
    self.record_detail(user, detail)?;
    self.apply_counter_delta(user, counter, 1)
  }
}
