//! # Settings Tracker
//!
//! Caches one application's settings and records local changes as an unsaved
//! delta until `commit`.
//!
//! ## Drop
//!
//! Dropping a tracker with outstanding changes commits them. Failures are
//! logged; call `close` to observe them instead.

use crate::domain::SettingsError;
use crate::ports::SettingsClient;
use parking_lot::Mutex;
use shared_types::{NamedValueSet, NamedValueType, Value};
use std::sync::Arc;
use tracing::{debug, error, info};

#[derive(Debug, Default)]
struct TrackerState {
    current: NamedValueSet,
    unsaved: NamedValueSet,
}

/// Settings of one application with deferred persistence.
pub struct SettingsTracker {
    appl_name: String,
    client: Arc<dyn SettingsClient>,
    state: Mutex<TrackerState>,
}

impl SettingsTracker {
    /// Bind to `appl_name` and load its stored settings.
    pub fn new(client: Arc<dyn SettingsClient>, appl_name: &str) -> Result<Self, SettingsError> {
        let current = client.load_app_settings(appl_name)?;
        debug!(appl_name, count = current.len(), "Settings loaded");
        Ok(Self {
            appl_name: appl_name.to_string(),
            client,
            state: Mutex::new(TrackerState {
                current,
                unsaved: NamedValueSet::new(),
            }),
        })
    }

    pub fn appl_name(&self) -> &str {
        &self.appl_name
    }

    /// Value of `name`, seeding it with `default` when absent or of another
    /// type. A seeded value is saved at the next commit.
    pub fn get_set_value<T: NamedValueType + Clone>(&self, name: &str, default: T) -> T {
        let mut state = self.state.lock();
        if let Some(value) = state.current.get_value::<T>(name) {
            return value;
        }
        let value = default.clone().into_value();
        state.current.set(name, value.clone());
        state.unsaved.set(name, value);
        default
    }

    /// Set `name` to `value`, to be saved at the next commit.
    pub fn set_new_value(&self, name: &str, value: impl Into<Value>) {
        let value = value.into();
        let mut state = self.state.lock();
        state.current.set(name, value.clone());
        state.unsaved.set(name, value);
    }

    /// Snapshot of the loaded settings, optionally with uncommitted changes.
    pub fn get_all_values(&self, include_uncommitted: bool) -> NamedValueSet {
        let state = self.state.lock();
        if include_uncommitted {
            state.current.merged(&state.unsaved)
        } else {
            state.current.clone()
        }
    }

    /// True while there are changes not yet saved.
    pub fn has_uncommitted_changes(&self) -> bool {
        !self.state.lock().unsaved.is_empty()
    }

    /// Save outstanding changes, then reload from the store when `reload` is
    /// set.
    ///
    /// The delta is kept when saving fails so a later commit can retry.
    pub fn commit(&self, reload: bool) -> Result<(), SettingsError> {
        let mut state = self.state.lock();
        if !state.unsaved.is_empty() {
            self.client.save_app_settings(&state.unsaved, &self.appl_name)?;
            info!(
                appl_name = %self.appl_name,
                count = state.unsaved.len(),
                "Settings committed"
            );
            state.unsaved.clear();
        }
        if reload {
            state.current = self.client.load_app_settings(&self.appl_name)?;
            debug!(appl_name = %self.appl_name, count = state.current.len(), "Settings reloaded");
        }
        Ok(())
    }

    /// Commit outstanding changes and release the tracker.
    pub fn close(self) -> Result<(), SettingsError> {
        self.commit(false)
    }
}

impl Drop for SettingsTracker {
    fn drop(&mut self) {
        if !self.has_uncommitted_changes() {
            return;
        }
        if let Err(e) = self.commit(false) {
            error!(appl_name = %self.appl_name, error = %e, "Implicit settings commit failed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cc_04_item_store::StoreError;

    #[derive(Default)]
    struct MemoryClient {
        stored: Mutex<NamedValueSet>,
        saves: Mutex<usize>,
        fail: bool,
    }

    impl SettingsClient for MemoryClient {
        fn load_app_settings(&self, _appl_name: &str) -> Result<NamedValueSet, SettingsError> {
            Ok(self.stored.lock().clone())
        }

        fn save_app_settings(
            &self,
            settings: &NamedValueSet,
            _appl_name: &str,
        ) -> Result<(), SettingsError> {
            if self.fail {
                return Err(StoreError::Unavailable("offline".to_string()).into());
            }
            self.stored.lock().merge(settings);
            *self.saves.lock() += 1;
            Ok(())
        }
    }

    fn tracker(client: &Arc<MemoryClient>) -> SettingsTracker {
        SettingsTracker::new(Arc::clone(client) as Arc<dyn SettingsClient>, "Test").unwrap()
    }

    #[test]
    fn test_get_set_value_seeds_default() {
        let client = Arc::new(MemoryClient::default());
        let tracker = tracker(&client);
        assert_eq!(tracker.get_set_value("x", 5), 5);
        assert_eq!(tracker.get_set_value("x", 7), 5);
        assert!(tracker.has_uncommitted_changes());

        tracker.commit(false).unwrap();
        assert_eq!(tracker.get_set_value("x", 7), 5);
        assert_eq!(client.stored.lock().get_value::<i32>("x"), Some(5));
    }

    #[test]
    fn test_type_drift_resets_to_default() {
        let client = Arc::new(MemoryClient::default());
        client.stored.lock().set("x", "five");
        let tracker = tracker(&client);
        assert_eq!(tracker.get_set_value("x", 5), 5);
        assert_eq!(tracker.get_all_values(false).get_value::<i32>("x"), Some(5));
    }

    #[test]
    fn test_get_all_values_snapshot() {
        let client = Arc::new(MemoryClient::default());
        client.stored.lock().set("a", true);
        let tracker = tracker(&client);
        tracker.set_new_value("b", "two");

        let all = tracker.get_all_values(true);
        assert_eq!(all.len(), 2);
        assert_eq!(all.get_value::<String>("b").as_deref(), Some("two"));
        assert_eq!(tracker.get_all_values(false).len(), 2);
    }

    #[test]
    fn test_commit_without_changes_skips_save() {
        let client = Arc::new(MemoryClient::default());
        let tracker = tracker(&client);
        tracker.commit(true).unwrap();
        assert_eq!(*client.saves.lock(), 0);
    }

    #[test]
    fn test_commit_reload_picks_up_external_changes() {
        let client = Arc::new(MemoryClient::default());
        let tracker = tracker(&client);
        client.stored.lock().set("external", 1i64);
        assert!(!tracker.get_all_values(false).contains("external"));

        tracker.commit(true).unwrap();
        assert_eq!(tracker.get_all_values(false).get_value::<i64>("external"), Some(1));
    }

    #[test]
    fn test_failed_commit_keeps_delta() {
        let client = Arc::new(MemoryClient {
            fail: true,
            ..Default::default()
        });
        let tracker = tracker(&client);
        tracker.set_new_value("x", 1);
        assert!(matches!(
            tracker.commit(false),
            Err(SettingsError::Store(StoreError::Unavailable(_)))
        ));
        assert!(tracker.has_uncommitted_changes());
    }

    #[test]
    fn test_drop_commits_outstanding_changes() {
        let client = Arc::new(MemoryClient::default());
        {
            let tracker = tracker(&client);
            tracker.set_new_value("y", 2.5);
        }
        assert_eq!(client.stored.lock().get_value::<f64>("y"), Some(2.5));
        assert_eq!(*client.saves.lock(), 1);
    }

    #[test]
    fn test_close_reports_errors() {
        let client = Arc::new(MemoryClient {
            fail: true,
            ..Default::default()
        });
        let tracker = tracker(&client);
        tracker.set_new_value("x", 1);
        assert!(tracker.close().is_err());
    }

    #[test]
    fn test_close_then_drop_saves_once() {
        let client = Arc::new(MemoryClient::default());
        let tracker = tracker(&client);
        tracker.set_new_value("x", 1);
        tracker.close().unwrap();
        assert_eq!(*client.saves.lock(), 1);
    }
}
