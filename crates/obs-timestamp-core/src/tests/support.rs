use crate::{Clock, CoreResult, HostConfig, HostFacilities, HotkeyId, MarkerError};

use std::{
    collections::HashMap,
    panic::Location,
    path::{Path, PathBuf},
    sync::{
        Arc, Mutex,
        atomic::{AtomicU64, Ordering},
    },
};

use error_location::ErrorLocation;
use serde_json::Value;

/// Clock that only moves when told to.
#[derive(Debug, Clone, Default)]
pub(crate) struct ManualClock {
    now: Arc<AtomicU64>,
}

impl ManualClock {
    pub(crate) fn at(ms: u64) -> Self {
        let clock = Self::default();
        clock.set(ms);
        clock
    }

    pub(crate) fn set(&self, ms: u64) {
        self.now.store(ms, Ordering::SeqCst);
    }

    pub(crate) fn advance(&self, ms: u64) {
        self.now.fetch_add(ms, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> u64 {
        self.now.load(Ordering::SeqCst)
    }
}

/// In-memory host configuration.
#[derive(Debug, Clone, Default)]
pub(crate) struct FakeConfig {
    config_dir: Option<PathBuf>,
    strings: HashMap<(String, String), String>,
    uints: HashMap<(String, String), u64>,
}

impl FakeConfig {
    pub(crate) fn with_dir(dir: &Path) -> Self {
        Self {
            config_dir: Some(dir.to_path_buf()),
            ..Self::default()
        }
    }

    pub(crate) fn string(mut self, section: &str, key: &str, value: &str) -> Self {
        self.strings
            .insert((section.to_string(), key.to_string()), value.to_string());
        self
    }

    pub(crate) fn uint(mut self, section: &str, key: &str, value: u64) -> Self {
        self.uints
            .insert((section.to_string(), key.to_string()), value);
        self
    }
}

impl HostConfig for FakeConfig {
    fn module_config_dir(&self) -> Option<PathBuf> {
        self.config_dir.clone()
    }

    fn profile_string(&self, section: &str, key: &str) -> Option<String> {
        self.strings
            .get(&(section.to_string(), key.to_string()))
            .cloned()
    }

    fn profile_uint(&self, section: &str, key: &str) -> Option<u64> {
        self.uints
            .get(&(section.to_string(), key.to_string()))
            .copied()
    }
}

/// Everything the plugin asked of its host.
#[derive(Debug, Default)]
pub(crate) struct FacilityLog {
    pub(crate) registered: Vec<(String, String)>,
    pub(crate) unregistered: Vec<HotkeyId>,
    pub(crate) subscriptions: u32,
    pub(crate) unsubscriptions: u32,
    pub(crate) loaded: Vec<HotkeyId>,
    pub(crate) saved: Vec<HotkeyId>,
}

/// Host facilities recording calls into a shared log that outlives the
/// plugin.
#[derive(Debug, Clone, Default)]
pub(crate) struct FakeFacilities {
    pub(crate) log: Arc<Mutex<FacilityLog>>,
    refuse_hotkey: bool,
}

impl FakeFacilities {
    pub(crate) fn refusing_hotkeys() -> Self {
        Self {
            refuse_hotkey: true,
            ..Self::default()
        }
    }
}

pub(crate) const FAKE_HOTKEY: HotkeyId = HotkeyId(7);

impl HostFacilities for FakeFacilities {
    #[track_caller]
    fn register_hotkey(&mut self, name: &str, description: &str) -> CoreResult<HotkeyId> {
        if self.refuse_hotkey {
            return Err(MarkerError::HotkeyRegistrationFailed {
                reason: "refused by test host".to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        }
        if let Ok(mut log) = self.log.lock() {
            log.registered
                .push((name.to_string(), description.to_string()));
        }
        Ok(FAKE_HOTKEY)
    }

    fn unregister_hotkey(&mut self, id: HotkeyId) {
        if let Ok(mut log) = self.log.lock() {
            log.unregistered.push(id);
        }
    }

    fn subscribe_frontend_events(&mut self) {
        if let Ok(mut log) = self.log.lock() {
            log.subscriptions += 1;
        }
    }

    fn unsubscribe_frontend_events(&mut self) {
        if let Ok(mut log) = self.log.lock() {
            log.unsubscriptions += 1;
        }
    }

    fn load_hotkey_bindings(&mut self, id: HotkeyId) -> CoreResult<()> {
        if let Ok(mut log) = self.log.lock() {
            log.loaded.push(id);
        }
        Ok(())
    }

    fn save_hotkey_bindings(&mut self, id: HotkeyId) -> CoreResult<()> {
        if let Ok(mut log) = self.log.lock() {
            log.saved.push(id);
        }
        Ok(())
    }
}

/// Parse every line of the marker file as JSON.
#[allow(clippy::unwrap_used)]
pub(crate) fn read_lines(path: &Path) -> Vec<Value> {
    std::fs::read_to_string(path)
        .unwrap()
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect()
}
