//! System tray icon driving the recording lifecycle.
//!
//! The tray menu stands in for the host's record button: Start and Stop
//! deliver recording lifecycle events to the plugin.

use crate::{HostError, HostResult, TrayIconState};

use std::panic::Location;

use error_location::ErrorLocation;
use tracing::{info, instrument};
use tray_icon::menu::{Menu, MenuId, MenuItem};
use tray_icon::{Icon, TrayIcon, TrayIconBuilder};

const ICON_SIZE: u32 = 32;
const IDLE_COLOR: [u8; 3] = [0x6b, 0x72, 0x80];
const RECORDING_COLOR: [u8; 3] = [0xdc, 0x26, 0x26];

/// System tray icon manager.
pub struct TrayManager {
    tray_icon: TrayIcon,
    start_item: MenuItem,
    stop_item: MenuItem,
    exit_item_id: MenuId,
}

impl TrayManager {
    /// Create a new tray manager in the idle state.
    #[track_caller]
    #[instrument]
    pub fn new() -> HostResult<Self> {
        let menu = Menu::new();

        let start_item = MenuItem::new("Start Recording", true, None);
        let stop_item = MenuItem::new("Stop Recording", false, None);
        let exit_item = MenuItem::new("Exit", true, None);

        let exit_id = exit_item.id().clone();

        for item in [&start_item, &stop_item, &exit_item] {
            menu.append(item).map_err(|e| HostError::Tray {
                reason: format!("Failed to add menu item: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;
        }

        let tray_icon = TrayIconBuilder::new()
            .with_tooltip(Self::tooltip(TrayIconState::Idle))
            .with_menu(Box::new(menu))
            .with_icon(Self::load_icon(TrayIconState::Idle)?)
            .build()
            .map_err(|e| HostError::Tray {
                reason: format!("Failed to create tray icon: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        info!("System tray icon initialized");

        Ok(Self {
            tray_icon,
            start_item,
            stop_item,
            exit_item_id: exit_id,
        })
    }

    /// Update icon, tooltip and which of Start/Stop is enabled.
    #[track_caller]
    #[instrument(skip(self))]
    pub fn update_state(&mut self, state: TrayIconState) -> HostResult<()> {
        let recording = state == TrayIconState::Recording;
        self.start_item.set_enabled(!recording);
        self.stop_item.set_enabled(recording);

        self.tray_icon
            .set_icon(Some(Self::load_icon(state)?))
            .map_err(|e| HostError::Tray {
                reason: format!("Failed to update icon: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        self.tray_icon
            .set_tooltip(Some(Self::tooltip(state)))
            .map_err(|e| HostError::Tray {
                reason: format!("Failed to update tooltip: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        Ok(())
    }

    fn tooltip(state: TrayIconState) -> &'static str {
        match state {
            TrayIconState::Idle => "OBS Timestamp - Ready",
            TrayIconState::Recording => "OBS Timestamp - Recording...",
        }
    }

    /// Build a solid round icon in the state's colour.
    #[track_caller]
    fn load_icon(state: TrayIconState) -> HostResult<Icon> {
        let [r, g, b] = match state {
            TrayIconState::Idle => IDLE_COLOR,
            TrayIconState::Recording => RECORDING_COLOR,
        };

        let radius = ICON_SIZE as f32 / 2.0;
        let mut rgba = Vec::with_capacity((ICON_SIZE * ICON_SIZE * 4) as usize);
        for y in 0..ICON_SIZE {
            for x in 0..ICON_SIZE {
                let dx = x as f32 + 0.5 - radius;
                let dy = y as f32 + 0.5 - radius;
                let alpha = if dx * dx + dy * dy <= radius * radius {
                    0xff
                } else {
                    0
                };
                rgba.extend_from_slice(&[r, g, b, alpha]);
            }
        }

        Icon::from_rgba(rgba, ICON_SIZE, ICON_SIZE).map_err(|e| HostError::Tray {
            reason: format!("Failed to create icon from RGBA: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })
    }

    /// Get the Start Recording menu item ID.
    pub fn start_item_id(&self) -> &MenuId {
        self.start_item.id()
    }

    /// Get the Stop Recording menu item ID.
    pub fn stop_item_id(&self) -> &MenuId {
        self.stop_item.id()
    }

    /// Get the exit menu item ID.
    pub fn exit_item_id(&self) -> &MenuId {
        &self.exit_item_id
    }
}
