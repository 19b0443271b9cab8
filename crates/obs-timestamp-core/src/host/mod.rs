mod facilities;
mod frontend_event;
mod host_config;

pub use {
    facilities::{HostFacilities, HotkeyId},
    frontend_event::FrontendEvent,
    host_config::HostConfig,
};
