use global_hotkey::GlobalHotKeyEvent;
use tray_icon::menu::MenuEvent;

/// Events forwarded into the main event loop from the hotkey and tray
/// handlers, which may fire on other threads.
#[derive(Debug, Clone)]
pub enum HostEvent {
    /// A global hotkey changed state.
    Hotkey(GlobalHotKeyEvent),
    /// A tray menu item was activated.
    Menu(MenuEvent),
}
