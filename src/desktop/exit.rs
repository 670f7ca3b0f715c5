use device_query::{DeviceQuery, DeviceState, Keycode};
use std::thread;
use std::time::Duration;

/// Watch for `[` on a plain thread and end the process when it is pressed.
///
/// Runs outside the async runtime so a stuck wait cannot block it.
pub fn spawn_exit_listener() {
    thread::spawn(|| {
        let device_state = DeviceState::new();
        loop {
            if device_state.get_keys().contains(&Keycode::LeftBracket) {
                log::info!("🛑 Exit key pressed, stopping");
                std::process::exit(0);
            }
            thread::sleep(Duration::from_millis(50));
        }
    });
    log::info!("⌨️ Press [ to exit at any time");
}
