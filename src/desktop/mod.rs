// Windows desktop backend: the game window, the monitor it sits on, and OS input.

pub mod exit;
pub mod input;
pub mod screen;
pub mod window;

pub use exit::spawn_exit_listener;
pub use input::EnigoInput;
pub use screen::MonitorScreen;
pub use window::{client_region, set_dpi_aware};
