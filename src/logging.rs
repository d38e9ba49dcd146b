//! Logger setup for browser builds.
//!
//! The engine logs through the `log` facade. Native hosts install whatever
//! logger they like; in the browser [`init_logging`] routes records to the
//! devtools console.

use once_cell::sync::OnceCell;

static LOGGER: OnceCell<()> = OnceCell::new();

/// Installs the console logger and panic hook. Later calls are no-ops.
pub fn init_logging(level: log::Level) {
    LOGGER.get_or_init(|| install(level));
}

#[cfg(target_arch = "wasm32")]
fn install(level: log::Level) {
    console_error_panic_hook::set_once();
    // Fails only if the page already installed a logger.
    _ = console_log::init_with_level(level);
}

#[cfg(not(target_arch = "wasm32"))]
fn install(level: log::Level) {
    log::debug!("native build, leaving logger to the host (requested {level})");
}
