use log::{error, info};

mod config;
mod dom;
mod error;
mod frame;
mod init;
mod policy;
mod schedule;
mod throttle;
mod watch;
mod effects {
    pub mod counter;
    pub mod fade_in;
    pub mod float_button;
    pub mod header;
    pub mod indicator;
    pub mod parallax;
}
mod interactions {
    pub mod accordion;
    pub mod anchor;
    pub mod tracking;
}

use error::FxError;
use init::Page;

fn boot() -> Result<(), FxError> {
    let window = web_sys::window().ok_or(FxError::NoWindow)?;
    let document = window.document().ok_or(FxError::NoDocument)?;
    let ready_document = document.clone();
    schedule::on_ready(&document, move || {
        let page = Page::detect(window, ready_document);
        info!(
            "Page ready (reduced motion: {}, small screen: {})",
            page.policy.reduced_motion, page.policy.small_screen
        );
        init::start(page);
    })
}

fn main() {
    // Initialize console error panic hook for better error messages
    console_error_panic_hook::set_once();

    // A second init only happens if the host page already installed a logger
    let _ = console_log::init_with_level(config::log_level());

    info!("Starting landing effects");
    if let Err(err) = boot() {
        error!("Landing effects disabled: {err}");
    }
}
