//! Binary entry point. The app starts disconnected; opening or creating a
//! database happens from inside the TUI, so there is nothing to bootstrap
//! here beyond the event loop.

use sqlite_compass::{run_app, App};

/// Launch the Ratatui event loop. Returning a `Result` bubbles up fatal
/// terminal-setup problems to the shell instead of crashing silently.
fn main() -> anyhow::Result<()> {
    let mut app = App::new();
    run_app(&mut app)
}
