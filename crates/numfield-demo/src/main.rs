#![forbid(unsafe_code)]

//! Demo binary entry point.
//!
//! Set `NUMFIELD_LOG` (an `EnvFilter` directive, e.g. `debug`) to write
//! structured logs to `numfield.log`; stdout belongs to the terminal UI.

use std::sync::Mutex;

use numfield_demo::app::App;
use numfield_runtime::Program;

fn init_logging() {
    let Ok(filter) = std::env::var("NUMFIELD_LOG") else {
        return;
    };
    let Ok(file) = std::fs::File::create("numfield.log") else {
        return;
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
}

fn main() {
    init_logging();
    if let Err(e) = Program::new(App::new()).run() {
        eprintln!("Runtime error: {e}");
        std::process::exit(1);
    }
}
