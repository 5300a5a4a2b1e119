use anyhow::Result;
use localshortcut::app::App;
use localshortcut::cli;

fn main() -> Result<()> {
    // Process CLI arguments first (before logging init for cleaner output)
    let runtime_options = match cli::process_cli() {
        cli::CliResult::Exit(code) => {
            if code == 0 {
                return Ok(());
            }
            std::process::exit(code);
        }
        cli::CliResult::Continue(options) => options,
    };

    // Initialize unified logging; routes all log::info!() etc. to the debug log file.
    // CLI --log-level flag takes highest precedence, then RUST_LOG, then config (applied later).
    localshortcut::debug::init_log_bridge(runtime_options.log_level);

    log::info!("Starting localshortcut");

    let app = App::new(runtime_options)?;
    let result = app.run();

    log::info!("Event loop exited");

    if let Err(ref e) = result {
        eprintln!("localshortcut: error: {e:#}");
        #[cfg(target_os = "linux")]
        {
            let msg = format!("{e:?}").to_lowercase();
            if msg.contains("display") || msg.contains("wayland") || msg.contains("x server") {
                eprintln!(
                    "localshortcut: hint: no display server found; ensure DISPLAY (X11) or \
                     WAYLAND_DISPLAY (Wayland) is set"
                );
            }
        }
    }
    result
}
