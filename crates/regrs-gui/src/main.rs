#![cfg_attr(all(target_os = "windows", not(debug_assertions)), windows_subsystem = "windows")]
mod ui;
mod utils;

use crate::ui::main_frame::RegrsApp;
use regrs_core::cmd::cli::Cli;
use regrs_core::cmd::config::Config;
use regrs_core::logging;

use clap::Parser;
use std::env;
use std::process;

/// A release build has no console of its own; borrow the terminal it was
/// started from so CLI output is visible.
#[cfg(windows)]
fn attach_to_parent_console() {
    use std::fs::OpenOptions;
    use std::os::windows::io::IntoRawHandle;
    use windows::Win32::Foundation::HANDLE;
    use windows::Win32::System::Console::{
        AttachConsole, SetStdHandle, ATTACH_PARENT_PROCESS, STD_ERROR_HANDLE, STD_HANDLE,
        STD_INPUT_HANDLE, STD_OUTPUT_HANDLE,
    };

    fn redirect(std_handle: STD_HANDLE, file: std::io::Result<std::fs::File>) {
        if let Ok(file) = file {
            // the handle stays open for the rest of the process
            let raw = file.into_raw_handle();
            unsafe {
                let _ = SetStdHandle(std_handle, HANDLE(raw as *mut _));
            }
        }
    }

    // Fails when launched from Explorer or when a console already exists.
    if unsafe { AttachConsole(ATTACH_PARENT_PROCESS) }.is_err() {
        return;
    }
    redirect(STD_OUTPUT_HANDLE, OpenOptions::new().write(true).open("CONOUT$"));
    redirect(STD_ERROR_HANDLE, OpenOptions::new().write(true).open("CONOUT$"));
    redirect(STD_INPUT_HANDLE, OpenOptions::new().read(true).open("CONIN$"));
}

#[cfg(not(windows))]
fn attach_to_parent_console() {}

fn main() -> eframe::Result {
    let args: Vec<String> = env::args().collect();
    let cli_mode = args.len() > 1;
    if cli_mode {
        attach_to_parent_console();
    }

    if let Err(e) = logging::init() {
        eprintln!("{e}");
    }

    if cli_mode {
        let cli = Cli::parse();

        let cfg: Config = cli.into_config();
        if let Err(e) = cfg.run() {
            tracing::error!("{e}");
            eprintln!("{e}");
            process::exit(1);
        }

        process::exit(0);
    }

    let app = RegrsApp::new();
    eframe::run_native("regrs", Default::default(), Box::new(|_cc| Ok(Box::new(app))))
}
