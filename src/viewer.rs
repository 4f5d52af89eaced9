//! Opening results in the desktop's default image viewer.

use std::path::Path;
use std::process::{Command, Stdio};

/// The launcher command for the current OS, or `None` where unsupported.
pub fn viewer_command(path: &Path) -> Option<Command> {
    viewer_command_for(std::env::consts::OS, path)
}

fn viewer_command_for(os: &str, path: &Path) -> Option<Command> {
    let mut command = match os {
        "macos" => Command::new("open"),
        "windows" => {
            let mut cmd = Command::new("cmd");
            // `start` treats the first quoted argument as a window title.
            cmd.args(["/c", "start", ""]);
            cmd
        }
        "linux" => Command::new("xdg-open"),
        _ => return None,
    };
    command.arg(path);
    Some(command)
}

/// Launch the default viewer for `path` without waiting for it.
///
/// Failures are logged and otherwise ignored.
pub fn open_in_default_viewer(path: &Path) {
    let Some(mut command) = viewer_command(path) else {
        tracing::warn!(
            os = std::env::consts::OS,
            "Unsupported operating system for automatic file opening"
        );
        return;
    };

    let spawned = command
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn();

    match spawned {
        Ok(_) => tracing::info!(path = %path.display(), "Opened in default viewer"),
        Err(e) => tracing::warn!(path = %path.display(), error = %e, "Failed to open file in default viewer"),
    }
}
