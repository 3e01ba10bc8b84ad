use std::path::Path;
use std::process::{Command, Stdio};

use tracing::info;
use ungx_core::{Result, UngxError};

pub(crate) fn base_go_command(go_binary: &str) -> Command {
    let mut command = Command::new(go_binary);
    command.stdin(Stdio::null());
    command
}

pub fn run_dependency_installer(gx_binary: &str, project_root: &Path) -> Result<()> {
    let command_line = format!("{gx_binary} install --local");
    info!(command = %command_line, "vendoring in gx dependencies");

    let status = Command::new(gx_binary)
        .arg("install")
        .arg("--local")
        .current_dir(project_root)
        .stdin(Stdio::null())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .status()
        .map_err(|err| UngxError::InstallerFailure {
            command: command_line.clone(),
            detail: format!("failed launching: {err}"),
        })?;
    if !status.success() {
        return Err(UngxError::InstallerFailure {
            command: command_line,
            detail: format!("exited with {status}"),
        });
    }
    Ok(())
}

pub fn resolve_root_identity(go_binary: &str, project_root: &Path) -> Result<String> {
    let command_line = format!("{go_binary} list");
    let output = base_go_command(go_binary)
        .arg("list")
        .current_dir(project_root)
        .output()
        .map_err(|err| UngxError::RootIdentity {
            command: command_line.clone(),
            detail: format!("failed launching: {err}"),
        })?;
    if !output.status.success() {
        return Err(UngxError::RootIdentity {
            command: command_line,
            detail: format!(
                "exited with {}: {}",
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            ),
        });
    }

    let stdout = String::from_utf8(output.stdout).map_err(|_| UngxError::RootIdentity {
        command: command_line.clone(),
        detail: "produced non-UTF-8 output".to_string(),
    })?;
    parse_root_identity(&stdout).map_err(|detail| UngxError::RootIdentity {
        command: command_line,
        detail,
    })
}

pub(crate) fn parse_root_identity(stdout: &str) -> std::result::Result<String, String> {
    let identity = stdout.trim();
    if identity.is_empty() {
        return Err("produced no import path".to_string());
    }
    if identity.lines().count() > 1 {
        return Err(format!(
            "produced more than one import path: {}",
            identity.lines().collect::<Vec<_>>().join(", ")
        ));
    }
    Ok(identity.to_string())
}

pub(crate) fn run_go_get(go_binary: &str, gopath: &Path, import_path: &str) -> bool {
    let status = base_go_command(go_binary)
        .arg("get")
        .arg("-d")
        .arg(format!("{import_path}/..."))
        .env("GOPATH", gopath)
        // GOPATH mode; toolchains that dropped it fail here and the caller embeds
        .env("GO111MODULE", "off")
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .status();
    matches!(status, Ok(status) if status.success())
}
