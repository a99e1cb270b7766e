// SPDX-License-Identifier: Apache-2.0

use std::io::Read;

use netplan_state::{NetplanState, SystemState};

use crate::error::CliError;

pub(crate) const STDIN_FILE_PATH: &str = "-";

fn read_file(file_path: &str) -> Result<String, CliError> {
    let mut content = String::new();
    if file_path == STDIN_FILE_PATH {
        std::io::stdin().read_to_string(&mut content)?;
    } else {
        std::fs::File::open(file_path)
            .map_err(|e| {
                CliError::from(format!("Failed to open {file_path}: {e}"))
            })?
            .read_to_string(&mut content)?;
    };
    // Replace non-breaking space '\u{A0}'  to normal space
    Ok(content.replace('\u{A0}', " "))
}

// JSON is valid YAML, the YAML parser handles both output formats of
// `netplan status`.
pub(crate) fn system_state_from_file(
    file_path: &str,
) -> Result<SystemState, CliError> {
    let state = SystemState::new_from_yaml(&read_file(file_path)?)?;
    log::debug!(
        "Loaded {} system interfaces from {file_path}",
        state.interfaces.len()
    );
    Ok(state)
}

pub(crate) fn netplan_state_from_file(
    file_path: &str,
) -> Result<NetplanState, CliError> {
    let state = NetplanState::new_from_yaml(&read_file(file_path)?)?;
    log::debug!(
        "Loaded {} netplan definitions from {file_path}",
        state.netdefs.len()
    );
    Ok(state)
}
