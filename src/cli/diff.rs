// SPDX-License-Identifier: Apache-2.0

use netplan_state::{NetplanDiffState, NetplanState, SystemState};

use crate::config::Config;
use crate::error::{CliError, EX_USAGE};
use crate::result::to_string;
use crate::state::{netplan_state_from_file, system_state_from_file};

fn load_states(
    matches: &clap::ArgMatches,
    config: &Config,
) -> Result<(SystemState, NetplanState), CliError> {
    let system_file = matches
        .value_of("SYSTEM_STATE")
        .or(config.input.system_state.as_deref())
        .ok_or_else(|| CliError {
            code: EX_USAGE,
            error_msg: "No system state file defined, please use \
                --system-state or define input.system_state in \
                configuration"
                .to_string(),
        })?;
    let netplan_file = matches
        .value_of("NETPLAN_STATE")
        .or(config.input.netplan_state.as_deref())
        .ok_or_else(|| CliError {
            code: EX_USAGE,
            error_msg: "No netplan configuration file defined, please use \
                --netplan-state or define input.netplan_state in \
                configuration"
                .to_string(),
        })?;
    if system_file == crate::state::STDIN_FILE_PATH
        && netplan_file == crate::state::STDIN_FILE_PATH
    {
        return Err(CliError {
            code: EX_USAGE,
            error_msg: "Only one of the input files can be read from stdin"
                .to_string(),
        });
    }

    Ok((
        system_state_from_file(system_file)?,
        netplan_state_from_file(netplan_file)?,
    ))
}

pub(crate) fn diff(
    matches: &clap::ArgMatches,
    config: &Config,
) -> Result<String, CliError> {
    let (system, netplan) = load_states(matches, config)?;
    let report = NetplanDiffState::new(&system, &netplan)
        .get_diff(matches.value_of("IFNAME"));
    if report.is_empty() {
        log::info!("No difference found");
    } else {
        log::info!(
            "Found difference: {} interface(s) missing in system, \
            {} interface(s) missing in netplan",
            report.missing_interfaces_system.len(),
            report.missing_interfaces_netplan.len()
        );
    }
    to_string(&report, matches.is_present("JSON") || config.output.json)
}

pub(crate) fn show(
    matches: &clap::ArgMatches,
    config: &Config,
) -> Result<String, CliError> {
    let (system, netplan) = load_states(matches, config)?;
    to_string(
        &NetplanDiffState::new(&system, &netplan).get_full_state(),
        matches.is_present("JSON") || config.output.json,
    )
}
