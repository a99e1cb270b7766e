// SPDX-License-Identifier: Apache-2.0

mod config;
mod diff;
mod error;
mod result;
mod state;

use env_logger::Builder;
use log::LevelFilter;

use crate::config::Config;
use crate::result::print_result_and_exit;

const APP_NAME: &str = "netplan-diff";

const SUB_CMD_DIFF: &str = "diff";
const SUB_CMD_SHOW: &str = "show";
const SUB_CMD_VERSION: &str = "version";

fn state_input_args() -> [clap::Arg<'static>; 3] {
    [
        clap::Arg::new("SYSTEM_STATE")
            .short('s')
            .long("system-state")
            .takes_value(true)
            .help(
                "File holding the system state in `netplan status` JSON \
                or YAML format, use - for stdin",
            ),
        clap::Arg::new("NETPLAN_STATE")
            .short('n')
            .long("netplan-state")
            .takes_value(true)
            .help("Netplan YAML configuration file, use - for stdin"),
        clap::Arg::new("JSON")
            .long("json")
            .takes_value(false)
            .help("Show output in json format"),
    ]
}

fn main() {
    let matches = clap::Command::new(APP_NAME)
        .version(clap::crate_version!())
        .about(
            "Compare the netplan configuration against the running system \
            network state",
        )
        .subcommand_required(true)
        .arg(
            clap::Arg::new("verbose")
                .short('v')
                .multiple_occurrences(true)
                .help("Set verbose level")
                .global(true),
        )
        .arg(
            clap::Arg::new("quiet")
                .short('q')
                .help("Disable logging")
                .global(true),
        )
        .arg(
            clap::Arg::new("CONFIG")
                .long("config")
                .short('c')
                .takes_value(true)
                .default_value(Config::DEFAULT_CONFIG_PATH)
                .help("Configuration file")
                .global(true),
        )
        .subcommand(
            clap::Command::new(SUB_CMD_DIFF)
                .about(
                    "Show differences between netplan configuration and \
                    system state",
                )
                .arg(
                    clap::Arg::new("IFNAME")
                        .index(1)
                        .help("Compare specific interface only"),
                )
                .args(state_input_args()),
        )
        .subcommand(
            clap::Command::new(SUB_CMD_SHOW)
                .about(
                    "Show netplan configuration and system state side by \
                    side without comparing",
                )
                .args(state_input_args()),
        )
        .subcommand(
            clap::Command::new(SUB_CMD_VERSION).about("Show version"),
        )
        .get_matches();

    let (log_module_filters, log_level) =
        match matches.occurrences_of("verbose") {
            0 => (vec!["netplan_state", "netplan_diff"], LevelFilter::Info),
            1 => (vec!["netplan_state", "netplan_diff"], LevelFilter::Debug),
            _ => (vec![""], LevelFilter::Debug),
        };

    if !matches.is_present("quiet") {
        let mut log_builder = Builder::new();
        for log_module_filter in log_module_filters {
            if !log_module_filter.is_empty() {
                log_builder.filter(Some(log_module_filter), log_level);
            } else {
                log_builder.filter(None, log_level);
            }
        }
        log_builder.init();
    }

    let config = match Config::load(
        matches
            .value_of("CONFIG")
            .unwrap_or(Config::DEFAULT_CONFIG_PATH),
    ) {
        Ok(c) => c,
        Err(e) => {
            print_result_and_exit(Err(e));
            return;
        }
    };

    if let Some(matches) = matches.subcommand_matches(SUB_CMD_DIFF) {
        print_result_and_exit(diff::diff(matches, &config));
    } else if let Some(matches) = matches.subcommand_matches(SUB_CMD_SHOW) {
        print_result_and_exit(diff::show(matches, &config));
    } else if matches.subcommand_matches(SUB_CMD_VERSION).is_some() {
        print_result_and_exit(Ok(format!(
            "{} {}",
            APP_NAME,
            clap::crate_version!()
        )));
    }
}
