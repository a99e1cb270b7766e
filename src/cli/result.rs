// SPDX-License-Identifier: Apache-2.0

use serde::Serialize;

use crate::error::CliError;

pub(crate) fn print_result_and_exit(result: Result<String, CliError>) {
    match result {
        Ok(s) => {
            println!("{s}");
            std::process::exit(0);
        }
        Err(e) => {
            eprintln!("{}", e.error_msg);
            std::process::exit(e.code);
        }
    }
}

pub(crate) fn to_string<T>(value: &T, json: bool) -> Result<String, CliError>
where
    T: Serialize,
{
    Ok(if json {
        serde_json::to_string_pretty(value)?
    } else {
        serde_yaml::to_string(value)?
    })
}
