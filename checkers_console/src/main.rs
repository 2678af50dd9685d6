// Legend for various fix-this comments:
//   * "TODO" - bug or missing crucial feature.
//   * "Improvement potential" - missing nice-to-have feature or an opportunity
//       to make code better or faster.

#![forbid(unsafe_code)]
#![cfg_attr(feature = "strict", deny(warnings))]

pub mod network;
pub mod tui;

mod client_config;
mod client_main;

use clap::{Command, arg};


fn main() -> anyhow::Result<()> {
    // Note. Logging goes to stderr: stdout belongs to the board UI.
    env_logger::Builder::new()
        .target(env_logger::Target::Stderr)
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let matches = Command::new("Checkers")
        .version(clap::crate_version!())
        .about("Networked checkers console client")
        .subcommand_required(true)
        .subcommand(
            Command::new("client")
                .about("Join a game hosted by a server")
                .arg(arg!(<server_address> "Server host name or IP address"))
                .arg(arg!(
                    -'c' --"config" <config_file>
                    "Path to the configuration file: yaml-serialized ClientConfig."
                )),
        )
        .get_matches();

    match matches.subcommand() {
        Some(("client", sub_matches)) => {
            let config = match sub_matches.get_one::<String>("config") {
                Some(filename) => client_config::read_config_file(filename)?,
                None => client_config::ClientConfig::default(),
            };
            let server_address = sub_matches
                .get_one::<String>("server_address")
                .expect("<server_address> is required")
                .clone();
            client_main::run(server_address, config)?;
            Ok(())
        }
        _ => unreachable!("Exhausted list of subcommands and subcommand_required prevents `None`"),
    }
}
