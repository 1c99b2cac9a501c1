use std::process::ExitCode;

use renju_agent::cli::parse_port;
use renju_agent::logger::init_logger;
use renju_agent::prelude::*;

fn main() -> ExitCode {
    let port = match parse_port(std::env::args().skip(1)) {
        Ok(port) => port,
        Err(e) => {
            eprintln!("{e:#}");
            return ExitCode::FAILURE;
        }
    };

    let config = Configuration::new();
    if let Err(e) = init_logger(&config) {
        eprintln!("Could not start logging: {e:#}");
    }

    let server = match Server::bind(config, port) {
        Ok(server) => server,
        Err(e) => {
            eprintln!("Exception: {e:#}");
            return ExitCode::FAILURE;
        }
    };
    println!("Server started on port {port}");
    server.run()
}
