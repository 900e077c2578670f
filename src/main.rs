//! Ticket Query - filter tracker tickets by how they moved

use std::process::ExitCode;

fn main() -> ExitCode {
    if let Err(e) = ticket_query::cli::run() {
        eprintln!("Error: {:#}", e);
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
