use std::process::ExitCode;

fn main() -> ExitCode {
    match dex::cli::run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
