use std::process::ExitCode;

fn main() -> ExitCode {
    match freecell_solver::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
