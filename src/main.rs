use access_log_analyzer::AnalyzerError;
use std::process::ExitCode;

fn main() -> ExitCode {
    match access_log_analyzer::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("[error] {err}");
            let code = err
                .downcast_ref::<AnalyzerError>()
                .map_or(1, AnalyzerError::exit_code);
            ExitCode::from(code as u8)
        }
    }
}
