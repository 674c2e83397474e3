use log::error;
use std::process::ExitCode;
use word_coverage::config::Config;
use word_coverage::logging::init_logging;
use word_coverage::pipeline::run;

fn main() -> ExitCode {
	let _logger = match init_logging("info") {
		Ok(handle) => handle,
		Err(err) => {
			eprintln!("{err}");
			return ExitCode::FAILURE;
		}
	};
	let stdout = std::io::stdout();
	match run(&Config::default(), &mut stdout.lock()) {
		Ok(_) => ExitCode::SUCCESS,
		Err(err) => {
			error!("event=run_failed error={}", err);
			ExitCode::FAILURE
		}
	}
}
