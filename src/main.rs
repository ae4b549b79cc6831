use std::process::ExitCode;

use hvac_flow::HvacConfig;

fn main() -> ExitCode {
    env_logger::init();

    let config = match std::env::args().nth(1) {
        Some(path) => match HvacConfig::load(&path) {
            Ok(config) => config,
            Err(e) => {
                log::error!("Could not load {}: {}", path, e);
                return ExitCode::FAILURE;
            }
        },
        None => HvacConfig::default(),
    };

    match hvac_flow::window::run(config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
