use crate::cli::InfoArgs;
use crate::exit_codes;
use crate::output;
use sampa_rs::config::{default_config_path, CONFIG_ENV_VAR};
use sampa_rs::FilterParameters;
use serde::Serialize;

#[derive(Serialize)]
struct InfoOutput {
    cli_version: String,
    platform: String,
    arch: String,
    default_parameters: FilterParameters,
    config_path: Option<String>,
    config_found: bool,
    config_env_var: &'static str,
}

pub fn execute(args: InfoArgs) -> i32 {
    let config_path = default_config_path();

    let info = InfoOutput {
        cli_version: env!("CARGO_PKG_VERSION").to_string(),
        platform: std::env::consts::OS.to_string(),
        arch: std::env::consts::ARCH.to_string(),
        default_parameters: FilterParameters::default(),
        config_found: config_path.as_ref().is_some_and(|p| p.is_file()),
        config_path: config_path.map(|p| p.display().to_string()),
        config_env_var: CONFIG_ENV_VAR,
    };

    if args.json {
        if let Err(e) = output::emit(&info, false, None) {
            eprintln!("Error: {}", e);
            return exit_codes::EXECUTION_ERROR;
        }
    } else {
        let p = &info.default_parameters;
        println!("sampa CLI v{}", info.cli_version);
        println!("Platform: {} ({})", info.platform, info.arch);
        println!();
        println!(
            "Default BC3 parameters: slope_down={}, slope_up={}, round={}",
            p.slope_down, p.slope_up, p.round
        );
        match info.config_path {
            Some(ref path) if info.config_found => println!("Config file: {}", path),
            Some(ref path) => println!("Config file: {} (not present)", path),
            None => println!("Config file: no config directory on this platform"),
        }
        println!("Override with ${} or --config", info.config_env_var);
    }

    exit_codes::SUCCESS
}
