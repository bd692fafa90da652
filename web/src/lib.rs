use clap::Parser;
use wasm_bindgen::prelude::*;

mod game;
mod menu;
mod render;
mod utils;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    #[command(flatten)]
    game: game::GameProps,
}

/// Parses the `#`/`&` separated flags of the location hash, e.g. `#-vv&--max-level=7`.
fn parse_hash_args(location_hash: &str) -> Result<Args, clap::Error> {
    Args::try_parse_from(location_hash.split(['#', '&']))
}

#[wasm_bindgen(start)]
pub fn run_app() {
    use gloo::utils::{document, window};

    #[cfg(feature = "console_error_panic_hook")]
    {
        console_error_panic_hook::set_once();
    }

    let location_hash = window()
        .location()
        .hash()
        .unwrap_or_else(|_| "".to_string());

    let args = parse_hash_args(&location_hash).expect("Could not parse args");
    if let Some(log_level) = args.verbose.log_level() {
        console_log::init_with_level(log_level).expect("Error initializing logger");
    }
    log::debug!("args: {:?}", args.game);

    let root = document()
        .get_element_by_id("game")
        .expect("Could not find id=\"game\" element");

    log::debug!("App started");
    yew::Renderer::<game::GameView>::with_root_and_props(root, args.game).render();
}

#[cfg(test)]
mod tests {
    use super::*;
    use mine_hunter_core::SessionConfig;

    #[test]
    fn empty_hash_uses_defaults() {
        let args = parse_hash_args("").unwrap();
        let config = SessionConfig::from(&args.game);

        assert_eq!(config, SessionConfig::default());
        assert_eq!(args.verbose.log_level(), Some(log::Level::Error));
    }

    #[test]
    fn hash_flags_are_split_like_a_command_line() {
        let args = parse_hash_args("#-vvv&--max-level=7&--time-limit=60").unwrap();
        let config = SessionConfig::from(&args.game);

        assert_eq!(args.verbose.log_level(), Some(log::Level::Debug));
        assert_eq!(config.max_level, Some(7));
        assert_eq!(config.time_limit_secs, 60);
        assert_eq!(config.coins_per_level, 10);
    }

    #[test]
    fn zero_time_limit_is_rejected() {
        assert!(parse_hash_args("#--time-limit=0").is_err());
        assert!(parse_hash_args("#--time-limit=1").is_ok());
    }

    #[test]
    fn unknown_flag_is_an_error() {
        assert!(parse_hash_args("#--seed=1").is_err());
    }
}
