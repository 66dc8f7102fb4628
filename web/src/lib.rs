use clap::Parser;
use minehunt_core::Level;
use wasm_bindgen::prelude::*;

mod game;
mod utils;

#[derive(Parser, Debug, Default)]
#[command(version, about, long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    /// Force a seed instead of random
    #[arg(short, long)]
    seed: Option<u64>,

    /// Difficulty to start with: beginner, medium or expert
    #[arg(short, long)]
    level: Option<Level>,
}

/// Arguments come from the location hash, e.g. `#-vv&--level=expert&--seed=42`.
fn parse_args(location_hash: &str) -> (Args, Option<clap::Error>) {
    match Args::try_parse_from(location_hash.split(['#', '&'])) {
        Ok(args) => (args, None),
        Err(err) => (Args::default(), Some(err)),
    }
}

#[wasm_bindgen(start)]
pub fn run_app() {
    use gloo::utils::{document, window};

    #[cfg(feature = "console_error_panic_hook")]
    {
        console_error_panic_hook::set_once();
    }

    let location_hash = window().location().hash().unwrap_or_default();
    let (args, parse_error) = parse_args(&location_hash);
    if let Some(log_level) = args.verbose.log_level() {
        if let Err(err) = console_log::init_with_level(log_level) {
            web_sys::console::error_1(&err.to_string().into());
        }
    }
    if let Some(err) = parse_error {
        log::warn!("Ignoring location hash {:?}: {}", location_hash, err);
    }
    log::debug!("seed: {:?}, level: {:?}", args.seed, args.level);

    let Some(root) = document().get_element_by_id("game") else {
        log::error!("Could not find id=\"game\" element");
        return;
    };

    let props = game::GameProps {
        seed: args.seed,
        level: args.level.unwrap_or_default(),
    };
    log::debug!("App started");
    yew::Renderer::<game::GameView>::with_root_and_props(root, props).render();
}
