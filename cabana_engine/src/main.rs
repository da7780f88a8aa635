#![warn(clippy::pedantic)]
#![allow(clippy::must_use_candidate)]
//! ** Cabana **
//! A hunter, a cabin, and a stag in the woods.

use cabana_engine::data_paths::data_path;
use cabana_engine::repl::look_handler;
use cabana_engine::save_files::set_active_save_dir;
use cabana_engine::style::GameStyle;
use cabana_engine::{View, load_config, load_world, run_repl};

use anyhow::{Context, Result};
use colored::Colorize;
use log::info;
use rand::SeedableRng;
use rand::rngs::StdRng;

use std::io::Write;

fn main() -> Result<()> {
    env_logger::init();

    let config = load_config(&data_path("cabana.toml"));
    set_active_save_dir(config.save_dir.clone());

    info!("Start: loading Cabana world...");
    let mut world = load_world(&data_path(&config.world_file)).context("while loading CabanaWorld")?;
    if let Some(seed) = config.rng_seed {
        info!("using fixed RNG seed {seed}");
        world.rng = StdRng::seed_from_u64(seed);
    }
    info!("CabanaWorld loaded successfully.");

    // clear the screen
    print!("\x1B[2J\x1B[H");
    std::io::stdout().flush().context("flushing stdout")?;
    info!("Starting the game!");

    println!("{:^84}", world.title.to_uppercase().title_style());
    println!();
    for line in &world.intro {
        println!("{}", line.description_style());
    }
    println!();

    let mut view = View::new();
    look_handler(&world, &mut view)?;
    view.flush();

    run_repl(&mut world, &config)?;
    println!("{}", "Até a próxima, caçador.".dimmed());
    Ok(())
}
