use std::env;
use std::process;

use rotquat::config::Config;

fn main() {
    env_logger::init();

    let cfg = match Config::new(env::args().skip(1).collect()) {
        Ok(cfg) => cfg,
        Err(err) => {
            log::error!("{err}");
            process::exit(1);
        }
    };
    log::debug!("{cfg}");

    for (i, rcfg) in cfg.rotations.iter().enumerate() {
        match rcfg.build() {
            Ok(quat) => {
                println!("{quat}");
            }
            Err(err) => {
                log::error!("rotation {i}: {err}");
                process::exit(1);
            }
        }
    }
}
