//! `aipdl config`: where the config and log live, and what is in effect.

use aipdl_core::config::{self, AipdlConfig};
use aipdl_core::logging;
use anyhow::Result;

pub fn run_config(cfg: &AipdlConfig) -> Result<()> {
    println!("# config: {}", config::config_path()?.display());
    println!("# log: {}", logging::log_file_path()?.display());
    print!("{}", toml::to_string_pretty(cfg)?);
    Ok(())
}
