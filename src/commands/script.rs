//! Script command implementation

use std::path::PathBuf;

use crate::config::Settings;
use crate::error::Result;
use crate::script;

/// Print the in-sandbox installation script to stdout
pub fn run(config: Option<PathBuf>) -> Result<()> {
    let settings = Settings::load(config.as_deref())?;
    print!("{}", script::build_install_script(&settings));
    Ok(())
}
