//! Version command implementation

use crate::config::Settings;
use crate::error::Result;

/// Version header plus the settings a run uses when nothing overrides them
fn report() -> Vec<String> {
    let defaults = Settings::default();
    vec![
        format!("signal-sandbox {}", env!("CARGO_PKG_VERSION")),
        String::new(),
        "Defaults:".to_string(),
        format!(
            "  Container tool: {} ({})",
            defaults.container_tool, defaults.container_backend
        ),
        format!("  Sandbox: {} from {}", defaults.sandbox_name, defaults.image),
        format!("  Application: {}", defaults.app_id),
        String::new(),
        "Build info:".to_string(),
        format!("  Profile: {}", build_profile()),
        format!(
            "  Target: {}-{}",
            std::env::consts::OS,
            std::env::consts::ARCH
        ),
    ]
}

/// Run version command
pub fn run() -> Result<()> {
    for line in report() {
        println!("{line}");
    }
    Ok(())
}

fn build_profile() -> &'static str {
    if cfg!(debug_assertions) { "debug" } else { "release" }
}
