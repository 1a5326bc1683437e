// src/utils/env.rs

use log::debug;

/// Load `.env.local` then `.env`, if present. Missing files are fine; the
/// engine itself reads no configuration.
pub fn load_env() {
    if let Ok(path) = dotenv::from_filename(".env.local") {
        debug!("Loaded environment from {}", path.display());
    }
    if let Ok(path) = dotenv::dotenv() {
        debug!("Loaded environment from {}", path.display());
    }
}
