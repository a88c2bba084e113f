//! The bundled DOCTOR script.

use std::sync::OnceLock;

use eliza_script::{MalformedScript, ScriptData, parse};

use crate::engine::Engine;

/// Source text of Weizenbaum's DOCTOR script.
pub const DOCTOR_SCRIPT: &str = include_str!("../scripts/doctor.txt");

/// The parsed DOCTOR script, shared by every engine in the process.
pub fn doctor() -> Result<&'static ScriptData, MalformedScript> {
    static DOCTOR: OnceLock<Result<ScriptData, MalformedScript>> = OnceLock::new();
    DOCTOR
        .get_or_init(|| parse(DOCTOR_SCRIPT))
        .as_ref()
        .map_err(Clone::clone)
}

/// Start a new conversation with DOCTOR.
pub fn create_engine() -> Result<Engine, MalformedScript> {
    Ok(Engine::new(doctor()?))
}
