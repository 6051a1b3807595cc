//! Startup checks that must pass before the server binds.
//!
//! A missing or broken model artifact is not fatal (the service runs
//! degraded). A broken codec stack is: nothing could ever load.

use pathway_core::errors::{ModelResult, PathwayErrorCode};
use pathway_model::artifact::native;
use tracing::{error, info};

pub fn run() -> ModelResult<()> {
    match native::self_check() {
        Ok(()) => {
            info!("artifact codec self-check passed");
            Ok(())
        }
        Err(e) => {
            error!(code = e.error_code(), error = %e, "artifact codec self-check failed");
            Err(e)
        }
    }
}

#[cfg(test)]
mod tests {
    #[test]
    fn preflight_passes_in_a_healthy_build() {
        super::run().unwrap();
    }
}
