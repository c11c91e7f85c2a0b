//! Logging initialization

/// Filter used when `RUST_LOG` is unset: this crate at `info`, the GPU stack
/// only for warnings
pub const DEFAULT_FILTER: &str = "info,wgpu_core=warn,wgpu_hal=warn,naga=warn";

/// Initialize the logging system with [`DEFAULT_FILTER`] and millisecond
/// timestamps, so frame-rate lines line up with frame times.
///
/// # Example
/// ```
/// limbo::core::logging::init();
/// log::info!("Background started");
/// ```
pub fn init() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(DEFAULT_FILTER))
        .format_timestamp_millis()
        .init();
}
