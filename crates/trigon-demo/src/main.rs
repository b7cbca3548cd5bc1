use anyhow::Result;

use trigon_engine::device::GpuInit;
use trigon_engine::logging::{LoggingConfig, init_logging};
use trigon_engine::window::{Runtime, RuntimeConfig};

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    log::info!("starting trigon demo");

    Runtime::run(
        RuntimeConfig {
            title: "trigon: hello triangle".to_string(),
            ..Default::default()
        },
        GpuInit::default(),
    )
}
