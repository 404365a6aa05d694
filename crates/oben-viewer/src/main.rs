mod cli;
mod demos;
mod viewer;

use anyhow::Result;
use winit::dpi::LogicalSize;

use oben_engine::device::GpuInit;
use oben_engine::events::{EventBus, HostEvent};
use oben_engine::logging::{init_logging, LoggingConfig};
use oben_engine::render::RendererConfig;
use oben_engine::window::{Runtime, RuntimeConfig};

use cli::{CliOptions, USAGE};
use viewer::Viewer;

fn main() -> Result<()> {
    let Some(options) = CliOptions::parse()? else {
        println!("{USAGE}");
        return Ok(());
    };

    init_logging(LoggingConfig {
        env_filter: options.log_filter.clone(),
        ..LoggingConfig::default()
    });

    let pipelines = if options.shaders.is_empty() {
        demos::builtin()?
    } else {
        demos::from_files(&options.shaders)?
    };
    log::info!("loaded {} shader(s)", pipelines.len());

    let mut events = EventBus::new();
    events.on(HostEvent::DEVICE_UNAVAILABLE, |event| {
        eprintln!("oben-viewer: {event}");
        eprintln!("oben-viewer: a GPU with Vulkan, Metal or DX12 support is required");
    });

    let mut config = RuntimeConfig {
        title: "oben".to_string(),
        ..RuntimeConfig::default()
    };
    if let Some((w, h)) = options.size {
        config.initial_size = LogicalSize::new(w, h);
    }

    Runtime::run(
        config,
        GpuInit::default(),
        events,
        Viewer::new(pipelines, RendererConfig::default()),
    )
}
