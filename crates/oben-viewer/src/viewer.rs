use oben_engine::core::{App, AppControl, FrameCtx};
use oben_engine::device::Gpu;
use oben_engine::input::{InputEvent, Key, KeyState};
use oben_engine::render::{PipelineDescriptor, RenderError, Renderer, RendererConfig};

use crate::demos::PALETTES;

pub struct Viewer {
    renderer: Renderer,
    pending: Vec<PipelineDescriptor>,
    palette: usize,
    title_dirty: bool,
}

impl Viewer {
    pub fn new(pipelines: Vec<PipelineDescriptor>, config: RendererConfig) -> Self {
        Self {
            renderer: Renderer::new(config),
            pending: pipelines,
            palette: 0,
            title_dirty: true,
        }
    }

    fn handle_key(&mut self, key: Key) -> AppControl {
        if let Some(d) = key.digit().filter(|d| *d > 0) {
            match self.renderer.switch_pipeline(usize::from(d - 1)) {
                Ok(()) => self.title_dirty = true,
                Err(e) => log::warn!("{e}"),
            }
            return AppControl::Continue;
        }

        let camera = self.renderer.camera().config();
        match key {
            Key::Escape => return AppControl::Exit,
            Key::R => self.renderer.reset_camera(),
            Key::BracketLeft => self.renderer.set_camera_sensitivity(camera.sensitivity * 0.5),
            Key::BracketRight => self.renderer.set_camera_sensitivity(camera.sensitivity * 2.0),
            Key::Minus => self.renderer.set_camera_zoom_amount(camera.zoom_speed * 0.5),
            Key::Equal => self.renderer.set_camera_zoom_amount(camera.zoom_speed * 2.0),
            Key::C => self.cycle_palette(),
            _ => return AppControl::Continue,
        }

        let camera = self.renderer.camera().config();
        log::info!(
            "sensitivity {:.6}, zoom step {:.3}",
            camera.sensitivity,
            camera.zoom_speed
        );
        AppControl::Continue
    }

    fn cycle_palette(&mut self) {
        let next = (self.palette + 1) % PALETTES.len();
        let active = self.renderer.active_pipeline();

        match self.renderer.write_parameter_range(active, &PALETTES[next], 0) {
            Ok(()) => self.palette = next,
            Err(RenderError::NoParameters { .. }) => {
                log::info!("pipeline {} takes no parameters", active + 1);
            }
            Err(e) => log::warn!("palette not applied: {e}"),
        }
    }

    fn title(&self) -> String {
        let index = self.renderer.active_pipeline();
        let label = self
            .renderer
            .pipeline(index)
            .map(|p| p.label())
            .unwrap_or("-");
        format!(
            "oben - {label} ({}/{})",
            index + 1,
            self.renderer.pipeline_count()
        )
    }
}

impl App for Viewer {
    fn on_device_ready(&mut self, gpu: &Gpu<'_>) -> anyhow::Result<()> {
        self.renderer.attach_device(gpu)?;
        self.renderer
            .setup_pipelines(std::mem::take(&mut self.pending))?;
        self.renderer.start()?;
        Ok(())
    }

    fn on_input(&mut self, event: &InputEvent) -> AppControl {
        match event {
            InputEvent::Key {
                key,
                state: KeyState::Pressed,
                repeat: false,
                ..
            } => self.handle_key(*key),
            _ => AppControl::Continue,
        }
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        if self.title_dirty {
            ctx.runtime.set_title(self.title());
            self.title_dirty = false;
        }
        self.renderer.render_frame(ctx)
    }
}
