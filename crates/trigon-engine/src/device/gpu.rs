use winit::dpi::PhysicalSize;
use winit::window::Window;

use super::surface;
use super::{GpuFrame, GpuInit, RenderError, SurfaceErrorAction};

/// Adapter, device and queue, independent of any surface.
pub struct GpuDevice {
    /// wgpu instance used to create the adapter (and any surface).
    pub instance: wgpu::Instance,

    /// Selected adapter.
    pub adapter: wgpu::Adapter,

    /// Logical device.
    pub device: wgpu::Device,

    /// Command queue.
    pub queue: wgpu::Queue,
}

impl GpuDevice {
    /// Acquires an adapter and device without a presentation surface.
    pub async fn headless(init: &GpuInit) -> Result<Self, RenderError> {
        let instance = create_instance(init);
        Self::request(instance, None, init).await
    }

    async fn request(
        instance: wgpu::Instance,
        compatible_surface: Option<&wgpu::Surface<'_>>,
        init: &GpuInit,
    ) -> Result<Self, RenderError> {
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: init.power_preference,
                compatible_surface,
                force_fallback_adapter: false,
            })
            .await
            .map_err(|e| {
                RenderError::UnsupportedPlatform(format!("no suitable GPU adapter: {e}"))
            })?;

        let info = adapter.get_info();
        log::info!("using adapter \"{}\" ({:?})", info.name, info.backend);

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("trigon device"),
                required_features: init.required_features,
                required_limits: init.required_limits.clone(),
                experimental_features: wgpu::ExperimentalFeatures::disabled(),
                memory_hints: wgpu::MemoryHints::Performance,
                trace: wgpu::Trace::Off,
            })
            .await
            .map_err(|e| {
                RenderError::UnsupportedPlatform(format!("failed to create device/queue: {e}"))
            })?;

        Ok(Self {
            instance,
            adapter,
            device,
            queue,
        })
    }
}

/// Device plus a configured window surface.
///
/// Setup happens once in [`Gpu::acquire`]; the surface is never resized or
/// reconfigured afterwards.
pub struct Gpu<'w> {
    gpu: GpuDevice,

    /// Surface bound to the window.
    ///
    /// Surface lifetime is tied to the window; the window must outlive the `Gpu`.
    surface: wgpu::Surface<'w>,

    /// Active surface configuration.
    config: wgpu::SurfaceConfiguration,
}

impl<'w> Gpu<'w> {
    /// Creates a GPU context bound to a window and configures its surface.
    ///
    /// Adapter/device acquisition is asynchronous under wgpu.
    pub async fn acquire(window: &'w Window, init: GpuInit) -> Result<Self, RenderError> {
        let size = window.inner_size();
        if size.width == 0 || size.height == 0 {
            return Err(RenderError::UnsupportedPlatform(
                "window has zero size".to_string(),
            ));
        }

        let instance = create_instance(&init);

        // Surface lifetime is tied to `window` via `'w`.
        let surface = instance.create_surface(window).map_err(|e| {
            RenderError::UnsupportedPlatform(format!("failed to create surface: {e}"))
        })?;

        let gpu = GpuDevice::request(instance, Some(&surface), &init).await?;

        let caps = surface.get_capabilities(&gpu.adapter);
        let format = surface::choose_surface_format(&caps.formats, init.prefer_srgb)
            .ok_or_else(|| {
                RenderError::UnsupportedPlatform("no supported surface formats".to_string())
            })?;
        let alpha_mode = surface::choose_alpha_mode(&caps.alpha_modes, init.alpha_mode);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: size.width,
            height: size.height,
            present_mode: init.present_mode,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: init.desired_maximum_frame_latency,
        };

        surface.configure(&gpu.device, &config);
        log::info!(
            "surface configured: {}x{} {:?} ({:?})",
            config.width,
            config.height,
            format,
            alpha_mode
        );

        Ok(Self {
            gpu,
            surface,
            config,
        })
    }

    /// Returns the negotiated surface format.
    pub fn surface_format(&self) -> wgpu::TextureFormat {
        self.config.format
    }

    /// Returns the configured surface size in physical pixels.
    pub fn size(&self) -> PhysicalSize<u32> {
        PhysicalSize::new(self.config.width, self.config.height)
    }

    /// Returns a reference to the logical device.
    pub fn device(&self) -> &wgpu::Device {
        &self.gpu.device
    }

    /// Acquires the next surface texture and creates an encoder.
    ///
    /// The returned frame owns the surface texture; it must be handed back to
    /// [`Gpu::submit`] to be presented.
    pub fn begin_frame(&self) -> Result<GpuFrame, SurfaceErrorAction> {
        let surface_texture = self
            .surface
            .get_current_texture()
            .map_err(surface::map_surface_error)?;
        let view = surface_texture
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let encoder = self
            .gpu
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("trigon frame encoder"),
            });

        Ok(GpuFrame {
            surface_texture,
            view,
            encoder,
        })
    }

    /// Submits the recorded commands for the given frame and presents it.
    pub fn submit(&self, frame: GpuFrame) {
        let GpuFrame {
            surface_texture,
            view,
            encoder,
        } = frame;

        self.gpu.queue.submit(std::iter::once(encoder.finish()));
        drop(view);
        surface_texture.present();
    }
}

fn create_instance(init: &GpuInit) -> wgpu::Instance {
    wgpu::Instance::new(&wgpu::InstanceDescriptor {
        backends: init.backends,
        ..Default::default()
    })
}
