use super::{RenderError, SurfaceErrorAction};

/// Picks the surface format.
///
/// The first reported format is the platform's preferred one.
pub(crate) fn choose_surface_format(
    formats: &[wgpu::TextureFormat],
    prefer_srgb: bool,
) -> Option<wgpu::TextureFormat> {
    if formats.is_empty() {
        return None;
    }

    if prefer_srgb {
        let preferred = [
            wgpu::TextureFormat::Bgra8UnormSrgb,
            wgpu::TextureFormat::Rgba8UnormSrgb,
        ];
        for f in preferred {
            if formats.contains(&f) {
                return Some(f);
            }
        }
    }

    Some(formats[0])
}

pub(crate) fn choose_alpha_mode(
    modes: &[wgpu::CompositeAlphaMode],
    requested: Option<wgpu::CompositeAlphaMode>,
) -> wgpu::CompositeAlphaMode {
    requested
        .filter(|m| modes.contains(m))
        .or_else(|| modes.first().copied())
        .unwrap_or(wgpu::CompositeAlphaMode::Auto)
}

/// Maps a surface acquisition error to what the frame driver should do.
///
/// The surface is never reconfigured: losing it ends the render loop.
pub(crate) fn map_surface_error(err: wgpu::SurfaceError) -> SurfaceErrorAction {
    match err {
        wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated => {
            SurfaceErrorAction::Fatal(RenderError::SurfaceLost)
        }
        wgpu::SurfaceError::OutOfMemory => SurfaceErrorAction::Fatal(
            RenderError::OutOfDeviceMemory("surface texture acquisition".to_string()),
        ),
        wgpu::SurfaceError::Timeout => SurfaceErrorAction::SkipFrame,
        wgpu::SurfaceError::Other => SurfaceErrorAction::SkipFrame,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wgpu::{CompositeAlphaMode, TextureFormat};

    #[test]
    fn format_defaults_to_first_reported() {
        let formats = [TextureFormat::Bgra8Unorm, TextureFormat::Bgra8UnormSrgb];
        assert_eq!(
            choose_surface_format(&formats, false),
            Some(TextureFormat::Bgra8Unorm)
        );
    }

    #[test]
    fn format_prefers_srgb_when_asked() {
        let formats = [TextureFormat::Rgba8Unorm, TextureFormat::Rgba8UnormSrgb];
        assert_eq!(
            choose_surface_format(&formats, true),
            Some(TextureFormat::Rgba8UnormSrgb)
        );
    }

    #[test]
    fn format_srgb_preference_falls_back() {
        let formats = [TextureFormat::Rgba16Float];
        assert_eq!(
            choose_surface_format(&formats, true),
            Some(TextureFormat::Rgba16Float)
        );
    }

    #[test]
    fn format_none_when_surface_reports_nothing() {
        assert_eq!(choose_surface_format(&[], false), None);
    }

    #[test]
    fn alpha_mode_uses_opaque_when_supported() {
        let modes = [CompositeAlphaMode::PreMultiplied, CompositeAlphaMode::Opaque];
        assert_eq!(
            choose_alpha_mode(&modes, Some(CompositeAlphaMode::Opaque)),
            CompositeAlphaMode::Opaque
        );
    }

    #[test]
    fn alpha_mode_falls_back_to_first_supported() {
        let modes = [CompositeAlphaMode::Inherit];
        assert_eq!(
            choose_alpha_mode(&modes, Some(CompositeAlphaMode::Opaque)),
            CompositeAlphaMode::Inherit
        );
        assert_eq!(choose_alpha_mode(&[], None), CompositeAlphaMode::Auto);
    }

    #[test]
    fn lost_and_outdated_surfaces_are_fatal() {
        for err in [wgpu::SurfaceError::Lost, wgpu::SurfaceError::Outdated] {
            assert_eq!(
                map_surface_error(err),
                SurfaceErrorAction::Fatal(RenderError::SurfaceLost)
            );
        }
    }

    #[test]
    fn out_of_memory_is_fatal() {
        assert!(matches!(
            map_surface_error(wgpu::SurfaceError::OutOfMemory),
            SurfaceErrorAction::Fatal(RenderError::OutOfDeviceMemory(_))
        ));
    }

    #[test]
    fn timeout_skips_the_tick() {
        assert_eq!(
            map_surface_error(wgpu::SurfaceError::Timeout),
            SurfaceErrorAction::SkipFrame
        );
    }
}
