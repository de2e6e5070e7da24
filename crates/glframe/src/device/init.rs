/// Initialization parameters for the OpenGL layer.
///
/// Keep this structure stable and minimal. Add configuration flags only when a
/// concrete platform or driver requirement exists.
#[derive(Debug, Clone)]
pub struct GpuInit {
    /// Requested core-profile version `(major, minor)`.
    ///
    /// 4.3 brings `KHR_debug`; macOS stops at 4.1.
    pub gl_version: (u8, u8),

    /// Ask for a debug context and route driver messages to the logger.
    pub debug_context: bool,

    /// Wait for vertical blank when presenting.
    pub vsync: bool,

    pub depth_bits: u8,
    pub stencil_bits: u8,
}

impl Default for GpuInit {
    fn default() -> Self {
        let on_macos = cfg!(target_os = "macos");
        Self {
            gl_version: if on_macos { (4, 1) } else { (4, 3) },
            debug_context: cfg!(debug_assertions) && !on_macos,
            vsync: true,
            depth_bits: 24,
            stencil_bits: 8,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_requests_core_4x_with_depth_and_stencil() {
        let init = GpuInit::default();
        assert_eq!(init.gl_version.0, 4);
        assert!(init.gl_version.1 == 1 || init.gl_version.1 == 3);
        assert_eq!(init.depth_bits, 24);
        assert_eq!(init.stencil_bits, 8);
        assert!(init.vsync);
    }
}
