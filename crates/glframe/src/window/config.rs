use winit::dpi::LogicalSize;

/// Window configuration.
#[derive(Debug, Clone)]
pub struct WindowConfig {
    pub title: String,
    pub initial_size: LogicalSize<f64>,
    /// Start maximized. [`Context::maximize_window`](super::Context::maximize_window)
    /// does the same later on.
    pub maximized: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "glframe".to_string(),
            initial_size: LogicalSize::new(1280.0, 720.0),
            maximized: false,
        }
    }
}

impl WindowConfig {
    pub fn with_title(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }
}
