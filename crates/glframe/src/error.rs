use std::path::PathBuf;

/// Errors raised while acquiring windowing or graphics resources.
///
/// None of these are meant to be recovered from: they describe a broken
/// environment (no display, bad driver, missing asset) or a broken asset
/// (shader that does not compile). Build them through [`handle_error`] so
/// every failure is logged in one place, then propagate with `?`.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("a glframe Context already exists; Context::init() must only be called once")]
    AlreadyInitialized,

    #[error("[window] {0}")]
    Window(String),

    #[error("[opengl] failed to create the context: {0}")]
    Context(String),

    #[error("[opengl] failed to load the OpenGL entry points")]
    Loader,

    #[error("[opengl] failed to create {what}: {message}")]
    Allocation { what: &'static str, message: String },

    #[error("Shader compilation failed:\n{log}\n\nThe code we tried to compile was:\n{code}")]
    ShaderCompilation { log: String, code: String },

    #[error("Shader linking failed:\n{0}")]
    ShaderLink(String),

    #[error("Invalid framebuffer: {0}")]
    IncompleteFramebuffer(&'static str),

    #[error(
        "Path \"{}\" does not exist. Make sure you didn't misspell it or made it relative to the wrong folder.",
        .0.display()
    )]
    MissingPath(PathBuf),

    #[error("Couldn't read \"{}\": {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("[img::load] Couldn't load image from \"{}\":\n{source}", path.display())]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Single funnel for every acquisition failure.
///
/// Logs the message and hands the error back so the caller can return it.
pub fn handle_error(err: Error) -> Error {
    log::error!("{err}");
    err
}

/// Maps a `glow` allocation failure (which reports plain strings).
pub(crate) fn allocation(what: &'static str) -> impl FnOnce(String) -> Error {
    move |message| handle_error(Error::Allocation { what, message })
}
