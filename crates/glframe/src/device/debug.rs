//! Routes `KHR_debug` driver messages to the logger.

use std::collections::HashSet;
use std::sync::Mutex;

use glow::HasContext;

/// Ids that NVIDIA drivers emit for routine buffer/texture placement info.
const IGNORED_IDS: [u32; 4] = [131169, 131185, 131218, 131204];

/// Installs the debug-message callback if the context has the debug bit.
///
/// Must run before the context is shared, since glow needs `&mut` here.
pub(crate) fn install(gl: &mut glow::Context) {
    let flags = unsafe { gl.get_parameter_i32(glow::CONTEXT_FLAGS) } as u32;
    if flags & glow::CONTEXT_FLAG_DEBUG_BIT == 0 {
        log::warn!("unable to create an OpenGL debug context");
        return;
    }

    let seen = Mutex::new(HashSet::new());
    unsafe {
        gl.enable(glow::DEBUG_OUTPUT);
        gl.enable(glow::DEBUG_OUTPUT_SYNCHRONOUS);
        gl.debug_message_callback(move |source, ty, id, severity, message| {
            if IGNORED_IDS.contains(&id) {
                return;
            }
            if let Ok(mut seen) = seen.lock() {
                if !seen.insert(id) {
                    return;
                }
            }
            log::log!(
                level(ty, severity),
                "[OpenGL] Debug message (id={id})\n{message}\n\nSource: {}\nType: {}\nSeverity: {}",
                source_name(source),
                type_name(ty),
                severity_name(severity),
            );
        });
        gl.debug_message_control(glow::DONT_CARE, glow::DONT_CARE, glow::DONT_CARE, &[], true);
    }
    log::debug!("OpenGL debug output enabled");
}

fn level(ty: u32, severity: u32) -> log::Level {
    if ty == glow::DEBUG_TYPE_ERROR
        || ty == glow::DEBUG_TYPE_UNDEFINED_BEHAVIOR
        || severity == glow::DEBUG_SEVERITY_HIGH
    {
        log::Level::Error
    } else if severity == glow::DEBUG_SEVERITY_NOTIFICATION {
        log::Level::Debug
    } else {
        log::Level::Warn
    }
}

fn source_name(source: u32) -> &'static str {
    match source {
        glow::DEBUG_SOURCE_API => "API",
        glow::DEBUG_SOURCE_WINDOW_SYSTEM => "Window System",
        glow::DEBUG_SOURCE_SHADER_COMPILER => "Shader Compiler",
        glow::DEBUG_SOURCE_THIRD_PARTY => "Third Party",
        glow::DEBUG_SOURCE_APPLICATION => "Application",
        glow::DEBUG_SOURCE_OTHER => "Other",
        _ => "Unknown",
    }
}

fn type_name(ty: u32) -> &'static str {
    match ty {
        glow::DEBUG_TYPE_ERROR => "Error",
        glow::DEBUG_TYPE_DEPRECATED_BEHAVIOR => "Deprecated Behaviour",
        glow::DEBUG_TYPE_UNDEFINED_BEHAVIOR => "Undefined Behaviour",
        glow::DEBUG_TYPE_PORTABILITY => "Portability",
        glow::DEBUG_TYPE_PERFORMANCE => "Performance",
        glow::DEBUG_TYPE_MARKER => "Marker",
        glow::DEBUG_TYPE_PUSH_GROUP => "Push Group",
        glow::DEBUG_TYPE_POP_GROUP => "Pop Group",
        glow::DEBUG_TYPE_OTHER => "Other",
        _ => "Unknown",
    }
}

fn severity_name(severity: u32) -> &'static str {
    match severity {
        glow::DEBUG_SEVERITY_HIGH => "High",
        glow::DEBUG_SEVERITY_MEDIUM => "Medium",
        glow::DEBUG_SEVERITY_LOW => "Low",
        glow::DEBUG_SEVERITY_NOTIFICATION => "Notification",
        _ => "Unknown",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn errors_and_high_severity_log_as_errors() {
        assert_eq!(level(glow::DEBUG_TYPE_ERROR, glow::DEBUG_SEVERITY_LOW), log::Level::Error);
        assert_eq!(
            level(glow::DEBUG_TYPE_UNDEFINED_BEHAVIOR, glow::DEBUG_SEVERITY_MEDIUM),
            log::Level::Error
        );
        assert_eq!(level(glow::DEBUG_TYPE_OTHER, glow::DEBUG_SEVERITY_HIGH), log::Level::Error);
    }

    #[test]
    fn notifications_are_debug_noise() {
        assert_eq!(
            level(glow::DEBUG_TYPE_OTHER, glow::DEBUG_SEVERITY_NOTIFICATION),
            log::Level::Debug
        );
        assert_eq!(
            level(glow::DEBUG_TYPE_PERFORMANCE, glow::DEBUG_SEVERITY_MEDIUM),
            log::Level::Warn
        );
    }

    #[test]
    fn names_fall_back_to_unknown() {
        assert_eq!(source_name(glow::DEBUG_SOURCE_SHADER_COMPILER), "Shader Compiler");
        assert_eq!(type_name(glow::DEBUG_TYPE_PORTABILITY), "Portability");
        assert_eq!(severity_name(0xdead), "Unknown");
    }
}
