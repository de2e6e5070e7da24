use std::path::PathBuf;
use std::rc::Rc;

use glow::HasContext;

use crate::device::Gpu;
use crate::error::{allocation, handle_error, Error, Result};
use crate::path::make_absolute_path;

use super::handle::Unique;
use super::uniform::{LocationCache, Uniform};

/// GLSL source for one shader stage.
#[derive(Debug, Clone)]
pub enum ShaderSource {
    Code(String),
    /// Resolved relative to the executable's directory.
    File(PathBuf),
}

impl ShaderSource {
    fn read(&self) -> Result<String> {
        match self {
            Self::Code(code) => Ok(code.clone()),
            Self::File(path) => {
                let path = make_absolute_path(path)?;
                std::fs::read_to_string(&path)
                    .map_err(|source| handle_error(Error::Io { path, source }))
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct ShaderDescriptor {
    pub vertex: ShaderSource,
    pub fragment: ShaderSource,
}

/// A linked vertex + fragment program.
pub struct Shader {
    program: Unique<glow::Program>,
    locations: LocationCache<glow::UniformLocation>,
}

impl Shader {
    pub fn new(gpu: &Rc<Gpu>, desc: &ShaderDescriptor) -> Result<Self> {
        let vertex = compile_module(gpu, glow::VERTEX_SHADER, &desc.vertex.read()?)?;
        let fragment = compile_module(gpu, glow::FRAGMENT_SHADER, &desc.fragment.read()?)?;

        let gl = gpu.gl();
        let program = Unique::new(
            gpu.clone(),
            unsafe { gl.create_program() }.map_err(allocation("shader program"))?,
        );
        unsafe {
            gl.attach_shader(program.get(), vertex.get());
            gl.attach_shader(program.get(), fragment.get());
            gl.link_program(program.get());
            gl.detach_shader(program.get(), fragment.get());
            gl.detach_shader(program.get(), vertex.get());

            if !gl.get_program_link_status(program.get()) {
                let log = gl.get_program_info_log(program.get());
                return Err(handle_error(Error::ShaderLink(log)));
            }
        }

        log::debug!("shader program linked");
        Ok(Self {
            program,
            locations: LocationCache::default(),
        })
    }

    pub fn raw(&self) -> glow::Program {
        self.program.get()
    }

    pub fn bind(&self) {
        unsafe { self.gpu().use_program(Some(self.program.get())) }
    }

    /// Writes `value` to the uniform `name`. Unknown names are ignored.
    ///
    /// The shader must be bound first.
    pub fn set_uniform<U: Uniform>(&self, name: &str, value: U) {
        self.debug_assert_bound();
        let location = self.uniform_location(name);
        value.apply(self.gpu(), location.as_ref());
    }

    fn uniform_location(&self, name: &str) -> Option<glow::UniformLocation> {
        self.locations.get_or_resolve(name, |name| unsafe {
            self.gpu().get_uniform_location(self.program.get(), name)
        })
    }

    fn debug_assert_bound(&self) {
        if cfg!(debug_assertions) {
            let current = unsafe { self.gpu().get_parameter_program(glow::CURRENT_PROGRAM) };
            assert!(
                current == Some(self.program.get()),
                "You must call shader.bind() before setting any uniform."
            );
        }
    }

    fn gpu(&self) -> &Gpu {
        self.program.owner()
    }
}

fn compile_module(gpu: &Rc<Gpu>, kind: u32, code: &str) -> Result<Unique<glow::Shader>> {
    let gl = gpu.gl();
    let module = Unique::new(
        gpu.clone(),
        unsafe { gl.create_shader(kind) }.map_err(allocation("shader module"))?,
    );
    unsafe {
        gl.shader_source(module.get(), code);
        gl.compile_shader(module.get());
        if !gl.get_shader_compile_status(module.get()) {
            return Err(handle_error(Error::ShaderCompilation {
                log: gl.get_shader_info_log(module.get()),
                code: code.to_owned(),
            }));
        }
    }
    Ok(module)
}

/// Plain white geometry, positions at location 0 taken as clip space.
pub(crate) fn default_shader_descriptor() -> ShaderDescriptor {
    ShaderDescriptor {
        vertex: ShaderSource::Code(
            r#"#version 410
layout(location = 0) in vec3 in_position;

void main()
{
    gl_Position = vec4(in_position, 1.);
}
"#
            .to_owned(),
        ),
        fragment: ShaderSource::Code(
            r#"#version 410
out vec4 out_color;

void main()
{
    out_color = vec4(1.);
}
"#
            .to_owned(),
        ),
    }
}
