use glow::HasContext;

/// A linked vertex + fragment program
pub struct ShaderProgram {
    pub id: glow::Program,
}

impl ShaderProgram {
    /// Compile both stages and link them. Errors carry the driver info log.
    pub fn new(gl: &glow::Context, vertex_src: &str, fragment_src: &str) -> Result<Self, String> {
        unsafe {
            let vertex = compile_stage(gl, glow::VERTEX_SHADER, vertex_src)?;
            let fragment = match compile_stage(gl, glow::FRAGMENT_SHADER, fragment_src) {
                Ok(s) => s,
                Err(e) => {
                    gl.delete_shader(vertex);
                    return Err(e);
                }
            };

            let program = gl.create_program()?;
            gl.attach_shader(program, vertex);
            gl.attach_shader(program, fragment);
            gl.link_program(program);

            let linked = gl.get_program_link_status(program);
            let log = gl.get_program_info_log(program);

            gl.detach_shader(program, vertex);
            gl.detach_shader(program, fragment);
            gl.delete_shader(vertex);
            gl.delete_shader(fragment);

            if !linked {
                gl.delete_program(program);
                return Err(format!("Link error: {}", log));
            }

            Ok(Self { id: program })
        }
    }

    pub fn delete(self, gl: &glow::Context) {
        unsafe {
            gl.delete_program(self.id);
        }
    }
}

unsafe fn compile_stage(gl: &glow::Context, stage: u32, source: &str) -> Result<glow::Shader, String> {
    let shader = gl.create_shader(stage)?;
    gl.shader_source(shader, source);
    gl.compile_shader(shader);

    if !gl.get_shader_compile_status(shader) {
        let log = gl.get_shader_info_log(shader);
        gl.delete_shader(shader);
        let kind = if stage == glow::VERTEX_SHADER {
            "vertex"
        } else {
            "fragment"
        };
        return Err(format!("Failed to compile {} shader: {}", kind, log));
    }

    Ok(shader)
}
