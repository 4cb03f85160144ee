use glow::HasContext;
use gtk4::prelude::*;
use gtk4::{glib, GLArea};
use std::cell::RefCell;
use std::num::NonZeroU32;
use std::path::PathBuf;
use std::rc::Rc;

use crate::camera::Camera;
use crate::config;
use crate::controls::ControlState;
use crate::export;
use crate::mesh::{Mesh, Vertex};
use crate::params::Parameter;
use crate::pipeline::{Effect, FramePlan, Pass};
use crate::shader::ShaderProgram;
use crate::shader_presets;

/// Load GL function pointers via the platform's native GL proc address loader.
/// On Wayland this uses eglGetProcAddress, on X11 glXGetProcAddressARB.
mod gl_loader {
    use std::ffi::{c_void, CStr};
    use std::sync::OnceLock;

    type GetProcAddr = unsafe extern "C" fn(*const std::ffi::c_char) -> *const c_void;

    static LOADER: OnceLock<Option<GetProcAddr>> = OnceLock::new();

    unsafe fn lookup(library: &[u8], symbol: &[u8]) -> Option<GetProcAddr> {
        let handle = libc::dlopen(
            library.as_ptr() as *const _,
            libc::RTLD_NOW | libc::RTLD_GLOBAL,
        );
        if handle.is_null() {
            return None;
        }
        let sym = libc::dlsym(handle, symbol.as_ptr() as *const _);
        if sym.is_null() {
            None
        } else {
            Some(std::mem::transmute::<*mut c_void, GetProcAddr>(sym))
        }
    }

    fn find_loader() -> Option<GetProcAddr> {
        unsafe {
            lookup(b"libEGL.so.1\0", b"eglGetProcAddress\0")
                .or_else(|| lookup(b"libGLX.so.0\0", b"glXGetProcAddressARB\0"))
        }
    }

    /// False when neither EGL nor GLX could be opened.
    pub fn available() -> bool {
        LOADER.get_or_init(find_loader).is_some()
    }

    pub fn get_proc_address(name: &CStr) -> *const c_void {
        match LOADER.get_or_init(find_loader) {
            Some(loader) => unsafe { loader(name.as_ptr()) },
            None => std::ptr::null(),
        }
    }
}

/// Fullscreen quad for offscreen passes: x, y, u, v per vertex.
const QUAD_VERTICES: [f32; 24] = [
    -1.0, -1.0, 0.0, 0.0, //
    1.0, -1.0, 1.0, 0.0, //
    1.0, 1.0, 1.0, 1.0, //
    -1.0, -1.0, 0.0, 0.0, //
    1.0, 1.0, 1.0, 1.0, //
    -1.0, 1.0, 0.0, 1.0, //
];

const IDENTITY: [f32; 16] = [
    1.0, 0.0, 0.0, 0.0, //
    0.0, 1.0, 0.0, 0.0, //
    0.0, 0.0, 1.0, 0.0, //
    0.0, 0.0, 0.0, 1.0, //
];

/// The offscreen target is filled in UV space, so it keeps one fixed size
/// whatever the window does.
const OFFSCREEN_SIZE: (i32, i32) = config::WINDOW_SIZE;

/// Things the renderer reports back to the window
#[derive(Debug)]
pub enum RendererEvent {
    /// GL context or program creation failed; nothing will be drawn.
    SetupFailed(String),
    Captured(Result<PathBuf, String>),
}

/// GPU objects that live for the whole run of the GL area
pub struct RendererState {
    pub gl: glow::Context,
    debug_program: ShaderProgram,
    /// Indexed by `Effect::index`
    effect_programs: Vec<ShaderProgram>,
    mesh_vao: glow::VertexArray,
    mesh_vbo: glow::Buffer,
    mesh_ibo: glow::Buffer,
    index_count: i32,
    quad_vao: glow::VertexArray,
    quad_vbo: glow::Buffer,
    // Offscreen colour target sampled by dependent effects
    offscreen_fbo: glow::Framebuffer,
    offscreen_texture: glow::Texture,
    camera: Camera,
    /// Where to write the next rendered frame, if a screenshot was requested
    pub pending_capture: Option<PathBuf>,
}

/// Helper to create the offscreen FBO + colour texture pair at
/// `OFFSCREEN_SIZE`
unsafe fn create_offscreen_target(
    gl: &glow::Context,
) -> Result<(glow::Framebuffer, glow::Texture), String> {
    let fbo = gl.create_framebuffer()?;
    let tex = match gl.create_texture() {
        Ok(tex) => tex,
        Err(e) => {
            gl.delete_framebuffer(fbo);
            return Err(e);
        }
    };

    gl.bind_texture(glow::TEXTURE_2D, Some(tex));
    gl.tex_image_2d(
        glow::TEXTURE_2D,
        0,
        glow::RGBA as i32,
        OFFSCREEN_SIZE.0,
        OFFSCREEN_SIZE.1,
        0,
        glow::RGBA,
        glow::UNSIGNED_BYTE,
        None,
    );
    gl.tex_parameter_i32(
        glow::TEXTURE_2D,
        glow::TEXTURE_MIN_FILTER,
        glow::LINEAR as i32,
    );
    gl.tex_parameter_i32(
        glow::TEXTURE_2D,
        glow::TEXTURE_MAG_FILTER,
        glow::LINEAR as i32,
    );
    gl.tex_parameter_i32(
        glow::TEXTURE_2D,
        glow::TEXTURE_WRAP_S,
        glow::CLAMP_TO_EDGE as i32,
    );
    gl.tex_parameter_i32(
        glow::TEXTURE_2D,
        glow::TEXTURE_WRAP_T,
        glow::CLAMP_TO_EDGE as i32,
    );
    gl.bind_texture(glow::TEXTURE_2D, None);

    gl.bind_framebuffer(glow::FRAMEBUFFER, Some(fbo));
    gl.framebuffer_texture_2d(
        glow::FRAMEBUFFER,
        glow::COLOR_ATTACHMENT0,
        glow::TEXTURE_2D,
        Some(tex),
        0,
    );
    let status = gl.check_framebuffer_status(glow::FRAMEBUFFER);
    gl.bind_framebuffer(glow::FRAMEBUFFER, None);

    if status != glow::FRAMEBUFFER_COMPLETE {
        gl.delete_framebuffer(fbo);
        gl.delete_texture(tex);
        return Err(format!("Offscreen framebuffer not complete: 0x{:X}", status));
    }

    Ok((fbo, tex))
}

/// Upload the mesh into a VAO with an element buffer
unsafe fn create_mesh_buffers(
    gl: &glow::Context,
    mesh: &Mesh,
) -> Result<(glow::VertexArray, glow::Buffer, glow::Buffer), String> {
    let vao = gl.create_vertex_array()?;
    let (vbo, ibo) = match (gl.create_buffer(), gl.create_buffer()) {
        (Ok(vbo), Ok(ibo)) => (vbo, ibo),
        (vbo, ibo) => {
            gl.delete_vertex_array(vao);
            if let Ok(vbo) = vbo {
                gl.delete_buffer(vbo);
            }
            return match ibo {
                Ok(ibo) => {
                    gl.delete_buffer(ibo);
                    Err("Failed to create vertex buffer".to_string())
                }
                Err(e) => Err(e),
            };
        }
    };

    gl.bind_vertex_array(Some(vao));

    gl.bind_buffer(glow::ARRAY_BUFFER, Some(vbo));
    gl.buffer_data_u8_slice(glow::ARRAY_BUFFER, mesh.vertex_bytes(), glow::STATIC_DRAW);

    // The element buffer binding is recorded in the VAO.
    gl.bind_buffer(glow::ELEMENT_ARRAY_BUFFER, Some(ibo));
    gl.buffer_data_u8_slice(
        glow::ELEMENT_ARRAY_BUFFER,
        mesh.index_bytes(),
        glow::STATIC_DRAW,
    );

    gl.enable_vertex_attrib_array(0);
    gl.vertex_attrib_pointer_f32(0, 3, glow::FLOAT, false, Vertex::STRIDE, 0);
    gl.enable_vertex_attrib_array(1);
    gl.vertex_attrib_pointer_f32(
        1,
        3,
        glow::FLOAT,
        false,
        Vertex::STRIDE,
        Vertex::NORMAL_OFFSET,
    );
    gl.enable_vertex_attrib_array(2);
    gl.vertex_attrib_pointer_f32(
        2,
        2,
        glow::FLOAT,
        false,
        Vertex::STRIDE,
        Vertex::TEXCOORD_OFFSET,
    );

    gl.bind_vertex_array(None);
    gl.bind_buffer(glow::ARRAY_BUFFER, None);
    gl.bind_buffer(glow::ELEMENT_ARRAY_BUFFER, None);

    Ok((vao, vbo, ibo))
}

unsafe fn create_quad_buffers(
    gl: &glow::Context,
) -> Result<(glow::VertexArray, glow::Buffer), String> {
    let vao = gl.create_vertex_array()?;
    let vbo = match gl.create_buffer() {
        Ok(vbo) => vbo,
        Err(e) => {
            gl.delete_vertex_array(vao);
            return Err(e);
        }
    };

    gl.bind_vertex_array(Some(vao));
    gl.bind_buffer(glow::ARRAY_BUFFER, Some(vbo));
    gl.buffer_data_u8_slice(
        glow::ARRAY_BUFFER,
        bytemuck::cast_slice(&QUAD_VERTICES),
        glow::STATIC_DRAW,
    );

    // Position feeds location 0 (z defaults to 0), uv feeds location 2.
    gl.enable_vertex_attrib_array(0);
    gl.vertex_attrib_pointer_f32(0, 2, glow::FLOAT, false, 16, 0);
    gl.enable_vertex_attrib_array(2);
    gl.vertex_attrib_pointer_f32(2, 2, glow::FLOAT, false, 16, 8);

    gl.bind_vertex_array(None);
    gl.bind_buffer(glow::ARRAY_BUFFER, None);

    Ok((vao, vbo))
}

/// Buffers, vertex arrays and the offscreen target
struct GpuObjects {
    mesh_vao: glow::VertexArray,
    mesh_vbo: glow::Buffer,
    mesh_ibo: glow::Buffer,
    quad_vao: glow::VertexArray,
    quad_vbo: glow::Buffer,
    offscreen_fbo: glow::Framebuffer,
    offscreen_texture: glow::Texture,
}

/// Create every non-program GPU object. On failure everything created so far
/// is deleted.
unsafe fn create_gpu_objects(gl: &glow::Context, mesh: &Mesh) -> Result<GpuObjects, String> {
    let (mesh_vao, mesh_vbo, mesh_ibo) = create_mesh_buffers(gl, mesh)?;

    let (quad_vao, quad_vbo) = match create_quad_buffers(gl) {
        Ok(quad) => quad,
        Err(e) => {
            gl.delete_vertex_array(mesh_vao);
            gl.delete_buffer(mesh_vbo);
            gl.delete_buffer(mesh_ibo);
            return Err(e);
        }
    };

    let (offscreen_fbo, offscreen_texture) = match create_offscreen_target(gl) {
        Ok(target) => target,
        Err(e) => {
            gl.delete_vertex_array(mesh_vao);
            gl.delete_buffer(mesh_vbo);
            gl.delete_buffer(mesh_ibo);
            gl.delete_vertex_array(quad_vao);
            gl.delete_buffer(quad_vbo);
            return Err(e);
        }
    };

    Ok(GpuObjects {
        mesh_vao,
        mesh_vbo,
        mesh_ibo,
        quad_vao,
        quad_vbo,
        offscreen_fbo,
        offscreen_texture,
    })
}

/// Compile the debug program and one program per effect. On failure every
/// program compiled so far is deleted.
fn compile_programs(gl: &glow::Context) -> Result<(ShaderProgram, Vec<ShaderProgram>), String> {
    let vertex_src = shader_presets::vertex_shader_source();
    let debug = ShaderProgram::new(gl, &vertex_src, &shader_presets::debug_fragment_source())
        .map_err(|e| format!("debug shader: {}", e))?;

    let mut programs = Vec::with_capacity(Effect::COUNT);
    for effect in Effect::ALL {
        let fragment_src = shader_presets::fragment_source_for(effect);
        match ShaderProgram::new(gl, &vertex_src, &fragment_src) {
            Ok(p) => programs.push(p),
            Err(e) => {
                debug.delete(gl);
                for p in programs {
                    p.delete(gl);
                }
                return Err(format!("{} shader: {}", effect.label(), e));
            }
        }
    }
    Ok((debug, programs))
}

/// Name of the sampler a consumer reads `input` through
fn input_sampler_name(input: Effect) -> &'static str {
    match input {
        Effect::PhaseField => "uPhaseField",
        Effect::GaborNoise => "uGaborNoise",
        Effect::PhasorNoise => "uPhasorNoise",
    }
}

impl RendererState {
    pub fn new(gl: glow::Context, mesh: &Mesh) -> Result<Self, String> {
        let (debug_program, effect_programs) = compile_programs(&gl)?;
        let objects = match unsafe { create_gpu_objects(&gl, mesh) } {
            Ok(objects) => objects,
            Err(e) => {
                debug_program.delete(&gl);
                for program in effect_programs {
                    program.delete(&gl);
                }
                return Err(format!("GPU buffers: {}", e));
            }
        };

        log::info!(
            "Renderer ready: {} vertices, {} indices",
            mesh.vertices.len(),
            mesh.indices.len()
        );

        Ok(Self {
            gl,
            debug_program,
            effect_programs,
            mesh_vao: objects.mesh_vao,
            mesh_vbo: objects.mesh_vbo,
            mesh_ibo: objects.mesh_ibo,
            index_count: mesh.index_count(),
            quad_vao: objects.quad_vao,
            quad_vbo: objects.quad_vbo,
            offscreen_fbo: objects.offscreen_fbo,
            offscreen_texture: objects.offscreen_texture,
            camera: Camera::default(),
            pending_capture: None,
        })
    }

    fn program_for(&self, effect: Effect) -> &ShaderProgram {
        &self.effect_programs[effect.index()]
    }

    /// The framebuffer bound when the frame started (GTK's GLArea FBO or 0).
    fn current_framebuffer(&self) -> Option<glow::Framebuffer> {
        let id = unsafe { self.gl.get_parameter_i32(glow::FRAMEBUFFER_BINDING) };
        NonZeroU32::new(id as u32).map(glow::NativeFramebuffer)
    }

    /// Set every uniform an effect might read. Uniforms a program does not
    /// declare are skipped.
    fn upload_uniforms(
        &self,
        program: &ShaderProgram,
        controls: &ControlState,
        mvp: &[f32; 16],
        width: i32,
        height: i32,
    ) {
        let gl = &self.gl;
        let values = &controls.values;
        let resolution = values.resolution();
        let mouse = values.mouse();

        unsafe {
            if let Some(loc) = gl.get_uniform_location(program.id, "uMvp") {
                gl.uniform_matrix_4_f32_slice(Some(&loc), false, mvp);
            }
            if let Some(loc) = gl.get_uniform_location(program.id, "uViewport") {
                gl.uniform_2_f32(Some(&loc), width as f32, height as f32);
            }
            if let Some(loc) = gl.get_uniform_location(program.id, "uFrequency") {
                gl.uniform_1_f32(Some(&loc), values.get(Parameter::Frequency));
            }
            if let Some(loc) = gl.get_uniform_location(program.id, "uBandwidth") {
                gl.uniform_1_f32(Some(&loc), values.get(Parameter::Bandwidth));
            }
            if let Some(loc) = gl.get_uniform_location(program.id, "uImpulsesPerKernel") {
                gl.uniform_1_i32(Some(&loc), values.get_i32(Parameter::ImpulsesPerKernel));
            }
            if let Some(loc) = gl.get_uniform_location(program.id, "uResolution") {
                gl.uniform_3_f32(Some(&loc), resolution[0], resolution[1], resolution[2]);
            }
            if let Some(loc) = gl.get_uniform_location(program.id, "uMouse") {
                gl.uniform_3_f32(Some(&loc), mouse[0], mouse[1], mouse[2]);
            }
            for (i, enabled) in controls.functions.iter().enumerate() {
                let name = format!("uFunction{}", i + 1);
                if let Some(loc) = gl.get_uniform_location(program.id, &name) {
                    gl.uniform_1_i32(Some(&loc), *enabled as i32);
                }
            }
        }
    }

    /// One indexed draw of the mesh with `program`.
    fn draw_mesh(
        &self,
        program: &ShaderProgram,
        controls: &ControlState,
        mvp: &[f32; 16],
        width: i32,
        height: i32,
    ) {
        let gl = &self.gl;
        unsafe {
            gl.use_program(Some(program.id));
            self.upload_uniforms(program, controls, mvp, width, height);

            gl.bind_vertex_array(Some(self.mesh_vao));
            gl.draw_elements(glow::TRIANGLES, self.index_count, glow::UNSIGNED_INT, 0);
            gl.bind_vertex_array(None);

            gl.use_program(None);
        }
    }

    /// Render `effect` over the whole offscreen texture, then rebind `screen`
    /// and its viewport.
    fn render_offscreen(
        &self,
        effect: Effect,
        controls: &ControlState,
        screen: Option<glow::Framebuffer>,
        width: i32,
        height: i32,
    ) {
        let (target_width, target_height) = OFFSCREEN_SIZE;
        let gl = &self.gl;
        let program = self.program_for(effect);
        unsafe {
            gl.bind_framebuffer(glow::FRAMEBUFFER, Some(self.offscreen_fbo));
            gl.viewport(0, 0, target_width, target_height);
            gl.disable(glow::DEPTH_TEST);
            gl.disable(glow::BLEND);
            gl.clear_color(0.0, 0.0, 0.0, 1.0);
            gl.clear(glow::COLOR_BUFFER_BIT);

            gl.use_program(Some(program.id));
            self.upload_uniforms(program, controls, &IDENTITY, target_width, target_height);

            gl.bind_vertex_array(Some(self.quad_vao));
            gl.draw_arrays(glow::TRIANGLES, 0, 6);
            gl.bind_vertex_array(None);
            gl.use_program(None);

            gl.bind_framebuffer(glow::FRAMEBUFFER, screen);
            gl.viewport(0, 0, width, height);
            gl.enable(glow::DEPTH_TEST);
        }
    }

    /// Render one frame into the currently bound framebuffer.
    pub fn render(&mut self, controls: &ControlState, width: i32, height: i32) {
        let screen = self.current_framebuffer();
        let plan = FramePlan::build(controls);
        let mvp = self.camera.mvp(width, height);
        log::trace!(
            "Frame {}x{}: {} shading draws ({} offscreen)",
            width,
            height,
            plan.shading_draw_calls(),
            plan.offscreen_draws()
        );

        unsafe {
            let gl = &self.gl;
            gl.viewport(0, 0, width, height);
            gl.enable(glow::DEPTH_TEST);
            gl.depth_func(glow::LEQUAL);
            gl.depth_mask(true);
            gl.color_mask(true, true, true, true);
            gl.disable(glow::BLEND);
            gl.clear_color(0.0, 0.0, 0.0, 1.0);
            gl.clear(glow::COLOR_BUFFER_BIT | glow::DEPTH_BUFFER_BIT);
        }

        for pass in plan.passes() {
            match *pass {
                Pass::Offscreen { effect } => {
                    self.render_offscreen(effect, controls, screen, width, height);
                }
                Pass::DepthPrepass => {
                    unsafe {
                        self.gl.depth_mask(true);
                        self.gl.depth_func(glow::LEQUAL);
                        self.gl.color_mask(false, false, false, false);
                    }
                    self.draw_mesh(&self.debug_program, controls, &mvp, width, height);
                }
                Pass::ColorPassBegin => unsafe {
                    self.gl.color_mask(true, true, true, true);
                    self.gl.depth_mask(false);
                    // Only shade pixels whose depth matches the prepass.
                    self.gl.depth_func(glow::EQUAL);
                    self.gl.enable(glow::BLEND);
                    self.gl.blend_func(glow::SRC_ALPHA, glow::ONE);
                },
                Pass::Shade { effect, input } => {
                    if let Some(input) = input {
                        let program = self.program_for(effect);
                        unsafe {
                            self.gl.use_program(Some(program.id));
                            self.gl.active_texture(glow::TEXTURE0);
                            self.gl
                                .bind_texture(glow::TEXTURE_2D, Some(self.offscreen_texture));
                            if let Some(loc) = self
                                .gl
                                .get_uniform_location(program.id, input_sampler_name(input))
                            {
                                self.gl.uniform_1_i32(Some(&loc), 0);
                            }
                        }
                    }
                    self.draw_mesh(self.program_for(effect), controls, &mvp, width, height);
                    if input.is_some() {
                        unsafe { self.gl.bind_texture(glow::TEXTURE_2D, None) };
                    }
                }
                Pass::ColorPassEnd => unsafe {
                    self.gl.depth_func(glow::LEQUAL);
                    self.gl.depth_mask(true);
                    self.gl.disable(glow::BLEND);
                },
                Pass::Debug => {
                    self.draw_mesh(&self.debug_program, controls, &mvp, width, height);
                }
            }
        }
    }

    /// Read back the currently bound framebuffer as top-down RGBA rows.
    pub fn read_pixels(&self, width: i32, height: i32) -> Vec<u8> {
        let mut pixels = vec![0u8; (width.max(0) * height.max(0) * 4) as usize];
        unsafe {
            self.gl.pixel_store_i32(glow::PACK_ALIGNMENT, 1);
            self.gl.read_pixels(
                0,
                0,
                width,
                height,
                glow::RGBA,
                glow::UNSIGNED_BYTE,
                glow::PixelPackData::Slice(&mut pixels),
            );
        }
        export::flip_rows(&pixels, width as usize, height as usize)
    }
}

impl Drop for RendererState {
    fn drop(&mut self) {
        unsafe {
            self.gl.delete_program(self.debug_program.id);
            for program in self.effect_programs.drain(..) {
                self.gl.delete_program(program.id);
            }
            self.gl.delete_framebuffer(self.offscreen_fbo);
            self.gl.delete_texture(self.offscreen_texture);
            self.gl.delete_vertex_array(self.mesh_vao);
            self.gl.delete_buffer(self.mesh_vbo);
            self.gl.delete_buffer(self.mesh_ibo);
            self.gl.delete_vertex_array(self.quad_vao);
            self.gl.delete_buffer(self.quad_vbo);
        }
        log::debug!("Renderer resources released");
    }
}

/// Shared renderer state type used across the application
pub type SharedRendererState = Rc<RefCell<Option<RendererState>>>;

/// Create a new shared renderer state
pub fn new_shared_state() -> SharedRendererState {
    Rc::new(RefCell::new(None))
}

/// Create a GLArea widget connected to the shared renderer state. GPU
/// objects are created on realize and released on unrealize; a tick
/// callback redraws once per frame clock tick.
pub fn create_gl_area(
    state: SharedRendererState,
    controls: Rc<RefCell<ControlState>>,
    mesh: Rc<Mesh>,
    on_event: impl Fn(RendererEvent) + 'static,
) -> GLArea {
    let on_event = Rc::new(on_event);

    let gl_area = GLArea::new();
    gl_area.set_use_es(true);
    gl_area.set_auto_render(true);
    gl_area.set_has_depth_buffer(true);
    gl_area.set_has_stencil_buffer(false);
    gl_area.set_vexpand(true);
    gl_area.set_hexpand(true);

    // Realize: create GL context and upload the mesh and programs
    let state_realize = state.clone();
    let on_event_realize = on_event.clone();
    gl_area.connect_realize(move |area| {
        area.make_current();
        if let Some(error) = area.error() {
            on_event_realize(RendererEvent::SetupFailed(format!(
                "GLArea realize error: {}",
                error
            )));
            return;
        }
        if !gl_loader::available() {
            on_event_realize(RendererEvent::SetupFailed(
                "Could not find eglGetProcAddress or glXGetProcAddressARB".to_string(),
            ));
            return;
        }

        let gl = unsafe {
            glow::Context::from_loader_function_cstr(|name| gl_loader::get_proc_address(name))
        };

        match RendererState::new(gl, &mesh) {
            Ok(renderer) => *state_realize.borrow_mut() = Some(renderer),
            Err(e) => on_event_realize(RendererEvent::SetupFailed(e)),
        }
    });

    // Unrealize: release GPU objects while the context is still current
    let state_unrealize = state.clone();
    gl_area.connect_unrealize(move |area| {
        area.make_current();
        *state_unrealize.borrow_mut() = None;
    });

    gl_area.add_tick_callback(|area, _clock| {
        area.queue_render();
        glib::ControlFlow::Continue
    });

    // Render callback
    let state_render = state.clone();
    gl_area.connect_render(move |area, _ctx| {
        let scale = area.scale_factor();
        let width = area.width() * scale;
        let height = area.height() * scale;

        if let Some(ref mut renderer) = *state_render.borrow_mut() {
            renderer.render(&controls.borrow(), width, height);

            if let Some(path) = renderer.pending_capture.take() {
                let pixels = renderer.read_pixels(width, height);
                let result = export::save_png(&pixels, width as u32, height as u32, &path)
                    .map(|()| path);
                on_event(RendererEvent::Captured(result));
            }
        }

        glib::Propagation::Stop
    });

    gl_area
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offscreen_target_has_fixed_window_size() {
        assert_eq!(OFFSCREEN_SIZE, config::WINDOW_SIZE);
        assert!(OFFSCREEN_SIZE.0 > 0 && OFFSCREEN_SIZE.1 > 0);
    }
}
