//! Recording driver and log capture used by unit tests.
//!
//! Every call is appended to a log; handles are sequential integers starting
//! at 1. Failures (allocation, compile, link, map) can be scripted up front.

use std::cell::{Cell, RefCell};
use std::collections::{HashMap, HashSet};
use std::rc::Rc;
use std::sync::{Mutex, Once};

use crate::driver::Driver;

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    CreateShader { ty: u32, id: u32 },
    DeleteShader(u32),
    ShaderSource(u32, String),
    CompileShader(u32),
    CreateProgram(u32),
    DeleteProgram(u32),
    AttachShader { program: u32, shader: u32 },
    BindAttribLocation { program: u32, index: u32, name: String },
    LinkProgram(u32),
    UseProgram(Option<u32>),
    UniformLocation { program: u32, name: String },
    CreateVertexArray(u32),
    DeleteVertexArray(u32),
    BindVertexArray(Option<u32>),
    CreateBuffer(u32),
    DeleteBuffer(u32),
    BindBuffer { target: u32, buffer: Option<u32> },
    BufferDataSize { target: u32, size: usize, usage: u32 },
    BufferData { target: u32, size: usize, data: Vec<u8>, usage: u32 },
    BufferSubData { target: u32, offset: usize, data: Vec<u8> },
    WriteMapped { target: u32, offset: usize, data: Vec<u8>, access: u32 },
    EnableAttrib(u32),
    AttribPointer {
        index: u32,
        size: i32,
        data_type: u32,
        normalized: bool,
        stride: usize,
        offset: usize,
    },
    Uniform1i(i32, i32),
    Uniform1f(i32, f32),
    Uniform4f(i32, [f32; 4]),
    UniformMat4(i32, bool, [f32; 16]),
    DrawArrays { mode: u32, first: usize, count: usize },
}

#[derive(Default)]
pub struct FakeDriver {
    calls: RefCell<Vec<Call>>,
    next_id: Cell<u32>,
    live: Cell<i64>,
    shader_types: RefCell<HashMap<u32, u32>>,
    compiled: RefCell<HashSet<u32>>,
    failing_creates: RefCell<HashSet<&'static str>>,
    compile_failure: RefCell<Option<(u32, String)>>,
    compile_log: RefCell<String>,
    link_failure: RefCell<Option<String>>,
    link_log: RefCell<String>,
    map_fails: Cell<bool>,
    uniforms: RefCell<HashMap<String, i32>>,
}

impl FakeDriver {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    pub fn count(&self, pred: impl Fn(&Call) -> bool) -> usize {
        self.calls.borrow().iter().filter(|c| pred(c)).count()
    }

    pub fn clear_calls(&self) {
        self.calls.borrow_mut().clear();
    }

    /// Objects created and not yet deleted.
    pub fn live_objects(&self) -> i64 {
        self.live.get()
    }

    /// Makes `create_<kind>` fail (`"shader"`, `"program"`, `"buffer"`,
    /// `"vertex array"`).
    pub fn fail_create(&self, kind: &'static str) {
        self.failing_creates.borrow_mut().insert(kind);
    }

    /// Makes compilation of shaders of GL type `ty` fail with `log`.
    pub fn fail_compile(&self, ty: u32, log: &str) {
        *self.compile_failure.borrow_mut() = Some((ty, log.to_owned()));
    }

    /// Info log reported for successful compiles.
    pub fn set_compile_log(&self, log: &str) {
        *self.compile_log.borrow_mut() = log.to_owned();
    }

    pub fn fail_link(&self, log: &str) {
        *self.link_failure.borrow_mut() = Some(log.to_owned());
    }

    /// Info log reported for successful links.
    pub fn set_link_log(&self, log: &str) {
        *self.link_log.borrow_mut() = log.to_owned();
    }

    pub fn fail_map(&self) {
        self.map_fails.set(true);
    }

    /// Declares an active uniform in every linked program.
    pub fn add_uniform(&self, name: &str, location: i32) {
        self.uniforms.borrow_mut().insert(name.to_owned(), location);
    }

    fn record(&self, call: Call) {
        self.calls.borrow_mut().push(call);
    }

    fn alloc(&self, kind: &'static str) -> Result<u32, String> {
        if self.failing_creates.borrow().contains(kind) {
            return Err(format!("out of {kind} names"));
        }
        let id = self.next_id.get() + 1;
        self.next_id.set(id);
        self.live.set(self.live.get() + 1);
        Ok(id)
    }

    fn release(&self) {
        self.live.set(self.live.get() - 1);
    }
}

impl Driver for FakeDriver {
    type Shader = u32;
    type Program = u32;
    type Buffer = u32;
    type VertexArray = u32;
    type UniformLocation = i32;

    fn create_shader(&self, shader_type: u32) -> Result<u32, String> {
        let id = self.alloc("shader")?;
        self.shader_types.borrow_mut().insert(id, shader_type);
        self.record(Call::CreateShader { ty: shader_type, id });
        Ok(id)
    }

    fn delete_shader(&self, shader: u32) {
        self.release();
        self.record(Call::DeleteShader(shader));
    }

    fn shader_source(&self, shader: u32, source: &str) {
        self.record(Call::ShaderSource(shader, source.to_owned()));
    }

    fn compile_shader(&self, shader: u32) {
        let ty = self.shader_types.borrow().get(&shader).copied();
        let fails = matches!(&*self.compile_failure.borrow(), Some((t, _)) if Some(*t) == ty);
        if !fails {
            self.compiled.borrow_mut().insert(shader);
        }
        self.record(Call::CompileShader(shader));
    }

    fn shader_compile_status(&self, shader: u32) -> bool {
        self.compiled.borrow().contains(&shader)
    }

    fn shader_info_log(&self, shader: u32) -> String {
        if self.compiled.borrow().contains(&shader) {
            return self.compile_log.borrow().clone();
        }
        match &*self.compile_failure.borrow() {
            // Drivers commonly include the terminating NUL in the reported log.
            Some((_, log)) => format!("{log}\n\0"),
            None => String::new(),
        }
    }

    fn create_program(&self) -> Result<u32, String> {
        let id = self.alloc("program")?;
        self.record(Call::CreateProgram(id));
        Ok(id)
    }

    fn delete_program(&self, program: u32) {
        self.release();
        self.record(Call::DeleteProgram(program));
    }

    fn attach_shader(&self, program: u32, shader: u32) {
        self.record(Call::AttachShader { program, shader });
    }

    fn bind_attrib_location(&self, program: u32, index: u32, name: &str) {
        self.record(Call::BindAttribLocation { program, index, name: name.to_owned() });
    }

    fn link_program(&self, program: u32) {
        self.record(Call::LinkProgram(program));
    }

    fn program_link_status(&self, _program: u32) -> bool {
        self.link_failure.borrow().is_none()
    }

    fn program_info_log(&self, _program: u32) -> String {
        match &*self.link_failure.borrow() {
            Some(log) => log.clone(),
            None => self.link_log.borrow().clone(),
        }
    }

    fn use_program(&self, program: Option<u32>) {
        self.record(Call::UseProgram(program));
    }

    fn uniform_location(&self, program: u32, name: &str) -> Option<i32> {
        self.record(Call::UniformLocation { program, name: name.to_owned() });
        self.uniforms.borrow().get(name).copied()
    }

    fn create_vertex_array(&self) -> Result<u32, String> {
        let id = self.alloc("vertex array")?;
        self.record(Call::CreateVertexArray(id));
        Ok(id)
    }

    fn delete_vertex_array(&self, vao: u32) {
        self.release();
        self.record(Call::DeleteVertexArray(vao));
    }

    fn bind_vertex_array(&self, vao: Option<u32>) {
        self.record(Call::BindVertexArray(vao));
    }

    fn create_buffer(&self) -> Result<u32, String> {
        let id = self.alloc("buffer")?;
        self.record(Call::CreateBuffer(id));
        Ok(id)
    }

    fn delete_buffer(&self, buffer: u32) {
        self.release();
        self.record(Call::DeleteBuffer(buffer));
    }

    fn bind_buffer(&self, target: u32, buffer: Option<u32>) {
        self.record(Call::BindBuffer { target, buffer });
    }

    fn buffer_data_size(&self, target: u32, size: usize, usage: u32) {
        self.record(Call::BufferDataSize { target, size, usage });
    }

    fn buffer_data(&self, target: u32, size: usize, data: &[u8], usage: u32) {
        self.record(Call::BufferData { target, size, data: data.to_vec(), usage });
    }

    fn buffer_sub_data(&self, target: u32, offset: usize, data: &[u8]) {
        self.record(Call::BufferSubData { target, offset, data: data.to_vec() });
    }

    fn write_mapped_range(&self, target: u32, offset: usize, data: &[u8], access: u32) -> bool {
        if self.map_fails.get() {
            return false;
        }
        self.record(Call::WriteMapped { target, offset, data: data.to_vec(), access });
        true
    }

    fn enable_vertex_attrib_array(&self, index: u32) {
        self.record(Call::EnableAttrib(index));
    }

    fn vertex_attrib_pointer(
        &self,
        index: u32,
        size: i32,
        data_type: u32,
        normalized: bool,
        stride: usize,
        offset: usize,
    ) {
        self.record(Call::AttribPointer { index, size, data_type, normalized, stride, offset });
    }

    fn uniform_1_i32(&self, location: &i32, x: i32) {
        self.record(Call::Uniform1i(*location, x));
    }

    fn uniform_1_f32(&self, location: &i32, x: f32) {
        self.record(Call::Uniform1f(*location, x));
    }

    fn uniform_4_f32(&self, location: &i32, x: f32, y: f32, z: f32, w: f32) {
        self.record(Call::Uniform4f(*location, [x, y, z, w]));
    }

    fn uniform_matrix_4_f32(&self, location: &i32, transpose: bool, v: &[f32; 16]) {
        self.record(Call::UniformMat4(*location, transpose, *v));
    }

    fn draw_arrays(&self, mode: u32, first: usize, count: usize) {
        self.record(Call::DrawArrays { mode, first, count });
    }
}

// ── log capture ─────────────────────────────────────────────────────────────

static CAPTURED: Mutex<Vec<(log::Level, String)>> = Mutex::new(Vec::new());
static CAPTURE_INSTALL: Once = Once::new();

struct CaptureLogger;

impl log::Log for CaptureLogger {
    fn enabled(&self, _metadata: &log::Metadata<'_>) -> bool {
        true
    }

    fn log(&self, record: &log::Record<'_>) {
        if let Ok(mut records) = CAPTURED.lock() {
            records.push((record.level(), record.args().to_string()));
        }
    }

    fn flush(&self) {}
}

static CAPTURE_LOGGER: CaptureLogger = CaptureLogger;

/// Installs the capturing logger as the process-wide logger.
///
/// Call before anything else in the test binary can install a logger.
/// Records from every test thread land in one list, so assertions should
/// look for text unique to the test.
pub fn capture_logs() {
    CAPTURE_INSTALL.call_once(|| {
        if log::set_logger(&CAPTURE_LOGGER).is_ok() {
            log::set_max_level(log::LevelFilter::Trace);
        }
    });
}

/// Whether a record at `level` containing `needle` has been captured.
pub fn logged(level: log::Level, needle: &str) -> bool {
    CAPTURED
        .lock()
        .map(|records| records.iter().any(|(l, msg)| *l == level && msg.contains(needle)))
        .unwrap_or(false)
}
