use glow::HasContext;

use super::Driver;

/// Converts a byte size or offset to the `GLsizei`/`GLintptr` range glow expects.
///
/// Buffer sizes and offsets stay within `MAX_BUFFER_BYTES`; `VertexBuffer::new`
/// refuses larger stores.
#[inline]
fn gl_int(n: usize) -> i32 {
    debug_assert!(n <= i32::MAX as usize, "GL size {n} overflows i32");
    n as i32
}

// SAFETY (all methods): a `glow::Context` can only be built through glow's
// `unsafe` constructors, whose contract is that the context is current on the
// calling thread and the function pointers are valid. The wrappers hold it in
// an `Rc`, so it never leaves that thread. Argument validity (live handles,
// in-range sizes) is upheld by the owning wrapper types.
impl Driver for glow::Context {
    type Shader = glow::NativeShader;
    type Program = glow::NativeProgram;
    type Buffer = glow::NativeBuffer;
    type VertexArray = glow::NativeVertexArray;
    type UniformLocation = glow::NativeUniformLocation;

    fn create_shader(&self, shader_type: u32) -> Result<Self::Shader, String> {
        unsafe { HasContext::create_shader(self, shader_type) }
    }

    fn delete_shader(&self, shader: Self::Shader) {
        unsafe { HasContext::delete_shader(self, shader) }
    }

    fn shader_source(&self, shader: Self::Shader, source: &str) {
        unsafe { HasContext::shader_source(self, shader, source) }
    }

    fn compile_shader(&self, shader: Self::Shader) {
        unsafe { HasContext::compile_shader(self, shader) }
    }

    fn shader_compile_status(&self, shader: Self::Shader) -> bool {
        unsafe { self.get_shader_compile_status(shader) }
    }

    fn shader_info_log(&self, shader: Self::Shader) -> String {
        unsafe { self.get_shader_info_log(shader) }
    }

    fn create_program(&self) -> Result<Self::Program, String> {
        unsafe { HasContext::create_program(self) }
    }

    fn delete_program(&self, program: Self::Program) {
        unsafe { HasContext::delete_program(self, program) }
    }

    fn attach_shader(&self, program: Self::Program, shader: Self::Shader) {
        unsafe { HasContext::attach_shader(self, program, shader) }
    }

    fn bind_attrib_location(&self, program: Self::Program, index: u32, name: &str) {
        unsafe { HasContext::bind_attrib_location(self, program, index, name) }
    }

    fn link_program(&self, program: Self::Program) {
        unsafe { HasContext::link_program(self, program) }
    }

    fn program_link_status(&self, program: Self::Program) -> bool {
        unsafe { self.get_program_link_status(program) }
    }

    fn program_info_log(&self, program: Self::Program) -> String {
        unsafe { self.get_program_info_log(program) }
    }

    fn use_program(&self, program: Option<Self::Program>) {
        unsafe { HasContext::use_program(self, program) }
    }

    fn uniform_location(
        &self,
        program: Self::Program,
        name: &str,
    ) -> Option<Self::UniformLocation> {
        unsafe { self.get_uniform_location(program, name) }
    }

    fn create_vertex_array(&self) -> Result<Self::VertexArray, String> {
        unsafe { HasContext::create_vertex_array(self) }
    }

    fn delete_vertex_array(&self, vao: Self::VertexArray) {
        unsafe { HasContext::delete_vertex_array(self, vao) }
    }

    fn bind_vertex_array(&self, vao: Option<Self::VertexArray>) {
        unsafe { HasContext::bind_vertex_array(self, vao) }
    }

    fn create_buffer(&self) -> Result<Self::Buffer, String> {
        unsafe { HasContext::create_buffer(self) }
    }

    fn delete_buffer(&self, buffer: Self::Buffer) {
        unsafe { HasContext::delete_buffer(self, buffer) }
    }

    fn bind_buffer(&self, target: u32, buffer: Option<Self::Buffer>) {
        unsafe { HasContext::bind_buffer(self, target, buffer) }
    }

    fn buffer_data_size(&self, target: u32, size: usize, usage: u32) {
        unsafe { HasContext::buffer_data_size(self, target, gl_int(size), usage) }
    }

    fn buffer_data(&self, target: u32, size: usize, data: &[u8], usage: u32) {
        debug_assert!(data.len() <= size);
        unsafe {
            if data.len() == size {
                self.buffer_data_u8_slice(target, data, usage);
            } else {
                HasContext::buffer_data_size(self, target, gl_int(size), usage);
                if !data.is_empty() {
                    self.buffer_sub_data_u8_slice(target, 0, data);
                }
            }
        }
    }

    fn buffer_sub_data(&self, target: u32, offset: usize, data: &[u8]) {
        unsafe { self.buffer_sub_data_u8_slice(target, gl_int(offset), data) }
    }

    fn write_mapped_range(&self, target: u32, offset: usize, data: &[u8], access: u32) -> bool {
        unsafe {
            let mapped = self.map_buffer_range(target, gl_int(offset), gl_int(data.len()), access);
            if mapped.is_null() {
                return false;
            }
            // The mapping covers exactly `data.len()` bytes and cannot alias
            // `data`, which lives in client memory.
            std::ptr::copy_nonoverlapping(data.as_ptr(), mapped, data.len());
            self.unmap_buffer(target);
        }
        true
    }

    fn enable_vertex_attrib_array(&self, index: u32) {
        unsafe { HasContext::enable_vertex_attrib_array(self, index) }
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
        unsafe {
            self.vertex_attrib_pointer_f32(
                index,
                size,
                data_type,
                normalized,
                gl_int(stride),
                gl_int(offset),
            )
        }
    }

    fn uniform_1_i32(&self, location: &Self::UniformLocation, x: i32) {
        unsafe { HasContext::uniform_1_i32(self, Some(location), x) }
    }

    fn uniform_1_f32(&self, location: &Self::UniformLocation, x: f32) {
        unsafe { HasContext::uniform_1_f32(self, Some(location), x) }
    }

    fn uniform_4_f32(&self, location: &Self::UniformLocation, x: f32, y: f32, z: f32, w: f32) {
        unsafe { HasContext::uniform_4_f32(self, Some(location), x, y, z, w) }
    }

    fn uniform_matrix_4_f32(&self, location: &Self::UniformLocation, transpose: bool, v: &[f32; 16]) {
        unsafe { self.uniform_matrix_4_f32_slice(Some(location), transpose, v) }
    }

    fn draw_arrays(&self, mode: u32, first: usize, count: usize) {
        unsafe { HasContext::draw_arrays(self, mode, gl_int(first), gl_int(count)) }
    }
}
