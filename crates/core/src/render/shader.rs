//! Shading-program lifecycle: source loading, compilation, linking, and
//! uniform lookup.
//!
//! The pipeline is strictly forward: source text is read from a file,
//! compiled per stage, and linked into a [`ShaderProgram`]; there is no
//! hot-reload path back to an earlier state. Failures carry the driver's
//! diagnostic log. Uniform locations are resolved lazily and memoized per
//! name; a name the driver reports inactive resolves to `None`, which is
//! not an error.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Errors from the shading-program lifecycle.
#[derive(Debug, Clone, Error)]
pub enum ShaderError {
    /// A shader source file could not be opened or read.
    #[error("cannot read shader source {path}: {message}")]
    SourceRead {
        /// Path that failed to load.
        path: PathBuf,
        /// The underlying I/O error text.
        message: String,
    },
    /// A shader stage failed to compile.
    #[error("shader compile error ({stage}):\n{log}")]
    Compile {
        /// The stage that failed ("vertex" or "fragment").
        stage: &'static str,
        /// The driver's info log, with numbered source lines prepended.
        log: String,
    },
    /// A program failed to link.
    #[error("shader link error:\n{0}")]
    Link(String),
}

/// Reads a stage's full source text from `path`.
///
/// # Errors
///
/// Returns `ShaderError::SourceRead` if the file cannot be opened or read.
pub fn load_source(path: &Path) -> Result<String, ShaderError> {
    std::fs::read_to_string(path).map_err(|e| ShaderError::SourceRead {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Formats a compile failure for human-readable debugging.
///
/// Prepends right-aligned line numbers to each line of `source` and
/// appends the driver's `log`, so error messages that reference line
/// numbers can be correlated with the actual GLSL. Either argument may be
/// empty.
pub fn format_shader_error(source: &str, log: &str) -> String {
    let lines: Vec<&str> = source.lines().collect();
    let width = lines.len().to_string().len().max(1);

    let mut out = String::new();
    for (i, line) in lines.iter().enumerate() {
        out.push_str(&format!("{:>width$}: {line}\n", i + 1));
    }
    if !out.is_empty() && !log.is_empty() {
        out.push('\n');
    }
    out.push_str(log);
    out
}

fn stage_name(shader_type: u32) -> &'static str {
    match shader_type {
        glow::VERTEX_SHADER => "vertex",
        glow::FRAGMENT_SHADER => "fragment",
        _ => "unknown",
    }
}

/// Compiles a single shader stage.
///
/// # Errors
///
/// Returns `ShaderError::Compile` with the formatted driver log if the
/// source fails to compile.
#[allow(unsafe_code)]
pub fn compile_shader(
    gl: &glow::Context,
    shader_type: u32,
    source: &str,
) -> Result<glow::Shader, ShaderError> {
    use glow::HasContext;

    let stage = stage_name(shader_type);

    // SAFETY: glow wraps raw GL calls as unsafe. We pass valid stage
    // constants and source strings; the shader object is deleted on the
    // failure path.
    let shader = unsafe {
        gl.create_shader(shader_type)
            .map_err(|log| ShaderError::Compile { stage, log })?
    };

    unsafe {
        gl.shader_source(shader, source);
        gl.compile_shader(shader);
    }

    if unsafe { gl.get_shader_compile_status(shader) } {
        Ok(shader)
    } else {
        let info_log = unsafe { gl.get_shader_info_log(shader) };
        unsafe { gl.delete_shader(shader) };
        Err(ShaderError::Compile {
            stage,
            log: format_shader_error(source, &info_log),
        })
    }
}

/// Links a vertex and fragment shader into a program.
///
/// Attaches both stages, links, and detaches them afterward (the program
/// retains its own copies).
///
/// # Errors
///
/// Returns `ShaderError::Link` with the driver log if linking fails.
#[allow(unsafe_code)]
pub fn link_program(
    gl: &glow::Context,
    vertex: glow::Shader,
    fragment: glow::Shader,
) -> Result<glow::Program, ShaderError> {
    use glow::HasContext;

    // SAFETY: glow wraps raw GL calls as unsafe. The shader handles come
    // from successful compile_shader calls; the program is deleted on the
    // failure path.
    let program = unsafe { gl.create_program().map_err(ShaderError::Link)? };

    unsafe {
        gl.attach_shader(program, vertex);
        gl.attach_shader(program, fragment);
        gl.link_program(program);

        // Detach regardless of link outcome -- the program owns copies.
        gl.detach_shader(program, vertex);
        gl.detach_shader(program, fragment);
    }

    if unsafe { gl.get_program_link_status(program) } {
        Ok(program)
    } else {
        let info_log = unsafe { gl.get_program_info_log(program) };
        unsafe { gl.delete_program(program) };
        Err(ShaderError::Link(info_log))
    }
}

/// A linked shading program with a memoized uniform-location table.
///
/// Instances exist only for programs whose link succeeded, so every
/// `ShaderProgram` is safe to bind and query. Uniform lookups go through
/// [`ShaderProgram::uniform`], which caches the driver's answer per name;
/// a cached `None` means the program has no such active uniform and the
/// caller skips the write.
pub struct ShaderProgram {
    program: glow::Program,
    uniforms: HashMap<String, Option<glow::UniformLocation>>,
}

impl ShaderProgram {
    /// Loads, compiles, and links a program from two source files.
    ///
    /// # Errors
    ///
    /// Returns the first `ShaderError` encountered: a read failure, a
    /// per-stage compile failure, or a link failure.
    pub fn from_files(
        gl: &glow::Context,
        vertex_path: &Path,
        fragment_path: &Path,
    ) -> Result<Self, ShaderError> {
        let vertex_src = load_source(vertex_path)?;
        let fragment_src = load_source(fragment_path)?;
        Self::from_sources(gl, &vertex_src, &fragment_src)
    }

    /// Compiles and links a program from in-memory sources.
    ///
    /// Stage objects are deleted after linking regardless of the outcome;
    /// the linked program retains its own copies.
    ///
    /// # Errors
    ///
    /// Returns `ShaderError::Compile` if either stage fails, or
    /// `ShaderError::Link` if linking fails.
    #[allow(unsafe_code)]
    pub fn from_sources(
        gl: &glow::Context,
        vertex_src: &str,
        fragment_src: &str,
    ) -> Result<Self, ShaderError> {
        use glow::HasContext;

        let vert = compile_shader(gl, glow::VERTEX_SHADER, vertex_src)?;
        let frag = match compile_shader(gl, glow::FRAGMENT_SHADER, fragment_src) {
            Ok(f) => f,
            Err(e) => {
                // SAFETY: vert is a valid handle from a successful compile.
                unsafe { gl.delete_shader(vert) };
                return Err(e);
            }
        };

        let linked = link_program(gl, vert, frag);

        // SAFETY: both handles are valid; the linked program keeps its own
        // copies, so deleting the stage objects here is correct.
        unsafe {
            gl.delete_shader(vert);
            gl.delete_shader(frag);
        }

        Ok(Self {
            program: linked?,
            uniforms: HashMap::new(),
        })
    }

    /// The underlying program handle.
    pub fn program(&self) -> glow::Program {
        self.program
    }

    /// Resolves a uniform location by name, memoizing the answer.
    ///
    /// Returns `None` when the program has no active uniform of that name
    /// (declared-but-optimized-out uniforms included); callers treat that
    /// as "skip the write", not as an error.
    #[allow(unsafe_code)]
    pub fn uniform(&mut self, gl: &glow::Context, name: &str) -> Option<glow::UniformLocation> {
        use glow::HasContext;

        if let Some(cached) = self.uniforms.get(name) {
            return cached.clone();
        }
        // SAFETY: self.program is a valid linked program handle.
        let location = unsafe { gl.get_uniform_location(self.program, name) };
        self.uniforms.insert(name.to_owned(), location.clone());
        location
    }

    /// Number of uniform names resolved so far (cached hits included).
    pub fn cached_uniforms(&self) -> usize {
        self.uniforms.len()
    }

    /// Makes this program current.
    #[allow(unsafe_code)]
    pub fn bind(&self, gl: &glow::Context) {
        use glow::HasContext;
        // SAFETY: self.program is a valid linked program handle.
        unsafe { gl.use_program(Some(self.program)) };
    }

    /// Clears the current program binding.
    #[allow(unsafe_code)]
    pub fn unbind(gl: &glow::Context) {
        use glow::HasContext;
        // SAFETY: clearing the binding is always valid.
        unsafe { gl.use_program(None) };
    }

    /// Deletes the program, releasing the GPU object.
    ///
    /// Must be called before dropping if deterministic cleanup is wanted;
    /// GL objects have no destructor on the Rust side.
    #[allow(unsafe_code)]
    pub fn destroy(&self, gl: &glow::Context) {
        use glow::HasContext;
        // SAFETY: self.program is a valid program handle from linking.
        unsafe { gl.delete_program(self.program) };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // --- load_source tests ---

    #[test]
    fn load_source_reports_missing_file_with_path() {
        let err = load_source(Path::new("no/such/shader.vert")).unwrap_err();
        match &err {
            ShaderError::SourceRead { path, .. } => {
                assert_eq!(path, Path::new("no/such/shader.vert"));
            }
            other => panic!("expected SourceRead, got {other:?}"),
        }
        let msg = format!("{err}");
        assert!(
            msg.contains("no/such/shader.vert"),
            "path missing from: {msg}"
        );
    }

    // --- format_shader_error tests ---

    #[test]
    fn format_shader_error_prepends_line_numbers() {
        let source = "#version 330 core\nvoid main() {\n}\n";
        let log = "ERROR: 0:2: syntax error";
        let formatted = format_shader_error(source, log);

        assert!(
            formatted.contains("1: #version 330 core"),
            "expected line 1 with content, got:\n{formatted}"
        );
        assert!(
            formatted.contains("2: void main() {"),
            "expected line 2 with content, got:\n{formatted}"
        );
        assert!(
            formatted.contains(log),
            "expected original log in output, got:\n{formatted}"
        );
    }

    #[test]
    fn format_shader_error_handles_empty_source() {
        let formatted = format_shader_error("", "some error");
        assert_eq!(formatted, "some error");
    }

    #[test]
    fn format_shader_error_handles_empty_log() {
        let formatted = format_shader_error("void main() {}", "");
        assert!(
            formatted.contains("1: void main() {}"),
            "expected numbered source line, got:\n{formatted}"
        );
    }

    #[test]
    fn format_shader_error_handles_both_empty() {
        assert!(format_shader_error("", "").is_empty());
    }

    #[test]
    fn format_shader_error_right_aligns_line_numbers() {
        let source = (1..=12)
            .map(|i| format!("line {i}"))
            .collect::<Vec<_>>()
            .join("\n");
        let formatted = format_shader_error(&source, "err");
        let lines: Vec<&str> = formatted.lines().collect();

        assert!(
            lines[0].starts_with(" 1: "),
            "expected right-aligned single digit, got: '{}'",
            lines[0]
        );
        assert!(
            lines[9].starts_with("10: "),
            "expected no padding for double digit, got: '{}'",
            lines[9]
        );
    }

    // --- ShaderError Display tests ---

    #[test]
    fn compile_error_display_includes_stage_and_log() {
        let err = ShaderError::Compile {
            stage: "fragment",
            log: "undeclared identifier".into(),
        };
        let msg = format!("{err}");
        assert!(msg.contains("fragment"), "missing stage in: {msg}");
        assert!(
            msg.contains("undeclared identifier"),
            "missing log in: {msg}"
        );
    }

    #[test]
    fn link_error_display_includes_log() {
        let err = ShaderError::Link("varying mismatch".into());
        let msg = format!("{err}");
        assert!(msg.contains("varying mismatch"), "missing log in: {msg}");
    }

    #[test]
    fn shader_error_implements_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<ShaderError>();
    }

    // --- GL-dependent tests ---

    #[test]
    #[ignore = "requires GL context"]
    fn from_sources_links_minimal_program() {
        // Would test: a trivial vertex + fragment pair links, and
        // uniform() returns Some for a declared-and-used "time" uniform
        // and None for an undeclared name.
    }

    #[test]
    #[ignore = "requires GL context"]
    fn uniform_is_memoized_across_queries() {
        // Would test: two uniform("time") calls issue one driver query
        // and cached_uniforms() stays at 1.
    }
}
