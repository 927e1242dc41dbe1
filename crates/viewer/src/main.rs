#![deny(unsafe_code)]
//! Interactive viewer for the noisebed GLSL noise testbed.
//!
//! Opens a GLFW window, compiles the noise shading program, uploads the
//! lookup textures, and renders a spinning lit sphere whose surface is
//! shaded by GPU-evaluated Perlin noise. Keys (polled once per frame):
//!
//! - `A` / `S` -- shader time update on / off
//! - `Z` / `X` -- scene animation on / off
//! - `Q` / `E` -- octave count up / down (debounced)
//! - `Esc`     -- quit
//!
//! `--dump-lut <dir>` instead writes the lookup tables as PNGs and exits
//! without opening a window.

mod diffuse;
#[cfg(feature = "png")]
mod dump;
mod error;
mod input;
mod mesh;
mod scene;

use std::path::PathBuf;
use std::process;

use clap::Parser;
use glfw::Context as _;

use noisebed_core::params::{OCTAVES_MAX, OCTAVES_MIN};
use noisebed_core::render::{
    FrameRenderer, GpuContext, NoiseTextures, ShaderProgram, TextureUnits,
};
use noisebed_core::{FpsCounter, ParameterController, RenderParameters};

use error::CliError;
use scene::Scene;

/// Base window title; the FPS counter appends the live numbers.
const WINDOW_LABEL: &str = "GLSL Perlin noise";

#[derive(Parser)]
#[command(name = "noisebed", about = "GLSL noise testbed viewer")]
struct Cli {
    /// Window width in pixels.
    #[arg(long, default_value_t = 640)]
    width: u32,

    /// Window height in pixels.
    #[arg(long, default_value_t = 480)]
    height: u32,

    /// Vertex shader path.
    #[arg(long, default_value = "shaders/noise.vert")]
    vert: PathBuf,

    /// Fragment shader path.
    #[arg(long, default_value = "shaders/noise.frag")]
    frag: PathBuf,

    /// Initial fBm octave count.
    #[arg(long, default_value_t = 8)]
    octaves: u32,

    /// Print the effective configuration as JSON before starting.
    #[arg(long)]
    json: bool,

    /// Write the lookup tables as PNGs into DIR and exit.
    #[cfg(feature = "png")]
    #[arg(long, value_name = "DIR")]
    dump_lut: Option<PathBuf>,
}

fn run(cli: &Cli) -> Result<(), CliError> {
    if !(OCTAVES_MIN..=OCTAVES_MAX).contains(&cli.octaves) {
        return Err(CliError::Input(format!(
            "--octaves {} is outside [{OCTAVES_MIN}, {OCTAVES_MAX}]",
            cli.octaves
        )));
    }

    if cli.json {
        let params = RenderParameters {
            octaves: cli.octaves,
            ..RenderParameters::default()
        };
        let info = serde_json::json!({
            "width": cli.width,
            "height": cli.height,
            "vert": cli.vert.display().to_string(),
            "frag": cli.frag.display().to_string(),
            "params": params,
        });
        println!(
            "{}",
            serde_json::to_string_pretty(&info).map_err(|e| CliError::Io(e.to_string()))?
        );
    }

    #[cfg(feature = "png")]
    if let Some(dir) = &cli.dump_lut {
        return dump::write_luts(dir);
    }

    run_viewer(cli)
}

fn run_viewer(cli: &Cli) -> Result<(), CliError> {
    let mut glfw = glfw::init(glfw::fail_on_errors!())
        .map_err(|e| CliError::Context(format!("failed to initialize GLFW: {e}")))?;

    glfw.window_hint(glfw::WindowHint::ContextVersion(3, 3));
    glfw.window_hint(glfw::WindowHint::OpenGlProfile(
        glfw::OpenGlProfileHint::Core,
    ));
    glfw.window_hint(glfw::WindowHint::OpenGlForwardCompat(true));

    let (mut window, _events) = glfw
        .create_window(
            cli.width,
            cli.height,
            WINDOW_LABEL,
            glfw::WindowMode::Windowed,
        )
        .ok_or_else(|| CliError::Context("failed to open the OpenGL window".into()))?;

    window.make_current();
    glfw.set_swap_interval(glfw::SwapInterval::Sync(1));

    let gpu = GpuContext::new(load_gl(&mut window))?;
    let gl = gpu.gl();

    // Startup order matters: the capability probe already passed, the
    // program must link before anything draws with it, and the textures
    // claim their units before the first frame reads them.
    let mut program = ShaderProgram::from_files(gl, &cli.vert, &cli.frag)?;
    let units = TextureUnits::default();
    let textures = NoiseTextures::new(gl, &units, diffuse::DIFFUSE_RGB)?;
    let renderer = FrameRenderer::new(units);
    let scene =
        Scene::new(gl).map_err(|e| CliError::Context(format!("mesh upload failed: {e}")))?;

    let mut controller = ParameterController::new(cli.octaves);
    let mut fps = FpsCounter::new(WINDOW_LABEL);

    init_gl_state(gl);

    // Scene time freezes while animation is off; the shader `time`
    // uniform is governed separately by the update_time toggle.
    let mut scene_time = 0.0f32;

    while !window.should_close() {
        let now = glfw.get_time();

        if let Some(title) = fps.tick(now, controller.params().octaves) {
            window.set_title(&title);
        }

        if controller.params().animate {
            scene_time = now as f32;
        }

        let (fb_width, fb_height) = window.get_framebuffer_size();
        clear_frame(gl, fb_width, fb_height);

        renderer.render(gl, &mut program, controller.params(), now, |gl, program| {
            scene.draw(gl, program, scene_time, fb_width, fb_height);
        });

        window.swap_buffers();
        glfw.poll_events();

        let keys = input::InputState::poll(&window);
        input::apply(&keys, &mut controller, now);
        if keys.quit {
            window.set_should_close(true);
        }
    }

    scene.destroy(gl);
    textures.destroy(gl);
    program.destroy(gl);
    Ok(())
}

/// Resolves GL entry points through the window's context loader.
#[allow(unsafe_code)]
fn load_gl(window: &mut glfw::Window) -> glow::Context {
    // SAFETY: the window's GL context was made current on this thread just
    // before this call, which is the contract from_loader_function requires.
    unsafe { glow::Context::from_loader_function(|name| window.get_proc_address(name) as *const _) }
}

/// One-time pipeline state: back-face culling, depth testing, clear color.
#[allow(unsafe_code)]
fn init_gl_state(gl: &glow::Context) {
    use glow::HasContext;
    // SAFETY: plain state setters on a live context.
    unsafe {
        gl.enable(glow::CULL_FACE);
        gl.enable(glow::DEPTH_TEST);
        gl.clear_color(0.0, 0.1, 0.3, 1.0);
    }
}

/// Per-frame viewport update and buffer clear.
#[allow(unsafe_code)]
fn clear_frame(gl: &glow::Context, width: i32, height: i32) {
    use glow::HasContext;
    // SAFETY: plain state setters on a live context.
    unsafe {
        gl.viewport(0, 0, width, height);
        gl.clear(glow::COLOR_BUFFER_BIT | glow::DEPTH_BUFFER_BIT);
    }
}

fn main() {
    let cli = Cli::parse();
    if let Err(e) = run(&cli) {
        eprintln!("error: {e}");
        process::exit(e.exit_code());
    }
}
