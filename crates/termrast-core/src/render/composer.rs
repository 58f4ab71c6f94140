//! Frame composition: runs the pipeline over the whole scene and encodes
//! the result as one ANSI truecolor byte stream.

use super::clip::{clip_near, fan};
use super::raster::{rasterize, FrameBuffers};
use super::shade::to_rgb8;
use super::ClipVertex;
use crate::scene::{behavior, AssetLoader, Display, Triangle};
use glam::Vec3;
use std::io::{self, Write};

/// Owns the output sink and the encoding state that persists across frames.
///
/// One instance is constructed at startup and driven once per frame. The
/// per-frame glyph/color/depth buffers are allocated in `render_frame` and
/// dropped before it returns; the scratch encoding buffer is reused.
pub struct Composer<W: Write> {
    sink: W,
    /// Foreground color of the most recently encoded cell.
    last_color: Option<[u8; 3]>,
    scratch: Vec<u8>,
    pub backface_culling: bool,
}

impl<W: Write> Composer<W> {
    pub fn new(sink: W) -> Self {
        Self {
            sink,
            last_color: None,
            scratch: Vec::new(),
            backface_culling: true,
        }
    }

    /// Render one frame: behaviors, camera matrix, per-triangle pipeline,
    /// frame-counter increment, then a single write of the encoded frame.
    ///
    /// A write error abandons the frame; the scene state (including the
    /// frame counter) still advances, and no partial output is emitted.
    pub fn render_frame(
        &mut self,
        display: &mut Display,
        loader: &mut dyn AssetLoader,
    ) -> io::Result<()> {
        behavior::run_behaviors(display, loader);

        let mut fb = FrameBuffers::new(display.width, display.height);
        let camera_matrix = display.camera.camera_matrix();
        let camera_pos = display.camera.position;

        for mesh in &display.meshes {
            for tri in &mesh.triangles {
                if self.backface_culling && is_backfacing(tri, camera_pos) {
                    continue;
                }

                let clip_tri = [
                    to_clip_vertex(tri, 0, &camera_matrix),
                    to_clip_vertex(tri, 1, &camera_matrix),
                    to_clip_vertex(tri, 2, &camera_matrix),
                ];

                for sub in fan(&clip_near(&clip_tri)) {
                    if fully_offscreen(&sub) {
                        continue;
                    }
                    rasterize(
                        &mut fb,
                        &sub,
                        &mesh.material,
                        &display.lights,
                        camera_pos,
                        display.background,
                    );
                }
            }
        }

        display.frame_count += 1;
        self.compose(&fb, display.background)
    }

    /// Encode the frame buffers and write them in one call: background SGR,
    /// cursor home, glyph rows with foreground SGRs on color changes, reset.
    fn compose(&mut self, fb: &FrameBuffers, background: Vec3) -> io::Result<()> {
        self.scratch.clear();
        self.last_color = None;

        let bg = to_rgb8(background);
        write!(self.scratch, "\x1b[48;2;{};{};{}m", bg[0], bg[1], bg[2])?;
        self.scratch.extend_from_slice(b"\x1b[H");

        let mut utf8 = [0u8; 4];
        for y in 0..fb.height {
            for x in 0..fb.width {
                let cell = (y * fb.width + x) as usize;
                let color = to_rgb8(fb.color[cell]);
                if self.last_color != Some(color) {
                    write!(
                        self.scratch,
                        "\x1b[38;2;{};{};{}m",
                        color[0], color[1], color[2]
                    )?;
                    self.last_color = Some(color);
                }
                self.scratch
                    .extend_from_slice(fb.glyphs[cell].encode_utf8(&mut utf8).as_bytes());
            }
            self.scratch.push(b'\n');
        }
        self.scratch.extend_from_slice(b"\x1b[0m");

        self.sink.write_all(&self.scratch)?;
        self.sink.flush()
    }

    /// Access the sink, e.g. to recover it after the loop ends.
    pub fn into_sink(self) -> W {
        self.sink
    }
}

fn to_clip_vertex(tri: &Triangle, corner: usize, camera_matrix: &glam::Mat4) -> ClipVertex {
    ClipVertex {
        clip: *camera_matrix * tri.pos[corner].extend(1.0),
        world: tri.pos[corner],
        normal: tri.normal[corner],
        uv: tri.uv[corner],
    }
}

/// Sign-only back-face test in world space: reject when the unnormalized
/// face normal and the camera-to-vertex vector agree in direction.
fn is_backfacing(tri: &Triangle, camera_pos: Vec3) -> bool {
    let n = (tri.pos[1] - tri.pos[0]).cross(tri.pos[2] - tri.pos[0]);
    let view = tri.pos[0] - camera_pos;
    n.dot(view) >= 0.0
}

/// True when all three vertices sit strictly beyond the same NDC half-space
/// on some axis; such triangles cannot touch the viewport.
fn fully_offscreen(tri: &[ClipVertex; 3]) -> bool {
    let ndc = [tri[0].ndc(), tri[1].ndc(), tri[2].ndc()];
    for axis in 0..3 {
        if ndc.iter().all(|p| p[axis] < -1.0) || ndc.iter().all(|p| p[axis] > 1.0) {
            return true;
        }
    }
    false
}
