use xxhash_rust::xxh3::Xxh3;

use crate::{
    eval::evaluator::{FrameState, ResolvedElement, ResolvedScene},
    foundation::core::{Affine, Rgba8},
    scene::model::ElementKind,
    scene::transition::ResolvedTransition,
};

const XXH3_SEED: u64 = 0x8b5a_d4a0_c7d8_e9f1;

/// 128-bit digest of a resolved frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize)]
pub struct FrameFingerprint {
    /// High 64 bits.
    pub hi: u64,
    /// Low 64 bits.
    pub lo: u64,
}

/// Stable fingerprint over every resolved number in `state`.
///
/// The global frame index and scene-local frames are not hashed, so a frame that looks
/// identical to its neighbour has the same fingerprint.
pub fn fingerprint_frame(state: &FrameState) -> FrameFingerprint {
    let mut h = StableHasher::new();
    h.write_u32(state.canvas.width);
    h.write_u32(state.canvas.height);
    write_color(&mut h, state.background);
    h.write_u64(state.scenes.len() as u64);
    for scene in &state.scenes {
        write_scene(&mut h, scene);
    }
    h.finish()
}

struct StableHasher {
    inner: Xxh3,
}

impl StableHasher {
    fn new() -> Self {
        Self {
            inner: Xxh3::with_seed(XXH3_SEED),
        }
    }

    fn write_bytes(&mut self, b: &[u8]) {
        self.inner.update(b);
    }

    fn write_u8(&mut self, v: u8) {
        self.write_bytes(&[v]);
    }

    fn write_u32(&mut self, v: u32) {
        self.write_bytes(&v.to_le_bytes());
    }

    fn write_u64(&mut self, v: u64) {
        self.write_bytes(&v.to_le_bytes());
    }

    fn write_f64(&mut self, v: f64) {
        self.write_u64(v.to_bits());
    }

    fn write_str(&mut self, s: &str) {
        self.write_u64(s.len() as u64);
        self.write_bytes(s.as_bytes());
    }

    fn finish(self) -> FrameFingerprint {
        let v = self.inner.digest128();
        FrameFingerprint {
            hi: (v >> 64) as u64,
            lo: v as u64,
        }
    }
}

fn write_color(h: &mut StableHasher, c: Rgba8) {
    h.write_bytes(&[c.r, c.g, c.b, c.a]);
}

fn write_affine(h: &mut StableHasher, a: Affine) {
    for c in a.as_coeffs() {
        h.write_f64(c);
    }
}

fn write_scene(h: &mut StableHasher, s: &ResolvedScene) {
    h.write_str(&s.id);
    h.write_f64(s.opacity);
    write_affine(h, s.camera_affine);
    write_affine(h, s.content_affine);
    write_opt_transition(h, s.transition_in.as_ref());
    write_opt_transition(h, s.transition_out.as_ref());

    h.write_u64(s.elements.len() as u64);
    for el in &s.elements {
        write_element(h, el);
    }

    h.write_u64(s.particles.len() as u64);
    for field in &s.particles {
        h.write_str(&field.id);
        h.write_u64(field.particles.len() as u64);
        for p in &field.particles {
            h.write_u32(p.index);
            h.write_f64(p.x);
            h.write_f64(p.y);
            h.write_f64(p.size);
            h.write_f64(p.opacity);
            write_color(h, p.color);
        }
    }
}

fn write_element(h: &mut StableHasher, el: &ResolvedElement) {
    h.write_str(&el.id);
    match &el.kind {
        ElementKind::Text {
            text,
            font_size,
            color,
        } => {
            h.write_u8(0);
            h.write_str(text);
            h.write_f64(*font_size);
            write_color(h, *color);
        }
        ElementKind::Image { asset } => {
            h.write_u8(1);
            h.write_str(asset);
        }
        ElementKind::Rect {
            width,
            height,
            corner_radius,
            color,
        } => {
            h.write_u8(2);
            h.write_f64(*width);
            h.write_f64(*height);
            h.write_f64(*corner_radius);
            write_color(h, *color);
        }
        ElementKind::Circle { radius, color } => {
            h.write_u8(3);
            h.write_f64(*radius);
            write_color(h, *color);
        }
    }
    write_affine(h, el.world);
    h.write_f64(el.opacity);
    h.write_u32(el.z as u32);
}

fn write_opt_transition(h: &mut StableHasher, t: Option<&ResolvedTransition>) {
    if let Some(t) = t {
        h.write_u8(1);
        h.write_u8(t.kind as u8);
        h.write_u8(t.edge as u8);
        h.write_f64(t.progress);
    } else {
        h.write_u8(0);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/eval/fingerprint.rs"]
mod tests;
