//! RNG module - injected random sources for tile spawning
//!
//! The engine never owns randomness. Every operation that spawns a tile takes
//! a [`RandomSource`] so callers decide where the numbers come from: a seeded
//! LCG for reproducible games, a fixed sequence for tests, or any closure.

/// A source of uniform values in `[0, 1)`.
pub trait RandomSource {
    /// Next value, expected in `[0, 1)`.
    fn next_f64(&mut self) -> f64;
}

impl<F> RandomSource for F
where
    F: FnMut() -> f64,
{
    fn next_f64(&mut self) -> f64 {
        self()
    }
}

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        // a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Current internal state (feed back into [`SimpleRng::new`] to resume the sequence).
    pub fn state(&self) -> u32 {
        self.state
    }
}

impl RandomSource for SimpleRng {
    fn next_f64(&mut self) -> f64 {
        self.next_u32() as f64 / (u32::MAX as f64 + 1.0)
    }
}

/// Replays a fixed list of values, wrapping around at the end.
///
/// Handy for pinning exactly which cell and value a spawn picks.
#[derive(Debug, Clone)]
pub struct SequenceRng {
    values: Vec<f64>,
    pos: usize,
}

impl SequenceRng {
    pub fn new(values: impl Into<Vec<f64>>) -> Self {
        let mut values = values.into();
        if values.is_empty() {
            values.push(0.0);
        }
        Self { values, pos: 0 }
    }

    /// Number of values drawn so far.
    pub fn draws(&self) -> usize {
        self.pos
    }
}

impl RandomSource for SequenceRng {
    fn next_f64(&mut self) -> f64 {
        let v = self.values[self.pos % self.values.len()];
        self.pos += 1;
        v
    }
}

/// Pick an index in `0..len` from a uniform value, `floor(u * len)`.
///
/// Values outside `[0, 1)` are clamped so a misbehaving source cannot index out of range.
pub(crate) fn pick_index(u: f64, len: usize) -> usize {
    debug_assert!(len > 0);
    let u = if u.is_finite() { u.clamp(0.0, 1.0) } else { 0.0 };
    ((u * len as f64).floor() as usize).min(len - 1)
}
