use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Execution context for one booking session.
///
/// Owns the session's random source and the "execution evidence" lines the
/// agents write while a pipeline pass runs.
pub struct Ctx {
    rng: ChaCha8Rng,
    log: Vec<String>,
}

impl Ctx {
    /// Context with a random source seeded from OS entropy.
    pub fn new() -> Self {
        Self::with_rng(ChaCha8Rng::from_entropy())
    }

    /// Context whose random draws are reproducible for a given seed.
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(ChaCha8Rng::seed_from_u64(seed))
    }

    pub fn with_rng(rng: ChaCha8Rng) -> Self {
        Self { rng, log: vec![] }
    }

    pub fn rng(&mut self) -> &mut ChaCha8Rng {
        &mut self.rng
    }

    pub fn log(&mut self, msg: impl Into<String>) {
        self.log.push(msg.into());
    }

    pub fn logs(&self) -> &[String] {
        &self.log
    }

    pub fn clear_logs(&mut self) {
        self.log.clear();
    }
}

impl Default for Ctx {
    fn default() -> Self {
        Self::new()
    }
}
