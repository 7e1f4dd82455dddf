//! Die-face randomness behind a substitutable source.
//!
//! Every random decision the engine makes is a [`FaceSource::pick`], so
//! tests and replays can swap the source wholesale. [`GameRng`] with the same
//! seed rolls identical games and can be checkpointed at any point.
//!
//! ```
//! use firefighters::core::{FaceSource, GameRng};
//!
//! let mut a = GameRng::new(7);
//! let mut b = GameRng::new(7);
//! assert_eq!(a.pick(6), b.pick(6));
//! ```

use std::collections::VecDeque;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// Source of uniformly distributed face indices.
pub trait FaceSource {
    /// Pick an index in `0..faces`. `faces` is never zero.
    fn pick(&mut self, faces: usize) -> usize;
}

impl<T: FaceSource + ?Sized> FaceSource for &mut T {
    fn pick(&mut self, faces: usize) -> usize {
        (**self).pick(faces)
    }
}

impl<T: FaceSource + ?Sized> FaceSource for Box<T> {
    fn pick(&mut self, faces: usize) -> usize {
        (**self).pick(faces)
    }
}

/// Seeded dice for real games.
///
/// ChaCha8 keeps the stream identical across platforms, so a seed plus the
/// intent history replays a whole game.
#[derive(Clone, Debug)]
pub struct GameRng {
    stream: ChaCha8Rng,
    seed: u64,
}

impl GameRng {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            stream: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Seed this game was started with.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Capture the position in the stream.
    #[must_use]
    pub fn checkpoint(&self) -> GameRngState {
        GameRngState {
            seed: self.seed,
            position: self.stream.get_word_pos(),
        }
    }

    /// Resume from a checkpoint; the next pick matches the one the
    /// checkpointed generator would have made.
    #[must_use]
    pub fn restore(checkpoint: &GameRngState) -> Self {
        let mut stream = ChaCha8Rng::seed_from_u64(checkpoint.seed);
        stream.set_word_pos(checkpoint.position);
        Self {
            stream,
            seed: checkpoint.seed,
        }
    }
}

impl FaceSource for GameRng {
    fn pick(&mut self, faces: usize) -> usize {
        self.stream.gen_range(0..faces)
    }
}

/// Where a [`GameRng`] stands in its stream. Constant size no matter how
/// many dice were rolled.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRngState {
    pub seed: u64,
    /// ChaCha8 word position.
    pub position: u128,
}

/// Replays a fixed queue of face indices, then falls back to face 0.
///
/// Intended for tests and replays where the exact dice matter.
#[derive(Clone, Debug, Default)]
pub struct ScriptedFaces {
    queue: VecDeque<usize>,
}

impl ScriptedFaces {
    /// Create a script from face indices, consumed front to back.
    pub fn new(indices: impl IntoIterator<Item = usize>) -> Self {
        Self {
            queue: indices.into_iter().collect(),
        }
    }

    /// Append more indices to the script.
    pub fn extend(&mut self, indices: impl IntoIterator<Item = usize>) {
        self.queue.extend(indices);
    }

    /// Number of scripted picks not yet consumed.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.queue.len()
    }
}

impl FaceSource for ScriptedFaces {
    fn pick(&mut self, faces: usize) -> usize {
        self.queue.pop_front().unwrap_or(0) % faces
    }
}
