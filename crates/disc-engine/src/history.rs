//! Position histories produced by [`World::run`](crate::World::run).

use glam::DVec2;
use serde::{Deserialize, Serialize};

/// Samples reserved up front per track; longer runs grow on demand.
const PREALLOC_STEPS: usize = 4096;

/// One track of positions per collection entry, each sample taken *before*
/// the corresponding step.
///
/// Tracks follow the collection order at the time the run started.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct History {
    /// Step size the run used.
    pub dt: f64,
    steps: usize,
    tracks: Vec<Vec<DVec2>>,
}

impl History {
    pub(crate) fn with_capacity(dt: f64, entries: usize, steps: usize) -> Self {
        Self {
            dt,
            steps,
            tracks: (0..entries)
                .map(|_| Vec::with_capacity(steps.min(PREALLOC_STEPS)))
                .collect(),
        }
    }

    /// Append one sample to every track; `positions` is in collection order.
    pub(crate) fn record(&mut self, positions: impl Iterator<Item = DVec2>) {
        for (track, pos) in self.tracks.iter_mut().zip(positions) {
            track.push(pos);
        }
    }

    /// Number of steps the run was asked to take (length of every track).
    pub fn steps(&self) -> usize {
        self.steps
    }

    /// All tracks, in collection order.
    pub fn tracks(&self) -> &[Vec<DVec2>] {
        &self.tracks
    }

    /// Track of the `i`-th collection entry.
    pub fn track(&self, i: usize) -> Option<&[DVec2]> {
        self.tracks.get(i).map(Vec::as_slice)
    }

    /// Number of tracks (collection entries at run start).
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// Consume into plain `(x, y)` tuples, one `Vec` per entry.
    pub fn into_tuples(self) -> Vec<Vec<(f64, f64)>> {
        self.tracks
            .into_iter()
            .map(|track| track.into_iter().map(|p| (p.x, p.y)).collect())
            .collect()
    }

    /// Track-major contiguous buffer `[x0, y0, x1, y1, ...]` for handing to a
    /// renderer. Track `i` starts at offset `i * steps * 2`.
    pub fn flatten(&self) -> Vec<f64> {
        let samples: usize = self.tracks.iter().map(Vec::len).sum();
        let mut out = Vec::with_capacity(samples * 2);
        for track in &self.tracks {
            out.extend_from_slice(bytemuck::cast_slice::<DVec2, f64>(track));
        }
        out
    }

    /// Serialize as JSON; positions are written as `[x, y]` pairs.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
