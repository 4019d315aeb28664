//! Progress notifications for long-running stages.

/// A pipeline stage that reports progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    /// Reading and parsing the input mesh or image.
    Loading,
    /// Rasterizing triangles into the voxel grid.
    Voxelizing,
    /// Quantizing voxels and encoding the container.
    Writing,
}

impl Stage {
    /// Human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Loading => "Loading",
            Self::Voxelizing => "Voxelizing triangle",
            Self::Writing => "Writing voxels",
        }
    }
}

/// Receives `(done, total)` updates from a stage.
///
/// Called on the thread that started the stage, never from worker threads.
pub trait ProgressObserver {
    /// Called as work completes; `done <= total`.
    fn on_progress(&mut self, stage: Stage, done: usize, total: usize);
}

/// Observer that ignores every update.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl ProgressObserver for NoProgress {
    #[inline]
    fn on_progress(&mut self, _stage: Stage, _done: usize, _total: usize) {}
}

impl<F: FnMut(Stage, usize, usize)> ProgressObserver for F {
    fn on_progress(&mut self, stage: Stage, done: usize, total: usize) {
        self(stage, done, total);
    }
}
