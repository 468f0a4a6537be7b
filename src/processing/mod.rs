//! Dimensionality reduction and pipeline orchestration

pub mod pca;
pub mod pipeline;
pub mod reduce;
pub mod umap;

pub use pca::PcaReducer;
pub use pipeline::{run, run_center_weighted, run_plain, Mode, NoopObserver, PipelineInput, PipelineOutput, Stage, StageObserver};
pub use reduce::{reduce, Method, Reducer};
pub use umap::UmapReducer;
