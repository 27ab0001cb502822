//! Render Module
//!
//! Wireframe presentation of a frame: CPU-side line building plus a single
//! wgpu line-list pipeline. The core never depends on this module.

pub mod gpu_context;
pub mod line_pipeline;
pub mod vertex;
pub mod wireframe;

pub use gpu_context::{GpuContext, GpuContextConfig, RenderError};
pub use line_pipeline::{CLEAR_COLOR, LinePipeline};
pub use vertex::{LineUniforms, LineVertex};
pub use wireframe::{WireframeBuilder, palette};
