mod buffers;
mod context;
mod render;

pub use buffers::BoardBuffers;
pub use context::GpuContext;
pub use render::RenderPipeline;
