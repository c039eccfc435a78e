//! GPU device + surface management.
//!
//! Creates the wgpu Instance/Adapter/Device/Queue, keeps the swapchain
//! configured, and owns the depth buffer that matches it.

mod gpu;

pub use gpu::{DEPTH_FORMAT, Gpu, GpuFrame, GpuInit, SurfaceErrorAction};
