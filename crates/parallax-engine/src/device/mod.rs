//! wgpu device and window surface.
//!
//! [`Gpu`] owns the adapter, device, queue and the configured surface for one
//! window; [`GpuFrame`] is a single acquired swapchain image.

mod gpu;
mod init;
mod surface;

pub use gpu::{Gpu, GpuFrame};
pub use init::GpuInit;
pub use surface::SurfaceErrorAction;
