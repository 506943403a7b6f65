//! Error types for the host shell.
//!
//! The simulation core cannot fail; everything here comes from the window,
//! the GPU, or writing screenshots.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur during GPU initialization.
#[derive(Debug, Error)]
pub enum GpuError {
    /// Failed to create a surface for rendering.
    #[error("Failed to create GPU surface: {0}")]
    SurfaceCreation(#[from] wgpu::CreateSurfaceError),
    /// No compatible GPU adapter found.
    #[error("No compatible GPU adapter found. Ensure your system has a GPU with WebGPU/Vulkan/Metal/DX12 support.")]
    NoAdapter,
    /// Failed to create GPU device.
    #[error("Failed to create GPU device: {0}")]
    DeviceCreation(#[from] wgpu::RequestDeviceError),
    /// Failed to map buffer for reading.
    #[error("Failed to map GPU buffer: {0}")]
    BufferMapping(String),
}

/// Errors that can occur while saving a screenshot.
#[derive(Debug, Error)]
pub enum ScreenshotError {
    /// Reading the frame back from the GPU failed.
    #[error(transparent)]
    Readback(#[from] GpuError),
    /// The surface format cannot be written as an 8-bit RGBA image.
    #[error("Unsupported surface format for screenshots: {0:?}")]
    UnsupportedFormat(wgpu::TextureFormat),
    /// Encoding or writing the image file failed.
    #[error("Failed to write screenshot to {path}: {source}")]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

/// Errors that can occur when running the demo.
#[derive(Debug, Error)]
pub enum ShellError {
    /// Failed to create event loop.
    #[error("Failed to create event loop: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),
    /// Failed to create window.
    #[error("Failed to create window: {0}")]
    Window(#[from] winit::error::OsError),
    /// GPU initialization failed.
    #[error("GPU error: {0}")]
    Gpu(#[from] GpuError),
}
