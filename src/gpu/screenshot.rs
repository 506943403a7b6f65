//! Reading a rendered frame back from the GPU and saving it as PNG.

use std::path::Path;
use std::sync::mpsc;

use crate::error::{GpuError, ScreenshotError};

const BYTES_PER_PIXEL: u32 = 4;

/// Row pitch of a texture-to-buffer copy, rounded up to wgpu's alignment.
pub fn padded_bytes_per_row(width: u32) -> u32 {
    let unpadded = width * BYTES_PER_PIXEL;
    let align = wgpu::COPY_BYTES_PER_ROW_ALIGNMENT;
    unpadded.div_ceil(align) * align
}

/// Byte order of an 8-bit, four-channel texel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChannelOrder {
    Rgba,
    Bgra,
}

/// Channel order of a surface format, or `None` if it is not 8-bit RGBA/BGRA.
pub fn channel_order(format: wgpu::TextureFormat) -> Option<ChannelOrder> {
    match format {
        wgpu::TextureFormat::Rgba8Unorm | wgpu::TextureFormat::Rgba8UnormSrgb => Some(ChannelOrder::Rgba),
        wgpu::TextureFormat::Bgra8Unorm | wgpu::TextureFormat::Bgra8UnormSrgb => Some(ChannelOrder::Bgra),
        _ => None,
    }
}

/// Strip row padding and convert to tightly packed RGBA.
pub fn unpad_rows(data: &[u8], width: u32, height: u32, padded_row: u32, order: ChannelOrder) -> Vec<u8> {
    let row = (width * BYTES_PER_PIXEL) as usize;
    let mut pixels = Vec::with_capacity(row * height as usize);
    for chunk in data.chunks(padded_row as usize).take(height as usize) {
        pixels.extend_from_slice(&chunk[..row]);
    }
    if order == ChannelOrder::Bgra {
        for px in pixels.chunks_exact_mut(BYTES_PER_PIXEL as usize) {
            px.swap(0, 2);
        }
    }
    pixels
}

/// Offscreen color target the scene is re-rendered into for a capture.
pub struct CaptureTarget {
    pub texture: wgpu::Texture,
    pub view: wgpu::TextureView,
    width: u32,
    height: u32,
    format: wgpu::TextureFormat,
}

impl CaptureTarget {
    pub fn new(device: &wgpu::Device, width: u32, height: u32, format: wgpu::TextureFormat) -> Self {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Screenshot Texture"),
            size: wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::COPY_SRC,
            view_formats: &[],
        });
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        Self {
            texture,
            view,
            width,
            height,
            format,
        }
    }

    /// Copy the rendered target to the CPU and write it to `path`.
    ///
    /// `encoder` must already contain the render pass that drew into
    /// [`CaptureTarget::view`].
    pub fn save(
        &self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        mut encoder: wgpu::CommandEncoder,
        path: &Path,
    ) -> Result<(), ScreenshotError> {
        let order = channel_order(self.format).ok_or(ScreenshotError::UnsupportedFormat(self.format))?;
        let padded_row = padded_bytes_per_row(self.width);

        let buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Screenshot Readback"),
            size: (padded_row * self.height) as wgpu::BufferAddress,
            usage: wgpu::BufferUsages::COPY_DST | wgpu::BufferUsages::MAP_READ,
            mapped_at_creation: false,
        });

        encoder.copy_texture_to_buffer(
            wgpu::TexelCopyTextureInfo {
                texture: &self.texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            wgpu::TexelCopyBufferInfo {
                buffer: &buffer,
                layout: wgpu::TexelCopyBufferLayout {
                    offset: 0,
                    bytes_per_row: Some(padded_row),
                    rows_per_image: Some(self.height),
                },
            },
            wgpu::Extent3d {
                width: self.width,
                height: self.height,
                depth_or_array_layers: 1,
            },
        );
        queue.submit(std::iter::once(encoder.finish()));

        let slice = buffer.slice(..);
        let (tx, rx) = mpsc::channel();
        slice.map_async(wgpu::MapMode::Read, move |result| {
            let _ = tx.send(result);
        });
        let _ = device.poll(wgpu::Maintain::Wait);
        rx.recv()
            .map_err(|e| GpuError::BufferMapping(e.to_string()))?
            .map_err(|e| GpuError::BufferMapping(e.to_string()))?;

        let pixels = {
            let data = slice.get_mapped_range();
            unpad_rows(&data, self.width, self.height, padded_row, order)
        };
        buffer.unmap();

        image::save_buffer(path, &pixels, self.width, self.height, image::ExtendedColorType::Rgba8)
            .map_err(|source| ScreenshotError::Image {
                path: path.to_path_buf(),
                source,
            })
    }
}
