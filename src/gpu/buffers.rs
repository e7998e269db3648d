use wgpu::{Buffer, BufferUsages, Device, Queue};

use life_board::config::BORDER_FRACTION;
use life_board::simulation::Grid;

/// Board parameters passed to the render shader (32 bytes, aligned to 16)
#[repr(C)]
#[derive(Clone, Copy, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct RenderParams {
    // Board info (16 bytes)
    pub grid_rows: u32,
    pub grid_cols: u32,
    pub surface_width: f32,
    pub surface_height: f32,

    // Styling (16 bytes)
    pub border_fraction: f32,
    pub _padding: [f32; 3],
}

/// GPU storage for the board: one `u32` per cell plus the render uniform
pub struct BoardBuffers {
    /// Row-major cell states, 0 = dead, 1 = alive
    pub cells_buffer: Buffer,
    /// Uniform buffer for render parameters
    pub params_buffer: Buffer,
    pub rows: u32,
    pub cols: u32,
}

impl BoardBuffers {
    /// Create buffers sized for `grid` and upload it
    pub fn new(device: &Device, queue: &Queue, grid: &Grid) -> Self {
        let cell_count = grid.cells().len().max(1);
        let buffer_size = (cell_count * std::mem::size_of::<u32>()) as u64;

        let cells_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("board-cells-buffer"),
            size: buffer_size,
            usage: BufferUsages::STORAGE | BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let params_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("render-params-buffer"),
            size: std::mem::size_of::<RenderParams>() as u64,
            usage: BufferUsages::UNIFORM | BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let buffers = Self {
            cells_buffer,
            params_buffer,
            rows: grid.rows() as u32,
            cols: grid.cols() as u32,
        };
        buffers.upload(queue, grid);
        buffers
    }

    /// Replace the GPU copy of the board with `grid`
    pub fn upload(&self, queue: &Queue, grid: &Grid) {
        debug_assert_eq!(grid.rows() as u32, self.rows);
        debug_assert_eq!(grid.cols() as u32, self.cols);
        queue.write_buffer(&self.cells_buffer, 0, bytemuck::cast_slice(grid.cells()));
    }

    /// Update render parameters for the current surface size
    pub fn update_params(&self, queue: &Queue, surface_size: (u32, u32)) {
        let params = RenderParams {
            grid_rows: self.rows,
            grid_cols: self.cols,
            surface_width: surface_size.0 as f32,
            surface_height: surface_size.1 as f32,
            border_fraction: BORDER_FRACTION,
            _padding: [0.0, 0.0, 0.0],
        };
        queue.write_buffer(&self.params_buffer, 0, bytemuck::bytes_of(&params));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_params_size() {
        assert_eq!(std::mem::size_of::<RenderParams>(), 32);
    }
}
