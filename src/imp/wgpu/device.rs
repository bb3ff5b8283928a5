// SPDX-License-Identifier: Parity-7.0.0 OR PolyForm-Noncommercial-1.0.0
use crate::capabilities::catalogue::{CapabilityKind, CapabilityValue};
use crate::imp::Error;

/// The adapter's reported limits, captured once when the device is picked.
#[derive(Debug, Clone)]
pub struct Device {
    limits: wgpu::Limits,
    info: wgpu::AdapterInfo,
}

impl Device {
    pub async fn pick(entry_point: &crate::entry_point::EntryPoint) -> Result<Device, Error> {
        let options = wgpu::RequestAdapterOptions {
            power_preference: Default::default(),
            force_fallback_adapter: false,
            compatible_surface: None,
        };
        let adapter = entry_point.0.0.request_adapter(&options).await?;
        Ok(Self::from_adapter(&adapter))
    }

    fn from_adapter(adapter: &wgpu::Adapter) -> Self {
        let info = adapter.get_info();
        logwise::info_sync!(
            "picked adapter {name} on {backend}",
            name = info.name.clone(),
            backend = logwise::privacy::LogIt(&info.backend)
        );
        Device {
            limits: adapter.limits(),
            info,
        }
    }

    pub fn name(&self) -> &str {
        &self.info.name
    }

    pub fn query(&self, param: u32, kind: CapabilityKind) -> Option<CapabilityValue> {
        query_limits(&self.limits, param, kind)
    }
}

/**
Answers an OpenGL capability query from wgpu limits.

Only parameters with a faithful wgpu counterpart are answered.  Everything else (versions,
line and point ranges, atomic counters, geometry and tessellation stages...) has no meaning
for wgpu and is reported unsupported.
*/
fn query_limits(l: &wgpu::Limits, param: u32, kind: CapabilityKind) -> Option<CapabilityValue> {
    let int = |v: u32| Some(CapabilityValue::Int(v as i64));
    let value = match param {
        //max_texture_size, max_cube_map_texture_size, max_renderbuffer_size
        0x0D33 | 0x851C | 0x84E8 => int(l.max_texture_dimension_2d),
        //max_framebuffer_width, max_framebuffer_height
        0x9315 | 0x9316 => int(l.max_texture_dimension_2d),
        //max_viewport_dims
        0x0D3A => {
            let d = l.max_texture_dimension_2d as i64;
            Some(CapabilityValue::IntRange([d, d]))
        }
        //max_3d_texture_size
        0x8073 => int(l.max_texture_dimension_3d),
        //max_array_texture_layers, max_framebuffer_layers
        0x88FF | 0x9317 => int(l.max_texture_array_layers),
        //max_color_attachments, max_draw_buffers
        0x8CDF | 0x8824 => int(l.max_color_attachments),
        //max_vertex_attribs
        0x8869 => int(l.max_vertex_attributes),
        //max_vertex_attrib_bindings
        0x82DA => int(l.max_vertex_buffers),
        //max_uniform_block_size
        0x8A30 => int(l.max_uniform_buffer_binding_size),
        //uniform_buffer_offset_alignment
        0x8A34 => int(l.min_uniform_buffer_offset_alignment),
        //max_{vertex,fragment,compute}_uniform_blocks
        0x8A2B | 0x8A2D | 0x91BB => int(l.max_uniform_buffers_per_shader_stage),
        //max_{,vertex,compute}_texture_image_units
        0x8872 | 0x8B4C | 0x91BC => int(l.max_sampled_textures_per_shader_stage),
        //max_{vertex,fragment,compute}_shader_storage_blocks
        0x90D6 | 0x90DA | 0x90DB => int(l.max_storage_buffers_per_shader_stage),
        //max_shader_storage_block_size
        0x90DE => int(l.max_storage_buffer_binding_size),
        //max_compute_work_group_invocations
        0x90EB => int(l.max_compute_invocations_per_workgroup),
        _ => None,
    };
    value.filter(|v| v.fits(kind))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capabilities::catalogue::{CATALOGUE, lookup};

    fn ask(limits: &wgpu::Limits, name: &str) -> Option<CapabilityValue> {
        let capability = lookup(name).unwrap();
        query_limits(limits, capability.param, capability.kind)
    }

    #[test]
    fn texture_size() {
        let limits = wgpu::Limits::downlevel_defaults();
        let d = limits.max_texture_dimension_2d as i64;
        assert_eq!(
            query_limits(&limits, 0x0D33, CapabilityKind::Int),
            Some(CapabilityValue::Int(d))
        );
        assert_eq!(ask(&limits, "max_texture_size"), Some(CapabilityValue::Int(d)));
        assert_eq!(ask(&limits, "max_renderbuffer_size"), Some(CapabilityValue::Int(d)));
    }

    #[test]
    fn viewport_dims_is_a_range() {
        let limits = wgpu::Limits::downlevel_webgl2_defaults();
        let d = limits.max_texture_dimension_2d as i64;
        assert_eq!(
            query_limits(&limits, 0x0D3A, CapabilityKind::IntRange),
            Some(CapabilityValue::IntRange([d, d]))
        );
    }

    #[test]
    fn follows_the_adapter() {
        let mut limits = wgpu::Limits::downlevel_defaults();
        limits.max_color_attachments = 6;
        limits.min_uniform_buffer_offset_alignment = 64;
        assert_eq!(ask(&limits, "max_color_attachments"), Some(CapabilityValue::Int(6)));
        assert_eq!(ask(&limits, "max_draw_buffers"), Some(CapabilityValue::Int(6)));
        assert_eq!(
            ask(&limits, "uniform_buffer_offset_alignment"),
            Some(CapabilityValue::Int(64))
        );
    }

    #[test]
    fn unmapped_params_are_unsupported() {
        let limits = wgpu::Limits::downlevel_defaults();
        //point_size_range
        assert_eq!(query_limits(&limits, 0x0B12, CapabilityKind::FloatRange), None);
        assert_eq!(ask(&limits, "max_vertex_attrib_relative_offset"), None);
        assert_eq!(ask(&limits, "smooth_line_width_range"), None);
    }

    #[test]
    fn shape_mismatch_is_unsupported() {
        let limits = wgpu::Limits::downlevel_defaults();
        assert_eq!(query_limits(&limits, 0x0D33, CapabilityKind::Float), None);
        assert_eq!(query_limits(&limits, 0x0D33, CapabilityKind::IntRange), None);
        assert_eq!(query_limits(&limits, 0x0D3A, CapabilityKind::Int), None);
        //an int answer is good enough for a 64-bit slot
        assert!(query_limits(&limits, 0x0D33, CapabilityKind::Int64).is_some());
    }

    #[test]
    fn answers_fit_the_catalogue() {
        let limits = wgpu::Limits::default();
        for capability in CATALOGUE {
            if let Some(value) = query_limits(&limits, capability.param, capability.kind) {
                assert!(value.fits(capability.kind), "{}", capability.name);
            }
        }
    }
}
