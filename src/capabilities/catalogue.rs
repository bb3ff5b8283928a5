// SPDX-License-Identifier: Parity-7.0.0 OR PolyForm-Noncommercial-1.0.0
//! The fixed, ordered catalogue of device capabilities.
//!
//! Order matches the slot order of the host's capability class.  Parameters are the OpenGL
//! enums each value is queried by; backends that are not OpenGL translate them.

use crate::value::Value;

/// The shape of a capability value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CapabilityKind {
    Int,
    Int64,
    Float,
    /// Two integers, such as a `(min, max)` range or a `(width, height)` bound.
    IntRange,
    /// Two floats, such as a `(min, max)` range.
    FloatRange,
}

/// A value as reported by a device.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CapabilityValue {
    Int(i64),
    Float(f64),
    IntRange([i64; 2]),
    FloatRange([f64; 2]),
}

impl CapabilityValue {
    /// Whether this value has the shape `kind` asks for.
    pub fn fits(&self, kind: CapabilityKind) -> bool {
        matches!(
            (self, kind),
            (CapabilityValue::Int(_), CapabilityKind::Int | CapabilityKind::Int64)
                | (CapabilityValue::Float(_), CapabilityKind::Float)
                | (CapabilityValue::IntRange(_), CapabilityKind::IntRange)
                | (CapabilityValue::FloatRange(_), CapabilityKind::FloatRange)
        )
    }
}

impl From<CapabilityValue> for Value {
    fn from(value: CapabilityValue) -> Self {
        match value {
            CapabilityValue::Int(i) => Value::Int(i),
            CapabilityValue::Float(f) => Value::Float(f),
            CapabilityValue::IntRange([a, b]) => Value::pair_i64(a, b),
            CapabilityValue::FloatRange([a, b]) => Value::pair_f64(a, b),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capability {
    pub name: &'static str,
    pub param: u32,
    pub kind: CapabilityKind,
}

impl Capability {
    const fn new(name: &'static str, param: u32, kind: CapabilityKind) -> Self {
        Capability { name, param, kind }
    }
}

use CapabilityKind::{Float, FloatRange, Int, Int64, IntRange};

pub const CATALOGUE: &[Capability] = &[
    Capability::new("point_size_range", 0x0B12, FloatRange),
    Capability::new("smooth_line_width_range", 0x0B22, FloatRange),
    Capability::new("aliased_line_width_range", 0x846E, FloatRange),
    Capability::new("point_fade_threshold_size", 0x8128, Float),
    Capability::new("point_size_granularity", 0x0B13, Float),
    Capability::new("smooth_line_width_granularity", 0x0B23, Float),
    Capability::new("min_program_texel_offset", 0x8904, Int),
    Capability::new("max_program_texel_offset", 0x8905, Int),
    Capability::new("minor_version", 0x821C, Int),
    Capability::new("major_version", 0x821B, Int),
    Capability::new("sample_buffers", 0x80A8, Int),
    Capability::new("subpixel_bits", 0x0D50, Int),
    Capability::new("context_profile_mask", 0x9126, Int),
    Capability::new("uniform_buffer_offset_alignment", 0x8A34, Int),
    Capability::new("max_viewport_dims", 0x0D3A, IntRange),
    Capability::new("max_3d_texture_size", 0x8073, Int),
    Capability::new("max_array_texture_layers", 0x88FF, Int),
    Capability::new("max_clip_distances", 0x0D32, Int),
    Capability::new("max_color_attachments", 0x8CDF, Int),
    Capability::new("max_color_texture_samples", 0x910E, Int),
    Capability::new("max_combined_fragment_uniform_components", 0x8A33, Int),
    Capability::new("max_combined_geometry_uniform_components", 0x8A32, Int),
    Capability::new("max_combined_texture_image_units", 0x8B4D, Int),
    Capability::new("max_combined_uniform_blocks", 0x8A2E, Int),
    Capability::new("max_combined_vertex_uniform_components", 0x8A31, Int),
    Capability::new("max_cube_map_texture_size", 0x851C, Int),
    Capability::new("max_depth_texture_samples", 0x910F, Int),
    Capability::new("max_draw_buffers", 0x8824, Int),
    Capability::new("max_dual_source_draw_buffers", 0x88FC, Int),
    Capability::new("max_elements_indices", 0x80E9, Int),
    Capability::new("max_elements_vertices", 0x80E8, Int),
    Capability::new("max_fragment_input_components", 0x9125, Int),
    Capability::new("max_fragment_uniform_components", 0x8B49, Int),
    Capability::new("max_fragment_uniform_vectors", 0x8DFD, Int),
    Capability::new("max_fragment_uniform_blocks", 0x8A2D, Int),
    Capability::new("max_geometry_input_components", 0x9123, Int),
    Capability::new("max_geometry_output_components", 0x9124, Int),
    Capability::new("max_geometry_texture_image_units", 0x8C29, Int),
    Capability::new("max_geometry_uniform_blocks", 0x8A2C, Int),
    Capability::new("max_geometry_uniform_components", 0x8DDF, Int),
    Capability::new("max_integer_samples", 0x9110, Int),
    Capability::new("max_samples", 0x8D57, Int),
    Capability::new("max_rectangle_texture_size", 0x84F8, Int),
    Capability::new("max_renderbuffer_size", 0x84E8, Int),
    Capability::new("max_sample_mask_words", 0x8E59, Int),
    Capability::new("max_texture_buffer_size", 0x8C2B, Int),
    Capability::new("max_texture_image_units", 0x8872, Int),
    Capability::new("max_texture_lod_bias", 0x84FD, Float),
    Capability::new("max_texture_size", 0x0D33, Int),
    Capability::new("max_uniform_buffer_bindings", 0x8A2F, Int),
    Capability::new("max_uniform_block_size", 0x8A30, Int),
    Capability::new("max_varying_components", 0x8B4B, Int),
    Capability::new("max_varying_vectors", 0x8DFC, Int),
    Capability::new("max_varying_floats", 0x8B4B, Int),
    Capability::new("max_vertex_attribs", 0x8869, Int),
    Capability::new("max_vertex_texture_image_units", 0x8B4C, Int),
    Capability::new("max_vertex_uniform_components", 0x8B4A, Int),
    Capability::new("max_vertex_uniform_vectors", 0x8DFB, Int),
    Capability::new("max_vertex_output_components", 0x9122, Int),
    Capability::new("max_vertex_uniform_blocks", 0x8A2B, Int),
    Capability::new("max_vertex_attrib_relative_offset", 0x82D9, Int),
    Capability::new("max_vertex_attrib_bindings", 0x82DA, Int),
    Capability::new("max_server_wait_timeout", 0x9111, Int64),
    Capability::new("viewport_bounds_range", 0x825D, IntRange),
    Capability::new("viewport_subpixel_bits", 0x825C, Int),
    Capability::new("max_viewports", 0x825B, Int),
    Capability::new("min_map_buffer_alignment", 0x90BC, Int),
    Capability::new("max_combined_atomic_counters", 0x92D7, Int),
    Capability::new("max_fragment_atomic_counters", 0x92D6, Int),
    Capability::new("max_geometry_atomic_counters", 0x92D5, Int),
    Capability::new("max_tess_control_atomic_counters", 0x92D3, Int),
    Capability::new("max_tess_evaluation_atomic_counters", 0x92D4, Int),
    Capability::new("max_vertex_atomic_counters", 0x92D2, Int),
    Capability::new("max_shader_storage_buffer_bindings", 0x90DD, Int),
    Capability::new("max_combined_shader_storage_blocks", 0x90DC, Int),
    Capability::new("max_vertex_shader_storage_blocks", 0x90D6, Int),
    Capability::new("max_fragment_shader_storage_blocks", 0x90DA, Int),
    Capability::new("max_geometry_shader_storage_blocks", 0x90D7, Int),
    Capability::new("max_tess_evaluation_shader_storage_blocks", 0x90D9, Int),
    Capability::new("max_tess_control_shader_storage_blocks", 0x90D8, Int),
    Capability::new("max_compute_shader_storage_blocks", 0x90DB, Int),
    Capability::new("max_compute_uniform_components", 0x8263, Int),
    Capability::new("max_compute_atomic_counters", 0x8265, Int),
    Capability::new("max_compute_atomic_counter_buffers", 0x8264, Int),
    Capability::new("max_compute_work_group_invocations", 0x90EB, Int),
    Capability::new("max_compute_uniform_blocks", 0x91BB, Int),
    Capability::new("max_compute_texture_image_units", 0x91BC, Int),
    Capability::new("max_combined_compute_uniform_components", 0x8266, Int),
    Capability::new("max_framebuffer_width", 0x9315, Int),
    Capability::new("max_framebuffer_height", 0x9316, Int),
    Capability::new("max_framebuffer_layers", 0x9317, Int),
    Capability::new("max_framebuffer_samples", 0x9318, Int),
    Capability::new("max_uniform_locations", 0x826E, Int),
    Capability::new("max_element_index", 0x8D6B, Int64),
    Capability::new("max_shader_storage_block_size", 0x90DE, Int64),
];

pub fn lookup(name: &str) -> Option<&'static Capability> {
    CATALOGUE.iter().find(|c| c.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_are_unique() {
        for (i, c) in CATALOGUE.iter().enumerate() {
            assert!(
                CATALOGUE[..i].iter().all(|d| d.name != c.name),
                "{} listed twice",
                c.name
            );
        }
        assert_eq!(CATALOGUE.len(), 95);
    }

    #[test]
    fn known_entries() {
        let size = lookup("max_texture_size").unwrap();
        assert_eq!(size.param, 0x0D33);
        assert_eq!(size.kind, CapabilityKind::Int);
        assert_eq!(lookup("viewport_bounds_range").unwrap().kind, CapabilityKind::IntRange);
        assert_eq!(lookup("max_element_index").unwrap().kind, CapabilityKind::Int64);
        assert!(lookup("max_texture_width").is_none());
    }

    #[test]
    fn value_shapes() {
        assert!(CapabilityValue::Int(1).fits(CapabilityKind::Int64));
        assert!(!CapabilityValue::Int(1).fits(CapabilityKind::Float));
        assert!(!CapabilityValue::FloatRange([0.0, 1.0]).fits(CapabilityKind::IntRange));
        assert_eq!(
            Value::from(CapabilityValue::IntRange([-32768, 32767])),
            Value::pair_i64(-32768, 32767)
        );
    }
}
