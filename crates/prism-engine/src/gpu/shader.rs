use crate::layout::ResolvedLayout;

/// Generates the WGSL passthrough stage for `layout`.
///
/// Entry points are `vs_main` and `fs_main`. The fragment entry writes the
/// interpolated color unchanged. WGSL has no reduced-precision `f32`, so the
/// color varying is always declared `vec4<f32>`.
pub fn passthrough_wgsl(layout: &ResolvedLayout) -> String {
    format!(
        "\
struct VsIn {{
    @location({pos}) position: vec3<f32>,
    @location({col}) color: vec4<f32>,
}};

struct VsOut {{
    @builtin(position) clip: vec4<f32>,
    @location(0) color: vec4<f32>,
}};

@vertex
fn vs_main(vert: VsIn) -> VsOut {{
    var out: VsOut;
    out.clip = vec4<f32>(vert.position, 1.0);
    out.color = vert.color;
    return out;
}}

@fragment
fn fs_main(frag: VsOut) -> @location(0) vec4<f32> {{
    return frag.color;
}}
",
        pos = layout.position().location,
        col = layout.color().location,
    )
}
