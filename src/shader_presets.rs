/// GLSL sources for the debug shader and each effect.
/// Effect fragment shaders share uniforms and noise helpers from
/// `common.glsl`, spliced in at the `// common.glsl inserted here` marker.
use crate::pipeline::Effect;

const COMMON_GLSL: &str = include_str!("../data/shaders/common.glsl");

/// Returns the shared vertex shader source (mesh and fullscreen quad)
pub fn vertex_shader_source() -> String {
    include_str!("../data/shaders/vertex.glsl").to_string()
}

/// Assemble a fragment shader by inserting the common code at the marker.
fn assemble(shader_src: &str) -> String {
    shader_src.replacen("// common.glsl inserted here", COMMON_GLSL, 1)
}

/// Normal-shaded pass-through used for the depth prepass and as fallback
pub fn debug_fragment_source() -> String {
    include_str!("../data/shaders/debug_frag.glsl").to_string()
}

/// Returns the fragment shader source for an effect
pub fn fragment_source_for(effect: Effect) -> String {
    let src = match effect {
        Effect::PhaseField => include_str!("../data/shaders/phase_field.glsl"),
        Effect::GaborNoise => include_str!("../data/shaders/gabor_noise.glsl"),
        Effect::PhasorNoise => include_str!("../data/shaders/phasor_noise.glsl"),
    };
    assemble(src)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn effects_get_common_code() {
        for effect in Effect::ALL {
            let src = fragment_source_for(effect);
            assert!(src.starts_with("#version 300 es"), "{}", effect.label());
            assert!(src.contains("uniform float uFrequency;"), "{}", effect.label());
            assert!(!src.contains("// common.glsl inserted here"));
            assert!(src.contains("precision highp int;"), "{}", effect.label());
        }
    }

    #[test]
    fn depth_prepass_and_shading_share_positions() {
        assert!(vertex_shader_source().contains("invariant gl_Position;"));
    }

    #[test]
    fn phasor_noise_samples_the_phase_field() {
        let phasor = fragment_source_for(Effect::PhasorNoise);
        assert!(phasor.contains("uniform sampler2D uPhaseField;"));
        assert!(debug_fragment_source().starts_with("#version 300 es"));
        assert!(vertex_shader_source().contains("uniform mat4 uMvp;"));
    }
}
