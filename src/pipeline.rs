/// Per-frame pass sequencing.
///
/// The planner is pure: it turns the control state into an ordered list of
/// passes, and `gl_renderer` replays that list against the GL context.
use crate::controls::ControlState;

/// A shading effect with its own fragment shader.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Effect {
    PhaseField,
    GaborNoise,
    PhasorNoise,
}

impl Effect {
    pub const COUNT: usize = 3;

    /// Declared draw order. With additive blending later effects add on top
    /// of earlier ones.
    pub const ALL: [Effect; Effect::COUNT] =
        [Effect::PhaseField, Effect::GaborNoise, Effect::PhasorNoise];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn label(self) -> &'static str {
        match self {
            Effect::PhaseField => "phase field",
            Effect::GaborNoise => "gabor noise",
            Effect::PhasorNoise => "phasor noise",
        }
    }

    /// Effect whose output this effect samples as a 2D texture.
    pub fn input(self) -> Option<Effect> {
        match self {
            Effect::PhasorNoise => Some(Effect::PhaseField),
            Effect::PhaseField | Effect::GaborNoise => None,
        }
    }
}

/// One step of a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pass {
    /// Render `effect` over the whole offscreen target so a later pass can
    /// sample it.
    Offscreen { effect: Effect },
    /// Depth only, colour writes masked, `LEQUAL`.
    DepthPrepass,
    /// Colour on, depth writes off, `EQUAL`, additive blending.
    ColorPassBegin,
    /// Draw `effect` on the mesh, with `input` bound as texture unit 0.
    Shade {
        effect: Effect,
        input: Option<Effect>,
    },
    /// Restore `LEQUAL`, depth writes and disable blending.
    ColorPassEnd,
    /// Plain debug shading of the mesh.
    Debug,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FramePlan {
    passes: Vec<Pass>,
}

impl FramePlan {
    pub fn build(controls: &ControlState) -> Self {
        let enabled: Vec<Effect> = controls.enabled_effects().collect();
        if controls.debug_view || enabled.is_empty() {
            return Self {
                passes: vec![Pass::Debug],
            };
        }

        let mut passes = Vec::with_capacity(enabled.len() + 5);

        // Only one offscreen target exists, so each producer renders once.
        let mut producers: Vec<Effect> = Vec::new();
        for input in enabled.iter().filter_map(|e| e.input()) {
            if !producers.contains(&input) {
                producers.push(input);
            }
        }
        passes.extend(producers.iter().map(|&effect| Pass::Offscreen { effect }));

        // A producer goes to the offscreen target instead of the screen.
        passes.push(Pass::DepthPrepass);
        passes.push(Pass::ColorPassBegin);
        passes.extend(
            enabled
                .into_iter()
                .filter(|effect| !producers.contains(effect))
                .map(|effect| Pass::Shade {
                    effect,
                    input: effect.input(),
                }),
        );
        passes.push(Pass::ColorPassEnd);

        Self { passes }
    }

    pub fn passes(&self) -> &[Pass] {
        &self.passes
    }

    pub fn offscreen_draws(&self) -> usize {
        self.count(|p| matches!(p, Pass::Offscreen { .. }))
    }

    pub fn shade_draws(&self) -> usize {
        self.count(|p| matches!(p, Pass::Shade { .. }))
    }

    pub fn debug_draws(&self) -> usize {
        self.count(|p| matches!(p, Pass::Debug))
    }

    /// Colour-producing draw calls. The depth prepass is not counted.
    pub fn shading_draw_calls(&self) -> usize {
        self.offscreen_draws() + self.shade_draws() + self.debug_draws()
    }

    fn count(&self, f: impl Fn(&Pass) -> bool) -> usize {
        self.passes.iter().filter(|p| f(p)).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controls::{Command, Outcome};

    fn controls(effects: &[Effect]) -> ControlState {
        let mut state = ControlState::default();
        for effect in Effect::ALL {
            state.set_enabled(effect, effects.contains(&effect));
        }
        state
    }

    #[test]
    fn nothing_enabled_falls_back_to_debug_once() {
        let plan = FramePlan::build(&controls(&[]));
        assert_eq!(plan.passes(), &[Pass::Debug]);
        assert_eq!(plan.debug_draws(), 1);
        assert_eq!(plan.shading_draw_calls(), 1);
    }

    #[test]
    fn debug_view_overrides_effects() {
        let mut state = controls(&Effect::ALL);
        state.debug_view = true;
        let plan = FramePlan::build(&state);
        assert_eq!(plan.passes(), &[Pass::Debug]);
    }

    #[test]
    fn single_effect_is_prepass_then_shade() {
        let plan = FramePlan::build(&controls(&[Effect::PhaseField]));
        assert_eq!(
            plan.passes(),
            &[
                Pass::DepthPrepass,
                Pass::ColorPassBegin,
                Pass::Shade {
                    effect: Effect::PhaseField,
                    input: None
                },
                Pass::ColorPassEnd,
            ]
        );
        assert_eq!(plan.debug_draws(), 0);
    }

    #[test]
    fn dependent_effect_renders_producer_offscreen_first() {
        let plan = FramePlan::build(&controls(&[Effect::PhasorNoise]));
        assert_eq!(plan.offscreen_draws(), 1);
        assert_eq!(plan.shade_draws(), 1);
        assert_eq!(plan.shading_draw_calls(), 2);
        assert_eq!(
            plan.passes()[0],
            Pass::Offscreen {
                effect: Effect::PhaseField
            }
        );
        assert!(plan.passes().contains(&Pass::Shade {
            effect: Effect::PhasorNoise,
            input: Some(Effect::PhaseField)
        }));
    }

    #[test]
    fn enabling_phasor_from_startup_draws_twice() {
        let mut state = ControlState::default();
        let command = Command::from_char('1').unwrap();
        assert_eq!(state.apply(command), Outcome::Changed);

        let plan = FramePlan::build(&state);
        assert_eq!(plan.offscreen_draws(), 1);
        assert_eq!(plan.shade_draws(), 1);
        assert_eq!(plan.shading_draw_calls(), 2);
        assert!(!plan.passes().contains(&Pass::Shade {
            effect: Effect::PhaseField,
            input: None
        }));
    }

    #[test]
    fn gabor_and_phase_field_both_reach_the_screen() {
        let plan = FramePlan::build(&controls(&[Effect::PhaseField, Effect::GaborNoise]));
        assert_eq!(plan.offscreen_draws(), 0);
        assert_eq!(plan.shade_draws(), 2);
    }

    #[test]
    fn all_effects_draw_in_declared_order() {
        let plan = FramePlan::build(&controls(&[
            Effect::PhasorNoise,
            Effect::GaborNoise,
            Effect::PhaseField,
        ]));
        let shaded: Vec<Effect> = plan
            .passes()
            .iter()
            .filter_map(|p| match p {
                Pass::Shade { effect, .. } => Some(*effect),
                _ => None,
            })
            .collect();
        // The phase field feeds phasor noise, so it only renders offscreen.
        assert_eq!(shaded, vec![Effect::GaborNoise, Effect::PhasorNoise]);
        assert_eq!(plan.offscreen_draws(), 1);
        assert_eq!(*plan.passes().last().unwrap(), Pass::ColorPassEnd);
    }
}
