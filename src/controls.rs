/// The single UI/parameter state shared by the key handler and the renderer.
use std::fmt::Write;

use crate::params::{Axis, Direction, Group, Parameter, ParameterSet, Selection, Selector};
use crate::pipeline::Effect;

/// Number of phasor noise profile functions toggled by keys 5..8
pub const FUNCTION_COUNT: usize = 4;

/// A decoded key release
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    ToggleDebug,
    ToggleEffect(Effect),
    /// Zero-based phasor function index
    ToggleFunction(usize),
    Select(Parameter),
    SelectGroup(Group),
    SelectMember(Axis),
    Adjust(Direction),
    Screenshot,
}

impl Command {
    /// Map a printable key to its command. Letters are case-insensitive.
    pub fn from_char(c: char) -> Option<Self> {
        let command = match c.to_ascii_lowercase() {
            '0' => Command::ToggleDebug,
            '1' => Command::ToggleEffect(Effect::PhasorNoise),
            '2' => Command::ToggleEffect(Effect::GaborNoise),
            '9' => Command::ToggleEffect(Effect::PhaseField),
            '5' => Command::ToggleFunction(0),
            '6' => Command::ToggleFunction(1),
            '7' => Command::ToggleFunction(2),
            '8' => Command::ToggleFunction(3),
            'f' => Command::Select(Parameter::Frequency),
            'b' => Command::Select(Parameter::Bandwidth),
            'i' => Command::Select(Parameter::ImpulsesPerKernel),
            'r' => Command::SelectGroup(Group::Resolution),
            'm' => Command::SelectGroup(Group::Mouse),
            'x' => Command::SelectMember(Axis::X),
            'y' => Command::SelectMember(Axis::Y),
            'z' => Command::SelectMember(Axis::Z),
            'p' => Command::Screenshot,
            _ => return None,
        };
        Some(command)
    }
}

/// Result of applying a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Changed,
    Ignored,
    /// The caller should capture the next frame.
    Screenshot,
}

#[derive(Debug, Clone)]
pub struct ControlState {
    pub debug_view: bool,
    effects: [bool; Effect::COUNT],
    pub functions: [bool; FUNCTION_COUNT],
    pub values: ParameterSet,
    selector: Selector,
}

impl Default for ControlState {
    fn default() -> Self {
        let mut effects = [false; Effect::COUNT];
        effects[Effect::PhaseField.index()] = true;
        Self {
            debug_view: false,
            effects,
            functions: [false; FUNCTION_COUNT],
            values: ParameterSet::default(),
            selector: Selector::default(),
        }
    }
}

impl ControlState {
    pub fn is_enabled(&self, effect: Effect) -> bool {
        self.effects[effect.index()]
    }

    pub fn set_enabled(&mut self, effect: Effect, enabled: bool) {
        self.effects[effect.index()] = enabled;
    }

    /// Enabled effects in draw order
    pub fn enabled_effects(&self) -> impl Iterator<Item = Effect> + '_ {
        Effect::ALL.into_iter().filter(|e| self.is_enabled(*e))
    }

    pub fn selection(&self) -> Selection {
        self.selector.selection()
    }

    pub fn apply(&mut self, command: Command) -> Outcome {
        match command {
            Command::ToggleDebug => self.debug_view = !self.debug_view,
            Command::ToggleEffect(effect) => {
                let enabled = self.is_enabled(effect);
                self.set_enabled(effect, !enabled);
            }
            Command::ToggleFunction(n) => match self.functions.get_mut(n) {
                Some(flag) => *flag = !*flag,
                None => return Outcome::Ignored,
            },
            Command::Select(parameter) => self.selector.select(parameter),
            Command::SelectGroup(group) => self.selector.select_group(group),
            Command::SelectMember(axis) => {
                if !self.selector.select_member(axis) {
                    return Outcome::Ignored;
                }
            }
            Command::Adjust(direction) => {
                if self.selector.adjust(&mut self.values, direction).is_none() {
                    return Outcome::Ignored;
                }
            }
            Command::Screenshot => return Outcome::Screenshot,
        }
        Outcome::Changed
    }

    /// One-line description of the state, used for logs and the window subtitle.
    pub fn summary(&self) -> String {
        let mut out = String::new();
        if self.debug_view {
            out.push_str("debug");
        } else {
            let names: Vec<&str> = self.enabled_effects().map(Effect::label).collect();
            if names.is_empty() {
                out.push_str("no effects");
            } else {
                out.push_str(&names.join(" + "));
            }
        }

        if self.is_enabled(Effect::PhasorNoise) {
            let on: Vec<String> = self
                .functions
                .iter()
                .enumerate()
                .filter(|(_, on)| **on)
                .map(|(i, _)| (i + 1).to_string())
                .collect();
            if !on.is_empty() {
                let _ = write!(out, " [fn {}]", on.join(","));
            }
        }

        for parameter in [
            Parameter::Frequency,
            Parameter::Bandwidth,
            Parameter::ImpulsesPerKernel,
        ] {
            if parameter.is_integer() {
                let _ = write!(out, " | {} = {}", parameter, self.values.get_i32(parameter));
            } else {
                let _ = write!(out, " | {} = {}", parameter, self.values.get(parameter));
            }
        }

        if let Selection::Active(parameter) = self.selection() {
            let _ = write!(
                out,
                " | editing {} = {}",
                parameter,
                self.values.get(parameter)
            );
        } else {
            let _ = write!(out, " | editing {}", self.selection());
        }
        out
    }
}
