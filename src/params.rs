/// Editable shader parameters and the keyboard selector that decides which
/// one the arrow keys act on.
///
/// Values are unclamped: they can go negative or grow without limit, and the
/// shaders get whatever the user dialled in.
use std::fmt;

/// Every scalar the arrow keys can edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Parameter {
    Frequency,
    Bandwidth,
    ImpulsesPerKernel,
    ResolutionX,
    ResolutionY,
    ResolutionZ,
    MouseX,
    MouseY,
    MouseZ,
}

impl Parameter {
    pub const COUNT: usize = 9;

    pub const ALL: [Parameter; Parameter::COUNT] = [
        Parameter::Frequency,
        Parameter::Bandwidth,
        Parameter::ImpulsesPerKernel,
        Parameter::ResolutionX,
        Parameter::ResolutionY,
        Parameter::ResolutionZ,
        Parameter::MouseX,
        Parameter::MouseY,
        Parameter::MouseZ,
    ];

    fn index(self) -> usize {
        self as usize
    }

    /// Short name shown in logs and the window subtitle
    pub fn label(self) -> &'static str {
        match self {
            Parameter::Frequency => "f",
            Parameter::Bandwidth => "b",
            Parameter::ImpulsesPerKernel => "ipk",
            Parameter::ResolutionX => "resolution.x",
            Parameter::ResolutionY => "resolution.y",
            Parameter::ResolutionZ => "resolution.z",
            Parameter::MouseX => "mouse.x",
            Parameter::MouseY => "mouse.y",
            Parameter::MouseZ => "mouse.z",
        }
    }

    /// Integer parameters are uploaded with `glUniform1i`.
    pub fn is_integer(self) -> bool {
        matches!(self, Parameter::ImpulsesPerKernel)
    }

    /// Amount added or removed by one arrow key release. Steps are dyadic so
    /// an increase followed by a decrease restores the value bit for bit.
    pub fn step(self) -> f32 {
        match self {
            Parameter::Frequency | Parameter::Bandwidth => 1.0,
            Parameter::ImpulsesPerKernel => 1.0,
            Parameter::ResolutionX | Parameter::ResolutionY | Parameter::ResolutionZ => 0.5,
            Parameter::MouseX | Parameter::MouseY | Parameter::MouseZ => 0.125,
        }
    }

    fn default_value(self) -> f32 {
        match self {
            Parameter::Frequency => 50.0,
            Parameter::Bandwidth => 30.0,
            Parameter::ImpulsesPerKernel => 16.0,
            Parameter::ResolutionX | Parameter::ResolutionY => 3.0,
            Parameter::ResolutionZ => 1.0,
            Parameter::MouseX | Parameter::MouseY => 0.5,
            Parameter::MouseZ => 0.0,
        }
    }
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Parameter groups that need a member key (X/Y/Z) before they resolve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Group {
    Resolution,
    Mouse,
}

impl Group {
    pub fn member(self, axis: Axis) -> Parameter {
        match (self, axis) {
            (Group::Resolution, Axis::X) => Parameter::ResolutionX,
            (Group::Resolution, Axis::Y) => Parameter::ResolutionY,
            (Group::Resolution, Axis::Z) => Parameter::ResolutionZ,
            (Group::Mouse, Axis::X) => Parameter::MouseX,
            (Group::Mouse, Axis::Y) => Parameter::MouseY,
            (Group::Mouse, Axis::Z) => Parameter::MouseZ,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Group::Resolution => "resolution",
            Group::Mouse => "mouse",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Increase,
    Decrease,
}

/// Current values of all parameters
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterSet {
    values: [f32; Parameter::COUNT],
}

impl Default for ParameterSet {
    fn default() -> Self {
        let mut values = [0.0; Parameter::COUNT];
        for parameter in Parameter::ALL {
            values[parameter.index()] = parameter.default_value();
        }
        Self { values }
    }
}

impl ParameterSet {
    pub fn get(&self, parameter: Parameter) -> f32 {
        self.values[parameter.index()]
    }

    /// Integer view of a parameter, truncating toward zero.
    pub fn get_i32(&self, parameter: Parameter) -> i32 {
        self.get(parameter) as i32
    }

    pub fn adjust(&mut self, parameter: Parameter, direction: Direction) {
        let step = parameter.step();
        let value = &mut self.values[parameter.index()];
        match direction {
            Direction::Increase => *value += step,
            Direction::Decrease => *value -= step,
        }
    }

    pub fn resolution(&self) -> [f32; 3] {
        [
            self.get(Parameter::ResolutionX),
            self.get(Parameter::ResolutionY),
            self.get(Parameter::ResolutionZ),
        ]
    }

    pub fn mouse(&self) -> [f32; 3] {
        [
            self.get(Parameter::MouseX),
            self.get(Parameter::MouseY),
            self.get(Parameter::MouseZ),
        ]
    }
}

/// What the arrow keys currently point at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Selection {
    #[default]
    None,
    /// A group key was released; waiting for X/Y/Z.
    Pending(Group),
    Active(Parameter),
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selection::None => f.write_str("none"),
            Selection::Pending(group) => write!(f, "{}.?", group.label()),
            Selection::Active(parameter) => f.write_str(parameter.label()),
        }
    }
}

/// Two-level selection table: direct shortcuts resolve immediately, group
/// keys wait for a member key.
#[derive(Debug, Clone, Copy, Default)]
pub struct Selector {
    selection: Selection,
}

impl Selector {
    pub fn selection(&self) -> Selection {
        self.selection
    }

    pub fn active(&self) -> Option<Parameter> {
        match self.selection {
            Selection::Active(parameter) => Some(parameter),
            _ => None,
        }
    }

    pub fn select(&mut self, parameter: Parameter) {
        self.selection = Selection::Active(parameter);
    }

    pub fn select_group(&mut self, group: Group) {
        self.selection = Selection::Pending(group);
    }

    /// Resolve a pending group. Returns false (and changes nothing) when no
    /// group is pending.
    pub fn select_member(&mut self, axis: Axis) -> bool {
        match self.selection {
            Selection::Pending(group) => {
                self.selection = Selection::Active(group.member(axis));
                true
            }
            _ => false,
        }
    }

    /// Step the active parameter. Returns the edited parameter, or `None`
    /// when nothing is selected.
    pub fn adjust(&self, values: &mut ParameterSet, direction: Direction) -> Option<Parameter> {
        let parameter = self.active()?;
        values.adjust(parameter, direction);
        Some(parameter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolution_x_steps_by_half() {
        let mut selector = Selector::default();
        let mut values = ParameterSet::default();

        selector.select_group(Group::Resolution);
        assert!(selector.select_member(Axis::X));
        assert_eq!(selector.active(), Some(Parameter::ResolutionX));
        assert_eq!(values.get(Parameter::ResolutionX), 3.0);

        for _ in 0..3 {
            selector.adjust(&mut values, Direction::Increase);
        }
        assert_eq!(values.get(Parameter::ResolutionX), 4.5);
        assert_eq!(values.get(Parameter::ResolutionY), 3.0);
    }

    #[test]
    fn member_without_group_is_ignored() {
        let mut selector = Selector::default();
        assert!(!selector.select_member(Axis::Y));
        assert_eq!(selector.selection(), Selection::None);

        selector.select(Parameter::Bandwidth);
        assert!(!selector.select_member(Axis::Z));
        assert_eq!(selector.active(), Some(Parameter::Bandwidth));
    }

    #[test]
    fn last_valid_pair_wins() {
        let mut selector = Selector::default();
        selector.select_group(Group::Mouse);
        selector.select_member(Axis::Z);
        selector.select_member(Axis::X);
        assert_eq!(selector.active(), Some(Parameter::MouseZ));

        selector.select_group(Group::Resolution);
        selector.select_group(Group::Mouse);
        selector.select_member(Axis::Y);
        assert_eq!(selector.active(), Some(Parameter::MouseY));
    }

    #[test]
    fn pending_group_blocks_adjustment() {
        let mut selector = Selector::default();
        let mut values = ParameterSet::default();
        selector.select(Parameter::Frequency);
        selector.select_group(Group::Resolution);

        assert_eq!(selector.adjust(&mut values, Direction::Increase), None);
        assert_eq!(values, ParameterSet::default());
    }

    #[test]
    fn adjust_round_trips_exactly() {
        let mut values = ParameterSet::default();
        for parameter in Parameter::ALL {
            let before = values.get(parameter);
            values.adjust(parameter, Direction::Increase);
            values.adjust(parameter, Direction::Decrease);
            assert_eq!(values.get(parameter), before, "{parameter}");
        }
    }

    #[test]
    fn values_are_unbounded() {
        let mut values = ParameterSet::default();
        for _ in 0..40 {
            values.adjust(Parameter::ImpulsesPerKernel, Direction::Decrease);
        }
        assert_eq!(values.get_i32(Parameter::ImpulsesPerKernel), -24);
    }
}
