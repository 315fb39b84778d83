use crate::lattice::Cell;
use crate::params::Parameter;

/// Everything a driver can ask of a [`crate::sim::Simulation`] between ticks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    StepOnce,
    ToggleNode(Cell),
    ApplyStimulus(Cell),
    ClearStimulus(Cell),
    /// Clear under the previous brush position, then apply at this one.
    MoveStimulus(Cell),
    ResizeBrush(i32),
    AdjustBrushBrightness(f64),
    AdjustParameter { parameter: Parameter, steps: i32 },
    PowerCycle,
    ResetActiveNodes,
}
