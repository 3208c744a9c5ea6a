use crate::core::models::interaction::Interaction;

/// Which variables the stored differential cross section is differential in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KinePhaseSpace {
    #[default]
    Undefined,
    WQ2,
    XY,
    Q2,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EventFlags {
    pub kine_gen_error: bool,
}

/// The part of a generated event the kinematics generators read and write.
#[derive(Debug, Clone, PartialEq)]
pub struct EventRecord {
    pub interaction: Interaction,
    pub diff_xsec: f64,
    pub phase_space: KinePhaseSpace,
    pub flags: EventFlags,
}

impl EventRecord {
    pub fn new(interaction: Interaction) -> Self {
        Self {
            interaction,
            diff_xsec: 0.0,
            phase_space: KinePhaseSpace::Undefined,
            flags: EventFlags::default(),
        }
    }

    pub fn set_diff_xsec(&mut self, xsec: f64, phase_space: KinePhaseSpace) {
        self.diff_xsec = xsec;
        self.phase_space = phase_space;
    }

    /// Marks the event as abandoned by kinematics generation.
    pub fn mark_kine_gen_error(&mut self) {
        self.set_diff_xsec(0.0, KinePhaseSpace::Undefined);
        self.flags.kine_gen_error = true;
        self.interaction.flags.reset_skip_checks();
    }
}
