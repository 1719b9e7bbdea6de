/// One-shot, in-memory guard. Resets only when a new store is built.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct RestoreLatch {
    fired: bool,
}

impl RestoreLatch {
    /// Returns true the first time only.
    pub(crate) fn try_fire(&mut self) -> bool {
        !std::mem::replace(&mut self.fired, true)
    }

    pub(crate) fn is_fired(&self) -> bool {
        self.fired
    }
}
