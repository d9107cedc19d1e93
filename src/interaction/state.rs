use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayStatus {
    Success,
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractionState {
    AwaitingInput,
    Validating,
    Generating,
    Persisting,
    Displaying(DisplayStatus),
}

pub struct StateMachine {
    current: InteractionState,
}

impl Default for StateMachine {
    fn default() -> Self {
        Self::new()
    }
}

impl StateMachine {
    pub fn new() -> Self {
        Self {
            current: InteractionState::AwaitingInput,
        }
    }

    pub fn enter(&mut self, next: InteractionState) {
        debug!(from = ?self.current, to = ?next, "interaction state change");
        self.current = next;
    }

    pub fn finish(mut self, status: DisplayStatus) -> InteractionState {
        self.enter(InteractionState::Displaying(status));
        self.current
    }
}
