//! Finite state machine for component lifecycle on the local host

use cli_models::LifecycleState;

/// Lifecycle event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleEvent {
    /// Component installed
    Install,

    /// Begin starting
    Start,

    /// Startup completed
    Started,

    /// Begin stopping
    Stop,

    /// Shutdown completed
    Stopped,

    /// Restart requested (stop if needed, then start)
    Restart,
}

/// Component lifecycle FSM
#[derive(Debug, Clone)]
pub struct ComponentFsm {
    state: LifecycleState,
}

impl Default for ComponentFsm {
    fn default() -> Self {
        Self::new()
    }
}

impl ComponentFsm {
    /// Create a new FSM in `NEW` state
    pub fn new() -> Self {
        Self {
            state: LifecycleState::New,
        }
    }

    pub fn state(&self) -> LifecycleState {
        self.state
    }

    /// Process an event and transition state
    pub fn process(&mut self, event: LifecycleEvent) -> Result<(), String> {
        use LifecycleState::*;

        let new_state = match (self.state, event) {
            (New, LifecycleEvent::Install) => Installed,

            (Installed | Finished, LifecycleEvent::Start) => Starting,
            (Starting, LifecycleEvent::Started) => Running,

            (Starting | Running, LifecycleEvent::Stop) => Stopping,
            (Stopping, LifecycleEvent::Stopped) => Finished,

            (Installed | Running | Stopping | Finished, LifecycleEvent::Restart) => Starting,

            (state, event) => {
                return Err(format!("Invalid transition: {:?} -> {:?}", state, event));
            }
        };

        self.state = new_state;
        Ok(())
    }
}
