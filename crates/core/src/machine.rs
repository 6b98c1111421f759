//! State machine trait for client-side flows (wizards, walkthroughs).

/// Deterministic state machine with separated decision and mutation.
///
/// - **Decision logic**: `handle(&self, cmd)` returns events without touching state.
/// - **State mutation**: `apply(&mut self, event)` evolves state.
///
/// Implementations must not perform IO. Network calls happen in the driver that
/// owns the machine; their outcomes are fed back in as commands.
pub trait StateMachine {
    type Command: Clone + core::fmt::Debug;
    type Event: Clone + core::fmt::Debug;
    type Error: core::fmt::Debug;

    /// Number of events applied so far.
    fn version(&self) -> u64;

    /// Evolve in-memory state from a single event.
    ///
    /// Implementations should bump `version()` by one per applied event.
    fn apply(&mut self, event: &Self::Event);

    /// Decide which events to emit given the current state and a command.
    fn handle(&self, command: &Self::Command) -> Result<Vec<Self::Event>, Self::Error>;

    /// Handle a command and apply the resulting events in order.
    fn execute(&mut self, command: &Self::Command) -> Result<Vec<Self::Event>, Self::Error> {
        let events = self.handle(command)?;
        for event in &events {
            self.apply(event);
        }
        Ok(events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default)]
    struct Counter {
        value: i64,
        version: u64,
    }

    #[derive(Debug, Clone)]
    enum CounterCommand {
        Add(i64),
    }

    #[derive(Debug, Clone, PartialEq)]
    enum CounterEvent {
        Added(i64),
    }

    impl StateMachine for Counter {
        type Command = CounterCommand;
        type Event = CounterEvent;
        type Error = String;

        fn version(&self) -> u64 {
            self.version
        }

        fn apply(&mut self, event: &Self::Event) {
            match event {
                CounterEvent::Added(n) => self.value += n,
            }
            self.version += 1;
        }

        fn handle(&self, command: &Self::Command) -> Result<Vec<Self::Event>, Self::Error> {
            match command {
                CounterCommand::Add(0) => Err("zero is not a change".to_string()),
                CounterCommand::Add(n) => Ok(vec![CounterEvent::Added(*n)]),
            }
        }
    }

    #[test]
    fn execute_applies_every_event_and_bumps_version() {
        let mut counter = Counter::default();
        counter.execute(&CounterCommand::Add(3)).unwrap();
        counter.execute(&CounterCommand::Add(-1)).unwrap();

        assert_eq!(counter.value, 2);
        assert_eq!(counter.version(), 2);
    }

    #[test]
    fn rejected_command_leaves_state_untouched() {
        let mut counter = Counter::default();
        let err = counter.execute(&CounterCommand::Add(0)).unwrap_err();

        assert_eq!(err, "zero is not a change");
        assert_eq!(counter.value, 0);
        assert_eq!(counter.version(), 0);
    }
}
