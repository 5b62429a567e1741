//! Scripted command runner for testing.

use std::{
    collections::{HashMap, VecDeque},
    sync::{Arc, Mutex},
};

use fabrik_core::{
    application::{ApplicationError, ports::CommandRunner},
    domain::{CommandOutput, CommandSpec},
    error::{FabrikError, FabrikResult},
};

/// Runner that records every command and replays queued responses.
///
/// Responses are queued per program name and consumed in order. A program
/// with nothing queued succeeds with empty output. Clones share state, so a
/// test can keep one handle while the services own another.
#[derive(Debug, Clone, Default)]
pub struct ScriptedRunner {
    inner: Arc<Mutex<ScriptedInner>>,
}

#[derive(Debug, Default)]
struct ScriptedInner {
    calls: Vec<CommandSpec>,
    responses: HashMap<String, VecDeque<FabrikResult<CommandOutput>>>,
}

impl ScriptedRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue the output of the next run of `program`.
    pub fn respond(&self, program: impl Into<String>, output: CommandOutput) -> &Self {
        self.push(program.into(), Ok(output))
    }

    /// Queue an error for the next run of `program`.
    pub fn fail(&self, program: impl Into<String>, error: impl Into<FabrikError>) -> &Self {
        self.push(program.into(), Err(error.into()))
    }

    /// Every command run so far, in order.
    pub fn calls(&self) -> Vec<CommandSpec> {
        self.inner
            .lock()
            .map(|inner| inner.calls.clone())
            .unwrap_or_default()
    }

    /// Commands run so far for one program.
    pub fn calls_to(&self, program: &str) -> Vec<CommandSpec> {
        self.calls()
            .into_iter()
            .filter(|spec| spec.program == program)
            .collect()
    }

    fn push(&self, program: String, response: FabrikResult<CommandOutput>) -> &Self {
        if let Ok(mut inner) = self.inner.lock() {
            inner.responses.entry(program).or_default().push_back(response);
        }
        self
    }
}

impl CommandRunner for ScriptedRunner {
    fn run(&self, spec: &CommandSpec) -> FabrikResult<CommandOutput> {
        let mut inner = self
            .inner
            .lock()
            .map_err(|_| ApplicationError::LockPoisoned)?;

        inner.calls.push(spec.clone());
        inner
            .responses
            .get_mut(&spec.program)
            .and_then(VecDeque::pop_front)
            .unwrap_or_else(|| Ok(CommandOutput::success("")))
    }
}
