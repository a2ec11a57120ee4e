//! Test utilities
//!
//! A recording [`ProcessRunner`] whose behaviour per program is scripted by
//! closures, plus proptest generators.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Mutex;

use crate::error::ProcessError;
use crate::infra::process::{Invocation, ProcessOutput, ProcessRunner};

type Handler = Box<dyn Fn(&Invocation) -> ProcessOutput + Send + Sync>;

/// Records every invocation and answers from per-program handlers
///
/// Programs without a handler succeed with no output.
#[derive(Default)]
pub struct FakeRunner {
    handlers: HashMap<String, Handler>,
    calls: Mutex<Vec<Invocation>>,
}

impl FakeRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Script what happens when `program` runs
    #[must_use]
    pub fn on<F>(mut self, program: &str, handler: F) -> Self
    where
        F: Fn(&Invocation) -> ProcessOutput + Send + Sync + 'static,
    {
        self.handlers.insert(program.to_string(), Box::new(handler));
        self
    }

    /// All invocations so far, in order
    pub fn calls(&self) -> Vec<Invocation> {
        self.calls.lock().unwrap().clone()
    }

    /// Invocations of one program
    pub fn calls_to(&self, program: &str) -> Vec<Invocation> {
        self.calls()
            .into_iter()
            .filter(|c| c.program == program)
            .collect()
    }
}

impl ProcessRunner for FakeRunner {
    async fn run(&self, invocation: &Invocation) -> Result<ProcessOutput, ProcessError> {
        self.calls.lock().unwrap().push(invocation.clone());
        Ok(self
            .handlers
            .get(&invocation.program)
            .map_or_else(ProcessOutput::ok, |h| h(invocation)))
    }
}

/// Value following `flag` in an invocation's args
pub fn flag_value<'a>(invocation: &'a Invocation, flag: &str) -> Option<&'a str> {
    invocation
        .args
        .iter()
        .position(|a| a == flag)
        .and_then(|i| invocation.args.get(i + 1))
        .map(String::as_str)
}

/// Create `<dir>/<name>/setup.py`
pub fn make_project(dir: &Path, name: &str) {
    let project = dir.join(name);
    std::fs::create_dir_all(&project).unwrap();
    std::fs::write(project.join("setup.py"), "from setuptools import setup\nsetup()\n").unwrap();
}

pub mod generators {
    use proptest::prelude::*;

    /// Generate a valid package name (lowercase alphanumeric with hyphens)
    pub fn package_name() -> impl Strategy<Value = String> {
        "[a-z][a-z0-9-]{0,30}[a-z0-9]?".prop_filter("Name must not be empty", |s| !s.is_empty())
    }

    /// Generate a valid release version string
    pub fn version() -> impl Strategy<Value = String> {
        (0u32..100, 0u32..100, 0u32..100)
            .prop_map(|(major, minor, patch)| format!("{major}.{minor}.{patch}"))
    }

    /// Generate a requirement line: a dependency, a comment or a blank line
    pub fn requirement_line() -> impl Strategy<Value = String> {
        prop_oneof![
            (package_name(), version()).prop_map(|(n, v)| format!("{n}=={v}")),
            package_name(),
            "#[ a-z0-9=]{0,20}",
            " {0,4}# [a-z]{0,10}",
            " {0,4}",
        ]
    }
}
