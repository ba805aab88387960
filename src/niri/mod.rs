use std::collections::{BTreeMap, HashMap};
use std::process;

use crate::error::Error;
use crate::state::{NiriState, Output, Workspace};

mod parsing;

/// Builder for `niri msg ...` command lines.
struct NiriMsg {
    command: process::Command,
}

impl NiriMsg {
    fn new() -> Self {
        let mut command = process::Command::new("niri");
        command.arg("msg");
        Self { command }
    }

    fn json(mut self) -> Self {
        self.command.arg("--json");
        self
    }

    fn query(mut self, message: &str) -> Self {
        self.command.arg(message);
        self
    }

    fn set_scale(mut self, output_name: &str, scale: f64) -> Self {
        self.command
            .arg("output")
            .arg(output_name)
            .arg("scale")
            .arg(scale.to_string());
        self
    }

    fn command(self) -> process::Command {
        self.command
    }
}

fn run(mut command: process::Command) -> Result<process::Output, Error> {
    log::debug!("Running {command:?}");
    let output = command.output()?;
    log::trace!("Output: {output:?}");

    if !output.status.success() {
        return Err(Error::ExternalToolFailure(output.status));
    }

    Ok(output)
}

/// Handle for talking to niri within one invocation.
///
/// The compositor state does not change mid-run as far as this tool is
/// concerned, so read queries are memoized by message name: `workspaces` and
/// `outputs` each spawn at most one child process no matter how often they
/// are asked for.
pub(crate) struct Client {
    cache: HashMap<&'static str, Vec<u8>>,
}

impl Client {
    pub(crate) fn new() -> Self {
        Self {
            cache: HashMap::new(),
        }
    }

    fn query_json(&mut self, message: &'static str) -> Result<&[u8], Error> {
        if !self.cache.contains_key(message) {
            let output = run(NiriMsg::new().json().query(message).command())?;
            if output.stdout.is_empty() {
                return Err(Error::EmptyResponse);
            }
            self.cache.insert(message, output.stdout);
        }
        Ok(&self.cache[message])
    }

    pub(crate) fn workspaces(&mut self) -> Result<Vec<Workspace>, Error> {
        let response = self.query_json("workspaces")?;
        Ok(parsing::parse_workspaces(response)?)
    }

    pub(crate) fn outputs(&mut self) -> Result<BTreeMap<String, Output>, Error> {
        let response = self.query_json("outputs")?;
        Ok(parsing::parse_outputs(response)?)
    }

    /// Capture the workspace and output inventories as one immutable snapshot.
    pub(crate) fn snapshot(&mut self) -> Result<NiriState, Error> {
        let workspaces = self.workspaces()?;
        let outputs = self.outputs()?;
        Ok(NiriState {
            workspaces,
            outputs,
        })
    }

    /// Ask niri to set `output_name` to `scale`. The only mutating command
    /// this tool issues; failure is reported through the exit status alone.
    pub(crate) fn apply_scale(&self, output_name: &str, scale: f64) -> Result<(), Error> {
        run(NiriMsg::new().set_scale(output_name, scale).command())?;
        Ok(())
    }
}
