use std::collections::BTreeMap;

use serde::Deserialize;

use crate::error::Error;

/// One compositor workspace, as reported by `niri msg --json workspaces`.
///
/// The structs here mirror niri's wire format field for field, so they double
/// as the deserialization targets; unknown fields are ignored, and no
/// validation happens beyond what serde needs to fill the fields in.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub(crate) struct Workspace {
    pub(crate) id: u64,
    pub(crate) idx: u8,
    #[serde(default)]
    pub(crate) name: Option<String>,
    #[serde(default)]
    pub(crate) output: Option<String>,
    pub(crate) is_active: bool,
    pub(crate) is_focused: bool,
    #[serde(default)]
    pub(crate) active_window_id: Option<u64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub(crate) struct Mode {
    pub(crate) width: i32,
    pub(crate) height: i32,
    /// Millihertz, i.e. 60000 is 60 Hz.
    pub(crate) refresh_rate: i32,
}

/// Position, size and scale of an output in the compositor's logical
/// coordinate space. Absent while the output is disabled.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub(crate) struct LogicalOutput {
    pub(crate) x: i32,
    pub(crate) y: i32,
    pub(crate) width: i32,
    pub(crate) height: i32,
    pub(crate) scale: f64,
    pub(crate) transform: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub(crate) struct Output {
    pub(crate) name: String,
    pub(crate) make: String,
    pub(crate) model: String,
    #[serde(default)]
    pub(crate) serial: Option<String>,
    /// Physical width and height in millimeters, when known.
    #[serde(default)]
    pub(crate) physical_size: Option<(i32, i32)>,
    pub(crate) modes: Vec<Mode>,
    #[serde(default)]
    pub(crate) current_mode: Option<usize>,
    pub(crate) vrr_supported: bool,
    pub(crate) vrr_enabled: bool,
    #[serde(default)]
    pub(crate) logical: Option<LogicalOutput>,
}

impl Output {
    /// The display mode the output is currently driven at.
    pub(crate) fn active_mode(&self) -> Option<&Mode> {
        self.modes.get(self.current_mode?)
    }
}

/// Which output the user asked to act on.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum OutputSelector {
    /// `@current`: the output holding the focused workspace.
    Current,
    Named(String),
}

impl OutputSelector {
    pub(crate) fn parse(arg: &str) -> Self {
        if arg == "@current" {
            OutputSelector::Current
        } else {
            OutputSelector::Named(arg.to_string())
        }
    }
}

/// Snapshot of the compositor state, captured once per invocation and never
/// refreshed. The views below are plain projections over it.
#[derive(Debug)]
pub(crate) struct NiriState {
    pub(crate) workspaces: Vec<Workspace>,
    pub(crate) outputs: BTreeMap<String, Output>,
}

impl NiriState {
    /// At most one workspace is focused at any time.
    pub(crate) fn focused_workspace(&self) -> Option<&Workspace> {
        self.workspaces.iter().find(|workspace| workspace.is_focused)
    }

    /// The workspaces currently visible on their outputs, one per output.
    pub(crate) fn active_workspaces(&self) -> impl Iterator<Item = &Workspace> {
        self.workspaces.iter().filter(|workspace| workspace.is_active)
    }

    /// The output holding the focused workspace. `None` when no workspace is
    /// focused, the focused workspace has no output, or its output name does
    /// not appear in the output map.
    pub(crate) fn focused_output(&self) -> Option<&Output> {
        let name = self.focused_workspace()?.output.as_deref()?;
        self.outputs.get(name)
    }

    pub(crate) fn resolve_output(&self, selector: &OutputSelector) -> Result<&Output, Error> {
        match selector {
            OutputSelector::Current => self.focused_output().ok_or(Error::NoFocusedOutput),
            OutputSelector::Named(name) => self
                .outputs
                .get(name)
                .ok_or_else(|| Error::UnknownOutput(name.clone())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use maplit::btreemap;

    fn workspace(idx: u8, output: Option<&str>, is_focused: bool) -> Workspace {
        Workspace {
            id: idx as u64,
            idx,
            name: None,
            output: output.map(str::to_string),
            is_active: is_focused,
            is_focused,
            active_window_id: None,
        }
    }

    fn output(name: &str, scale: f64) -> Output {
        Output {
            name: name.to_string(),
            make: "Dell Inc.".to_string(),
            model: "U2720Q".to_string(),
            serial: Some("ABC123".to_string()),
            physical_size: Some((600, 340)),
            modes: vec![Mode {
                width: 3840,
                height: 2160,
                refresh_rate: 59997,
            }],
            current_mode: Some(0),
            vrr_supported: false,
            vrr_enabled: false,
            logical: Some(LogicalOutput {
                x: 0,
                y: 0,
                width: 2560,
                height: 1440,
                scale,
                transform: "normal".to_string(),
            }),
        }
    }

    #[test]
    fn focused_workspace_is_found() {
        let state = NiriState {
            workspaces: vec![
                workspace(1, Some("eDP-1"), false),
                workspace(2, Some("DP-1"), true),
            ],
            outputs: BTreeMap::new(),
        };

        assert_eq!(state.focused_workspace(), Some(&state.workspaces[1]));
    }

    #[test]
    fn active_workspaces_are_projected() {
        let mut unfocused_active = workspace(1, Some("eDP-1"), false);
        unfocused_active.is_active = true;
        let state = NiriState {
            workspaces: vec![
                unfocused_active,
                workspace(2, Some("DP-1"), true),
                workspace(3, Some("DP-1"), false),
            ],
            outputs: BTreeMap::new(),
        };

        let active: Vec<u8> = state.active_workspaces().map(|w| w.idx).collect();
        assert_eq!(active, vec![1, 2]);
    }

    #[test]
    fn sentinel_resolves_to_the_focused_workspaces_output() {
        // Arrange
        let state = NiriState {
            workspaces: vec![
                workspace(1, Some("eDP-1"), false),
                workspace(2, Some("DP-1"), true),
            ],
            outputs: btreemap! {
                "eDP-1".to_string() => output("eDP-1", 1.5),
                "DP-1".to_string() => output("DP-1", 1.0),
            },
        };

        // Act
        let resolved = state.resolve_output(&OutputSelector::Current);

        // Assert
        assert_eq!(resolved.unwrap().name, "DP-1");
    }

    #[test]
    fn sentinel_fails_when_no_workspace_is_focused() {
        let state = NiriState {
            workspaces: vec![workspace(1, Some("eDP-1"), false)],
            outputs: btreemap! { "eDP-1".to_string() => output("eDP-1", 1.5) },
        };

        let resolved = state.resolve_output(&OutputSelector::Current);
        assert!(matches!(resolved, Err(Error::NoFocusedOutput)));
    }

    #[test]
    fn sentinel_fails_when_focused_workspace_has_no_output() {
        let state = NiriState {
            workspaces: vec![workspace(1, None, true)],
            outputs: btreemap! { "eDP-1".to_string() => output("eDP-1", 1.5) },
        };

        let resolved = state.resolve_output(&OutputSelector::Current);
        assert!(matches!(resolved, Err(Error::NoFocusedOutput)));
    }

    #[test]
    fn sentinel_fails_when_focused_output_is_not_in_the_map() {
        let state = NiriState {
            workspaces: vec![workspace(1, Some("HDMI-A-1"), true)],
            outputs: btreemap! { "eDP-1".to_string() => output("eDP-1", 1.5) },
        };

        let resolved = state.resolve_output(&OutputSelector::Current);
        assert!(matches!(resolved, Err(Error::NoFocusedOutput)));
    }

    #[test]
    fn named_output_is_looked_up_directly() {
        // No focused workspace at all; the literal path must not care.
        let state = NiriState {
            workspaces: Vec::new(),
            outputs: btreemap! { "eDP-1".to_string() => output("eDP-1", 1.5) },
        };

        let selector = OutputSelector::parse("eDP-1");
        let resolved = state.resolve_output(&selector);
        assert_eq!(resolved.unwrap().name, "eDP-1");
    }

    #[test]
    fn unknown_named_output_fails_with_its_name() {
        let state = NiriState {
            workspaces: Vec::new(),
            outputs: btreemap! { "eDP-1".to_string() => output("eDP-1", 1.5) },
        };

        let resolved = state.resolve_output(&OutputSelector::parse("DP-9"));
        match resolved {
            Err(Error::UnknownOutput(name)) => assert_eq!(name, "DP-9"),
            other => panic!("expected UnknownOutput, got {other:?}"),
        }
    }

    #[test]
    fn selector_parse_recognizes_the_sentinel() {
        assert_eq!(OutputSelector::parse("@current"), OutputSelector::Current);
        assert_eq!(
            OutputSelector::parse("DP-1"),
            OutputSelector::Named("DP-1".to_string())
        );
    }

    #[test]
    fn active_mode_indexes_into_modes() {
        let output = output("eDP-1", 1.0);
        assert_eq!(output.active_mode(), Some(&output.modes[0]));

        let mut modeless = output.clone();
        modeless.current_mode = None;
        assert_eq!(modeless.active_mode(), None);
    }
}
