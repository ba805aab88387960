use std::collections::BTreeMap;

use crate::state::{Output, Workspace};

pub(super) fn parse_workspaces(response: &[u8]) -> Result<Vec<Workspace>, serde_json::Error> {
    serde_json::from_slice(response)
}

pub(super) fn parse_outputs(
    response: &[u8],
) -> Result<BTreeMap<String, Output>, serde_json::Error> {
    serde_json::from_slice(response)
}
