//! Per-call search settings.
//!
//! The engine holds one [`SearchConfig`] between calls. A solve call takes it
//! and leaves [`SearchConfig::default`] behind, so a budget raised for one
//! search never carries over into the next.

use crate::error::{PuzzleError, Result};

/// Node budget used when none is configured.
pub const DEFAULT_MAX_NODES: usize = 1000;

/// DFS depth limit used when none is configured.
pub const DEFAULT_DEPTH_LIMIT: usize = 31;

pub const MAX_NODES_SETTING: &str = "maxnodes";
pub const DEPTH_LIMIT_SETTING: &str = "depthlimit";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchConfig {
    /// Maximum number of accepted states before a search aborts.
    pub max_nodes: usize,
    /// DFS discards any entry at this depth or deeper.
    pub depth_limit: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_nodes: DEFAULT_MAX_NODES,
            depth_limit: DEFAULT_DEPTH_LIMIT,
        }
    }
}

impl SearchConfig {
    /// Builds a configuration, rejecting zero for either setting.
    pub fn new(max_nodes: usize, depth_limit: usize) -> Result<Self> {
        Ok(Self {
            max_nodes: positive(MAX_NODES_SETTING, max_nodes)?,
            depth_limit: positive(DEPTH_LIMIT_SETTING, depth_limit)?,
        })
    }

    pub fn with_max_nodes(self, max_nodes: usize) -> Result<Self> {
        Self::new(max_nodes, self.depth_limit)
    }

    pub fn with_depth_limit(self, depth_limit: usize) -> Result<Self> {
        Self::new(self.max_nodes, depth_limit)
    }
}

fn positive(setting: &'static str, value: usize) -> Result<usize> {
    if value == 0 {
        return Err(PuzzleError::InvalidConfiguration {
            setting,
            value: value.to_string(),
        });
    }
    Ok(value)
}

/// Parses a textual setting into a positive integer.
///
/// Non-numeric, zero and negative values all fail with
/// [`PuzzleError::InvalidConfiguration`].
pub fn parse_setting(setting: &'static str, raw: &str) -> Result<usize> {
    let invalid = || PuzzleError::InvalidConfiguration {
        setting,
        value: raw.to_string(),
    };
    let value = raw.trim().parse::<usize>().map_err(|_| invalid())?;
    positive(setting, value).map_err(|_| invalid())
}
