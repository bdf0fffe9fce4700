// ABOUTME: Startup configuration for the simulator process
// ABOUTME: Which operators to run, where to listen and whether delivery receipts are emitted

use std::net::{IpAddr, Ipv4Addr};

/// Which operators to start.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub enum OperatorSelection {
    #[default]
    All,
    /// Registry keys, matched case-insensitively
    Only(Vec<String>),
}

impl OperatorSelection {
    /// Build a selection from command line values. No values, or any value
    /// equal to `all`, selects every operator.
    pub fn from_args<S: AsRef<str>>(args: &[S]) -> Self {
        if args.is_empty() || args.iter().any(|a| a.as_ref().eq_ignore_ascii_case("all")) {
            OperatorSelection::All
        } else {
            OperatorSelection::Only(args.iter().map(|a| a.as_ref().to_string()).collect())
        }
    }
}

/// Simulator process options
///
/// ```rust
/// use smsc_sim::config::{OperatorSelection, SimulatorConfig};
///
/// let config = SimulatorConfig::default()
///     .with_operators(OperatorSelection::from_args(&["roshan", "mtn"]))
///     .without_receipts();
/// assert!(!config.receipts_enabled);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SimulatorConfig {
    /// Address every operator listener binds to (default: 0.0.0.0)
    pub host: IpAddr,

    /// Operators to run (default: all)
    pub operators: OperatorSelection,

    /// Global delivery receipt switch (default: enabled)
    pub receipts_enabled: bool,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            operators: OperatorSelection::All,
            receipts_enabled: true,
        }
    }
}

impl SimulatorConfig {
    pub fn with_host(mut self, host: IpAddr) -> Self {
        self.host = host;
        self
    }

    pub fn with_operators(mut self, operators: OperatorSelection) -> Self {
        self.operators = operators;
        self
    }

    pub fn without_receipts(mut self) -> Self {
        self.receipts_enabled = false;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selection_from_args() {
        let empty: [&str; 0] = [];
        assert_eq!(OperatorSelection::from_args(&empty), OperatorSelection::All);
        assert_eq!(
            OperatorSelection::from_args(&["roshan", "ALL"]),
            OperatorSelection::All
        );
        assert_eq!(
            OperatorSelection::from_args(&["roshan", "mtn"]),
            OperatorSelection::Only(vec!["roshan".to_string(), "mtn".to_string()])
        );
    }

    #[test]
    fn defaults() {
        let config = SimulatorConfig::default();
        assert_eq!(config.host, IpAddr::V4(Ipv4Addr::UNSPECIFIED));
        assert_eq!(config.operators, OperatorSelection::All);
        assert!(config.receipts_enabled);
    }
}
