// ABOUTME: Registry of simulated operator SMSCs and the shared state of their sessions
// ABOUTME: Credential checks, session bookkeeping and race-free message id allocation per operator

mod profile;
mod state;

pub use profile::OperatorProfile;
pub use state::OperatorState;

use crate::config::OperatorSelection;
use crate::error::{SimResult, SimulatorError};
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

/// One running operator: its immutable profile plus the runtime state its
/// sessions mutate concurrently. Shared between the listener and every
/// session through an `Arc`.
#[derive(Debug)]
pub struct Operator {
    pub profile: OperatorProfile,
    pub state: OperatorState,
}

impl Operator {
    pub fn new(profile: OperatorProfile) -> Self {
        Operator {
            profile,
            state: OperatorState::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.profile.name
    }

    pub fn accepts(&self, system_id: &str) -> bool {
        self.profile.accepts(system_id)
    }

    pub fn receipts_enabled(&self) -> bool {
        self.profile.receipts_enabled
    }

    /// Allocate the next message id: operator name followed by the counter
    /// zero-padded to eight digits, e.g. `Roshan00000042`.
    pub fn next_message_id(&self) -> String {
        format!("{}{:08}", self.profile.name, self.state.next_message_number())
    }

    /// Identifier for a new session, derived from the operator name and the
    /// creation time.
    pub fn new_session_id(&self) -> String {
        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis())
            .unwrap_or_default();
        format!(
            "{}_{}_{}",
            self.profile.name,
            millis % 100_000,
            self.state.next_session_number()
        )
    }

    pub fn register_session(&self, session_id: &str) -> bool {
        self.state.register_session(session_id)
    }

    pub fn unregister_session(&self, session_id: &str) -> bool {
        self.state.unregister_session(session_id)
    }

    pub fn active_sessions(&self) -> usize {
        self.state.active_sessions()
    }
}

/// The fixed table of operators the simulator can run.
#[derive(Clone, Debug)]
pub struct OperatorRegistry {
    profiles: Vec<OperatorProfile>,
}

impl Default for OperatorRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

impl OperatorRegistry {
    pub fn new(profiles: Vec<OperatorProfile>) -> Self {
        OperatorRegistry { profiles }
    }

    pub fn builtin() -> Self {
        Self::new(OperatorProfile::builtin())
    }

    pub fn profiles(&self) -> &[OperatorProfile] {
        &self.profiles
    }

    pub fn get(&self, key: &str) -> Option<&OperatorProfile> {
        self.profiles
            .iter()
            .find(|p| p.key.eq_ignore_ascii_case(key))
    }

    pub fn keys(&self) -> Vec<&str> {
        self.profiles.iter().map(|p| p.key.as_str()).collect()
    }

    /// Resolve a selection into runtime operators, in registry order.
    ///
    /// With `receipts_enabled == false` every selected operator has its
    /// delivery receipts switched off.
    pub fn select(
        &self,
        selection: &OperatorSelection,
        receipts_enabled: bool,
    ) -> SimResult<Vec<Arc<Operator>>> {
        let chosen: Vec<&OperatorProfile> = match selection {
            OperatorSelection::All => self.profiles.iter().collect(),
            OperatorSelection::Only(keys) => {
                for key in keys {
                    if self.get(key).is_none() {
                        return Err(SimulatorError::UnknownOperator(
                            key.clone(),
                            self.keys().join(", "),
                        ));
                    }
                }
                self.profiles
                    .iter()
                    .filter(|p| keys.iter().any(|k| p.key.eq_ignore_ascii_case(k)))
                    .collect()
            }
        };

        if chosen.is_empty() {
            return Err(SimulatorError::NoOperators);
        }

        Ok(chosen
            .into_iter()
            .map(|profile| {
                let mut profile = profile.clone();
                profile.receipts_enabled &= receipts_enabled;
                Arc::new(Operator::new(profile))
            })
            .collect())
    }
}
