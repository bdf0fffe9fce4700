//! Multi-operator SMPP SMSC simulator.
//!
//! Each simulated operator listens on its own TCP port and accepts any number
//! of concurrent ESME binds. Sessions answer bind / submit_sm / enquire_link /
//! unbind and push a synthetic delivery receipt (deliver_sm) 1-5 seconds after
//! every accepted submit.
//!
//! ```rust,no_run
//! use smsc_sim::config::{OperatorSelection, SimulatorConfig};
//! use smsc_sim::Simulator;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = SimulatorConfig::default()
//!         .with_operators(OperatorSelection::from_args(&["roshan", "mtn"]));
//!
//!     let simulator = Simulator::start(&config).await?;
//!     simulator.run_until(tokio::signal::ctrl_c()).await;
//!     Ok(())
//! }
//! ```

pub mod codec;
pub mod config;
pub mod connection;
pub mod datatypes;
pub mod error;
pub mod listener;
pub mod operator;
pub mod receipt;
pub mod session;
pub mod shutdown;
pub mod simulator;


pub use codec::{read_c_string, CodecError, Pdu, PduHeader};
pub use config::{OperatorSelection, SimulatorConfig};
pub use error::{SessionError, SimResult, SimulatorError};
pub use operator::{Operator, OperatorProfile, OperatorRegistry};
pub use session::{Session, SessionState};
pub use simulator::Simulator;
