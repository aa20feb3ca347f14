//! # Domain Layer
//!
//! Pure wallet logic. No locking, no I/O, no notifications.

pub mod administrators;
pub mod caller;
pub mod gas;
pub mod invariants;
pub mod ledger;
pub mod sessions;
pub mod state;
pub mod users;

pub use administrators::AdministratorSet;
pub use caller::Caller;
pub use gas::{GasMeter, GasSchedule, Operation};
pub use ledger::Ledger;
pub use sessions::{Session, SessionBook, SessionPayload, StartSessionRequest};
pub use state::{Lifecycle, WalletState};
pub use users::{User, UserRegistry};
