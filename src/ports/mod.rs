//! Ports (trait boundaries) for external collaborators.
//!
//! The agent and the training pipeline depend only on these traits; concrete
//! opponents, observers, and storage live in `pipeline` and `adapters`.

pub mod observer;
pub mod opponent;
pub mod repository;

pub use observer::Observer;
pub use opponent::Opponent;
pub use repository::AgentRepository;
