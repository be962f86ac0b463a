// Application layer - Use case interactors

pub mod container;
pub mod probe_interactor;
pub mod remux_interactor;

// Re-export interactors
pub use container::{AppContainer, DefaultAppContainer};
pub use probe_interactor::ProbeInteractor;
pub use remux_interactor::RemuxInteractor;
