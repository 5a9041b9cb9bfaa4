pub mod bridge;
pub mod session;

pub use bridge::{WizardBridge, WizardSnapshot};
pub use session::{BrowserConfig, BrowserKind, new_session};
