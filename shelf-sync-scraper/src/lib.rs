pub mod client;
pub mod credentials;
pub mod error;
pub mod events;
pub mod html;
pub mod library;
pub mod pricing;
pub mod session;
pub mod settings;
pub mod sync;
pub mod types;
pub mod writer;

pub use credentials::Credentials;
pub use error::SyncError;
pub use events::run_with_events;
pub use library::{ApiLibrary, LibrarySource, UiLibrary};
pub use pricing::PricingClient;
pub use session::BackloggerySession;
pub use settings::{
    LibraryProtocol, SettingSource, SettingSources, Settings, save_to_file, setting_sources,
    settings_path,
};
pub use sync::{SyncEvent, SyncOutcome, SyncRequest, run_sync};
pub use writer::{AddForm, GameWriter};
