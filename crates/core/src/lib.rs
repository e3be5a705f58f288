pub mod config;
pub mod context;
pub mod device;
pub mod error;
pub mod ids;
pub mod submission;
pub mod types;
pub mod webhook;

pub use config::Settings;
pub use error::SubmissionError;
pub use submission::submit;
pub use webhook::WebhookClient;
