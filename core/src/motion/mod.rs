pub mod history;
pub mod provider;

pub use history::ImuHistory;
pub use provider::ImuProvider;
