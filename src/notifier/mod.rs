pub mod delivery;
pub mod render;
pub mod telegram;

pub use delivery::deliver_new_signals;
pub use telegram::{LatestAnalyses, TelegramNotifier};
