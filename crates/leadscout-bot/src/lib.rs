pub mod client;
pub mod error;
pub mod format;
pub mod handler;
pub mod poll;
pub mod types;

pub use client::TelegramClient;
pub use error::BotError;
pub use format::{escape_markdown, format_record, MAX_CHAT_RESULTS};
pub use handler::handle_message;
pub use poll::run_polling;
pub use types::{Chat, Message, Update};
