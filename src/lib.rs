//! Oinori Bot — LINE webhook bot that counts job-rejection mails.
//!
//! Users forward screenshots of rejection emails to a LINE chat; the bot
//! OCRs the image, looks for the usual rejection phrasing, bumps the
//! sender's counter, and answers a leaderboard command.

pub mod bot;
pub mod config;
pub mod detect;
pub mod error;
pub mod line;
pub mod ocr;
pub mod server;
pub mod store;
