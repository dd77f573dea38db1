//! Bot orchestration — ties the webhook events to OCR, detection, the
//! counter store, and replies.

use std::sync::Arc;

use crate::detect::RejectionDetector;
use crate::error::Result;
use crate::line::LineClient;
use crate::line::events::{EventSource, MessageContent, WebhookEvent, WebhookPayload};
use crate::ocr::OcrEngine;
use crate::store::{CounterEntry, CounterStore};

/// Leaderboard size.
const LEADERBOARD_LIMIT: usize = 10;

/// Texts (trimmed, lowercased) that trigger the leaderboard reply.
const RANKING_COMMANDS: &[&str] = &["ランキング", "rank", "stats", "stat"];

/// The rejection-counter bot.
pub struct Bot {
    line: Arc<LineClient>,
    ocr: Arc<dyn OcrEngine>,
    store: Arc<dyn CounterStore>,
    detector: RejectionDetector,
}

impl Bot {
    pub fn new(
        line: Arc<LineClient>,
        ocr: Arc<dyn OcrEngine>,
        store: Arc<dyn CounterStore>,
        detector: RejectionDetector,
    ) -> Self {
        Self {
            line,
            ocr,
            store,
            detector,
        }
    }

    /// Handle one webhook delivery. Each event is guarded individually so
    /// a failure cannot take down its siblings.
    pub async fn handle_payload(&self, payload: WebhookPayload) {
        for event in payload.events {
            if let Err(e) = self.handle_event(event).await {
                tracing::error!(error = %e, "Event handling failed");
            }
        }
    }

    async fn handle_event(&self, event: WebhookEvent) -> Result<()> {
        let WebhookEvent::Message {
            reply_token,
            source,
            message,
        } = event
        else {
            return Ok(());
        };

        match message {
            MessageContent::Image { id } => self.on_image(&reply_token, &source, &id).await,
            MessageContent::Text { text, .. } => self.on_text(&reply_token, &text).await,
            MessageContent::Other => Ok(()),
        }
    }

    /// Image message: download → OCR → detect → count → reply.
    async fn on_image(
        &self,
        reply_token: &str,
        source: &EventSource,
        message_id: &str,
    ) -> Result<()> {
        let image = self.line.get_message_content(message_id).await?;
        let text = self.ocr.extract_text(&image).await?;

        if !self.detector.contains_rejection(&text) {
            tracing::debug!(message_id, "No rejection wording in image");
            return Ok(());
        }

        let Some(user_id) = source.user_id() else {
            tracing::warn!(message_id, "Rejection detected but event has no user ID");
            return Ok(());
        };

        let display_name = self.line.display_name(source).await;
        let total = self.store.increment(user_id, &display_name).await?;
        tracing::info!(user_id, total, "Rejection mail counted");

        let reply = format!(
            "📩 {display_name}さん、落選メールを検出しました！\nあなたはこれで {total} 件目です😭"
        );
        self.line.reply_message(reply_token, &reply).await?;
        Ok(())
    }

    /// Text message: only the ranking command gets a reply.
    async fn on_text(&self, reply_token: &str, text: &str) -> Result<()> {
        if !is_ranking_command(text) {
            return Ok(());
        }

        let entries = self.store.top(LEADERBOARD_LIMIT).await?;
        let reply = format_leaderboard(&entries);
        self.line.reply_message(reply_token, &reply).await?;
        Ok(())
    }
}

/// True if the trimmed, lowercased text is one of the ranking commands.
pub fn is_ranking_command(text: &str) -> bool {
    let msg = text.trim().to_lowercase();
    RANKING_COMMANDS.contains(&msg.as_str())
}

/// Render the leaderboard reply. Top three get medals, the rest a number.
pub fn format_leaderboard(entries: &[CounterEntry]) -> String {
    if entries.is_empty() {
        return "まだ誰も落選メールを共有していません！✨".to_string();
    }

    let medals = ["🥇", "🥈", "🥉"];
    let mut lines = vec!["🏆 落選メールカウント ランキング 🏆".to_string()];
    for (i, entry) in entries.iter().enumerate() {
        let medal = medals
            .get(i)
            .map(|m| m.to_string())
            .unwrap_or_else(|| format!("{}.", i + 1));
        lines.push(format!("{medal} {}さん: {} 件", entry.display_name, entry.count));
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: &str, count: i64) -> CounterEntry {
        CounterEntry {
            display_name: name.to_string(),
            count,
        }
    }

    // ── Ranking command matching ────────────────────────────────────

    #[test]
    fn ranking_command_variants() {
        assert!(is_ranking_command("ランキング"));
        assert!(is_ranking_command("rank"));
        assert!(is_ranking_command("stats"));
        assert!(is_ranking_command("stat"));
    }

    #[test]
    fn ranking_command_trims_and_lowercases() {
        assert!(is_ranking_command("  RANK  "));
        assert!(is_ranking_command("Stats\n"));
    }

    #[test]
    fn ordinary_text_is_not_a_command() {
        assert!(!is_ranking_command("hello"));
        assert!(!is_ranking_command("ranking"));
        assert!(!is_ranking_command(""));
    }

    // ── Leaderboard formatting ──────────────────────────────────────

    #[test]
    fn empty_leaderboard_message() {
        assert_eq!(
            format_leaderboard(&[]),
            "まだ誰も落選メールを共有していません！✨"
        );
    }

    #[test]
    fn top_three_get_medals() {
        let entries = vec![entry("A", 5), entry("B", 3), entry("C", 2), entry("D", 1)];
        let board = format_leaderboard(&entries);
        let lines: Vec<&str> = board.lines().collect();
        assert_eq!(lines[0], "🏆 落選メールカウント ランキング 🏆");
        assert_eq!(lines[1], "🥇 Aさん: 5 件");
        assert_eq!(lines[2], "🥈 Bさん: 3 件");
        assert_eq!(lines[3], "🥉 Cさん: 2 件");
        assert_eq!(lines[4], "4. Dさん: 1 件");
    }

    #[test]
    fn single_entry_board() {
        let board = format_leaderboard(&[entry("Alice", 1)]);
        assert!(board.contains("🥇 Aliceさん: 1 件"));
    }
}
