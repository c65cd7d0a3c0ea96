//! Chat command - identify an image, then answer questions from stdin

use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Args;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tracing::{debug, warn};

use crate::domain::session::Session;
use crate::domain::{BreedKnowledge, ConfidencePolicy, Verdict};
use crate::infrastructure::logging;
use crate::infrastructure::services::ChatService;
use crate::infrastructure::session::InMemorySessionRepository;

/// Typing this ends the conversation
pub const QUIT_COMMAND: &str = "quit";

#[derive(Args, Clone)]
pub struct ChatArgs {
    /// Image file (JPEG or PNG)
    pub image: PathBuf,
}

pub async fn run(args: ChatArgs) -> anyhow::Result<()> {
    let config = super::load_config();
    logging::init_cli_logging(&config.logging.level);

    let bytes = tokio::fs::read(&args.image)
        .await
        .with_context(|| format!("failed to read {}", args.image.display()))?;

    let classifier = crate::create_classifier(&config.classifier)?;
    let policy = ConfidencePolicy::new(config.classifier.confidence_threshold)?;

    let prediction = match policy.evaluate(classifier.identify(&bytes).await?) {
        Verdict::Accepted(prediction) => prediction,
        Verdict::LowConfidence(prediction) => {
            println!(
                "No dog detected (confidence {:.1}%, need {:.1}%). Try a clearer photo.",
                prediction.confidence(),
                policy.threshold()
            );
            return Ok(());
        }
    };

    let chat = ChatService::new(
        Arc::new(InMemorySessionRepository::new()),
        BreedKnowledge::builtin(),
    );
    let session = chat.start(&prediction).await?;

    let stdin = BufReader::new(tokio::io::stdin());
    let mut stdout = std::io::stdout();
    converse(&chat, &session, stdin, &mut stdout).await
}

/// Print the greeting, then answer one question per input line until EOF
/// or `quit`.
pub async fn converse<R, W>(
    chat: &ChatService,
    session: &Session,
    input: R,
    out: &mut W,
) -> anyhow::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    if let Some(greeting) = session.last_turn() {
        writeln!(out, "{}", greeting.text)?;
    }

    let mut lines = input.lines();
    loop {
        write!(out, "> ")?;
        out.flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let line = line.trim();

        if line.eq_ignore_ascii_case(QUIT_COMMAND) {
            break;
        }
        if line.is_empty() {
            continue;
        }

        match chat.ask(session.id().as_str(), line).await {
            Ok(reply) => {
                debug!(intent = ?reply.intent, "Replied");
                writeln!(out, "{}", reply.reply)?;
            }
            Err(e) => {
                warn!(error = %e, "Question rejected");
                writeln!(out, "{}", e)?;
            }
        }
    }

    writeln!(out)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Prediction, RawLabel};

    async fn run_with(input: &'static [u8]) -> (String, Session, ChatService) {
        let chat = ChatService::new(
            Arc::new(InMemorySessionRepository::new()),
            BreedKnowledge::builtin(),
        );
        let prediction = Prediction::new("Beagle", RawLabel::new("n02088364-beagle"), 0, 88.0);
        let session = chat.start(&prediction).await.unwrap();

        let mut out = Vec::new();
        converse(&chat, &session, input, &mut out).await.unwrap();

        (String::from_utf8(out).unwrap(), session, chat)
    }

    #[tokio::test]
    async fn test_conversation_until_quit() {
        let (out, session, chat) =
            run_with(b"where are they from?\n\nquit\nhow old do they get?\n").await;

        assert!(out.starts_with("Hello! I've identified this as a **Beagle**."));
        assert!(out.contains("🌍 **Origin:** The Beagle originates from United Kingdom."));
        assert!(!out.contains("Lifespan"));

        let stored = chat.get(session.id().as_str()).await.unwrap();
        assert_eq!(stored.turns().len(), 3);
    }

    #[tokio::test]
    async fn test_conversation_until_eof() {
        let (out, _, _) = run_with(b"hello").await;
        assert!(out.contains("Woof! I am your Beagle expert."));
    }
}
