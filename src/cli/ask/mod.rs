//! Ask command - one question about a breed, no image needed

use clap::Args;
use tracing::debug;

use crate::infrastructure::logging;
use crate::infrastructure::services::KnowledgeService;

#[derive(Args, Clone)]
pub struct AskArgs {
    /// Breed name, e.g. "Golden Retriever"
    #[arg(long)]
    pub breed: String,

    /// The question to answer
    pub question: String,
}

pub async fn run(args: AskArgs) -> anyhow::Result<()> {
    let config = super::load_config();
    logging::init_cli_logging(&config.logging.level);

    let (intent, answer) = KnowledgeService::default().ask(&args.breed, &args.question)?;
    debug!(breed = %args.breed, intent = ?intent, "Answered question");

    println!("{}", answer);
    Ok(())
}
