#[derive(Debug, clap::Parser)]
pub struct Cli {
    /// Overrides the configured OpenAI API key for this run
    #[arg(short, long)]
    pub openai_token: Option<String>,
}
