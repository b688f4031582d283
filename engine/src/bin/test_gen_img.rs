use clap::Parser as _;
use color_eyre::Result;
use engine::image_model::{ResponseFormat, Size, openai::openai_api};

#[derive(Debug, clap::Parser)]
struct Args {
    api_key: String,
    prompt: String,

    #[arg(long, value_enum)]
    size: Option<Size>,

    #[arg(long, value_enum)]
    format: Option<ResponseFormat>,
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    pretty_env_logger::init();
    let args = Args::parse();

    let client = reqwest::Client::new();
    let payload = openai_api::generate(
        &args.prompt,
        args.size.unwrap_or_default(),
        args.format.unwrap_or_default(),
        &args.api_key,
        &client,
    )
    .await?;
    println!("Payload: {} chars", payload.source().len());

    let image_bytes = openai_api::fetch_bytes(&payload, &client).await?;
    std::fs::write("output.png", &image_bytes)?;
    println!("Saved image, {} bytes", image_bytes.len());

    Ok(())
}
