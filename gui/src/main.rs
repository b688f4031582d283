use clap::Parser as _;
use color_eyre::Result;
use image_forge::{Gui, cli::Cli, context::Config, load_config};

pub fn main() -> Result<()> {
    color_eyre::install()?;
    pretty_env_logger::init();

    let cli = Cli::parse();
    let mut cfg = load_config()?;

    // Credential precedence: --openai-token, then the config file, then the
    // environment. The key is never validated up front, an invalid one
    // surfaces as a request failure.
    if let Some(token) = cli.openai_token {
        let mut c = cfg.unwrap_or_default();
        c.openai_token = token;
        cfg = Some(c);
    } else if cfg.is_none()
        && let Ok(token) = std::env::var("OPENAI_API_KEY")
    {
        cfg = Some(Config {
            openai_token: token,
            ..Config::default()
        });
    }

    iced::application(move || Gui::new(cfg.clone()), Gui::update, Gui::view)
        .theme(Gui::theme)
        .run()?;
    Ok(())
}
