use std::{
    fmt, fs,
    path::{Path, PathBuf},
};

use color_eyre::{
    Result,
    eyre::{WrapErr as _, eyre},
};
use iced::{
    Element, Font, Length, Task, Theme,
    font::{self},
    padding,
    widget::{container, scrollable, text},
};
use serde::{Serialize, de::DeserializeOwned};

use crate::{
    context::{Config, Context},
    message::Message,
    state::{Generator, Modal, OptionsMenu, State, StateExt as _},
};

pub mod cli;
pub mod context;
pub mod message;
pub mod state;

const APP_NAME: &str = "Image Forge";

pub struct Gui {
    state: Box<dyn State>,
    ctx: Context,
}

impl Gui {
    pub fn new(mb_config: Option<Config>) -> Self {
        if let Some(cfg) = mb_config {
            Gui {
                state: Generator::new().boxed(),
                ctx: Context::from_config(cfg),
            }
        } else {
            Gui {
                state: Modal::message(
                    OptionsMenu.boxed(),
                    "Welcome",
                    indoc::indoc! {"
                    Hi, since this is your first time starting Image Forge, please configure your
                    OpenAI API key. Prompts are sent directly to the image generation endpoint
                    with that key, so nothing works without it.
                    "
                    },
                )
                .boxed(),
                ctx: Context::from_config(Config::default()),
            }
        }
    }

    pub fn update(&mut self, message: Message) -> Task<Message> {
        match self.try_update(message) {
            Ok(task) => task,
            Err(e) => {
                self.state = Modal::message(self.state.clone(), "Error", format!("{e:?}")).boxed();
                Task::none()
            }
        }
    }

    fn try_update(&mut self, message: Message) -> Result<Task<Message>> {
        let cmd = self.state.update(message, &mut self.ctx)?;
        if let Some(new_state) = cmd.transition {
            self.state = new_state;
        }
        Ok(cmd.task.unwrap_or(Task::none()))
    }

    pub fn view(&self) -> Element<'_, Message> {
        self.state.view(&self.ctx)
    }

    pub fn theme(&self) -> Theme {
        Theme::SolarizedLight
    }
}

/// Iced messages must be Clone, so errors cross the task boundary as plain
/// display strings.
#[derive(Debug, Clone)]
pub struct StringError(pub String);

impl fmt::Display for StringError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<color_eyre::Report> for StringError {
    fn from(err: color_eyre::Report) -> Self {
        Self(format!("{err:#}"))
    }
}

pub fn load_ron_file<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let src = fs::read_to_string(path)?;
    Ok(ron::from_str(&src)?)
}

pub fn save_ron_file<T: Serialize>(path: &Path, x: &T) -> Result<()> {
    Ok(fs::write(path, &ron::to_string(x)?)?)
}

pub fn config_path() -> Result<PathBuf> {
    Ok(dirs::config_local_dir()
        .ok_or(eyre!("Couldn't get config dir"))?
        .join("image_forge.ron"))
}

pub fn load_config() -> Result<Option<Config>> {
    let path = config_path()?;
    if !path.exists() {
        Ok(None)
    } else {
        load_ron_file(&path).map(Some)
    }
}

pub fn save_config(ps: &Config) -> Result<()> {
    let path = config_path()?;
    save_ron_file(&path, ps)?;
    Ok(())
}

macro_rules! elem_list {
    ($($elems:expr),+ $(,)?) => {
        [$(iced::Element::from($elems)),*]
    };
}
pub(crate) use elem_list;

pub trait ElemHelper<'a, T> {
    fn into_elem(self) -> Element<'a, T>;
}

impl<'a, ElemT, T: Into<Element<'a, ElemT>>> ElemHelper<'a, ElemT> for T {
    fn into_elem(self) -> Element<'a, ElemT> {
        self.into()
    }
}

fn italic_text(t: &str) -> iced::widget::Text<'_> {
    iced::widget::text(t).font(italic_default_font())
}

fn italic_default_font() -> Font {
    Font {
        style: font::Style::Italic,
        ..Font::DEFAULT
    }
}

fn bold_text<'a>(t: impl text::IntoFragment<'a>) -> iced::widget::Text<'a> {
    iced::widget::text(t).font(bold_default_font())
}

fn bold_default_font() -> Font {
    Font {
        weight: font::Weight::Bold,
        ..Font::DEFAULT
    }
}

fn top_level_container<'a, T: Send + 'static>(
    elem: impl Into<Element<'a, T>>,
) -> container::Container<'a, T> {
    container(
        container(scrollable(
            container(elem).padding(padding::all(10).right(20)),
        ))
        .padding(20)
        .max_width(800),
    )
    .center(Length::Fill)
}

pub trait TryIntoExt<T> {
    fn try_into_ex(self) -> color_eyre::Result<T>;
}

impl<T, Target, E> TryIntoExt<Target> for T
where
    T: TryInto<Target, Error = E>,
    T: fmt::Debug,
    T: Clone,
    E: std::error::Error + Send + Sync + 'static,
{
    fn try_into_ex(self) -> color_eyre::Result<Target> {
        self.clone()
            .try_into()
            .with_context(|| format!("{self:#?}"))
    }
}
