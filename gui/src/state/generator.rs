use color_eyre::Result;
use engine::{GeneratedImage, ImagePayload};
use iced::{
    Element, Length, Task,
    advanced::image::Handle as ImgHandle,
    alignment::Vertical,
    widget::{
        self, button, column, container, radio, row, space, text,
        text_editor::{self, Edit},
    },
};
use log::info;
use strum::IntoEnumIterator;

use crate::{
    APP_NAME, ElemHelper, StringError, TryIntoExt, bold_text, elem_list, italic_text,
    context::Context,
    message::{Message, ui_messages::Generator as MyMessage},
    state::{Modal, OptionsMenu, State, StateCommand, cmd},
    top_level_container,
};

#[derive(Debug, Clone)]
pub struct Generator {
    prompt_content: text_editor::Content,
    is_loading: bool,
    error: Option<String>,
    image: Option<GeneratedOutput>,
}

#[derive(Debug, Clone)]
struct GeneratedOutput {
    handle: ImgHandle,
    caption: String,
    payload: ImagePayload,
}

impl Generator {
    pub fn new() -> Self {
        Self {
            prompt_content: text_editor::Content::default(),
            is_loading: false,
            error: None,
            image: None,
        }
    }

    fn submit(&mut self, ctx: &mut Context) -> Result<StateCommand> {
        // At most one request may be outstanding.
        if self.is_loading {
            return cmd::none();
        }

        let prompt = self.prompt_content.text().trim().to_string();
        if prompt.is_empty() {
            return cmd::transition(Modal::message(
                State::clone(self),
                "Missing Prompt",
                "Please describe the image you want before generating.",
            ));
        }

        self.is_loading = true;
        self.error = None;

        let model = ctx.config.image_model();
        let size = ctx.config.size;
        let format = ctx.config.format;
        let fut = async move { model.generate(&prompt, size, format).await };
        cmd::task(Task::perform(fut, |res| {
            MyMessage::GenerationFinished(res.map_err(StringError::from)).into()
        }))
    }

    fn finish(&mut self, result: Result<GeneratedImage, StringError>) {
        self.is_loading = false;
        match result {
            Ok(GeneratedImage { payload, data }) => {
                info!("image generated, {} bytes", data.len());
                let caption = match &payload {
                    ImagePayload::Url(url) => url.clone(),
                    ImagePayload::Base64(_) => format!("inline base64 image, {} bytes", data.len()),
                };
                self.error = None;
                self.image = Some(GeneratedOutput {
                    handle: ImgHandle::from_bytes(data),
                    caption,
                    payload,
                });
            }
            Err(e) => self.error = Some(e.to_string()),
        }
    }
}

impl State for Generator {
    fn update(&mut self, event: Message, ctx: &mut Context) -> Result<StateCommand> {
        use MyMessage::*;
        match event.try_into_ex()? {
            UpdatePromptText(action) => {
                if let text_editor::Action::Edit(Edit::Enter) = action {
                    cmd::task(Task::done(MyMessage::Submit.into()))
                } else {
                    self.prompt_content.perform(action);
                    cmd::none()
                }
            }
            SelectSize(size) => {
                ctx.config.size = size;
                cmd::none()
            }
            SelectFormat(format) => {
                ctx.config.format = format;
                cmd::none()
            }
            Submit => self.submit(ctx),
            GenerationFinished(result) => {
                self.finish(result);
                cmd::none()
            }
            CopySourceToClipboard => match &self.image {
                Some(output) => {
                    cmd::task(iced::clipboard::write::<Message>(output.payload.data_uri()))
                }
                None => cmd::none(),
            },
            ToOptionsMenu => cmd::transition(OptionsMenu),
        }
    }

    fn view<'a>(&'a self, ctx: &'a Context) -> Element<'a, Message> {
        let header = row![
            bold_text(APP_NAME).size(24),
            space::horizontal(),
            button("Options").on_press(MyMessage::ToOptionsMenu.into())
        ]
        .align_y(Vertical::Center);

        let size_picker = column(engine::Size::iter().map(|s| {
            radio(s.to_string(), s, Some(ctx.config.size), |s| {
                MyMessage::SelectSize(s).into()
            })
            .into()
        }))
        .spacing(5);

        let format_picker = column(engine::ResponseFormat::iter().map(|f| {
            radio(f.to_string(), f, Some(ctx.config.format), |f| {
                MyMessage::SelectFormat(f).into()
            })
            .into()
        }))
        .spacing(5);

        let generate_button = if self.is_loading {
            button(text("Generating..."))
        } else {
            button(text("Generate")).on_press(MyMessage::Submit.into())
        };

        let mut items = Vec::from(elem_list![
            header,
            text("Describe an image and it will be generated for you."),
            widget::text_editor(&self.prompt_content)
                .placeholder("Type a description")
                .on_action(|a| MyMessage::UpdatePromptText(a).into()),
            row![
                column![text("Size"), size_picker].spacing(5),
                column![text("Format"), format_picker].spacing(5),
                space::horizontal(),
                generate_button
            ]
            .spacing(30)
            .align_y(Vertical::Bottom),
        ]);

        if let Some(err) = &self.error {
            items.push(
                container(text(err))
                    .padding(10)
                    .width(Length::Fill)
                    .style(container::secondary)
                    .into_elem(),
            );
        }

        if let Some(output) = &self.image {
            let dim = ctx.config.size.pixel_dimension() as f32;
            items.extend(elem_list![
                container(widget::image(&output.handle).width(dim).height(dim))
                    .center_x(Length::Fill),
                row![
                    italic_text(&output.caption),
                    button("Copy source").on_press(MyMessage::CopySourceToClipboard.into())
                ]
                .align_y(Vertical::Center)
                .spacing(10),
            ]);
        }

        top_level_container(column(items).spacing(15).width(Length::Fill)).into()
    }

    fn clone(&self) -> Box<dyn State> {
        Box::new(Clone::clone(self))
    }
}

#[cfg(test)]
mod test {
    use engine::ResponseFormat;
    use iced::widget::text_editor::Content;

    use super::*;
    use crate::context::Config;

    fn test_ctx() -> Context {
        Context::from_config(Config::default())
    }

    fn submit(generator: &mut Generator, ctx: &mut Context) -> StateCommand {
        State::update(generator, MyMessage::Submit.into(), ctx).unwrap()
    }

    fn b64_image(payload: &str) -> GeneratedImage {
        GeneratedImage {
            payload: ImagePayload::Base64(payload.into()),
            data: vec![0, 0, 0],
        }
    }

    #[test]
    fn empty_prompt_opens_dialog_instead_of_requesting() {
        let mut ctx = test_ctx();
        let mut generator = Generator::new();

        let cmd = submit(&mut generator, &mut ctx);
        assert!(cmd.task.is_none());
        assert!(cmd.transition.is_some());
        assert!(!generator.is_loading);
    }

    #[test]
    fn whitespace_prompt_counts_as_empty() {
        let mut ctx = test_ctx();
        let mut generator = Generator::new();
        generator.prompt_content = Content::with_text("  \n ");

        let cmd = submit(&mut generator, &mut ctx);
        assert!(cmd.task.is_none());
        assert!(cmd.transition.is_some());
    }

    #[test]
    fn submit_starts_a_request_and_clears_stale_errors() {
        let mut ctx = test_ctx();
        let mut generator = Generator::new();
        generator.prompt_content = Content::with_text("a red bicycle");
        generator.error = Some("previous failure".into());

        let cmd = submit(&mut generator, &mut ctx);
        assert!(cmd.task.is_some());
        assert!(cmd.transition.is_none());
        assert!(generator.is_loading);
        assert_eq!(generator.error, None);
    }

    #[test]
    fn resubmission_while_loading_is_ignored() {
        let mut ctx = test_ctx();
        let mut generator = Generator::new();
        generator.prompt_content = Content::with_text("a red bicycle");
        generator.is_loading = true;

        let cmd = submit(&mut generator, &mut ctx);
        assert!(cmd.task.is_none());
        assert!(cmd.transition.is_none());
    }

    #[test]
    fn successful_generation_stores_the_payload() {
        let mut generator = Generator::new();
        generator.is_loading = true;
        generator.error = Some("previous failure".into());

        generator.finish(Ok(b64_image("AAAA")));
        assert!(!generator.is_loading);
        assert_eq!(generator.error, None);

        let output = generator.image.as_ref().unwrap();
        assert_eq!(output.payload, ImagePayload::Base64("AAAA".into()));
        assert_eq!(output.payload.data_uri(), "data:image/png;base64,AAAA");
    }

    #[test]
    fn url_payloads_are_kept_verbatim() {
        let mut generator = Generator::new();
        generator.finish(Ok(GeneratedImage {
            payload: ImagePayload::Url("https://img/x.png".into()),
            data: vec![1, 2, 3],
        }));

        let output = generator.image.as_ref().unwrap();
        assert_eq!(output.payload.data_uri(), "https://img/x.png");
        assert_eq!(output.caption, "https://img/x.png");
    }

    #[test]
    fn failed_generation_keeps_the_previous_image() {
        let mut generator = Generator::new();
        generator.finish(Ok(b64_image("AAAA")));

        generator.is_loading = true;
        generator.finish(Err(StringError("timeout".into())));
        assert!(!generator.is_loading);
        assert_eq!(generator.error.as_deref(), Some("timeout"));
        let output = generator.image.as_ref().unwrap();
        assert_eq!(output.payload, ImagePayload::Base64("AAAA".into()));
    }

    #[test]
    fn copy_source_requires_an_image() {
        let mut ctx = test_ctx();
        let mut generator = Generator::new();

        let cmd = State::update(
            &mut generator,
            MyMessage::CopySourceToClipboard.into(),
            &mut ctx,
        )
        .unwrap();
        assert!(cmd.task.is_none());

        generator.finish(Ok(b64_image("AAAA")));
        let cmd = State::update(
            &mut generator,
            MyMessage::CopySourceToClipboard.into(),
            &mut ctx,
        )
        .unwrap();
        assert!(cmd.task.is_some());
    }

    #[test]
    fn selections_update_the_config() {
        let mut ctx = test_ctx();
        let mut generator = Generator::new();

        State::update(
            &mut generator,
            MyMessage::SelectFormat(ResponseFormat::Url).into(),
            &mut ctx,
        )
        .unwrap();
        assert_eq!(ctx.config.format, ResponseFormat::Url);
        assert_eq!(ctx.config.size.pixel_dimension(), 512);
    }
}
