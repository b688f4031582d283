use color_eyre::Result;
use iced::{
    Length,
    widget::{button, column, row, space, text, text_input},
};

use crate::{
    TryIntoExt, bold_text, elem_list,
    message::ui_messages::OptionsMenu as MyMessage,
    save_config,
    state::{Generator, State, cmd},
    top_level_container,
};

#[derive(Debug, Clone)]
pub struct OptionsMenu;

impl State for OptionsMenu {
    fn update(
        &mut self,
        event: crate::message::Message,
        ctx: &mut crate::context::Context,
    ) -> Result<crate::state::StateCommand> {
        let msg: MyMessage = event.try_into_ex()?;

        use MyMessage::*;
        match msg {
            OpenAiTokenChanged(val) => {
                ctx.config.openai_token = val;
                cmd::none()
            }

            Ok => {
                save_config(&ctx.config)?;
                cmd::transition(Generator::new())
            }
        }
    }

    fn view<'a>(
        &'a self,
        ctx: &'a crate::context::Context,
    ) -> iced::Element<'a, crate::message::Message> {
        let items = Vec::from(elem_list![
            bold_text("Options").width(Length::Fill).center(),
            space().height(20),
            text("OpenAI API Key"),
            text_input("sk-...", &ctx.config.openai_token)
                .on_input(|s| MyMessage::OpenAiTokenChanged(s).into())
                .width(Length::Fill),
            text("The key is stored in the local config file and sent only to the images endpoint."),
            space().height(30),
            row![button("Ok").on_press(MyMessage::Ok.into())],
        ]);

        top_level_container(
            column(items)
                .spacing(12)
                .width(Length::Fill)
                .height(Length::Fill),
        )
        .into()
    }

    fn clone(&self) -> Box<dyn State> {
        Box::new(Clone::clone(self))
    }
}
