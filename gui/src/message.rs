use derive_more::{From, TryInto};

#[derive(Debug, Clone, From, TryInto)]
pub enum Message {
    Generator(ui_messages::Generator),
    OptionsMenu(ui_messages::OptionsMenu),
    MessageDialog(ui_messages::MessageDialog),
}

pub mod ui_messages {
    use engine::{GeneratedImage, ResponseFormat, Size};
    use iced::widget::text_editor;

    use crate::StringError;

    #[derive(Debug, Clone)]
    pub enum Generator {
        UpdatePromptText(text_editor::Action),
        SelectSize(Size),
        SelectFormat(ResponseFormat),
        Submit,
        GenerationFinished(Result<GeneratedImage, StringError>),
        CopySourceToClipboard,
        ToOptionsMenu,
    }

    #[derive(Debug, Clone)]
    pub enum OptionsMenu {
        OpenAiTokenChanged(String),
        Ok,
    }

    #[derive(Debug, Clone)]
    pub enum MessageDialog {
        Confirm,
        EditAction(text_editor::Action),
    }
}
