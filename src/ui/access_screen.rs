/// Key selection screen
///
/// Shown while the access gate is Denied. One action: open the key
/// selector. Failures land in the banner below the explanation text and
/// the user retries at their own pace.

use iced::widget::{button, column, container, text};
use iced::{Alignment, Element, Length};

use crate::access::AccessError;
use crate::gemini::client::MODEL_NAME;
use crate::Message;

/// Splash shown while the startup access check is still running
pub fn checking() -> Element<'static, Message> {
    container(text("Checking access...").size(18))
        .width(Length::Fill)
        .height(Length::Fill)
        .center_x(Length::Fill)
        .center_y(Length::Fill)
        .into()
}

pub fn view(error: Option<&AccessError>, selecting: bool) -> Element<'static, Message> {
    let mut content = column![
        text("Access Required").size(32),
        text(format!(
            "To use the high-fidelity {} model, you must select a paid API key \
             associated with a Google Cloud Project.",
            MODEL_NAME
        ))
        .size(16),
        text("This feature requires a billed project. See ai.google.dev/gemini-api/docs/billing for details.")
            .size(14),
    ]
    .spacing(20)
    .max_width(520)
    .align_x(Alignment::Center);

    if let Some(error) = error {
        content = content.push(text(error.to_string()).size(14).style(text::danger));
    }

    let select = if selecting {
        button(text("Selecting...")).padding(12)
    } else {
        button(text("Select API Key"))
            .padding(12)
            .on_press(Message::SelectKey)
    };
    content = content.push(select);

    container(content)
        .width(Length::Fill)
        .height(Length::Fill)
        .center_x(Length::Fill)
        .center_y(Length::Fill)
        .into()
}
