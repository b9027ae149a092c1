/// Generator screen
///
/// Sidebar with prompt and settings, a viewer for the selected image and
/// a wrap-grid gallery of everything generated this session. Rendering
/// uses pre-decoded image handles cached per gallery id so the grid does
/// not re-decode data URIs every frame.

use std::collections::HashMap;

use iced::widget::{
    button, column, container, image, pick_list, row, scrollable, text, text_input,
};
use iced::{Alignment, Element, Length};
use iced_aw::Wrap;

use crate::state::data::{AspectRatio, GeneratedImage, ImageSize};
use crate::state::session::Session;
use crate::Message;

/// Width of one gallery thumbnail
const THUMBNAIL_WIDTH: f32 = 140.0;

pub fn view<'a>(
    prompt: &'a str,
    session: &'a Session,
    handles: &'a HashMap<String, image::Handle>,
    error: Option<&'a str>,
    status: &'a str,
) -> Element<'a, Message> {
    let content = row![
        sidebar(prompt, session),
        column![
            viewer(session, handles),
            gallery(session, handles),
        ]
        .spacing(16)
        .padding(16)
        .width(Length::Fill),
    ];

    let mut screen = column![content.height(Length::Fill)];

    if let Some(error) = error {
        screen = screen.push(error_banner(error));
    }

    screen = screen.push(
        container(text(status).size(14))
            .padding([4.0, 12.0])
            .width(Length::Fill),
    );

    screen.into()
}

/// Prompt input plus generation settings
fn sidebar<'a>(prompt: &'a str, session: &'a Session) -> Element<'a, Message> {
    let submitting = session.is_submitting();

    let mut generate = button(text(if submitting { "Generating..." } else { "Generate" }))
        .padding(12)
        .width(Length::Fill);
    // Disabled while a request is in flight or the prompt is blank
    if !submitting && !prompt.trim().is_empty() {
        generate = generate.on_press(Message::Generate);
    }

    let content = column![
        text("Nano Studio").size(28),
        text("gemini-3-pro-image-preview").size(13),
        text_input("Describe the image you want...", prompt)
            .on_input(Message::PromptChanged)
            .on_submit(Message::Generate)
            .padding(10),
        text("Aspect Ratio").size(14),
        pick_list(
            AspectRatio::ALL,
            Some(session.settings.aspect_ratio),
            Message::AspectRatioSelected,
        )
        .width(Length::Fill),
        text("Resolution").size(14),
        pick_list(
            ImageSize::ALL,
            Some(session.settings.image_size),
            Message::ImageSizeSelected,
        )
        .width(Length::Fill),
        generate,
    ]
    .spacing(12)
    .padding(20)
    .width(300);

    container(content).height(Length::Fill).into()
}

/// Large view of the selected image with its metadata and actions
fn viewer<'a>(
    session: &'a Session,
    handles: &'a HashMap<String, image::Handle>,
) -> Element<'a, Message> {
    let Some(selected) = session.selected_image() else {
        return container(text("Generate an image or pick one from the gallery").size(16))
            .width(Length::Fill)
            .height(Length::FillPortion(3))
            .center_x(Length::Fill)
            .center_y(Length::Fill)
            .into();
    };

    let picture: Element<'a, Message> = match handles.get(&selected.id) {
        Some(handle) => image(handle.clone()).height(Length::Fill).into(),
        None => text("image data unavailable").into(),
    };

    let actions = row![
        button(text("Download PNG")).on_press(Message::DownloadImage(selected.id.clone())),
        button(text("Delete")).on_press(Message::DeleteImage(selected.id.clone())),
    ]
    .spacing(8);

    container(
        column![
            container(picture)
                .width(Length::Fill)
                .height(Length::Fill)
                .center_x(Length::Fill),
            text(&selected.prompt).size(14),
            row![metadata(selected), actions]
                .spacing(16)
                .align_y(Alignment::Center),
        ]
        .spacing(8),
    )
    .width(Length::Fill)
    .height(Length::FillPortion(3))
    .into()
}

fn metadata(selected: &GeneratedImage) -> Element<'_, Message> {
    text(format!(
        "{} · {} · {}",
        selected.aspect_ratio,
        selected.size,
        selected.created_at.format("%H:%M:%S UTC")
    ))
    .size(13)
    .into()
}

/// Wrap-grid of session thumbnails, newest first; click to select
fn gallery<'a>(
    session: &'a Session,
    handles: &'a HashMap<String, image::Handle>,
) -> Element<'a, Message> {
    if session.gallery().is_empty() {
        return container(text("No images yet this session").size(14))
            .height(Length::FillPortion(1))
            .into();
    }

    let thumbnails: Vec<Element<'a, Message>> = session
        .gallery()
        .iter()
        .map(|img| {
            let preview: Element<'a, Message> = match handles.get(&img.id) {
                Some(handle) => image(handle.clone()).width(THUMBNAIL_WIDTH).into(),
                None => text("?").into(),
            };

            let style = if session.selected_id() == Some(img.id.as_str()) {
                button::primary
            } else {
                button::secondary
            };

            button(preview)
                .padding(4)
                .style(style)
                .on_press(Message::SelectImage(img.id.clone()))
                .into()
        })
        .collect();

    scrollable(
        Wrap::with_elements(thumbnails)
            .spacing(10.0)
            .line_spacing(10.0),
    )
    .height(Length::FillPortion(1))
    .into()
}

/// Inline, dismissable failure banner (not a blocking dialog)
fn error_banner(error: &str) -> Element<'_, Message> {
    container(
        row![
            text(error).size(14).style(text::danger).width(Length::Fill),
            button(text("Dismiss").size(13)).on_press(Message::DismissError),
        ]
        .spacing(12)
        .align_y(Alignment::Center),
    )
    .padding([8.0, 12.0])
    .width(Length::Fill)
    .into()
}
