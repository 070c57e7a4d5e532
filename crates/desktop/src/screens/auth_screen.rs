use iced::border::Border;
use iced::widget::{button, column, container, image, text, Space};
use iced::{ContentFit, Element, Length, Theme};

use crate::app::{scaled, Message};
use crate::theme::{muted_color, surface_color};
use crate::widgets::primary_button::primary_button;

/// Live camera preview with the confirm button, enabled only while the latest
/// frame shows a face.
pub fn view<'a>(
    fs: f32,
    preview: Option<&image::Handle>,
    status: String,
    gate_enabled: bool,
    confirm_hovered: bool,
) -> Element<'a, Message> {
    let title = text("Face Authentication")
        .size(scaled(20.0, fs))
        .font(iced::Font {
            weight: iced::font::Weight::Bold,
            ..iced::Font::DEFAULT
        });

    let camera: Element<'a, Message> = match preview {
        Some(handle) => image(handle.clone())
            .content_fit(ContentFit::Contain)
            .width(Length::Fill)
            .height(Length::Fill)
            .into(),
        None => Space::new().width(Length::Fill).height(Length::Fill).into(),
    };
    let camera = container(camera)
        .width(Length::Fill)
        .height(Length::Fill)
        .center_x(Length::Fill)
        .center_y(Length::Fill)
        .style(|theme: &Theme| container::Style {
            background: Some(surface_color(theme).into()),
            border: Border {
                radius: 8.0.into(),
                ..Border::default()
            },
            ..container::Style::default()
        });

    let status = text(status)
        .size(scaled(13.0, fs))
        .style(|theme: &Theme| text::Style {
            color: Some(muted_color(theme)),
        });

    let confirm = primary_button(
        move || {
            text("Confirm Identity")
                .size(scaled(16.0, fs))
                .into()
        },
        gate_enabled.then_some(Message::Confirm),
        confirm_hovered,
        Message::ConfirmHovered,
        [10, 24],
    );

    let settings = button(text("Settings").size(scaled(12.0, fs)))
        .on_press(Message::OpenSettings)
        .style(button::text);

    container(
        column![
            title,
            Space::new().height(15),
            camera,
            Space::new().height(10),
            status,
            Space::new().height(15),
            confirm,
            settings,
        ]
        .align_x(iced::Alignment::Center)
        .height(Length::Fill),
    )
    .padding(20)
    .width(Length::Fill)
    .height(Length::Fill)
    .into()
}
