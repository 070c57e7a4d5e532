use iced::widget::{button, checkbox, column, container, pick_list, row, slider, text, Space};
use iced::{Element, Length};

use crate::app::{scaled, Message};
use crate::settings::{Appearance, Detector, Settings};

const MAX_CAMERA_INDEX: u32 = 9;

pub fn view<'a>(settings: &Settings) -> Element<'a, Message> {
    let fs = settings.font_scale;

    let mut camera = column![
        heading("Camera", fs),
        Space::new().height(8),
        labeled(
            fs,
            "Device",
            row![
                slider(
                    0..=MAX_CAMERA_INDEX,
                    settings.camera_index,
                    Message::CameraIndexChanged
                ),
                text(format!("#{}", settings.camera_index)).size(scaled(13.0, fs)),
            ]
            .spacing(12)
            .into(),
        ),
        Space::new().height(8),
        labeled(
            fs,
            "Detector",
            pick_list(Detector::ALL, Some(settings.detector), Message::DetectorChanged)
                .text_size(scaled(13.0, fs))
                .into(),
        ),
    ];

    if settings.detector == Detector::Yolo {
        camera = camera.push(Space::new().height(8)).push(labeled(
            fs,
            "Confidence",
            row![
                slider(1..=99, settings.confidence, Message::ConfidenceChanged),
                text(format!("{}%", settings.confidence)).size(scaled(13.0, fs)),
            ]
            .spacing(12)
            .into(),
        ));
    }

    let appearance = column![
        heading("Theme", fs),
        Space::new().height(8),
        labeled(
            fs,
            "Mode",
            pick_list(Appearance::ALL, Some(settings.appearance), |a| {
                Message::AppearanceChanged(a)
            })
            .text_size(scaled(13.0, fs))
            .into(),
        ),
        Space::new().height(12),
        checkbox(settings.high_contrast)
            .label("High contrast")
            .on_toggle(Message::HighContrastChanged)
            .text_size(scaled(13.0, fs)),
        Space::new().height(20),
        heading("Font size", fs),
        Space::new().height(8),
        row![
            slider(0.8..=1.5, settings.font_scale, Message::FontScaleChanged).step(0.05),
            text(format!("{:.0}%", settings.font_scale * 100.0)).size(scaled(13.0, fs)),
        ]
        .spacing(12)
        .align_y(iced::Alignment::Center),
    ];

    let actions = row![
        button(text("Restore Defaults").size(scaled(13.0, fs)))
            .on_press(Message::RestoreDefaults)
            .style(button::secondary),
        button(text("Done").size(scaled(13.0, fs)))
            .on_press(Message::CloseSettings)
            .style(button::primary),
    ]
    .spacing(12);

    container(
        column![
            camera,
            Space::new().height(24),
            appearance,
            Space::new().height(24),
            actions
        ]
        .spacing(0),
    )
    .padding(20)
    .width(Length::Fill)
    .into()
}

fn heading<'a>(label: &'a str, fs: f32) -> Element<'a, Message> {
    text(label).size(scaled(16.0, fs)).into()
}

fn labeled<'a>(fs: f32, label: &'a str, control: Element<'a, Message>) -> Element<'a, Message> {
    row![text(label).size(scaled(13.0, fs)).width(90), control]
        .spacing(12)
        .align_y(iced::Alignment::Center)
        .into()
}
