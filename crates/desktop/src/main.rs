mod app;
mod backend;
mod platform;
mod screens;
mod settings;
mod theme;
mod widgets;
mod workers;

use app::App;

const ICON_SIZE: u32 = 64;
const ICON_CORNER: f32 = 12.0;

fn main() -> iced::Result {
    env_logger::init();

    iced::application(App::new, App::update, App::view)
        .title(App::title)
        .theme(App::theme)
        .subscription(App::subscription)
        .window(iced::window::Settings {
            size: iced::Size::new(600.0, 540.0),
            min_size: Some(iced::Size::new(400.0, 400.0)),
            icon: window_icon(),
            exit_on_close_request: false,
            ..Default::default()
        })
        .run()
}

/// Blue rounded tile with a white face outline.
fn window_icon() -> Option<iced::window::Icon> {
    let half = ICON_SIZE as f32 / 2.0;
    let img = image::RgbaImage::from_fn(ICON_SIZE, ICON_SIZE, |x, y| {
        let dx = x as f32 + 0.5 - half;
        let dy = y as f32 + 0.5 - half;
        let ox = (dx.abs() - (half - ICON_CORNER)).max(0.0);
        let oy = (dy.abs() - (half - ICON_CORNER)).max(0.0);
        if ox.hypot(oy) > ICON_CORNER {
            return image::Rgba([0, 0, 0, 0]);
        }
        // Upright ellipse, 4 px stroke.
        let r = (dx * dx / 0.64 + dy * dy).sqrt();
        if (20.0..24.0).contains(&r) {
            image::Rgba([255, 255, 255, 255])
        } else {
            image::Rgba([0x34, 0x98, 0xdb, 255])
        }
    });
    iced::window::icon::from_rgba(img.into_raw(), ICON_SIZE, ICON_SIZE).ok()
}
