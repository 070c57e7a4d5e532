use iced::widget::{column, container, pick_list, row, text, text_input, Space};
use iced::{Element, Length};

use facegate_core::transaction::domain::transaction_form::TransactionForm;
use facegate_core::transaction::domain::transaction_request::{
    DestinationAccount, TransactionKind,
};

use crate::app::{scaled, Message};
use crate::widgets::primary_button::primary_button;

const LABEL_WIDTH: f32 = 150.0;
const FIELD_WIDTH: f32 = 260.0;
const AMOUNT_PLACEHOLDER: &str = "e.g. 100.00";

pub fn view<'a>(fs: f32, form: &TransactionForm, submit_hovered: bool) -> Element<'a, Message> {
    let title = text("New Transaction")
        .size(scaled(22.0, fs))
        .font(iced::Font {
            weight: iced::font::Weight::Bold,
            ..iced::Font::DEFAULT
        });

    let kind = pick_list(TransactionKind::ALL, Some(form.kind), Message::KindSelected)
        .text_size(scaled(14.0, fs))
        .width(FIELD_WIDTH);

    let amount = text_input(AMOUNT_PLACEHOLDER, &form.amount_input)
        .on_input(Message::AmountChanged)
        .on_submit(Message::Submit)
        .size(scaled(14.0, fs))
        .padding(8)
        .width(FIELD_WIDTH);

    let account = pick_list(
        DestinationAccount::ALL,
        Some(form.destination),
        Message::AccountSelected,
    )
    .text_size(scaled(14.0, fs))
    .width(FIELD_WIDTH);

    let submit = primary_button(
        move || {
            text("Confirm Transaction")
                .size(scaled(16.0, fs))
                .into()
        },
        Some(Message::Submit),
        submit_hovered,
        Message::SubmitHovered,
        [10, 24],
    );

    container(
        column![
            title,
            Space::new().height(20),
            field(fs, "Transaction type:", kind.into()),
            Space::new().height(15),
            field(fs, "Amount:", amount.into()),
            Space::new().height(15),
            field(fs, "Destination account:", account.into()),
            Space::new().height(25),
            submit,
        ]
        .align_x(iced::Alignment::Center),
    )
    .padding(20)
    .width(Length::Fill)
    .into()
}

fn field<'a>(fs: f32, label: &'a str, control: Element<'a, Message>) -> Element<'a, Message> {
    row![text(label).size(scaled(16.0, fs)).width(LABEL_WIDTH), control]
        .spacing(12)
        .align_y(iced::Alignment::Center)
        .into()
}
