use crate::style;
use data::portfolio::{DATE_FORMAT, PortfolioError, Purchase};

use chrono::NaiveDate;
use iced::widget::{button, column, container, row, space, text, text_input};
use iced::{Alignment, Element, Length};

const FORM_WIDTH: f32 = 280.0;

#[derive(Debug, Clone)]
pub enum Message {
    AmountChanged(String),
    DateChanged(String),
    Submit,
    Cancel,
}

pub enum Action {
    Submit(Purchase),
    Close,
}

/// Amount/date entry for one purchase of the active stock.
#[derive(Debug, Clone)]
pub struct AddPurchaseForm {
    symbol: String,
    amount: String,
    date: String,
    error: Option<PortfolioError>,
}

impl AddPurchaseForm {
    pub fn new(symbol: impl Into<String>, today: NaiveDate) -> Self {
        Self {
            symbol: symbol.into(),
            amount: String::new(),
            date: today.format(DATE_FORMAT).to_string(),
            error: None,
        }
    }

    pub fn error(&self) -> Option<&PortfolioError> {
        self.error.as_ref()
    }

    pub fn update(&mut self, message: Message) -> Option<Action> {
        match message {
            Message::AmountChanged(amount) => {
                self.amount = amount;
                self.error = None;
            }
            Message::DateChanged(date) => {
                self.date = date;
                self.error = None;
            }
            Message::Submit => match Purchase::parse(&self.amount, &self.date) {
                Ok(purchase) => return Some(Action::Submit(purchase)),
                Err(err) => {
                    log::debug!("Rejected purchase input: {err}");
                    self.error = Some(err);
                }
            },
            Message::Cancel => return Some(Action::Close),
        }

        None
    }

    pub fn view(&self) -> Element<'_, Message> {
        let mut content = column![
            text(format!("Add purchase: {}", self.symbol)).size(16),
            column![
                text("Amount (USD)").size(12),
                text_input("500.00", &self.amount)
                    .on_input(Message::AmountChanged)
                    .on_submit(Message::Submit)
                    .padding(6),
            ]
            .spacing(4),
            column![
                text("Date").size(12),
                text_input("YYYY-MM-DD", &self.date)
                    .on_input(Message::DateChanged)
                    .on_submit(Message::Submit)
                    .font(style::MONO)
                    .padding(6),
            ]
            .spacing(4),
        ]
        .spacing(12);

        if let Some(err) = self.error() {
            content = content.push(text(err.to_string()).size(12).style(style::error_text));
        }

        content = content.push(
            row![
                space::horizontal(),
                button(text("Cancel"))
                    .style(move |t, s| style::button::transparent(t, s, false))
                    .on_press(Message::Cancel),
                button(text("Add"))
                    .style(style::button::primary)
                    .on_press(Message::Submit),
            ]
            .spacing(8)
            .align_y(Alignment::Center),
        );

        container(content)
            .width(Length::Fixed(FORM_WIDTH))
            .padding(16)
            .style(style::chart_modal)
            .into()
    }
}
