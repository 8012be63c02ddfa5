use super::DashboardError;
use crate::modal::{AddPurchaseForm, purchase};
use crate::style;

use data::Portfolio;
use data::util::format_usd;
use market::{AdapterError, CompanyMatch, QueryTracker, Ticket};

use iced::widget::{Column, button, column, container, row, scrollable, space, text, text_input};
use iced::{Alignment, Element, Length};

#[derive(Debug, Clone)]
pub enum Message {
    QueryChanged(String),
    DebounceElapsed(Ticket),
    Results(Ticket, Result<Vec<CompanyMatch>, AdapterError>),
    Select(CompanyMatch),
    OpenPurchaseForm,
    PurchaseForm(purchase::Message),
    RemovePurchase(usize),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// (Re)start the debounce timer for this ticket
    Debounce(Ticket),
    /// Look up `query`; the response is tagged with the ticket
    Query(Ticket, String),
    /// Abort the pending debounce timer, if any
    CancelPending,
}

#[derive(Default)]
pub struct Sidebar {
    query: String,
    results: Vec<CompanyMatch>,
    tracker: QueryTracker,
    portfolio: Portfolio,
    purchase_form: Option<AddPurchaseForm>,
    notice: Option<DashboardError>,
}

impl Sidebar {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn portfolio(&self) -> &Portfolio {
        &self.portfolio
    }

    pub fn results(&self) -> &[CompanyMatch] {
        &self.results
    }

    pub fn purchase_form(&self) -> Option<&AddPurchaseForm> {
        self.purchase_form.as_ref()
    }

    pub fn update(&mut self, message: Message) -> Option<Action> {
        match message {
            Message::QueryChanged(query) => {
                self.query = query;
                self.notice = None;

                if self.query.is_empty() {
                    self.results.clear();
                    self.tracker.invalidate();
                    return Some(Action::CancelPending);
                }

                return Some(Action::Debounce(self.tracker.issue()));
            }
            Message::DebounceElapsed(ticket) => {
                if self.tracker.is_current(ticket) {
                    return Some(Action::Query(ticket, self.query.clone()));
                }
                log::debug!("Dropping superseded debounce #{}", ticket.value());
            }
            Message::Results(ticket, result) => {
                if !self.tracker.is_current(ticket) {
                    log::debug!("Dropping stale lookup #{}", ticket.value());
                    return None;
                }

                match result {
                    Ok(matches) => {
                        log::debug!("{} matches for {:?}", matches.len(), self.query);
                        self.results = matches;
                    }
                    Err(err) => {
                        log::error!("Company lookup failed: {err}");
                        self.results.clear();
                        self.notice = Some(err.into());
                    }
                }
            }
            Message::Select(company) => {
                let stock = self.portfolio.select(&company);
                log::info!("Tracking {} ({})", stock.symbol, stock.name);

                self.query.clear();
                self.results.clear();
                self.tracker.invalidate();
                self.purchase_form = None;
                self.notice = None;

                return Some(Action::CancelPending);
            }
            Message::OpenPurchaseForm => {
                if let Some(stock) = self.portfolio.active() {
                    let today = chrono::Local::now().date_naive();
                    self.purchase_form = Some(AddPurchaseForm::new(stock.symbol.clone(), today));
                }
            }
            Message::PurchaseForm(message) => {
                let Some(form) = self.purchase_form.as_mut() else {
                    return None;
                };

                match form.update(message) {
                    Some(purchase::Action::Submit(purchase)) => {
                        self.purchase_form = None;
                        if let Err(err) = self.portfolio.add_purchase(purchase) {
                            log::warn!("Purchase not recorded: {err}");
                            self.notice = Some(err.into());
                        }
                    }
                    Some(purchase::Action::Close) => {
                        self.purchase_form = None;
                    }
                    None => {}
                }
            }
            Message::RemovePurchase(index) => {
                if self.portfolio.remove_purchase(index).is_none() {
                    log::debug!("No purchase at index {index}");
                }
            }
        }

        None
    }

    pub fn view(&self) -> Element<'_, Message> {
        let search = text_input("Search companies...", &self.query)
            .on_input(Message::QueryChanged)
            .padding(8);

        let mut content = column![text("Portfolio").size(18), search].spacing(12);

        if !self.results().is_empty() {
            let results = Column::with_children(self.results().iter().map(|company| {
                button(text(company.to_string()).size(13))
                    .width(Length::Fill)
                    .style(move |t, s| style::button::transparent(t, s, false))
                    .on_press(Message::Select(company.clone()))
                    .into()
            }))
            .spacing(2);

            content = content.push(container(results).padding(4).style(style::card));
        }

        if let Some(notice) = &self.notice {
            content = content.push(text(notice.to_string()).size(12).style(style::error_text));
        }

        content = content.push(self.active_stock_view());

        container(content)
            .padding(16)
            .width(Length::Fill)
            .height(Length::Fill)
            .style(style::sidebar)
            .into()
    }

    fn active_stock_view(&self) -> Element<'_, Message> {
        let Some(stock) = self.portfolio().active() else {
            return text("Search for a company to start tracking purchases.")
                .size(13)
                .style(style::muted_text)
                .into();
        };

        let header = column![
            text(stock.symbol.as_str()).size(16).font(style::MONO),
            text(stock.name.as_str()).size(12).style(style::muted_text),
        ]
        .spacing(2);

        let total = row![
            text("Total invested").size(13),
            space::horizontal(),
            text(format_usd(stock.total_invested()))
                .size(13)
                .font(style::MONO),
        ]
        .align_y(Alignment::Center);

        let purchases: Element<'_, Message> = if stock.purchases.is_empty() {
            text("No purchases yet.")
                .size(12)
                .style(style::muted_text)
                .into()
        } else {
            scrollable(
                Column::with_children(stock.purchases.iter().enumerate().map(|(i, p)| {
                    row![
                        text(p.date.format(data::portfolio::DATE_FORMAT).to_string())
                            .size(12)
                            .font(style::MONO),
                        space::horizontal(),
                        text(format_usd(p.amount)).size(12).font(style::MONO),
                        button(text("Remove").size(11))
                            .style(style::button::danger)
                            .on_press(Message::RemovePurchase(i)),
                    ]
                    .spacing(8)
                    .align_y(Alignment::Center)
                    .into()
                }))
                .spacing(4),
            )
            .height(Length::Fill)
            .into()
        };

        container(
            column![
                header,
                total,
                button(text("Add purchase").size(13))
                    .style(style::button::primary)
                    .on_press(Message::OpenPurchaseForm),
                purchases,
            ]
            .spacing(10),
        )
        .padding(12)
        .style(style::card)
        .into()
    }
}
