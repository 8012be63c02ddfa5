mod logger;
mod modal;
mod screen;
mod style;
mod widget;

use modal::purchase;
use screen::dashboard::{self, Dashboard};
use screen::sidebar::{self, Sidebar};

use iced::task::{self, Task};
use iced::widget::{container, row};
use iced::{Alignment, Element, Length, Padding, Size, Subscription, window};

const APP_TITLE: &str = "Folio Chart";
const WINDOW_SIZE: Size = Size::new(1480.0, 820.0);

/// Share of the window width given to the dashboard pane; the sidebar takes the rest.
const DASHBOARD_PORTION: f32 = 0.75;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    logger::setup(cfg!(debug_assertions))?;

    let config = data::config::load_state();
    log::info!(
        "Starting {APP_TITLE} with {} symbols, default range {}",
        config.symbols.len(),
        config.default_range
    );

    iced::application(
        move || Folio::new(config.clone()),
        Folio::update,
        Folio::view,
    )
    .title(APP_TITLE)
    .theme(Folio::theme)
    .subscription(Folio::subscription)
    .window_size(WINDOW_SIZE)
    .antialiasing(true)
    .run()?;

    Ok(())
}

#[derive(Debug, Clone)]
enum Message {
    Dashboard(dashboard::Message),
    Sidebar(sidebar::Message),
    WindowResized(Size),
}

struct Folio {
    config: data::State,
    dashboard: Dashboard,
    sidebar: Sidebar,
    pending_debounce: Option<task::Handle>,
}

impl Folio {
    fn new(config: data::State) -> Self {
        Self {
            dashboard: Dashboard::new(&config, dashboard_viewport(WINDOW_SIZE.width)),
            sidebar: Sidebar::new(),
            pending_debounce: None,
            config,
        }
    }

    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::Dashboard(message) => self.dashboard.update(message),
            Message::Sidebar(message) => {
                if let Some(action) = self.sidebar.update(message) {
                    return self.perform(action);
                }
            }
            Message::WindowResized(size) => {
                self.dashboard
                    .set_viewport_width(dashboard_viewport(size.width));
            }
        }

        Task::none()
    }

    fn perform(&mut self, action: sidebar::Action) -> Task<Message> {
        match action {
            sidebar::Action::Debounce(ticket) => {
                self.abort_pending();

                let (task, handle) = Task::perform(
                    market::search::debounce(ticket, self.config.search.debounce()),
                    |ticket| Message::Sidebar(sidebar::Message::DebounceElapsed(ticket)),
                )
                .abortable();

                self.pending_debounce = Some(handle);
                task
            }
            sidebar::Action::Query(ticket, query) => {
                self.pending_debounce = None;

                let directory = self.config.search.directory;
                log::debug!("Querying {directory} for {query:?} (#{})", ticket.value());

                Task::perform(
                    directory.fetch_companies(query, self.config.search.latency()),
                    move |result| Message::Sidebar(sidebar::Message::Results(ticket, result)),
                )
            }
            sidebar::Action::CancelPending => {
                self.abort_pending();
                Task::none()
            }
        }
    }

    fn abort_pending(&mut self) {
        if let Some(handle) = self.pending_debounce.take() {
            handle.abort();
        }
    }

    fn view(&self) -> Element<'_, Message> {
        let base = row![
            container(self.sidebar.view().map(Message::Sidebar)).width(Length::FillPortion(1)),
            container(self.dashboard.view().map(Message::Dashboard))
                .width(Length::FillPortion(3)),
        ]
        .spacing(12)
        .padding(12);

        match self.sidebar.purchase_form() {
            Some(form) => modal::stack_modal(
                base,
                form.view()
                    .map(|message| Message::Sidebar(sidebar::Message::PurchaseForm(message))),
                Message::Sidebar(sidebar::Message::PurchaseForm(purchase::Message::Cancel)),
                Padding::new(20.0),
                Alignment::Center,
            ),
            None => base.into(),
        }
    }

    fn theme(&self) -> iced::Theme {
        data::config::theme::folio_dark()
    }

    fn subscription(&self) -> Subscription<Message> {
        window::resize_events().map(|(_id, size)| Message::WindowResized(size))
    }
}

/// Width the dashboard pane gets out of the window.
///
/// The chart is sized from this rather than the whole window, because the
/// sidebar holds a quarter of the row (`FillPortion(1)` next to `FillPortion(3)`).
fn dashboard_viewport(window_width: f32) -> f32 {
    window_width * DASHBOARD_PORTION
}
