use iced::widget::image::Handle;
use iced::widget::container;
use iced::{Element, Length, Task, Theme};
use std::collections::HashMap;
use tracing_subscriber::EnvFilter;

mod images;
mod state;
mod ui;

use images::loader::{self, LoadError};
use state::catalog::Catalog;
use state::challenge::Challenge;
use state::data::ImageKey;
use state::selection::Verdict;

/// Main application state
struct TileCheck {
    /// The widget instance: round, selection and random source
    challenge: Challenge,
    /// Decoded tile pictures, filled in as loads complete
    images: HashMap<ImageKey, Handle>,
}

/// Application messages (events)
#[derive(Debug, Clone)]
pub enum Message {
    /// User clicked the tile at this grid position
    TileClicked(usize),
    /// User clicked the "Reset" button
    Reset,
    /// User clicked the "Verify" button
    Verify,
    /// Background image load finished
    ImageLoaded(ImageKey, Result<Handle, LoadError>),
}

impl TileCheck {
    /// Create a new instance of the application and deal the first round
    fn new() -> (Self, Task<Message>) {
        let catalog = Catalog::load();

        // The catalog never changes, so each picture is loaded exactly once
        let loads = catalog.entries().map(|(key, uri)| {
            Task::perform(loader::load_tile(uri.to_string()), move |result| {
                Message::ImageLoaded(key, result)
            })
        });
        let task = Task::batch(loads.collect::<Vec<_>>());

        let challenge = Challenge::new(catalog);
        tracing::info!(keys = ?challenge.round().keys(), "tile check ready");

        (
            TileCheck {
                challenge,
                images: HashMap::new(),
            },
            task,
        )
    }

    /// Handle application messages and update state
    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::TileClicked(position) => {
                self.challenge.click(position);
            }
            Message::Verify => {
                if let Some(verdict) = self.challenge.verify() {
                    match verdict {
                        Verdict::Human => tracing::info!("human verified"),
                        Verdict::NotHuman => tracing::info!("verification rejected"),
                    }
                }
            }
            Message::Reset => {
                self.challenge.reset();
            }
            Message::ImageLoaded(key, Ok(handle)) => {
                tracing::debug!(key = %key, "tile image loaded");
                self.images.insert(key, handle);
            }
            Message::ImageLoaded(key, Err(err)) => {
                tracing::warn!(key = %key, error = %err, "tile image unavailable, showing alt text");
            }
        }

        Task::none()
    }

    /// Build the user interface
    fn view(&self) -> Element<'_, Message> {
        let presentation =
            ui::grid::present(self.challenge.round(), self.challenge.selection());

        container(ui::grid::view(&presentation, &self.images))
            .width(Length::Fill)
            .height(Length::Fill)
            .center_x(Length::Fill)
            .center_y(Length::Fill)
            .into()
    }

    /// Set the application theme
    fn theme(&self) -> Theme {
        Theme::Dark
    }
}

fn main() -> iced::Result {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    iced::application(
        "Tile Check",
        TileCheck::update,
        TileCheck::view,
    )
    .theme(TileCheck::theme)
    .centered()
    .run_with(TileCheck::new)
}
