/// Presentation sync: turns the current round and selection into what the
/// window should show, then into iced widgets.

use std::collections::HashMap;

use iced::widget::image::Handle;
use iced::widget::{button, column, container, mouse_area, row, text, Image, Row};
use iced::{Alignment, Border, Color, Element, Length, Theme};
use iced_aw::Wrap;

use crate::state::data::{ImageKey, Round, Tile, TILE_COUNT};
use crate::state::selection::{Selection, Verdict, PROMPT};
use crate::Message;

/// Edge length of a rendered tile, in logical pixels
pub const TILE_SIZE: f32 = 160.0;

const TILE_GAP: f32 = 6.0;
const SELECTED_BORDER: f32 = 4.0;

/// Everything the view needs to know about one tile
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileView {
    pub position: usize,
    pub key: ImageKey,
    pub selected: bool,
    pub alt: String,
}

/// Derived display state; recomputed in full on every render
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Presentation {
    pub tiles: [TileView; TILE_COUNT],
    pub show_reset: bool,
    pub show_verify: bool,
    pub prompt: &'static str,
    pub feedback: &'static str,
    pub verdict: Option<Verdict>,
}

/// Derive the presentation from state alone
pub fn present(round: &Round, selection: &Selection) -> Presentation {
    let tiles = std::array::from_fn(|position| {
        let tile: &Tile = &round.tiles()[position];
        TileView {
            position,
            key: tile.key,
            selected: selection.is_selected(position),
            alt: Tile::alt(position),
        }
    });

    let feedback = selection.feedback();
    let picked = selection.positions().len();

    Presentation {
        tiles,
        show_reset: picked > 0 || !feedback.is_empty(),
        show_verify: picked == 2 && !selection.is_locked(),
        prompt: PROMPT,
        feedback,
        verdict: selection.verdict(),
    }
}

/// Build the widget tree for a presentation
pub fn view<'a>(
    presentation: &Presentation,
    images: &HashMap<ImageKey, Handle>,
) -> Element<'a, Message> {
    let tiles: Vec<Element<'a, Message>> = presentation
        .tiles
        .iter()
        .map(|tile| tile_view(tile, images.get(&tile.key)))
        .collect();

    let grid = container(Wrap::with_elements(tiles))
        .max_width(3.0 * (TILE_SIZE + 2.0 * TILE_GAP));

    let mut controls: Row<'a, Message> = row![].spacing(12);
    if presentation.show_reset {
        controls = controls.push(
            button("Reset")
                .on_press(Message::Reset)
                .padding(10)
                .style(button::secondary),
        );
    }
    if presentation.show_verify {
        controls = controls.push(
            button("Verify")
                .on_press(Message::Verify)
                .padding(10)
                .style(button::primary),
        );
    }

    let verdict = presentation.verdict;
    let feedback = text(presentation.feedback)
        .size(18)
        .style(move |theme: &Theme| {
            let palette = theme.extended_palette();
            text::Style {
                color: match verdict {
                    Some(Verdict::Human) => Some(palette.success.base.color),
                    Some(Verdict::NotHuman) => Some(palette.danger.base.color),
                    None => None,
                },
            }
        });

    column![
        text(presentation.prompt).size(20),
        grid,
        controls,
        feedback,
    ]
    .spacing(20)
    .padding(40)
    .align_x(Alignment::Center)
    .into()
}

/// A single clickable tile: the picture, or its alt text while loading
fn tile_view<'a>(tile: &TileView, handle: Option<&Handle>) -> Element<'a, Message> {
    let content: Element<'a, Message> = match handle {
        Some(handle) => Image::new(handle.clone())
            .width(Length::Fixed(TILE_SIZE))
            .height(Length::Fixed(TILE_SIZE))
            .into(),
        None => container(text(tile.alt.clone()).size(14))
            .center_x(Length::Fixed(TILE_SIZE))
            .center_y(Length::Fixed(TILE_SIZE))
            .into(),
    };

    let selected = tile.selected;
    let framed = container(content)
        .padding(SELECTED_BORDER)
        .style(move |theme: &Theme| {
            let palette = theme.extended_palette();
            container::Style {
                border: Border {
                    color: if selected {
                        palette.primary.strong.color
                    } else {
                        Color::TRANSPARENT
                    },
                    width: SELECTED_BORDER,
                    radius: 6.0.into(),
                },
                background: Some(palette.background.weak.color.into()),
                ..container::Style::default()
            }
        });

    container(mouse_area(framed).on_press(Message::TileClicked(tile.position)))
        .padding(TILE_GAP)
        .into()
}
