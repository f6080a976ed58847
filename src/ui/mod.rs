/// User interface module
///
/// - `grid.rs` - derives the visible state (selection markers, control
///   visibility, feedback) and builds the tile grid widgets

pub mod grid;
