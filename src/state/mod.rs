/// State management module
///
/// This module handles all widget state, including:
/// - Shared data structures (data.rs)
/// - The static image catalog and its JSON override (catalog.rs)
/// - Round generation and the injectable random source (round.rs)
/// - The selection state machine (selection.rs)
/// - The widget instance tying them together (challenge.rs)

pub mod catalog;
pub mod challenge;
pub mod data;
pub mod round;
pub mod selection;
