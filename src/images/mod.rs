/// Tile image module
///
/// This module handles:
/// - Resolving catalog URIs (remote or local)
/// - Decoding pictures and cropping them to square tiles

pub mod loader;
