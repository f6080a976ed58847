/// The image catalog: which URI each identity key resolves to.
///
/// The catalog is static for the life of the process. It is built from
/// the defaults below, or from a JSON file read once at startup:
///
/// ```json
/// { "img1": "https://...", "img2": "...", "img3": "...", "img4": "...", "img5": "..." }
/// ```

use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

use super::data::ImageKey;

/// Environment variable that points at an alternative catalog file
pub const CATALOG_ENV: &str = "TILE_CHECK_CATALOG";

/// Stable picture URLs, so the grid truly has 5 unique + 1 duplicate
const DEFAULT_URIS: [&str; 5] = [
    "https://picsum.photos/id/237/200/200",
    "https://picsum.photos/id/1025/200/200",
    "https://picsum.photos/id/1003/200/200",
    "https://picsum.photos/id/1011/200/200",
    "https://picsum.photos/id/103/200/200",
];

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid catalog JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("catalog entry {0} has an empty URI")]
    EmptyUri(ImageKey),
}

/// On-disk shape of the catalog file
#[derive(Deserialize, Debug)]
#[serde(deny_unknown_fields)]
struct CatalogFile {
    img1: String,
    img2: String,
    img3: String,
    img4: String,
    img5: String,
}

/// Where the catalog file was looked up
#[derive(Debug, Clone, PartialEq, Eq)]
enum CatalogPath {
    /// Named explicitly through `$TILE_CHECK_CATALOG`
    Requested(PathBuf),
    /// The per-user config location
    Default(PathBuf),
}

impl CatalogPath {
    fn path(&self) -> &Path {
        match self {
            CatalogPath::Requested(path) | CatalogPath::Default(path) => path,
        }
    }
}

/// Fixed mapping of the five identity keys to display URIs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    uris: [String; 5],
}

impl Default for Catalog {
    fn default() -> Self {
        Self {
            uris: DEFAULT_URIS.map(String::from),
        }
    }
}

impl Catalog {
    /// Load the catalog for this run.
    ///
    /// Looks at `$TILE_CHECK_CATALOG` first, then
    /// `<config dir>/tile-check/catalog.json`. A missing default file means
    /// the built-in catalog; a missing requested file or a broken file is
    /// logged and also falls back.
    pub fn load() -> Self {
        match Self::config_path() {
            Some(location) => Self::load_from(&location),
            None => {
                tracing::debug!("no config directory, using built-in catalog");
                Self::default()
            }
        }
    }

    fn load_from(location: &CatalogPath) -> Self {
        let path = location.path();

        if !path.exists() {
            match location {
                CatalogPath::Requested(_) => tracing::warn!(
                    path = %path.display(),
                    "{} names a missing file, using built-in catalog",
                    CATALOG_ENV
                ),
                CatalogPath::Default(_) => tracing::debug!(
                    path = %path.display(),
                    "no catalog file, using built-in catalog"
                ),
            }
            return Self::default();
        }

        match Self::from_path(path) {
            Ok(catalog) => {
                tracing::info!(path = %path.display(), "loaded image catalog");
                catalog
            }
            Err(err) => {
                tracing::warn!(error = %err, "ignoring catalog file, using built-in catalog");
                Self::default()
            }
        }
    }

    /// Get the path where the catalog override should be stored
    fn config_path() -> Option<CatalogPath> {
        if let Some(path) = std::env::var_os(CATALOG_ENV) {
            return Some(CatalogPath::Requested(PathBuf::from(path)));
        }

        let mut path = dirs::config_dir()?;
        path.push("tile-check");
        path.push("catalog.json");
        Some(CatalogPath::Default(path))
    }

    pub fn from_path(path: &Path) -> Result<Self, CatalogError> {
        let json = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// Parse a catalog from its JSON form
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile = serde_json::from_str(json)?;
        let uris = [file.img1, file.img2, file.img3, file.img4, file.img5]
            .map(|uri| uri.trim().to_string());

        if let Some((key, _)) = ImageKey::ALL
            .iter()
            .zip(&uris)
            .find(|(_, uri)| uri.is_empty())
        {
            return Err(CatalogError::EmptyUri(*key));
        }

        Ok(Self { uris })
    }

    pub fn uri(&self, key: ImageKey) -> &str {
        &self.uris[key.index()]
    }

    /// Every (key, uri) pair in catalog order
    pub fn entries(&self) -> impl Iterator<Item = (ImageKey, &str)> {
        ImageKey::ALL
            .into_iter()
            .zip(self.uris.iter().map(String::as_str))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_catalog_has_five_distinct_uris() {
        let catalog = Catalog::default();
        let mut uris: Vec<&str> = catalog.entries().map(|(_, uri)| uri).collect();
        uris.sort();
        uris.dedup();

        assert_eq!(uris.len(), 5);
        assert_eq!(catalog.uri(ImageKey::Img1), "https://picsum.photos/id/237/200/200");
    }

    #[test]
    fn test_parse_catalog() {
        let json = r#"{
            "img1": "file:///tmp/a.png",
            "img2": "/tmp/b.png",
            "img3": " https://example.test/c.jpg ",
            "img4": "https://example.test/d.jpg",
            "img5": "https://example.test/e.jpg"
        }"#;

        let catalog = Catalog::from_json(json).unwrap();

        assert_eq!(catalog.uri(ImageKey::Img2), "/tmp/b.png");
        assert_eq!(catalog.uri(ImageKey::Img3), "https://example.test/c.jpg");
    }

    #[test]
    fn test_missing_key_is_rejected() {
        let json = r#"{ "img1": "a", "img2": "b", "img3": "c", "img4": "d" }"#;
        assert!(matches!(Catalog::from_json(json), Err(CatalogError::Parse(_))));
    }

    #[test]
    fn test_unknown_key_is_rejected() {
        let json = r#"{ "img1": "a", "img2": "b", "img3": "c", "img4": "d", "img5": "e", "img6": "f" }"#;
        assert!(matches!(Catalog::from_json(json), Err(CatalogError::Parse(_))));
    }

    #[test]
    fn test_empty_uri_is_rejected() {
        let json = r#"{ "img1": "a", "img2": "b", "img3": "  ", "img4": "d", "img5": "e" }"#;
        assert!(matches!(
            Catalog::from_json(json),
            Err(CatalogError::EmptyUri(ImageKey::Img3))
        ));
    }

    #[test]
    fn test_missing_file_is_an_io_error() {
        let path = Path::new("/nonexistent/tile-check/catalog.json");
        assert!(matches!(
            Catalog::from_path(path),
            Err(CatalogError::Io { .. })
        ));
    }

    #[test]
    fn test_missing_requested_file_falls_back() {
        let location = CatalogPath::Requested(PathBuf::from("/nonexistent/requested.json"));
        assert_eq!(Catalog::load_from(&location), Catalog::default());
    }

    #[test]
    fn test_requested_file_is_loaded() {
        let path = std::env::temp_dir().join(format!("tile-check-catalog-{}.json", std::process::id()));
        let json = r#"{ "img1": "a.png", "img2": "b.png", "img3": "c.png", "img4": "d.png", "img5": "e.png" }"#;
        std::fs::write(&path, json).unwrap();

        let catalog = Catalog::load_from(&CatalogPath::Requested(path.clone()));
        std::fs::remove_file(&path).unwrap();

        assert_eq!(catalog.uri(ImageKey::Img4), "d.png");
    }

    #[test]
    fn test_broken_file_falls_back() {
        let path = std::env::temp_dir().join(format!("tile-check-broken-{}.json", std::process::id()));
        std::fs::write(&path, "{ not json").unwrap();

        let catalog = Catalog::load_from(&CatalogPath::Default(path.clone()));
        std::fs::remove_file(&path).unwrap();

        assert_eq!(catalog, Catalog::default());
    }
}
