// Catalog model and persistence
//
// The catalog is loaded once at startup and never mutated. Item identity is the URL.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Result type for catalog operations
pub type Result<T> = std::result::Result<T, Error>;

/// A single assessment product
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CatalogItem {
    /// Display name
    pub name: String,

    /// Product URL, unique within a catalog
    pub url: String,

    /// Free-text description
    pub description: String,
}

impl CatalogItem {
    /// Create a new catalog item
    pub fn new(
        name: impl Into<String>,
        url: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            description: description.into(),
        }
    }

    /// Text used for vectorization: name followed by description
    pub fn document(&self) -> String {
        format!("{} {}", self.name, self.description)
    }
}

/// Content hash over an ordered item list
///
/// Any change to a name, URL, description, or the item order changes the hash.
pub fn fingerprint(items: &[CatalogItem]) -> String {
    let mut hasher = blake3::Hasher::new();
    for item in items {
        for field in [&item.name, &item.url, &item.description] {
            hasher.update(field.as_bytes());
            hasher.update(&[0]);
        }
        hasher.update(&[0xff]);
    }
    hasher.finalize().to_hex().to_string()
}

/// On-disk layouts accepted by [`Catalog::load`]
#[derive(Deserialize)]
#[serde(untagged)]
enum CatalogFile {
    Records(Vec<CatalogItem>),
    Columns {
        names: Vec<String>,
        urls: Vec<String>,
        descriptions: Vec<String>,
    },
}

/// Ordered, validated, URL-unique collection of catalog items
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    items: Vec<CatalogItem>,
}

impl Catalog {
    /// Validate and wrap an ordered item list
    ///
    /// Fails on an empty list or an item with a blank name or URL.
    /// Repeated URLs are dropped, keeping the first occurrence.
    pub fn new(items: Vec<CatalogItem>) -> Result<Self> {
        if items.is_empty() {
            return Err(Error::EmptyCatalog);
        }

        let mut seen = HashSet::with_capacity(items.len());
        let mut kept = Vec::with_capacity(items.len());

        for (index, item) in items.into_iter().enumerate() {
            if item.url.trim().is_empty() {
                return Err(Error::MalformedItem {
                    index,
                    reason: "blank url".to_string(),
                });
            }
            if item.name.trim().is_empty() {
                return Err(Error::MalformedItem {
                    index,
                    reason: "blank name".to_string(),
                });
            }
            if !seen.insert(item.url.clone()) {
                warn!("Dropping duplicate catalog url at position {}: {}", index, item.url);
                continue;
            }
            kept.push(item);
        }

        debug!("Catalog validated with {} items", kept.len());
        Ok(Self { items: kept })
    }

    /// Build a catalog from an ordered list of assessment URLs
    ///
    /// Names and descriptions are derived from each URL. Blank and repeated
    /// URLs are skipped.
    pub fn from_urls<I, S>(urls: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut seen = HashSet::new();
        let mut items = Vec::new();

        for url in urls {
            let url = url.as_ref().trim();
            if url.is_empty() || !seen.insert(url.to_string()) {
                continue;
            }
            let name = crate::derive::name_from_url(url);
            let description = crate::derive::describe(&name);
            items.push(CatalogItem::new(name, url, description));
        }

        info!("Derived {} unique assessments from url list", items.len());
        Self::new(items)
    }

    /// Load a catalog from a JSON file
    ///
    /// Accepts either an array of `{name, url, description}` records or the
    /// column layout `{names, urls, descriptions}`.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let file: CatalogFile = serde_json::from_str(&content).map_err(|source| Error::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        let items = match file {
            CatalogFile::Records(items) => items,
            CatalogFile::Columns {
                names,
                urls,
                descriptions,
            } => {
                if names.len() != urls.len() || urls.len() != descriptions.len() {
                    return Err(Error::MalformedItem {
                        index: names.len().min(urls.len()).min(descriptions.len()),
                        reason: format!(
                            "column length mismatch: {} names, {} urls, {} descriptions",
                            names.len(),
                            urls.len(),
                            descriptions.len()
                        ),
                    });
                }
                names
                    .into_iter()
                    .zip(urls)
                    .zip(descriptions)
                    .map(|((name, url), description)| CatalogItem {
                        name,
                        url,
                        description,
                    })
                    .collect()
            }
        };

        let catalog = Self::new(items)?;
        info!("Loaded {} assessments from {}", catalog.len(), path.display());
        Ok(catalog)
    }

    /// Save the catalog as a JSON record array
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(&self.items).map_err(|source| Error::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        fs::write(path, json).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Stable content hash over the ordered items
    pub fn fingerprint(&self) -> String {
        fingerprint(&self.items)
    }

    /// Items in catalog order
    pub fn items(&self) -> &[CatalogItem] {
        &self.items
    }

    /// Item at a catalog position
    pub fn get(&self, index: usize) -> Option<&CatalogItem> {
        self.items.get(index)
    }

    /// Number of items
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Always false for a constructed catalog
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterate over items in catalog order
    pub fn iter(&self) -> std::slice::Iter<'_, CatalogItem> {
        self.items.iter()
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a CatalogItem;
    type IntoIter = std::slice::Iter<'a, CatalogItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

/// Catalog errors
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The catalog has no items
    #[error("Catalog is empty")]
    EmptyCatalog,

    /// An item failed validation
    #[error("Malformed catalog item at position {index}: {reason}")]
    MalformedItem {
        /// Position of the offending item
        index: usize,
        /// What was wrong with it
        reason: String,
    },

    /// Reading or writing the catalog file failed
    #[error("I/O error on catalog file {path:?}")]
    Io {
        /// File path
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// The catalog file is not valid JSON in a supported layout
    #[error("Failed to parse catalog file {path:?}")]
    Parse {
        /// File path
        path: PathBuf,
        /// Underlying error
        #[source]
        source: serde_json::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn sample_items() -> Vec<CatalogItem> {
        vec![
            CatalogItem::new("Java Programming", "url1", "java skills"),
            CatalogItem::new("Leadership Assessment", "url2", "leadership"),
        ]
    }

    #[test]
    fn test_empty_catalog_rejected() {
        assert!(matches!(Catalog::new(Vec::new()), Err(Error::EmptyCatalog)));
    }

    #[test]
    fn test_blank_url_rejected() {
        let items = vec![
            CatalogItem::new("Java", "url1", "d"),
            CatalogItem::new("Python", "  ", "d"),
        ];
        match Catalog::new(items) {
            Err(Error::MalformedItem { index, .. }) => assert_eq!(index, 1),
            other => panic!("Expected MalformedItem, got {:?}", other),
        }
    }

    #[test]
    fn test_duplicate_urls_dropped() {
        let mut items = sample_items();
        items.push(CatalogItem::new("Java Again", "url1", "other"));
        let catalog = Catalog::new(items).unwrap();

        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.get(0).unwrap().name, "Java Programming");
    }

    #[test]
    fn test_document_joins_name_and_description() {
        let item = CatalogItem::new("Java Programming", "url1", "java skills");
        assert_eq!(item.document(), "Java Programming java skills");
    }

    #[test]
    fn test_fingerprint_tracks_content() {
        let a = Catalog::new(sample_items()).unwrap();
        let b = Catalog::new(sample_items()).unwrap();
        assert_eq!(a.fingerprint(), b.fingerprint());

        let mut items = sample_items();
        items[1].description = "changed".to_string();
        let c = Catalog::new(items).unwrap();
        assert_ne!(a.fingerprint(), c.fingerprint());
    }

    #[test]
    fn test_load_record_layout() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"name":"Java Programming","url":"url1","description":"java skills"}}]"#
        )
        .unwrap();

        let catalog = Catalog::load(file.path()).unwrap();
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.items()[0].url, "url1");
    }

    #[test]
    fn test_load_column_layout() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"names":["A","B"],"urls":["u1","u2"],"descriptions":["da","db"]}}"#
        )
        .unwrap();

        let catalog = Catalog::load(file.path()).unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.items()[1].description, "db");
    }

    #[test]
    fn test_load_column_length_mismatch() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{"names":["A","B"],"urls":["u1"],"descriptions":["da","db"]}}"#)
            .unwrap();

        assert!(matches!(
            Catalog::load(file.path()),
            Err(Error::MalformedItem { .. })
        ));
    }

    #[test]
    fn test_load_missing_file() {
        let result = Catalog::load("/nonexistent/catalog.json");
        assert!(matches!(result, Err(Error::Io { .. })));
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.json");
        let catalog = Catalog::new(sample_items()).unwrap();

        catalog.save(&path).unwrap();
        assert_eq!(Catalog::load(&path).unwrap(), catalog);
    }

    #[test]
    fn test_from_urls_skips_blank_and_duplicates() {
        let catalog = Catalog::from_urls([
            "https://www.shl.com/products/product-catalog/view/java-8-new/",
            "",
            "https://www.shl.com/products/product-catalog/view/java-8-new/",
            "https://www.shl.com/products/product-catalog/view/verbal-ability/",
        ])
        .unwrap();

        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.items()[0].name, "Java 8");
        assert!(catalog.items()[0].description.contains("Java programming"));
        assert_eq!(catalog.items()[1].name, "Verbal Ability");
    }
}
