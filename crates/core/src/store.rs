//! JSON file persistence for the listing collection.

use std::{
    collections::HashSet,
    fs,
    io::Write,
    path::{Path, PathBuf},
};

use tempfile::NamedTempFile;
use tracing::{info, warn};

use crate::{
    error::{CatalogError, CatalogResult},
    models::Listing,
};

/// Owns the in-memory collection and the file it mirrors.
#[derive(Debug)]
pub struct ItemStore {
    path: PathBuf,
    listings: Vec<Listing>,
}

impl ItemStore {
    /// Read the collection from `path`.
    ///
    /// A missing or unparsable file, an empty title or price, or a duplicate
    /// slug are all load errors: the catalog is never served half-loaded.
    pub fn load(path: impl Into<PathBuf>) -> CatalogResult<Self> {
        let path = path.into();
        let contents =
            fs::read_to_string(&path).map_err(|err| CatalogError::load(&path, err))?;
        let mut listings: Vec<Listing> =
            serde_json::from_str(&contents).map_err(|err| CatalogError::load(&path, err))?;

        let mut seen = HashSet::new();
        for listing in &mut listings {
            if listing.slug.trim().is_empty() {
                return Err(CatalogError::load(&path, "listing with empty slug"));
            }
            if !seen.insert(listing.slug.clone()) {
                return Err(CatalogError::load(
                    &path,
                    format!("duplicate slug `{}`", listing.slug),
                ));
            }
            if listing.title.trim().is_empty() || listing.price.trim().is_empty() {
                return Err(CatalogError::load(
                    &path,
                    format!("listing `{}` is missing a title or price", listing.slug),
                ));
            }
            if listing.normalize_images() {
                warn!("normalized images for listing {}", listing.slug);
            }
        }

        info!("loaded {} listings from {}", listings.len(), path.display());
        Ok(Self { path, listings })
    }

    /// Build a store around an existing collection without touching disk.
    pub fn with_listings(path: impl Into<PathBuf>, listings: Vec<Listing>) -> Self {
        Self {
            path: path.into(),
            listings,
        }
    }

    /// Backing file for the collection.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read-only view of the collection in insertion order.
    pub fn listings(&self) -> &[Listing] {
        &self.listings
    }

    pub(crate) fn listings_mut(&mut self) -> &mut Vec<Listing> {
        &mut self.listings
    }

    /// Rewrite the whole backing file from the in-memory collection.
    ///
    /// The data is written to a sibling temporary file and renamed into place.
    /// On failure the in-memory collection is left as is, so it may now be
    /// ahead of what is on disk.
    pub fn persist(&self) -> CatalogResult<()> {
        self.write_listings().map_err(|source| {
            warn!("failed to persist catalog to {}: {source}", self.path.display());
            CatalogError::Persistence {
                path: self.path.clone(),
                source,
            }
        })
    }

    fn write_listings(&self) -> std::io::Result<()> {
        let parent = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&parent)?;

        let serialised = serde_json::to_vec_pretty(&self.listings)?;
        let mut temp = NamedTempFile::new_in(&parent)?;
        if let Ok(existing) = fs::metadata(&self.path) {
            temp.as_file().set_permissions(existing.permissions())?;
        }
        temp.write_all(&serialised)?;
        temp.as_file().sync_all()?;
        temp.persist(&self.path).map_err(|err| err.error)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use serde_json::{json, Value};
    use tempfile::tempdir;

    #[test]
    fn load_then_persist_round_trip() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("items.json");
        fs::write(
            &path,
            json!([
                {"slug": "a", "title": "A", "price": "100", "images": ["/a.jpg"]},
                {"slug": "b", "title": "B", "price": "200", "featured": true}
            ])
            .to_string(),
        )?;

        let store = ItemStore::load(&path)?;
        assert_eq!(store.listings().len(), 2);
        assert_eq!(store.listings()[0].image, "/a.jpg");
        assert!(store.listings()[1].featured);

        store.persist()?;
        let written: Value = serde_json::from_str(&fs::read_to_string(&path)?)?;
        assert_eq!(written[0]["slug"], json!("a"));
        assert!(written[0].get("featured").is_none());
        assert_eq!(written[1]["featured"], json!(true));
        Ok(())
    }

    #[test]
    fn missing_file_fails_fast() {
        let dir = tempdir().expect("tempdir");
        let err = ItemStore::load(dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, CatalogError::Load { .. }));
    }

    #[test]
    fn corrupt_file_fails_fast() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("items.json");
        fs::write(&path, "{ not json")?;
        assert!(matches!(
            ItemStore::load(&path),
            Err(CatalogError::Load { .. })
        ));
        Ok(())
    }

    #[test]
    fn duplicate_slugs_are_rejected() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("items.json");
        fs::write(
            &path,
            json!([
                {"slug": "a", "title": "A", "price": "1"},
                {"slug": "a", "title": "A again", "price": "2"}
            ])
            .to_string(),
        )?;
        let err = ItemStore::load(&path).unwrap_err();
        assert!(err.to_string().contains("duplicate slug"));
        Ok(())
    }

    #[test]
    fn blank_price_is_rejected() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("items.json");
        fs::write(
            &path,
            json!([{"slug": "a", "title": "A", "price": " "}]).to_string(),
        )?;
        assert!(ItemStore::load(&path).is_err());
        Ok(())
    }

    #[cfg(unix)]
    #[test]
    fn persist_keeps_file_permissions() -> Result<()> {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempdir()?;
        let path = dir.path().join("items.json");
        fs::write(&path, "[]")?;
        fs::set_permissions(&path, fs::Permissions::from_mode(0o644))?;

        ItemStore::load(&path)?.persist()?;
        let mode = fs::metadata(&path)?.permissions().mode() & 0o777;
        assert_eq!(mode, 0o644);
        Ok(())
    }

    #[test]
    fn persist_creates_missing_parent_directory() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("nested").join("items.json");
        let store = ItemStore::with_listings(&path, Vec::new());
        store.persist()?;
        assert_eq!(fs::read_to_string(&path)?.trim(), "[]");
        Ok(())
    }
}
