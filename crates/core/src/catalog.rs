//! Catalog reads and admin mutations over the item store.

use std::{collections::BTreeSet, sync::Arc};

use parking_lot::RwLock;
use tracing::info;

use crate::{
    error::{CatalogError, CatalogResult},
    models::{Listing, ListingInput},
    slug,
    store::ItemStore,
};

/// Thread-safe handle to the listing collection.
///
/// Every mutation holds the write lock for the whole mutate-then-persist step,
/// so concurrent admin submissions are applied one after another.
#[derive(Clone)]
pub struct Catalog {
    inner: Arc<RwLock<ItemStore>>,
}

impl Catalog {
    /// Wrap a loaded store.
    pub fn new(store: ItemStore) -> Self {
        Self {
            inner: Arc::new(RwLock::new(store)),
        }
    }

    /// Every listing in insertion order.
    pub fn all(&self) -> Vec<Listing> {
        self.inner.read().listings().to_vec()
    }

    /// Look up a listing by slug.
    pub fn find_by_slug(&self, slug: &str) -> Option<Listing> {
        self.inner
            .read()
            .listings()
            .iter()
            .find(|listing| listing.slug == slug)
            .cloned()
    }

    /// Listings whose category matches, ignoring case.
    pub fn find_by_category(&self, category: &str) -> Vec<Listing> {
        self.inner
            .read()
            .listings()
            .iter()
            .filter(|listing| listing.in_category(category))
            .cloned()
            .collect()
    }

    /// Listings flagged for the home page.
    pub fn list_featured(&self) -> Vec<Listing> {
        self.inner
            .read()
            .listings()
            .iter()
            .filter(|listing| listing.featured)
            .cloned()
            .collect()
    }

    /// Distinct categories, lower-cased and sorted.
    pub fn categories(&self) -> Vec<String> {
        self.inner
            .read()
            .listings()
            .iter()
            .map(|listing| listing.category.trim().to_lowercase())
            .filter(|category| !category.is_empty())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Add a new listing built from `input` and persist the collection.
    pub fn create(&self, input: &ListingInput) -> CatalogResult<Listing> {
        let (title, price) = required_fields(input)?;

        let mut store = self.inner.write();
        let slug = slug::generate(
            &title,
            store.listings().iter().map(|listing| listing.slug.as_str()),
        );

        let mut listing = Listing {
            slug,
            title,
            price,
            category: trimmed(&input.category),
            mileage: trimmed(&input.mileage),
            description: trimmed(&input.description),
            image: String::new(),
            images: Vec::new(),
            featured: input.is_featured(),
        };
        listing.set_images(input.images());

        store.listings_mut().push(listing.clone());
        info!("created listing {}", listing.slug);
        store.persist()?;
        Ok(listing)
    }

    /// Merge `input` over the listing at `slug` and persist the collection.
    ///
    /// Omitted optional fields keep their stored value. Images are only
    /// replaced when at least one is supplied. The slug never changes.
    pub fn update(&self, slug: &str, input: &ListingInput) -> CatalogResult<Listing> {
        let mut store = self.inner.write();
        let index = position(&store, slug)?;
        let (title, price) = required_fields(input)?;

        let listing = &mut store.listings_mut()[index];
        listing.title = title;
        listing.price = price;
        if let Some(category) = &input.category {
            listing.category = category.trim().to_string();
        }
        if let Some(mileage) = &input.mileage {
            listing.mileage = mileage.trim().to_string();
        }
        if let Some(description) = &input.description {
            listing.description = description.trim().to_string();
        }
        let images = input.images();
        if !images.is_empty() {
            listing.set_images(images);
        }
        listing.featured = input.is_featured();

        let updated = listing.clone();
        info!("updated listing {}", updated.slug);
        store.persist()?;
        Ok(updated)
    }

    /// Remove the listing at `slug` and persist the collection.
    ///
    /// A missing slug is reported as [`CatalogError::NotFound`].
    pub fn delete(&self, slug: &str) -> CatalogResult<Listing> {
        let mut store = self.inner.write();
        let index = position(&store, slug)?;
        let removed = store.listings_mut().remove(index);
        info!("deleted listing {}", removed.slug);
        store.persist()?;
        Ok(removed)
    }
}

fn position(store: &ItemStore, slug: &str) -> CatalogResult<usize> {
    store
        .listings()
        .iter()
        .position(|listing| listing.slug == slug)
        .ok_or_else(|| CatalogError::NotFound(slug.to_string()))
}

fn required_fields(input: &ListingInput) -> CatalogResult<(String, String)> {
    let title = trimmed(&input.title);
    let price = trimmed(&input.price);
    if title.is_empty() || price.is_empty() {
        return Err(CatalogError::validation("Title and price are required."));
    }
    Ok((title, price))
}

fn trimmed(value: &Option<String>) -> String {
    value
        .as_deref()
        .map(str::trim)
        .unwrap_or_default()
        .to_string()
}
