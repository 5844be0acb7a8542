//! Shared domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Upper bound on the number of images attached to a listing.
pub const MAX_IMAGES: usize = 3;

/// One catalog entry (e.g. a vehicle for sale).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Listing {
    /// Unique URL-safe identifier derived from the title. Never changes.
    pub slug: String,
    /// Human-readable title.
    pub title: String,
    /// Asking price, kept as free-form text.
    pub price: String,
    /// Browsing category (matched case-insensitively).
    #[serde(default)]
    pub category: String,
    /// Free-form mileage text.
    #[serde(default)]
    pub mileage: String,
    /// Long description shown on the detail page.
    #[serde(default)]
    pub description: String,
    /// Primary image, always equal to `images[0]` when images exist.
    #[serde(default)]
    pub image: String,
    /// Up to [`MAX_IMAGES`] image references in display order.
    #[serde(default)]
    pub images: Vec<String>,
    /// Whether the listing is shown on the home page. Omitted from JSON unless set.
    #[serde(default, skip_serializing_if = "is_false")]
    pub featured: bool,
}

fn is_false(value: &bool) -> bool {
    !*value
}

impl Listing {
    /// Replace the image list, keeping `image` pointed at the first entry.
    pub fn set_images(&mut self, images: Vec<String>) {
        self.image = images.first().cloned().unwrap_or_default();
        self.images = images;
    }

    /// Restore the `image`/`images` relationship after loading external data.
    ///
    /// Returns `true` when the listing had to be adjusted.
    pub fn normalize_images(&mut self) -> bool {
        if self.images.is_empty() {
            if self.image.is_empty() {
                return false;
            }
            self.images = vec![self.image.clone()];
            return true;
        }

        let mut changed = false;
        if self.images.len() > MAX_IMAGES {
            self.images.truncate(MAX_IMAGES);
            changed = true;
        }
        if self.image != self.images[0] {
            self.image = self.images[0].clone();
            changed = true;
        }
        changed
    }

    /// Case-insensitive category comparison used for browsing.
    pub fn in_category(&self, category: &str) -> bool {
        !self.category.is_empty() && self.category.to_lowercase() == category.trim().to_lowercase()
    }
}

/// Raw listing fields as submitted from the admin form.
///
/// Every field is optional so the same type serves both create and update.
/// On update, `None` keeps the stored value while `Some` replaces it.
#[allow(missing_docs)]
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListingInput {
    pub title: Option<String>,
    pub price: Option<String>,
    pub category: Option<String>,
    pub mileage: Option<String>,
    pub description: Option<String>,
    pub image1: Option<String>,
    pub image2: Option<String>,
    pub image3: Option<String>,
    pub featured: Option<String>,
}

impl ListingInput {
    /// Non-empty trimmed image references, in form order.
    pub fn images(&self) -> Vec<String> {
        [&self.image1, &self.image2, &self.image3]
            .into_iter()
            .filter_map(|value| value.as_deref())
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(str::to_string)
            .collect()
    }

    /// Checkbox-style truthiness: `on`, `true` or `1`.
    pub fn is_featured(&self) -> bool {
        matches!(
            self.featured.as_deref().map(str::trim),
            Some("on" | "true" | "1")
        )
    }
}

impl From<&Listing> for ListingInput {
    fn from(listing: &Listing) -> Self {
        let image = |index: usize| listing.images.get(index).cloned();
        Self {
            title: Some(listing.title.clone()),
            price: Some(listing.price.clone()),
            category: Some(listing.category.clone()),
            mileage: Some(listing.mileage.clone()),
            description: Some(listing.description.clone()),
            image1: image(0),
            image2: image(1),
            image3: image(2),
            featured: listing.featured.then(|| "on".to_string()),
        }
    }
}

/// A message left through the contact form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactMessage {
    /// Sender name.
    pub name: String,
    /// Sender email address.
    pub email: String,
    /// Message body.
    pub message: String,
    /// When the message was received, if recorded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub received_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn listing() -> Listing {
        Listing {
            slug: "2019-honda-civic".to_string(),
            title: "2019 Honda Civic".to_string(),
            price: "15000".to_string(),
            category: "Sedan".to_string(),
            mileage: String::new(),
            description: String::new(),
            image: String::new(),
            images: Vec::new(),
            featured: false,
        }
    }

    #[test]
    fn featured_is_omitted_unless_true() -> anyhow::Result<()> {
        let mut item = listing();
        let value = serde_json::to_value(&item)?;
        assert!(value.get("featured").is_none());

        item.featured = true;
        let value = serde_json::to_value(&item)?;
        assert_eq!(value["featured"], json!(true));
        Ok(())
    }

    #[test]
    fn optional_fields_default_when_missing() -> anyhow::Result<()> {
        let item: Listing =
            serde_json::from_value(json!({"slug": "a", "title": "A", "price": "1"}))?;
        assert_eq!(item.category, "");
        assert!(item.images.is_empty());
        assert!(!item.featured);
        Ok(())
    }

    #[test]
    fn normalize_images_aligns_primary_image() {
        let mut item = listing();
        item.image = "/img/old.jpg".to_string();
        item.images = vec!["/img/a.jpg".to_string(), "/img/b.jpg".to_string()];
        assert!(item.normalize_images());
        assert_eq!(item.image, "/img/a.jpg");

        let mut lone = listing();
        lone.image = "/img/only.jpg".to_string();
        assert!(lone.normalize_images());
        assert_eq!(lone.images, vec!["/img/only.jpg".to_string()]);

        assert!(!listing().normalize_images());
    }

    #[test]
    fn input_collects_trimmed_images_in_order() {
        let input = ListingInput {
            image1: Some("  ".to_string()),
            image2: Some(" /img/b.jpg ".to_string()),
            image3: Some("/img/c.jpg".to_string()),
            ..ListingInput::default()
        };
        assert_eq!(input.images(), vec!["/img/b.jpg", "/img/c.jpg"]);
    }

    #[test]
    fn featured_truthiness() {
        for (raw, expected) in [("on", true), ("true", true), ("1", true), ("off", false), ("", false)] {
            let input = ListingInput {
                featured: Some(raw.to_string()),
                ..ListingInput::default()
            };
            assert_eq!(input.is_featured(), expected, "value {raw:?}");
        }
        assert!(!ListingInput::default().is_featured());
    }

    #[test]
    fn category_match_is_case_insensitive() {
        let mut item = listing();
        item.category = "suv".to_string();
        assert!(item.in_category("SUV"));
        assert!(!item.in_category("Truck"));
    }
}
