//! Form draft for the create/edit modal.
//!
//! All fields are edited as text. [`ProductDraft::to_payload`] is the only
//! place text becomes typed values; create and update both go through it, so
//! a malformed draft never reaches the network.

use catalog_client::{Product, ProductPayload};
use thiserror::Error;
use url::Url;

/// Form fields in tab order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum DraftField {
    Name,
    Price,
    Description,
    Stock,
    Image,
}

impl DraftField {
    pub(crate) const ALL: [DraftField; 5] = [
        DraftField::Name,
        DraftField::Price,
        DraftField::Description,
        DraftField::Stock,
        DraftField::Image,
    ];

    pub(crate) fn label(self) -> &'static str {
        match self {
            DraftField::Name => "Product Name *",
            DraftField::Price => "Price *",
            DraftField::Description => "Description",
            DraftField::Stock => "Stock *",
            DraftField::Image => "Image URL",
        }
    }

    pub(crate) fn placeholder(self) -> Option<&'static str> {
        match self {
            DraftField::Image => Some("https://example.com/image.jpg"),
            _ => None,
        }
    }

    pub(crate) fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|f| *f == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    pub(crate) fn prev(self) -> Self {
        let idx = Self::ALL.iter().position(|f| *f == self).unwrap_or(0);
        Self::ALL[(idx + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub(crate) enum DraftError {
    #[error("Product name is required")]
    MissingName,

    #[error("Price is required")]
    MissingPrice,

    #[error("Price must be a number (got \"{0}\")")]
    InvalidPrice(String),

    #[error("Price cannot be negative")]
    NegativePrice,

    #[error("Stock is required")]
    MissingStock,

    #[error("Stock must be a whole number (got \"{0}\")")]
    InvalidStock(String),

    #[error("Stock cannot be negative")]
    NegativeStock,

    #[error("Image URL must be an http(s) URL (got \"{0}\")")]
    InvalidImageUrl(String),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct ProductDraft {
    pub name: String,
    pub description: String,
    pub price: String,
    pub stock: String,
    pub image: String,
}

impl ProductDraft {
    /// Stage an existing product for editing.
    pub(crate) fn from_product(product: &Product) -> Self {
        Self {
            name: product.name.clone(),
            description: product.description.clone().unwrap_or_default(),
            price: product.price.to_string(),
            stock: product.stock.to_string(),
            image: product.image.clone().unwrap_or_default(),
        }
    }

    pub(crate) fn field(&self, field: DraftField) -> &str {
        match field {
            DraftField::Name => &self.name,
            DraftField::Price => &self.price,
            DraftField::Description => &self.description,
            DraftField::Stock => &self.stock,
            DraftField::Image => &self.image,
        }
    }

    pub(crate) fn field_mut(&mut self, field: DraftField) -> &mut String {
        match field {
            DraftField::Name => &mut self.name,
            DraftField::Price => &mut self.price,
            DraftField::Description => &mut self.description,
            DraftField::Stock => &mut self.stock,
            DraftField::Image => &mut self.image,
        }
    }

    /// Convert the draft into the request body, rejecting anything the
    /// backend would have to coerce.
    pub(crate) fn to_payload(&self) -> Result<ProductPayload, DraftError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(DraftError::MissingName);
        }

        let price = parse_price(&self.price)?;
        let stock = parse_stock(&self.stock)?;

        let image = self.image.trim();
        if !image.is_empty() {
            let valid = Url::parse(image)
                .map(|url| matches!(url.scheme(), "http" | "https"))
                .unwrap_or(false);
            if !valid {
                return Err(DraftError::InvalidImageUrl(image.to_string()));
            }
        }

        Ok(ProductPayload {
            name: name.to_string(),
            description: self.description.trim().to_string(),
            price,
            stock,
            image: image.to_string(),
        })
    }
}

fn parse_price(text: &str) -> Result<f64, DraftError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(DraftError::MissingPrice);
    }
    let price: f64 = text
        .parse()
        .map_err(|_| DraftError::InvalidPrice(text.to_string()))?;
    if !price.is_finite() {
        return Err(DraftError::InvalidPrice(text.to_string()));
    }
    if price < 0.0 {
        return Err(DraftError::NegativePrice);
    }
    Ok(price)
}

fn parse_stock(text: &str) -> Result<i64, DraftError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(DraftError::MissingStock);
    }
    let stock: i64 = text
        .parse()
        .map_err(|_| DraftError::InvalidStock(text.to_string()))?;
    if stock < 0 {
        return Err(DraftError::NegativeStock);
    }
    Ok(stock)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::store::product;
    use pretty_assertions::assert_eq;

    fn valid_draft() -> ProductDraft {
        ProductDraft {
            name: "  Mug ".to_string(),
            description: "Stoneware".to_string(),
            price: "9.99".to_string(),
            stock: "5".to_string(),
            image: String::new(),
        }
    }

    #[test]
    fn converts_valid_draft() {
        let payload = valid_draft().to_payload().unwrap();
        assert_eq!(
            payload,
            ProductPayload {
                name: "Mug".to_string(),
                description: "Stoneware".to_string(),
                price: 9.99,
                stock: 5,
                image: String::new(),
            }
        );
    }

    #[test]
    fn from_product_renders_numbers_as_text() {
        let mut source = product(1, "Mug", 9.99, 5);
        source.image = Some("https://example.com/mug.jpg".to_string());
        let draft = ProductDraft::from_product(&source);

        assert_eq!(draft.name, "Mug");
        assert_eq!(draft.price, "9.99");
        assert_eq!(draft.stock, "5");
        assert_eq!(draft.description, "");
        assert_eq!(draft.image, "https://example.com/mug.jpg");
        assert_eq!(draft.to_payload().unwrap().price, 9.99);
    }

    #[test]
    fn rejects_missing_required_fields() {
        let mut draft = valid_draft();
        draft.name = "   ".to_string();
        assert_eq!(draft.to_payload(), Err(DraftError::MissingName));

        let mut draft = valid_draft();
        draft.price.clear();
        assert_eq!(draft.to_payload(), Err(DraftError::MissingPrice));

        let mut draft = valid_draft();
        draft.stock.clear();
        assert_eq!(draft.to_payload(), Err(DraftError::MissingStock));
    }

    #[test]
    fn rejects_non_numeric_price_and_stock() {
        let mut draft = valid_draft();
        draft.price = "abc".to_string();
        assert_eq!(
            draft.to_payload(),
            Err(DraftError::InvalidPrice("abc".to_string()))
        );

        let mut draft = valid_draft();
        draft.price = "NaN".to_string();
        assert_eq!(
            draft.to_payload(),
            Err(DraftError::InvalidPrice("NaN".to_string()))
        );

        let mut draft = valid_draft();
        draft.stock = "2.5".to_string();
        assert_eq!(
            draft.to_payload(),
            Err(DraftError::InvalidStock("2.5".to_string()))
        );
    }

    #[test]
    fn rejects_negative_numbers() {
        let mut draft = valid_draft();
        draft.price = "-1".to_string();
        assert_eq!(draft.to_payload(), Err(DraftError::NegativePrice));

        let mut draft = valid_draft();
        draft.stock = "-3".to_string();
        assert_eq!(draft.to_payload(), Err(DraftError::NegativeStock));
    }

    #[test]
    fn validates_image_url_only_when_present() {
        let mut draft = valid_draft();
        draft.image = "not a url".to_string();
        assert_eq!(
            draft.to_payload(),
            Err(DraftError::InvalidImageUrl("not a url".to_string()))
        );

        draft.image = "https://example.com/mug.jpg".to_string();
        assert_eq!(
            draft.to_payload().unwrap().image,
            "https://example.com/mug.jpg"
        );
    }

    #[test]
    fn field_order_wraps() {
        assert_eq!(DraftField::Image.next(), DraftField::Name);
        assert_eq!(DraftField::Name.prev(), DraftField::Image);
        assert_eq!(DraftField::Price.next(), DraftField::Description);
    }
}
