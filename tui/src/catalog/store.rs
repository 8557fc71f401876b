//! Client-side product cache keyed by id.
//!
//! The store only changes through [`StoreAction`]s applied by
//! [`ProductStore::reduce`]. Display order follows the backend's list order,
//! with newly created products appended.

use std::collections::HashMap;

use catalog_client::{Product, ProductId};

#[derive(Debug, Clone)]
pub(crate) enum StoreAction {
    /// Replace the whole cache with a fresh list.
    Reset(Vec<Product>),
    /// Append a product; an existing id is replaced in place.
    Insert(Product),
    /// Replace the product with the same id; no-op if it is not cached.
    Replace(Product),
    /// Drop the product with this id; no-op if it is not cached.
    Remove(ProductId),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct ProductStore {
    order: Vec<ProductId>,
    products: HashMap<ProductId, Product>,
}

impl ProductStore {
    pub(crate) fn reduce(mut self, action: StoreAction) -> Self {
        match action {
            StoreAction::Reset(list) => {
                self.order.clear();
                self.products.clear();
                for product in list {
                    // Duplicate ids keep the first position and the last body.
                    let id = product.id.clone();
                    if self.products.insert(id.clone(), product).is_none() {
                        self.order.push(id);
                    }
                }
            }
            StoreAction::Insert(product) => {
                let id = product.id.clone();
                if self.products.insert(id.clone(), product).is_none() {
                    self.order.push(id);
                }
            }
            StoreAction::Replace(product) => {
                if let Some(slot) = self.products.get_mut(&product.id) {
                    *slot = product;
                }
            }
            StoreAction::Remove(id) => {
                if self.products.remove(&id).is_some() {
                    self.order.retain(|existing| existing != &id);
                }
            }
        }
        self
    }

    pub(crate) fn len(&self) -> usize {
        self.order.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub(crate) fn get(&self, id: &ProductId) -> Option<&Product> {
        self.products.get(id)
    }

    pub(crate) fn get_index(&self, index: usize) -> Option<&Product> {
        self.order.get(index).and_then(|id| self.products.get(id))
    }

    pub(crate) fn position(&self, id: &ProductId) -> Option<usize> {
        self.order.iter().position(|existing| existing == id)
    }

    /// Products in display order.
    pub(crate) fn iter(&self) -> impl Iterator<Item = &Product> + '_ {
        self.order.iter().filter_map(|id| self.products.get(id))
    }
}

#[cfg(test)]
pub(crate) fn product(id: i64, name: &str, price: f64, stock: i64) -> Product {
    Product {
        id: ProductId::from(id),
        name: name.to_string(),
        description: None,
        price: catalog_client::Price::from(price),
        stock,
        image: None,
    }
}
