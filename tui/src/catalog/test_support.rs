//! Fakes and helpers shared by the catalog unit tests.

use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::mpsc::{self, Receiver};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use catalog_client::{CatalogApi, CatalogError, Price, Product, ProductId, ProductPayload};
use ratatui::Terminal;
use ratatui::backend::TestBackend;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;

use super::requests::{CatalogOutcome, CatalogResponse};
use super::CatalogManager;
use crate::app_event::AppEvent;
use crate::app_event_sender::AppEventSender;

/// In-memory backend. Operations listed in `failing` answer with an error.
#[derive(Default)]
pub(crate) struct FakeCatalogApi {
    pub products: Mutex<Vec<Product>>,
    pub failing: Mutex<Vec<&'static str>>,
    pub calls: Mutex<Vec<String>>,
    next_id: AtomicI64,
}

impl FakeCatalogApi {
    pub(crate) fn with_products(products: Vec<Product>) -> Self {
        let api = Self::default();
        *api.products.lock().unwrap() = products;
        api
    }

    pub(crate) fn fail(&self, operation: &'static str) {
        self.failing.lock().unwrap().push(operation);
    }

    pub(crate) fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: String) -> Result<(), CatalogError> {
        let operation = call.split(' ').next().unwrap_or_default().to_string();
        self.calls.lock().unwrap().push(call);
        if self.failing.lock().unwrap().contains(&operation.as_str()) {
            return Err(CatalogError::Status {
                status: 500,
                body: "boom".to_string(),
            });
        }
        Ok(())
    }
}

fn from_payload(id: ProductId, payload: &ProductPayload) -> Product {
    let non_empty = |s: &str| (!s.is_empty()).then(|| s.to_string());
    Product {
        id,
        name: payload.name.clone(),
        description: non_empty(&payload.description),
        price: Price::from(payload.price),
        stock: payload.stock,
        image: non_empty(&payload.image),
    }
}

#[async_trait]
impl CatalogApi for FakeCatalogApi {
    async fn list_products(&self) -> Result<Vec<Product>, CatalogError> {
        self.record("list".to_string())?;
        Ok(self.products.lock().unwrap().clone())
    }

    async fn create_product(&self, payload: &ProductPayload) -> Result<Product, CatalogError> {
        self.record(format!("create {}", payload.name))?;
        let id = 100 + self.next_id.fetch_add(1, Ordering::SeqCst);
        let product = from_payload(ProductId::from(id), payload);
        self.products.lock().unwrap().push(product.clone());
        Ok(product)
    }

    async fn update_product(
        &self,
        id: &ProductId,
        payload: &ProductPayload,
    ) -> Result<Product, CatalogError> {
        self.record(format!("update {id}"))?;
        let mut products = self.products.lock().unwrap();
        let slot = products
            .iter_mut()
            .find(|p| &p.id == id)
            .ok_or_else(|| CatalogError::Status {
                status: 404,
                body: "not found".to_string(),
            })?;
        *slot = from_payload(id.clone(), payload);
        Ok(slot.clone())
    }

    async fn delete_product(&self, id: &ProductId) -> Result<(), CatalogError> {
        self.record(format!("delete {id}"))?;
        self.products.lock().unwrap().retain(|p| &p.id != id);
        Ok(())
    }
}

pub(crate) fn manager_with_api(api: Arc<FakeCatalogApi>) -> (CatalogManager, Receiver<AppEvent>) {
    let (tx, rx) = mpsc::channel();
    let manager = CatalogManager::new(api, AppEventSender::new(tx), "₱");
    (manager, rx)
}

pub(crate) fn test_manager() -> (CatalogManager, Receiver<AppEvent>) {
    manager_with_api(Arc::new(FakeCatalogApi::default()))
}

/// Apply a successful list response without going through the runtime.
pub(crate) fn seed(manager: &mut CatalogManager, products: Vec<Product>) {
    let ticket = manager.requests.issue_list();
    manager.on_response(CatalogResponse {
        ticket,
        outcome: CatalogOutcome::Listed(Ok(products)),
    });
}

pub(crate) fn manager_with_products(
    products: Vec<Product>,
) -> (CatalogManager, Receiver<AppEvent>) {
    let (mut manager, rx) = test_manager();
    seed(&mut manager, products);
    (manager, rx)
}

/// Block until the next catalog response arrives, skipping other events.
pub(crate) fn next_response(rx: &Receiver<AppEvent>) -> CatalogResponse {
    loop {
        match rx.recv_timeout(Duration::from_secs(5)) {
            Ok(AppEvent::Catalog(response)) => return response,
            Ok(_) => continue,
            Err(err) => panic!("no catalog response: {err}"),
        }
    }
}

pub(crate) fn render_to_string(manager: &CatalogManager, width: u16, height: u16) -> (String, Buffer) {
    let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
    terminal
        .draw(|f| {
            let area = Rect::new(0, 0, width, height);
            manager.render(area, f.buffer_mut());
        })
        .unwrap();

    let buffer = terminal.backend().buffer().clone();
    let mut lines = Vec::new();
    for y in 0..height {
        let mut line = String::new();
        for x in 0..width {
            line.push(buffer[(x, y)].symbol().chars().next().unwrap_or(' '));
        }
        lines.push(line.trim_end().to_string());
    }
    (lines.join("\n"), buffer)
}
