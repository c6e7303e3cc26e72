//! Homepage session against a running backend
//!
//! ```bash
//! STOREFRONT_BASE_URL=http://localhost:5000 cargo run --example homepage -- 42
//! ```

use std::sync::Arc;

use storefront_client::{ClientConfig, PageTriggers, StorefrontPage, TracingNotifier, TracingRenderer};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    storefront_client::logger::init_logger("info,storefront_client=debug", false, None)?;

    let config = ClientConfig::from_env();
    let page = StorefrontPage::connect(&config, Arc::new(TracingRenderer), Arc::new(TracingNotifier))?;
    let triggers = PageTriggers::new(&page, &config);
    let workers = triggers.spawn();

    page.start().await;
    tracing::info!(cart = ?page.cart_snapshot().to_vec(), "Page ready");

    if let Some(product_id) = std::env::args().nth(1).and_then(|arg| arg.parse().ok()) {
        let outcome = page.add_to_cart(product_id).await;
        tracing::info!(product_id, ?outcome, "Add to cart finished");
    }

    // Simulate the tab regaining focus
    triggers.on_focus();
    tokio::time::sleep(config.reconcile_debounce * 3).await;

    triggers.shutdown();
    for worker in workers {
        worker.await?;
    }
    Ok(())
}
