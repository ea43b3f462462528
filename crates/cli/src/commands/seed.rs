//! Seed the remote product store with the initial catalog.
//!
//! One-time setup operation: bulk-inserts the fixed product list through
//! the same store contract the admin core uses. Not part of the runtime
//! pipeline.

use rust_decimal::Decimal;
use tracing::{error, info};
use url::Url;

use sephyx_admin::store::{HttpProductStore, ProductStore};
use sephyx_core::{Category, DraftProduct, Rarity};

/// The launch catalog.
fn catalog_drafts() -> Vec<DraftProduct> {
    vec![
        DraftProduct {
            title: "VOID HOODIE".to_string(),
            price: Decimal::new(14999, 2),
            rarity: Rarity::Legendary,
            stock: 15,
            image: "https://images.unsplash.com/photo-1556821840-3a63f95609a7?w=400&h=400&fit=crop".to_string(),
            description: "Premium heavyweight hoodie with embedded LED fiber optics. Responds to sound and movement with dynamic light patterns.".to_string(),
            category: Category::Hoodies,
        },
        DraftProduct {
            title: "REBEL MASK".to_string(),
            price: Decimal::new(8999, 2),
            rarity: Rarity::Rare,
            stock: 25,
            image: "https://images.unsplash.com/photo-1578662996442-48f60103fc96?w=400&h=400&fit=crop".to_string(),
            description: "Cyberpunk-inspired face mask with integrated air filtration and holographic display.".to_string(),
            category: Category::Masks,
        },
        DraftProduct {
            title: "NEON JACKET".to_string(),
            price: Decimal::new(24999, 2),
            rarity: Rarity::Mythic,
            stock: 5,
            image: "https://images.unsplash.com/photo-1521572163474-6864f9cf17ab?w=400&h=400&fit=crop".to_string(),
            description: "Limited edition jacket with reactive neon strips and temperature regulation system.".to_string(),
            category: Category::Jackets,
        },
        DraftProduct {
            title: "CYBER PANTS".to_string(),
            price: Decimal::new(11999, 2),
            rarity: Rarity::Common,
            stock: 50,
            image: "https://images.unsplash.com/photo-1473966968600-fa801b869a1a?w=400&h=400&fit=crop".to_string(),
            description: "Tactical cargo pants with built-in device charging ports and hidden pockets.".to_string(),
            category: Category::Pants,
        },
        DraftProduct {
            title: "GLITCH GLOVES".to_string(),
            price: Decimal::new(6999, 2),
            rarity: Rarity::Rare,
            stock: 30,
            image: "https://images.unsplash.com/photo-1586985289906-406988974504?w=400&h=400&fit=crop".to_string(),
            description: "Haptic feedback gloves with fingerprint scanner and gesture control capabilities.".to_string(),
            category: Category::Accessories,
        },
        DraftProduct {
            title: "STREET HOODIE".to_string(),
            price: Decimal::new(9999, 2),
            rarity: Rarity::Common,
            stock: 75,
            image: "https://images.unsplash.com/photo-1515886657613-9f3515b0c78f?w=400&h=400&fit=crop".to_string(),
            description: "Classic streetwear hoodie with graffiti-inspired artwork and premium cotton blend.".to_string(),
            category: Category::Hoodies,
        },
        DraftProduct {
            title: "HACKER MASK".to_string(),
            price: Decimal::new(12999, 2),
            rarity: Rarity::Legendary,
            stock: 12,
            image: "https://images.unsplash.com/photo-1557804506-669a67965ba0?w=400&h=400&fit=crop".to_string(),
            description: "Anonymous-style mask with voice modulation and identity protection features.".to_string(),
            category: Category::Masks,
        },
        DraftProduct {
            title: "PUNK JACKET".to_string(),
            price: Decimal::new(19999, 2),
            rarity: Rarity::Rare,
            stock: 20,
            image: "https://images.unsplash.com/photo-1551698618-1dfe5d97d256?w=400&h=400&fit=crop".to_string(),
            description: "Distressed leather jacket with studs, patches, and customizable LED strips.".to_string(),
            category: Category::Jackets,
        },
    ]
}

/// Insert the launch catalog into the remote store.
///
/// # Errors
///
/// Returns an error if any insert fails; items inserted before the
/// failure remain in the store.
pub async fn catalog(store_url: Url) -> Result<(), Box<dyn std::error::Error>> {
    let store = HttpProductStore::new(store_url);
    let drafts = catalog_drafts();

    info!(count = drafts.len(), "Seeding remote store with catalog");

    let mut inserted = 0_usize;
    for draft in &drafts {
        match store.create_product(draft).await {
            Ok(product) => {
                inserted += 1;
                info!(id = %product.id, title = %product.title, "Inserted");
            }
            Err(e) => {
                error!(title = %draft.title, "Insert failed: {e}");
                return Err(e.into());
            }
        }
    }

    info!(inserted, "Seeding complete");
    Ok(())
}
