pub mod card_issuer_service;
pub mod category_service;
pub mod gateway_service;
pub mod inventory_service;
pub mod manufacturer_service;
pub mod product_service;
pub mod transaction_service;
pub mod variant_service;
