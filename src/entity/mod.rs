pub mod attributes;
pub mod card_issuers;
pub mod categories;
pub mod gateway_params;
pub mod gateways;
pub mod inventories;
pub mod manufacturers;
pub mod prices;
pub mod product_pics;
pub mod product_specs;
pub mod products;
pub mod stock_controls;
pub mod transaction_params;
pub mod transactions;
pub mod variant_products;
pub mod variants;

pub use attributes::Entity as Attributes;
pub use card_issuers::Entity as CardIssuers;
pub use categories::Entity as Categories;
pub use gateway_params::Entity as GatewayParams;
pub use gateways::Entity as Gateways;
pub use inventories::Entity as Inventories;
pub use manufacturers::Entity as Manufacturers;
pub use prices::Entity as Prices;
pub use product_pics::Entity as ProductPics;
pub use product_specs::Entity as ProductSpecs;
pub use products::Entity as Products;
pub use stock_controls::Entity as StockControls;
pub use transaction_params::Entity as TransactionParams;
pub use transactions::Entity as Transactions;
pub use variant_products::Entity as VariantProducts;
pub use variants::Entity as Variants;
