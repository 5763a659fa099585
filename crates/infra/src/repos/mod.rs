pub mod clients;
pub mod orders;
pub mod products;
pub mod reports;
pub mod users;

pub use clients::{CreateClientData, UpdateClientData};
pub use orders::{CreateOrderData, OrderState, UpdateOrderData};
pub use products::{CreateProductData, UpdateProductData};
pub use users::CreateUserData;
