//! # Repository Module
//!
//! Repositories sit between the screen state holders and the DAOs.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  CatalogState / AuthState                                              │
//! │       │                                                                 │
//! │       │  db.products().get_all_products()                              │
//! │       ▼                                                                 │
//! │  ProductRepository            UserRepository                           │
//! │  ├── insert_product           ├── register_user  (validate + hash)    │
//! │  ├── replace_product          └── login_user     (generic miss)        │
//! │  ├── get_all_products                │                                  │
//! │  ├── observe_products                │                                  │
//! │  └── delete_product                  │                                  │
//! │       │                              │                                  │
//! │       ▼                              ▼                                  │
//! │  Arc<dyn ProductDao>          Arc<dyn UserDao>                         │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! - [`ProductRepository`](product::ProductRepository) - catalog CRUD and change feed
//! - [`UserRepository`](user::UserRepository) - registration and login

pub mod product;
pub mod user;
