//! JSON REST API for the phonebook.
//!
//! Exposes axum [`Router`]s backed by any
//! [`phonebook_core::ContactDirectory`]. TLS and transport concerns are the
//! caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! let api = phonebook_api::phonebook_router(store.clone())
//!   .merge(phonebook_api::contacts_router(demo.clone()))
//!   .merge(phonebook_api::profile_router(vec!["dev".into()]));
//! Router::new().nest("/api", api)
//! ```

pub mod contacts;
pub mod error;
pub mod phonebook;
pub mod profile;

use std::sync::Arc;

use axum::{Router, routing::get};
use phonebook_core::ContactDirectory;

pub use error::ApiError;

/// The validating contact API under `/phonebook`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn phonebook_router<D>(dir: Arc<D>) -> Router<()>
where
  D: ContactDirectory + 'static,
{
  Router::new()
    .route(
      "/phonebook",
      get(phonebook::list::<D>).post(phonebook::create::<D>),
    )
    .route(
      "/phonebook/{id}",
      get(phonebook::get_one::<D>)
        .put(phonebook::update_one::<D>)
        .delete(phonebook::delete_one::<D>),
    )
    .route("/phonebook/phone/{phone_number}", get(phonebook::by_phone::<D>))
    .route("/phonebook/search/name/{name}", get(phonebook::search_by_name::<D>))
    .with_state(dir)
}

/// The non-validating demo API under `/contacts`.
pub fn contacts_router<D>(dir: Arc<D>) -> Router<()>
where
  D: ContactDirectory + 'static,
{
  Router::new()
    .route("/contacts", get(contacts::list::<D>).post(contacts::create::<D>))
    .route(
      "/contacts/{id}",
      get(contacts::get_one::<D>)
        .put(contacts::update_one::<D>)
        .delete(contacts::delete_one::<D>),
    )
    .with_state(dir)
}

/// `GET /profile`, reporting `profiles`.
pub fn profile_router(profiles: Vec<String>) -> Router<()> {
  Router::new()
    .route("/profile", get(profile::handler))
    .with_state(Arc::new(profiles))
}
