//! # user-service
//!
//! A small registration and login API over a single `users` collection.
//!
//! ## Endpoints
//!
//! - `POST /verificar-email` reports whether an email is already registered.
//! - `POST /cadastro` validates `{nome, email, senha}` and creates the user.
//! - `POST /login` checks an `{email, senha}` pair.
//!
//! ## Email uniqueness
//!
//! Registration checks for an existing record before inserting, and the store
//! rejects a duplicate email at write time as well. Both paths answer with the
//! same `400` body, so two clients racing for one address see exactly one
//! success.
//!
//! ## Credentials
//!
//! Passwords are stored and compared as submitted. There is no hashing and no
//! token or session issuance; a successful login only returns a confirmation.

pub mod api;
pub mod cli;
pub mod store;

#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes)]
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};
