//! General Championship standings for an inter-hostel sports meet.
//!
//! The heart of the crate is [`standings::calculate`]; the rest loads its
//! inputs, keeps a table current as change notifications arrive and serves
//! it over HTTP.

pub mod config;
pub mod events;
pub mod live;
pub mod msg;
pub mod settings;
pub mod source;
pub mod standings;
pub mod state;
pub mod teams;
pub mod template;
pub mod util_resp;
pub mod validation;
