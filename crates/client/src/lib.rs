//! Client side of the inventory app: HTTP access to the JSON API, the
//! "last fetched" list state, and table/CSV presentation of that state.

pub mod api;
pub mod loaded;
pub mod view;

pub use api::{ApiClient, ClientError};
pub use loaded::LoadedList;
pub use view::ProductRow;
