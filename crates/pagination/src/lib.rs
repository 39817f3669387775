//! Cursor pagination for list queries
//!
//! Lists are ordered by the composite key `(sortField, id)` so that the order
//! is total even when the sort field repeats. A page is fetched with one
//! extra row to learn whether another page follows, and the position of the
//! boundary row is handed back to the caller as an opaque cursor.
//!
//! - **`cursor`**: Encoding and validation of cursor tokens
//! - **`order`**: Ordering and "strictly after" filter fragments
//! - **`page`**: Request parsing, fetch plans and page assembly

pub mod cursor;
pub mod order;
pub mod page;

pub use cursor::Cursor;
pub use order::{after_cursor, order_by};
pub use page::{FetchPlan, Page, PageInfo, PageRequest};
