pub mod record;
pub mod stream_item;

pub use record::{CREATED_AT_FORMAT, DecodeError, Record};
pub use stream_item::{ItemAuthor, StreamItem};
