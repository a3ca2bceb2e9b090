//! Twitter domain models

mod article;
mod language;
mod media;
mod tweet;

pub use article::Article;
pub use language::Language;
pub use media::decode_media_urls;
pub use tweet::Tweet;
