pub mod card;
pub mod comment;
pub mod mixed;
pub mod post;
pub mod record;
pub mod sort;
pub mod time;

pub use card::{Card, EnrichmentResult, PostInfo};
pub use comment::Comment;
pub use mixed::MixedItem;
pub use post::{Post, PostType};
pub use record::Record;
pub use sort::SortOption;
