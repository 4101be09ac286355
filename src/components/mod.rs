mod auth_view;
mod feed_view;
mod logo;
mod post_card;

pub use auth_view::AuthView;
pub use feed_view::FeedView;
pub use logo::Logo;
pub use post_card::PostCard;
