pub mod article;
pub mod comment;
pub mod draft;
pub mod notification;
pub mod session;
pub mod theme;
pub mod user;

pub use article::{Article, ArticleStatus, LikeState};
pub use comment::{Comment, NewComment};
pub use draft::Draft;
pub use notification::{BlogRef, Notification, NotificationKind, Sender};
pub use session::{Credentials, Registration, Session};
pub use theme::Theme;
pub use user::User;
