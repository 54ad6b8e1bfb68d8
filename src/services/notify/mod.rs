pub mod dispatcher;
pub mod publisher;

pub use dispatcher::{DispatchError, NotificationDispatcher};
pub use publisher::{HttpTopicPublisher, NoopPublisher, PublishError, TopicPublisher};
