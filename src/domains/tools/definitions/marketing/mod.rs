//! Marketing tools module.
//!
//! Tools for a digital marketing agency:
//! - `content_ideas`: social media post ideas per sector and platform
//! - `hashtags`: hashtag recommendations
//! - `calendar`: one-week publication calendar
//! - `performance`: simulated content performance report
//! - `engagement`: strategies to improve engagement
//!
//! Randomized tools draw from the generator passed by the dispatcher, so
//! their output is reproducible under a fixed seed.

pub mod calendar;
pub mod common;
pub mod content_ideas;
pub mod engagement;
pub mod hashtags;
pub mod performance;

pub use calendar::{CalendarParams, CalendarTool};
pub use content_ideas::{ContentIdeasParams, ContentIdeasTool};
pub use engagement::{EngagementParams, EngagementTool};
pub use hashtags::{HashtagsParams, HashtagsTool};
pub use performance::{PerformanceParams, PerformanceTool};
