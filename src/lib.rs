pub mod demo_app;
pub mod demo_doc;
pub mod event_bus;
pub mod event_source;
pub mod indicator;
pub mod panic_handler;
pub mod settings;
pub mod theme;
pub mod viewer;
pub mod widget;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use event_bus::{EventBus, SubscriptionId, Topic};
pub use indicator::{IndicatorState, KeyOutcome, PageIndicator};
pub use viewer::{Viewer, ViewerSnapshot};
pub use widget::PageNumberBar;
