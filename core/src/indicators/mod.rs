pub mod panel;
pub mod snapshot;
pub mod source;

pub use panel::{IndicatorPanel, IndicatorTicket, StatRow};
pub use snapshot::{IndicatorScope, IndicatorSnapshot};
pub use source::{IndicatorSource, MockIndicatorSource};
