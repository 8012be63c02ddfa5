pub mod chart;
pub mod range_tabs;

pub use range_tabs::RangeTabs;
