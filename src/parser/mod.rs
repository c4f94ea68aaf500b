pub mod chart_parser;

pub use chart_parser::{ChartParser, Parser};
