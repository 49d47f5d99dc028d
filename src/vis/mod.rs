//! Module providing data visualization functionality
//!
//! `ascii` holds generic terminal charts; `weather` builds the charts for
//! yearly trends, seasonal comparison and the forecast.

pub mod ascii;
pub mod weather;

pub use self::ascii::{BarChart, Chart, ChartConfig, ChartStyle, LinePlot, Sparkline};
pub use self::weather::{plot_future_trend, plot_seasonal_comparison, plot_yearly_trends};
