pub mod momentum;
pub mod moving_average;

pub use momentum::{latest_rsi, relative_strength_index, RSI_PERIOD};
pub use moving_average::{
    averaged_series, ma3_working_series, simple_moving_average, working_series, MA_WINDOW,
};
