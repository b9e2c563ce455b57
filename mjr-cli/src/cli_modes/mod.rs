mod calendar_mode;
mod cli_mode;
mod delete_mode;
mod editor_utils;
mod export_mode;
mod read_mode;
mod stats_mode;
mod weather_mode;
mod write_mode;

pub use calendar_mode::calendar_mode;
pub use cli_mode::CliModeResult;
pub use delete_mode::delete_mode;
pub use export_mode::export_mode;
pub use read_mode::read_mode;
pub use stats_mode::stats_mode;
pub use weather_mode::weather_mode;
pub use write_mode::write_mode;
