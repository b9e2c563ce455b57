use clap::ValueEnum;

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum Style {
    /// Mood, date, note and weather for each entry.
    Long,
    /// One line per entry.
    Short,
}
