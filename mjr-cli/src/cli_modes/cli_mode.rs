pub enum CliModeResult {
    /// The mode handled the invocation.
    Finish,
    /// The mode's flags were not given; try the next one.
    NothingToDo,
}
