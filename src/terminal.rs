use std::io::IsTerminal;

/// Terminal-interactivity seam injected into the app layer, so tests can
/// force either presentation path.
pub trait TerminalClient {
    /// Returns whether stdout is an interactive terminal.
    fn stdout_is_terminal(&self) -> bool;

    /// Returns whether stderr is an interactive terminal.
    fn stderr_is_terminal(&self) -> bool;
}

/// Terminal client backed by the real process streams.
pub struct SystemTerminalClient;

impl TerminalClient for SystemTerminalClient {
    fn stdout_is_terminal(&self) -> bool {
        std::io::stdout().is_terminal()
    }

    fn stderr_is_terminal(&self) -> bool {
        std::io::stderr().is_terminal()
    }
}
