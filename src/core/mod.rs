// Public modules
pub mod console;
pub mod defaults;
pub mod error;
pub mod input;
pub mod mode;
pub mod prompt;
pub mod tty;
pub mod width;
pub mod wrap;

// Internal modules - not part of public API
pub(crate) mod paths;

// Re-export common types for convenience
pub use console::{Console, MemoryOutput};
pub use error::{Error, ErrorCode, Result};
pub use input::{InputSource, ReadOutcome, ScriptedAnswer, ScriptedInput, StdinSource};
pub use mode::{ConfiguredMode, FixedMode, InteractionMode};
pub use prompt::{Choice, DefaultSpec, PromptEngine, SelectPrompt, TextPrompt, YesNoPrompt};
pub use width::{OutputStream, StaticTerminal, SystemTerminal, TerminalEnv};
pub use wrap::WrapRequest;
