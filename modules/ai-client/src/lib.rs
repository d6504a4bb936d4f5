pub mod error;
pub mod openai;
pub mod tool;
pub mod traits;
pub mod util;

pub use error::{AiError, Result};
pub use openai::OpenAi;
pub use tool::{DynTool, Tool, ToolDefinition, ToolWrapper};
pub use traits::{Agent, PromptBuilder};
pub use util::{strip_code_blocks, truncate_chars};
