// Deep enough for any reasonable script, shallow enough that the host stack
// survives the recursion with room to spare.
pub const DEFAULT_MAX_CALL_DEPTH: usize = 1024;

pub struct RuntimeConfig {
    pub max_call_depth: usize,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            // set default values here, unless overridden via command-line
            max_call_depth: DEFAULT_MAX_CALL_DEPTH,
        }
    }
}
