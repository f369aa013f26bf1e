pub const INVALID_INPUT: &str = "invalid_input";
pub const INVALID_PARAMETER: &str = "invalid_parameter";
pub const ADDRESS_RESOLUTION: &str = "address_resolution";
pub const REMOTE_OPERATION: &str = "remote_operation";
pub const PARTIAL_COMPLETION: &str = "partial_completion";
pub const READ_ONLY: &str = "read_only";
