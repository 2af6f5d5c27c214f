use crate::error::FlexverError;

pub fn get_exit_code(error: &FlexverError) -> i32 {
    match error {
        FlexverError::InvalidVersionFormat(_)
        | FlexverError::InvalidConfig(_)
        | FlexverError::ValidationError(_) => 2,

        FlexverError::ConfigFile(_) | FlexverError::ConfigError(_) => 78, // EX_CONFIG

        _ => 1,
    }
}
