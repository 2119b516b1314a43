pub mod error;
pub mod validation;
pub mod formats;
pub mod fs;

pub use error::{ConvertError, ConvertResult, PathError, ValidationError};
pub use validation::{validate_request, ValidatedRoots};
pub use formats::{OutputFormat, INPUT_EXTENSIONS, is_supported_input};
pub use fs::{
    ensure_parent_dir,
    write_atomic,
    lowercase_file_name,
};
