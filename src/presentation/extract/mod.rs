mod audio_upload_request;
mod control_values;

pub use audio_upload_request::{AudioUploadRequest, FILE_FIELD, UploadError};
pub use control_values::{
    ControlValues, LANGUAGE_FIELD, LANGUAGE_HEADER, TASK_FIELD, TASK_HEADER, WANT_SRT_FIELD,
    WANT_SRT_HEADER, parse_flag,
};
