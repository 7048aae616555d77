use serde::Serialize;

// 业务错误码
//
// 0 表示成功；1xxx 通用错误；2xxx 作品相关；3xxx 导入导出；4xxx 二维码。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[repr(i32)]
pub enum ErrorCode {
    Success = 0,

    BadRequest = 1000,
    Forbidden = 1003,
    RateLimitExceeded = 1029,
    InternalServerError = 1500,

    TrabalhoNotFound = 2001,
    TrabalhoAlreadyExists = 2002,
    TrabalhoCreationFailed = 2003,
    TrabalhoUpdateFailed = 2004,
    TrabalhoDeleteFailed = 2005,
    TrabalhoInvalid = 2006,

    FileUploadFailed = 3001,
    FileSizeExceeded = 3002,
    ImportFileParseFailed = 3003,
    ImportFileDataInvalid = 3004,
    ExportFailed = 3005,

    QrGenerationFailed = 4001,
}
