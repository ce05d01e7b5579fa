// アプリケーション層モジュール
pub mod lookup_error;
pub mod lookup_request;
pub mod lookup_response;
pub mod persona_lookup_handler;

// 再エクスポート
pub use lookup_error::LookupError;
pub use lookup_request::{GatewayKind, LookupRequest, PERSONA_NAME_PARAM};
pub use lookup_response::{error_response, success_response, ErrorBody, ErrorKind, ResponseOptions};
pub use persona_lookup_handler::{failure_response, PersonaLookupHandler};
