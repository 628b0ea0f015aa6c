mod body;
mod flash;
mod form_request;
pub mod input;
mod request;
mod response;

pub use body::{collect_body, parse_form, parse_json};
pub use flash::{Flash, FlashKey, FlashLevel, FLASH_COOKIE};
pub use form_request::{FormRequest, Submission};
pub use request::{Request, RequestBuilder};
pub use response::{HttpResponse, Redirect, Response};

