pub mod request;

pub use request::CreateQuestionRequest;
