//! HTML presentation layer (Askama templates rendered by page handlers)

pub mod handlers;
