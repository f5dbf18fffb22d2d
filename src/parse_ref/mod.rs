//! Reference-string parsing (§4.B): turning strings like
//! `a::b<T>(int) const &` into a structured [`ParsedRef`].

mod cursor;
mod model;
mod parser;

pub use model::{ParsedRef, ParsedRefComponent, TemplateArgument};
pub use parser::parse;
